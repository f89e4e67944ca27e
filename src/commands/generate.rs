use crate::ManifestContext;
use anyhow::{Context, Result};

/// Generate the manifest once and list what went into it
///
/// The summary goes to stderr, the filenames to stdout, one per line.
///
/// # Errors
///
/// Returns an error if:
/// - The media directory cannot be read
/// - The manifest file cannot be written
pub fn execute(ctx: &ManifestContext) -> Result<()> {
    let generator = ctx.generator();
    let manifest = generator.generate().with_context(|| {
        format!(
            "Failed to generate manifest for {}",
            generator.media_dir().display()
        )
    })?;

    super::print_generated(generator.manifest_name(), &manifest);
    for file in &manifest {
        println!("  - {file}");
    }

    Ok(())
}
