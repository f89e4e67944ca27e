use crate::ManifestContext;
use crate::output;
use crate::watch::WatchLoop;
use anyhow::{Context, Result};

/// Generate the manifest, then keep it current until the process is stopped
///
/// # Errors
///
/// Returns an error if:
/// - The filesystem watcher cannot be started
/// - Any generation fails to read the directory or write the manifest
pub fn execute(ctx: &ManifestContext) -> Result<()> {
    let generator = ctx.generator();
    let media_dir = generator.media_dir().display().to_string();
    let manifest_file = generator.manifest_name().to_string();

    output::info(&format!("Watching {media_dir} for changes..."));
    output::info(&format!(
        "   Drop images into {media_dir} - {manifest_file} auto-updates"
    ));
    output::info("   Press Ctrl+C to stop\n");
    output::verbose(&format!(
        "Quiet period: {}",
        humantime::format_duration(ctx.quiet_period())
    ));

    let mut watch_loop = WatchLoop::new(generator, ctx.quiet_period())
        .with_context(|| format!("Failed to start watching {media_dir}"))?;

    watch_loop
        .run(|trigger, manifest| {
            if let Some(name) = trigger {
                output::action("\nDetected", name);
            }
            super::print_generated(&manifest_file, manifest);
        })
        .context("Watch loop stopped")?;

    Ok(())
}
