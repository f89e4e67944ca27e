/// One-shot generation.
pub mod generate;
/// Watch mode.
pub mod watch;

use crate::manifest::Manifest;
use crate::output;

/// Prints the generation summary line.
pub fn print_generated(manifest_file: &str, manifest: &Manifest) {
    output::success(&output::generation_summary(manifest_file, manifest.len()));
}
