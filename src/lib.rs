#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # media-manifest
//!
//! Keeps a JSON manifest of the images sitting in a media folder. The manifest is a
//! sorted array of filenames that front-ends can fetch instead of listing the
//! directory themselves.
//!
//! ## Modes
//!
//! - **One-shot**: scan the folder, write `manifest.json`, print what was found.
//! - **Watch**: do the same once, then listen for filesystem changes and
//!   regenerate after a quiet period, once per burst of activity.
//!
//! ## Architecture
//!
//! - [`manifest`]: allow-list filtering, sorting and writing the manifest
//! - [`watch`]: the debounced watch loop built on `notify`
//! - [`config`]: TOML configuration loading and validation
//! - [`commands`]: the one-shot and watch entry points used by the binary
//! - [`output`]: human-facing status lines
//! - [`logging`]: `tracing` subscriber setup
//!
//! ## Example Usage
//!
//! ```no_run
//! use media_manifest::manifest::ManifestGenerator;
//!
//! # fn main() -> anyhow::Result<()> {
//! let manifest = ManifestGenerator::new("media").generate()?;
//! println!("{} images", manifest.len());
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// One-shot and watch command implementations.
pub mod commands;

/// Configuration parsing, validation, and defaults.
pub mod config;

/// `tracing` subscriber initialisation.
pub mod logging;

/// Manifest model, allow-list and generator.
pub mod manifest;

/// Output formatting for status lines.
pub mod output;

/// Debounced filesystem watch loop.
pub mod watch;

#[cfg(test)]
pub(crate) mod test_utils;

use anyhow::{Context, Result};
use config::Config;
use manifest::ManifestGenerator;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Current version of the media-manifest binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default media directory, relative to the working directory.
pub const DEFAULT_MEDIA_DIR: &str = "media";

/// Default name of the manifest file written inside the media directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Configuration file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "media-manifest.toml";

/// Extensions recognised as images out of the box.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg"];

/// Default quiet period of the watch loop.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Longest accepted quiet period.
pub const MAX_QUIET_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

/// Resolved settings for a single invocation.
///
/// Built from the command line, the environment and an optional config file, in
/// that order of precedence. Commands only ever see this structure.
#[derive(Debug, Clone)]
pub struct ManifestContext {
    /// Config file that was loaded, if any.
    pub config_path: Option<PathBuf>,

    /// Effective configuration after applying command-line overrides.
    pub config: Config,
}

impl ManifestContext {
    /// Creates a context from parsed command-line arguments.
    ///
    /// An explicitly named config file must exist. Without one, a
    /// `media-manifest.toml` in the working directory is used when present.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, or if the
    /// resulting configuration is invalid.
    pub fn from_cli(cli: &cli::Cli) -> Result<Self> {
        let config_path = match &cli.config {
            Some(path) => Some(path.clone()),
            None => {
                let candidate = PathBuf::from(DEFAULT_CONFIG_FILE);
                candidate.is_file().then_some(candidate)
            }
        };

        let mut config = match &config_path {
            Some(path) => Config::load(path)
                .with_context(|| format!("Failed to load configuration: {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(dir) = &cli.dir {
            config.media.dir.clone_from(dir);
        }
        if let Some(quiet_period) = cli.quiet_period {
            config.watch.quiet_period = quiet_period;
        }
        if let Some(sort) = cli.sort {
            config.media.sort = sort;
        }

        config.validate().context("Invalid configuration")?;

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Creates a context around an already-built configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new_explicit(config: Config) -> Result<Self> {
        config.validate().context("Invalid configuration")?;
        Ok(Self {
            config_path: None,
            config,
        })
    }

    /// Directory being scanned.
    #[must_use]
    pub fn media_dir(&self) -> &Path {
        &self.config.media.dir
    }

    /// Quiet period used by the watch loop.
    #[must_use]
    pub const fn quiet_period(&self) -> Duration {
        self.config.watch.quiet_period
    }

    /// Builds a generator for the configured media directory.
    #[must_use]
    pub fn generator(&self) -> ManifestGenerator {
        ManifestGenerator::from_config(&self.config)
    }
}
