/// TOML file loading.
pub mod parser;

use crate::manifest::allow_list::normalize_extension;
use crate::manifest::{SortOrder, WriteMode};
use crate::{
    DEFAULT_MEDIA_DIR, DEFAULT_QUIET_PERIOD, IMAGE_EXTENSIONS, MANIFEST_FILE, MAX_QUIET_PERIOD,
};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly named config file does not exist.
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The config file exists but could not be read.
    #[error("failed to read config file {}", .path.display())]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("failed to parse TOML config")]
    Parse(#[from] toml::de::Error),

    /// `media.extensions` is empty.
    #[error("media.extensions must list at least one extension")]
    EmptyAllowList,

    /// An extension is blank or contains a separator.
    #[error("invalid extension in media.extensions: {0:?}")]
    InvalidExtension(String),

    /// `media.manifest_file` names a path rather than a file.
    #[error("media.manifest_file must be a plain file name, got {0:?}")]
    InvalidManifestFile(String),

    /// `watch.quiet_period` is zero.
    #[error("watch.quiet_period must be greater than zero")]
    ZeroQuietPeriod,

    /// `watch.quiet_period` exceeds [`MAX_QUIET_PERIOD`].
    #[error(
        "watch.quiet_period must be at most {max}, got {0:?}",
        max = humantime::format_duration(MAX_QUIET_PERIOD)
    )]
    QuietPeriodTooLong(Duration),
}

/// Top-level `media-manifest.toml` contents.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// `[media]` section.
    #[serde(default)]
    pub media: MediaConfig,

    /// `[watch]` section.
    #[serde(default)]
    pub watch: WatchConfig,
}

/// What to scan and how to write the manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaConfig {
    /// Directory to scan.
    #[serde(default = "default_media_dir")]
    pub dir: PathBuf,
    /// Manifest file name inside `dir`.
    #[serde(default = "default_manifest_file")]
    pub manifest_file: String,
    /// Recognised extensions, with or without the leading dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Order of names in the manifest.
    #[serde(default)]
    pub sort: SortOrder,
    /// How the manifest is written to disk.
    #[serde(default)]
    pub write_mode: WriteMode,
}

/// Watch mode settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchConfig {
    /// Wait after the last change before regenerating, in humantime syntax ("300ms")
    #[serde(default = "default_quiet_period", with = "humantime_duration")]
    pub quiet_period: Duration,
}

fn default_media_dir() -> PathBuf {
    PathBuf::from(DEFAULT_MEDIA_DIR)
}

fn default_manifest_file() -> String {
    MANIFEST_FILE.to_string()
}

fn default_extensions() -> Vec<String> {
    IMAGE_EXTENSIONS.iter().map(|ext| (*ext).to_string()).collect()
}

const fn default_quiet_period() -> Duration {
    DEFAULT_QUIET_PERIOD
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            dir: default_media_dir(),
            manifest_file: default_manifest_file(),
            extensions: default_extensions(),
            sort: SortOrder::default(),
            write_mode: WriteMode::default(),
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            quiet_period: default_quiet_period(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    ///
    /// Unlike the working-directory default, an explicitly named file has to
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist or cannot be read
    /// - The file contains invalid TOML
    /// - The values fail validation
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        parser::parse_config_file(path)
    }

    /// Check values that serde alone cannot.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.media.extensions.is_empty() {
            return Err(ConfigError::EmptyAllowList);
        }
        if let Some(bad) = self
            .media
            .extensions
            .iter()
            .find(|ext| normalize_extension(ext).is_none())
        {
            return Err(ConfigError::InvalidExtension(bad.clone()));
        }

        let name = &self.media.manifest_file;
        let is_plain = Path::new(name).file_name().and_then(|n| n.to_str()) == Some(name.as_str());
        if !is_plain {
            return Err(ConfigError::InvalidManifestFile(name.clone()));
        }

        let quiet_period = self.watch.quiet_period;
        if quiet_period.is_zero() {
            return Err(ConfigError::ZeroQuietPeriod);
        }
        if quiet_period > MAX_QUIET_PERIOD {
            return Err(ConfigError::QuietPeriodTooLong(quiet_period));
        }

        Ok(())
    }
}

/// Serde adapter storing a `Duration` as a humantime string.
mod humantime_duration {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
    }
}
