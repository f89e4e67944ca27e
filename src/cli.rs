//! Command-line interface definitions for media-manifest.
//!
//! Field-level documentation doubles as clap help text.

#![allow(clippy::missing_docs_in_private_items)]

use crate::manifest::SortOrder;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Main CLI structure for media-manifest.
#[derive(Parser, Debug)]
#[command(
    name = "media-manifest",
    version = crate::VERSION,
    about = "Write a JSON manifest of the images in a media folder",
    long_about = "Scans a media folder for images and writes their sorted filenames to \
                  manifest.json. With --watch, keeps the manifest up to date as files change."
)]
pub struct Cli {
    /// Keep running and regenerate the manifest whenever images change
    #[arg(short, long)]
    pub watch: bool,

    /// Media directory to scan (default: ./media)
    #[arg(short, long, env = "MEDIA_MANIFEST_DIR", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(short, long, env = "MEDIA_MANIFEST_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How long to wait after the last change before regenerating (e.g. 300ms, 2s)
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    pub quiet_period: Option<Duration>,

    /// Filename ordering used in the manifest
    #[arg(long, value_enum, value_name = "ORDER")]
    pub sort: Option<SortOrder>,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress informational messages
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
