//! Directory scan and manifest write.
//!
//! The generator lists the direct children of the media directory, keeps the
//! ones whose extension is allow-listed, sorts them and writes the result as a
//! JSON array to `<media_dir>/<manifest_file>`.

use super::{AllowList, Manifest, ManifestError, SortOrder, WriteMode};
use crate::MANIFEST_FILE;
use crate::config::Config;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info, span, warn};
use walkdir::WalkDir;

/// Prefix for temp files created during atomic writes.
const TEMP_PREFIX: &str = ".manifest-";

/// Suffix for temp files created during atomic writes. Never an image extension.
const TEMP_SUFFIX: &str = ".tmp";

/// Produces manifests for one media directory.
#[derive(Debug, Clone)]
pub struct ManifestGenerator {
    /// Directory to scan.
    media_dir: PathBuf,
    /// Filename of the manifest inside `media_dir`.
    manifest_file: String,
    /// Extensions that count as images.
    allow_list: AllowList,
    /// Ordering of the written names.
    sort: SortOrder,
    /// How the manifest file is replaced.
    write_mode: WriteMode,
}

impl ManifestGenerator {
    /// Creates a generator with default settings for `media_dir`.
    pub fn new(media_dir: impl Into<PathBuf>) -> Self {
        Self {
            media_dir: media_dir.into(),
            manifest_file: MANIFEST_FILE.to_string(),
            allow_list: AllowList::default(),
            sort: SortOrder::default(),
            write_mode: WriteMode::default(),
        }
    }

    /// Creates a generator from the `[media]` section of a configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.media.dir.clone())
            .manifest_file(config.media.manifest_file.clone())
            .allow_list(AllowList::new(&config.media.extensions))
            .sort_order(config.media.sort)
            .write_mode(config.media.write_mode)
    }

    /// Sets the manifest filename.
    #[must_use]
    pub fn manifest_file(mut self, name: impl Into<String>) -> Self {
        self.manifest_file = name.into();
        self
    }

    /// Sets the extension allow-list.
    #[must_use]
    pub fn allow_list(mut self, allow_list: AllowList) -> Self {
        self.allow_list = allow_list;
        self
    }

    /// Sets the filename ordering.
    #[must_use]
    pub const fn sort_order(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Sets how the manifest is written.
    #[must_use]
    pub const fn write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    /// Directory being scanned.
    #[must_use]
    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }

    /// Filename of the manifest.
    #[must_use]
    pub fn manifest_name(&self) -> &str {
        &self.manifest_file
    }

    /// Full path of the manifest file.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.media_dir.join(&self.manifest_file)
    }

    /// Extensions that count as images.
    #[must_use]
    pub const fn extensions(&self) -> &AllowList {
        &self.allow_list
    }

    /// Returns true if `name` would be listed in the manifest.
    #[must_use]
    pub fn is_listed(&self, name: &str) -> bool {
        name != self.manifest_file && self.allow_list.matches(name)
    }

    /// Lists the images in the media directory without writing anything.
    ///
    /// Only direct children are considered. Names that are not valid UTF-8 are
    /// skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory is missing, is not a directory, or
    /// cannot be read.
    pub fn scan(&self) -> Result<Manifest, ManifestError> {
        let span = span!(Level::DEBUG, "scan_media", dir = %self.media_dir.display());
        let _guard = span.enter();

        let metadata = fs::metadata(&self.media_dir)
            .map_err(|e| ManifestError::read_dir(&self.media_dir, e))?;
        if !metadata.is_dir() {
            return Err(ManifestError::NotADirectory(self.media_dir.clone()));
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&self.media_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
        {
            let entry = entry.map_err(|e| ManifestError::read_dir(&self.media_dir, e))?;

            let Some(name) = entry.file_name().to_str() else {
                warn!(path = %entry.path().display(), "Skipping entry with non UTF-8 name");
                continue;
            };

            if self.is_listed(name) {
                names.push(name.to_string());
            }
        }

        debug!(count = names.len(), "Scan complete");
        Ok(Manifest::from_names(names, self.sort))
    }

    /// Scans the media directory and overwrites the manifest file.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read or the manifest cannot
    /// be written.
    pub fn generate(&self) -> Result<Manifest, ManifestError> {
        let manifest = self.scan()?;
        let json = manifest.to_json()?;
        self.write(&json)?;

        info!(
            count = manifest.len(),
            path = %self.manifest_path().display(),
            "Manifest written"
        );
        Ok(manifest)
    }

    /// Writes `contents` to the manifest path according to the write mode.
    fn write(&self, contents: &str) -> Result<(), ManifestError> {
        let path = self.manifest_path();
        let span = span!(
            Level::DEBUG,
            "write_manifest",
            path = %path.display(),
            mode = ?self.write_mode
        );
        let _guard = span.enter();

        match self.write_mode {
            WriteMode::Direct => {
                fs::write(&path, contents).map_err(|e| ManifestError::write(&path, e))
            }
            WriteMode::Atomic => self.write_atomic(&path, contents),
        }
    }

    /// Writes to a temp file next to the manifest, then renames it into place.
    fn write_atomic(&self, path: &Path, contents: &str) -> Result<(), ManifestError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_PREFIX).suffix(TEMP_SUFFIX);
        if let Some(permissions) = target_permissions(path) {
            builder.permissions(permissions);
        }

        let mut temp = builder
            .tempfile_in(&self.media_dir)
            .map_err(|e| ManifestError::write(path, e))?;
        temp.write_all(contents.as_bytes())
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| ManifestError::write(path, e))?;
        temp.persist(path)
            .map_err(|e| ManifestError::write(path, e.error))?;

        debug!("Renamed temp file over manifest");
        Ok(())
    }
}

/// Permissions the manifest should end up with.
///
/// Keeps the current file's permissions when it exists. Temp files are created
/// owner-only, which would otherwise leak onto the manifest after the rename.
#[cfg(unix)]
fn target_permissions(path: &Path) -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;

    Some(fs::metadata(path).map_or_else(
        |_| fs::Permissions::from_mode(0o644),
        |metadata| metadata.permissions(),
    ))
}

/// Non-unix temp files already inherit default permissions.
#[cfg(not(unix))]
fn target_permissions(_path: &Path) -> Option<fs::Permissions> {
    None
}
