use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while producing a manifest. None of them are retried.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The media directory could not be listed.
    #[error("failed to read media directory {}", .path.display())]
    ReadDir {
        /// Directory that was being scanned.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The media path exists but is not a directory.
    #[error("media path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The manifest file could not be written.
    #[error("failed to write manifest {}", .path.display())]
    Write {
        /// Manifest path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The manifest could not be serialized.
    #[error("failed to serialize manifest")]
    Serialize(#[from] serde_json::Error),
}

impl ManifestError {
    /// Wraps a directory listing error.
    pub(crate) fn read_dir(path: impl Into<PathBuf>, source: impl Into<io::Error>) -> Self {
        Self::ReadDir {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Wraps a manifest write error.
    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
