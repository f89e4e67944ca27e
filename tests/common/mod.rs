use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temp workspace with a `media/` folder inside
pub struct TestMedia {
    pub temp_dir: TempDir,
    pub media_dir: PathBuf,
}

impl TestMedia {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let media_dir = temp_dir.path().join("media");
        fs::create_dir_all(&media_dir)?;
        Ok(Self {
            temp_dir,
            media_dir,
        })
    }

    pub fn with_files(names: &[&str]) -> Result<Self> {
        let media = Self::new()?;
        for name in names {
            fs::write(media.media_dir.join(name), b"")?;
        }
        Ok(media)
    }

    /// Workspace root (parent of `media/`)
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn read_manifest(&self, name: &str) -> Result<String> {
        Ok(fs::read_to_string(self.media_dir.join(name))?)
    }

    /// Binary invocation running inside the workspace root with a clean environment
    pub fn cmd(&self) -> Result<Command> {
        let mut cmd = Command::cargo_bin("media-manifest")?;
        cmd.current_dir(self.root())
            .env_remove("MEDIA_MANIFEST_DIR")
            .env_remove("MEDIA_MANIFEST_CONFIG")
            .env_remove("RUST_LOG");
        Ok(cmd)
    }
}
