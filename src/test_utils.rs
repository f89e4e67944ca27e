pub mod fixtures {
    use crate::manifest::ManifestGenerator;
    use anyhow::Result;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Scratch media directory backed by a temp dir.
    pub struct MediaDir {
        pub temp_dir: TempDir,
    }

    impl MediaDir {
        pub fn new() -> Result<Self> {
            Ok(Self {
                temp_dir: tempfile::tempdir()?,
            })
        }

        /// Creates an empty file for each name. Names may contain subdirectories.
        pub fn with_files(names: &[&str]) -> Result<Self> {
            let media = Self::new()?;
            for name in names {
                media.touch(name)?;
            }
            Ok(media)
        }

        pub fn touch(&self, name: &str) -> Result<PathBuf> {
            let path = self.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, b"")?;
            Ok(path)
        }

        pub fn path(&self) -> &Path {
            self.temp_dir.path()
        }

        pub fn manifest_path(&self) -> PathBuf {
            self.path().join(crate::MANIFEST_FILE)
        }

        pub fn read_manifest(&self) -> Result<String> {
            Ok(fs::read_to_string(self.manifest_path())?)
        }

        pub fn generator(&self) -> ManifestGenerator {
            ManifestGenerator::new(self.path())
        }
    }
}
