//! The image manifest and the generator that produces it.
//!
//! A manifest is nothing more than the sorted list of image filenames found
//! directly inside the media directory. It is rebuilt from scratch on every run
//! and never read back.
//!
//! # Submodules
//!
//! - [`allow_list`]: case-insensitive extension filter
//! - [`errors`]: typed errors for scanning and writing
//! - [`generator`]: directory scan and manifest write

/// Case-insensitive extension filter.
pub mod allow_list;
/// Errors raised while scanning or writing.
pub mod errors;
/// Directory scan and manifest write.
pub mod generator;

pub use allow_list::AllowList;
pub use errors::ManifestError;
pub use generator::ManifestGenerator;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Ordering applied to filenames before they are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Plain string ordering. Upper-case names sort before lower-case ones.
    #[default]
    Bytewise,
    /// Ignore case when comparing, falling back to bytewise order on ties.
    CaseInsensitive,
}

impl SortOrder {
    /// Compares two filenames under this ordering.
    #[must_use]
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            Self::Bytewise => a.cmp(b),
            Self::CaseInsensitive => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
        }
    }

    /// Sorts `names` in place.
    pub fn sort(self, names: &mut [String]) {
        match self {
            Self::Bytewise => names.sort_unstable(),
            Self::CaseInsensitive => {
                names.sort_by_cached_key(|name| (name.to_lowercase(), name.clone()));
            }
        }
    }
}

/// How the manifest file is replaced on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteMode {
    /// Write a sibling temp file and rename it over the manifest.
    #[default]
    Atomic,
    /// Overwrite the manifest in place.
    Direct,
}

/// Sorted list of image filenames.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    /// Filenames in manifest order.
    files: Vec<String>,
}

impl Manifest {
    /// Builds a manifest from unsorted names.
    #[must_use]
    pub fn from_names(mut names: Vec<String>, order: SortOrder) -> Self {
        order.sort(&mut names);
        Self { files: names }
    }

    /// Filenames in manifest order.
    #[must_use]
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Number of images listed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when no images were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterates over the filenames.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.files.iter()
    }

    /// Consumes the manifest, returning the filenames.
    #[must_use]
    pub fn into_files(self) -> Vec<String> {
        self.files
    }

    /// Serializes to a JSON array with two-space indentation and no trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(&self.files)?)
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_bytewise_puts_capitals_first() {
        let manifest =
            Manifest::from_names(names(&["b.png", "a.png", "C.png"]), SortOrder::Bytewise);
        assert_eq!(manifest.files(), ["C.png", "a.png", "b.png"]);
    }

    #[test]
    fn test_case_insensitive_interleaves_capitals() {
        let manifest =
            Manifest::from_names(names(&["b.png", "a.png", "C.png"]), SortOrder::CaseInsensitive);
        assert_eq!(manifest.files(), ["a.png", "b.png", "C.png"]);
    }

    #[test]
    fn test_case_insensitive_ties_are_stable() {
        let manifest =
            Manifest::from_names(names(&["a.png", "A.png", "a.PNG"]), SortOrder::CaseInsensitive);
        assert_eq!(manifest.files(), ["A.png", "a.PNG", "a.png"]);

        for (a, b) in manifest.files().iter().zip(manifest.files().iter().skip(1)) {
            assert_eq!(SortOrder::CaseInsensitive.compare(a, b), Ordering::Less);
        }
    }

    #[test]
    fn test_json_uses_two_space_indent() -> anyhow::Result<()> {
        let manifest = Manifest::from_names(names(&["b.png", "a.JPG"]), SortOrder::Bytewise);
        assert_eq!(manifest.to_json()?, "[\n  \"a.JPG\",\n  \"b.png\"\n]");
        Ok(())
    }

    #[test]
    fn test_empty_manifest_json() -> anyhow::Result<()> {
        let manifest = Manifest::default();
        assert!(manifest.is_empty());
        assert_eq!(manifest.to_json()?, "[]");
        Ok(())
    }

    #[test]
    fn test_sort_order_from_toml_value() -> anyhow::Result<()> {
        #[derive(Deserialize)]
        struct Wrapper {
            sort: SortOrder,
        }

        let wrapper: Wrapper = toml::from_str("sort = \"case-insensitive\"")?;
        assert_eq!(wrapper.sort, SortOrder::CaseInsensitive);
        Ok(())
    }
}
