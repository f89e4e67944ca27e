//! Extension allow-list used to decide which directory entries are images.

use crate::IMAGE_EXTENSIONS;
use std::collections::BTreeSet;
use std::path::Path;

/// Set of recognised extensions, stored lower-case without the leading dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    /// Normalised extensions.
    extensions: BTreeSet<String>,
}

impl AllowList {
    /// Builds an allow-list, normalising each entry.
    ///
    /// Entries may be given as `png` or `.PNG`. Entries that normalise to nothing
    /// are dropped.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .filter_map(|ext| normalize_extension(ext.as_ref()))
                .collect(),
        }
    }

    /// Returns true if `name` has an extension in the list, ignoring case.
    ///
    /// A name with no extension never matches, including dot-files like `.png`.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.contains(&ext.to_lowercase()))
    }

    /// Normalised extensions in sorted order.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    /// True if no extensions are allowed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::new(IMAGE_EXTENSIONS)
    }
}

/// Lower-cases an extension and strips one leading dot.
///
/// Returns `None` for entries that are empty or still contain a dot or a path
/// separator afterwards, since those can never match a filename extension.
#[must_use]
pub fn normalize_extension(ext: &str) -> Option<String> {
    let trimmed = ext.trim();
    let bare = trimmed.strip_prefix('.').unwrap_or(trimmed);
    if bare.is_empty() || bare.contains(['.', '/', '\\']) {
        return None;
    }
    Some(bare.to_lowercase())
}
