//! Accumulated byte totals per file extension.

use std::collections::BTreeMap;

use serde::Serialize;

/// Mapping from lowercased extension to the bytes accumulated for it.
///
/// Keys include the leading dot (`".txt"`); the empty string stands for files
/// without an extension. A map is built fresh for every scan and is only read
/// once, by the report formatter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryMap(BTreeMap<String, u64>);

impl CategoryMap {
    /// Create an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Fold `size` bytes into the bucket for `extension`.
    ///
    /// The extension is lowercased before it is used as a key, so callers may
    /// pass it in any case.
    pub fn add(&mut self, extension: &str, size: u64) {
        let key = extension.to_lowercase();
        let bucket = self.0.entry(key).or_insert(0);
        *bucket = bucket.saturating_add(size);
    }

    /// Bytes accumulated for `extension`, if any file with it was seen.
    #[must_use]
    pub fn get(&self, extension: &str) -> Option<u64> {
        self.0.get(extension).copied()
    }

    /// Sum of all accumulated sizes.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.values().fold(0u64, |acc, size| acc.saturating_add(*size))
    }

    /// Number of distinct extensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no file has been folded into the map.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(extension, bytes)` pairs in extension order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(ext, size)| (ext.as_str(), *size))
    }
}

impl FromIterator<(String, u64)> for CategoryMap {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (extension, size) in iter {
            map.add(&extension, size);
        }
        map
    }
}

impl<'a> FromIterator<(&'a str, u64)> for CategoryMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, u64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (extension, size) in iter {
            map.add(extension, size);
        }
        map
    }
}
