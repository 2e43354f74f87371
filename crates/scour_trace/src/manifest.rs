//! The categorized record of files a build wrote into the public directory.
//!
//! A manifest maps category names (`"javascripts"`, `"javascript-maps"`,
//! `"assets"`, ...) to the public-relative paths produced in that category.
//! On disk it is a plain JSON object of string arrays. The same shape is
//! used for the transient leftover set computed by the differ.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Category name to ordered list of public-relative paths.
///
/// Manifests are built by consuming combinators and never edited after the
/// fact: each cycle produces a new one that replaces the previous wholesale.
/// Duplicate paths within a category are tolerated. Categories are kept in
/// sorted order so the serialized form is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    categories: BTreeMap<String, Vec<String>>,
}

impl Manifest {
    /// Creates an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this manifest with `path` appended to `category`.
    pub fn with_path(mut self, category: impl Into<String>, path: impl Into<String>) -> Self {
        self.categories
            .entry(category.into())
            .or_default()
            .push(path.into());
        self
    }

    /// Returns this manifest with `category` set to exactly `paths`.
    pub fn with_category<I, S>(mut self, category: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories
            .insert(category.into(), paths.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the paths recorded under `category`, if any.
    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    /// Returns `true` if `path` is recorded under `category`.
    pub fn contains(&self, category: &str, path: &str) -> bool {
        self.get(category)
            .is_some_and(|paths| paths.iter().any(|p| p == path))
    }

    /// Iterates over categories and their paths in category order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(name, paths)| (name.as_str(), paths.as_slice()))
    }

    /// Iterates over every recorded path, category by category.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.categories
            .values()
            .flat_map(|paths| paths.iter().map(String::as_str))
    }

    /// Returns the number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Returns `true` if the manifest has no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Returns the total number of recorded paths across all categories.
    pub fn path_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }
}

impl FromIterator<(String, Vec<String>)> for Manifest {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        Self {
            categories: iter.into_iter().collect(),
        }
    }
}
