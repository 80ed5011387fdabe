//! The generation result container.

use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;

/// Ordered collection of generated outputs, keyed by output path.
///
/// This is the pipeline's result: callers hand it to a write/diff
/// collaborator. Iteration order is path order, so a run's output is
/// deterministic regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputSet {
    files: BTreeMap<Utf8PathBuf, Vec<u8>>,
}

impl OutputSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert generated bytes at `path`.
    ///
    /// A second insert at the same path replaces the first (last write
    /// wins) and returns the displaced contents.
    pub fn insert(&mut self, path: Utf8PathBuf, contents: Vec<u8>) -> Option<Vec<u8>> {
        self.files.insert(path, contents)
    }

    pub fn get(&self, path: &Utf8Path) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn paths(&self) -> impl Iterator<Item = &Utf8Path> {
        self.files.keys().map(Utf8PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Utf8Path, &[u8])> {
        self.files
            .iter()
            .map(|(p, c)| (p.as_path(), c.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl IntoIterator for OutputSet {
    type Item = (Utf8PathBuf, Vec<u8>);
    type IntoIter = std::collections::btree_map::IntoIter<Utf8PathBuf, Vec<u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}
