//! The path-keyed in-memory source map.

use crate::tree::FileTree;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// An in-memory substitute for a real file tree.
///
/// Every key is an absolute virtual path under a single root prefix. An
/// overlay is built fresh per generation run (or per loader call) and never
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlay {
    files: BTreeMap<Utf8PathBuf, Vec<u8>>,
}

#[derive(Debug, Error)]
pub enum OverlayError {
    /// The anchoring prefix must be absolute so overlay keys resolve like
    /// checked-out paths.
    #[error("must provide absolute path prefix when building an overlay, got {0:?}")]
    RelativePrefix(Utf8PathBuf),

    #[error(transparent)]
    Read(#[from] anyhow::Error),
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Materialize every regular file of `tree` into a fresh overlay
    /// anchored at `prefix`.
    pub fn build(prefix: &Utf8Path, tree: &dyn FileTree) -> Result<Self, OverlayError> {
        let mut overlay = Self::new();
        overlay.add_tree(prefix, tree)?;
        Ok(overlay)
    }

    /// Insert every regular file of `tree` at `prefix` + its relative path.
    ///
    /// Directories are not inserted. The first read failure aborts the
    /// build; a partial overlay is not usable.
    pub fn add_tree(&mut self, prefix: &Utf8Path, tree: &dyn FileTree) -> Result<(), OverlayError> {
        if !prefix.is_absolute() {
            return Err(OverlayError::RelativePrefix(prefix.to_path_buf()));
        }

        let files = tree.files()?;
        let count = files.len();
        for rel in files {
            let contents = tree.read(&rel)?;
            self.files.insert(prefix.join(&rel), contents);
        }
        debug!(prefix = %prefix, files = count, "materialized tree into overlay");
        Ok(())
    }

    pub fn get(&self, path: &Utf8Path) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn contains(&self, path: &Utf8Path) -> bool {
        self.files.contains_key(path)
    }

    /// All entries in path order.
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::MemTree;
    use pretty_assertions::assert_eq;

    #[test]
    fn build_rejects_relative_prefix() {
        let tree = MemTree::new().with("a.cue", "a");
        let err = Overlay::build(Utf8Path::new("rel/prefix"), &tree).unwrap_err();
        assert!(matches!(err, OverlayError::RelativePrefix(_)));
        assert!(err.to_string().contains("rel/prefix"));
    }

    #[test]
    fn build_anchors_every_file_under_prefix() {
        let tree = MemTree::new()
            .with("a.cue", "a")
            .with("sub/b.cue", "b");
        let overlay = Overlay::build(Utf8Path::new("/github.com/example/mod"), &tree).expect("build");

        assert_eq!(overlay.len(), 2);
        assert_eq!(
            overlay.get(Utf8Path::new("/github.com/example/mod/a.cue")),
            Some(&b"a"[..])
        );
        assert_eq!(
            overlay.get(Utf8Path::new("/github.com/example/mod/sub/b.cue")),
            Some(&b"b"[..])
        );
    }

    #[test]
    fn add_tree_merges_into_existing_overlay() {
        let base = MemTree::new().with("a.cue", "a");
        let dep = MemTree::new().with("lineage.cue", "lin");

        let mut overlay = Overlay::build(Utf8Path::new("/m"), &base).expect("build");
        overlay
            .add_tree(Utf8Path::new("/m/cue.mod/pkg/dep"), &dep)
            .expect("merge");

        assert_eq!(overlay.len(), 2);
        assert!(overlay.contains(Utf8Path::new("/m/cue.mod/pkg/dep/lineage.cue")));
    }

    #[test]
    fn read_failure_aborts_the_build() {
        struct Broken;
        impl FileTree for Broken {
            fn files(&self) -> anyhow::Result<Vec<Utf8PathBuf>> {
                Ok(vec![Utf8PathBuf::from("ghost.cue")])
            }
            fn read(&self, rel: &Utf8Path) -> anyhow::Result<Vec<u8>> {
                Err(anyhow::anyhow!("unreadable: {}", rel))
            }
        }

        let err = Overlay::build(Utf8Path::new("/m"), &Broken).unwrap_err();
        assert!(err.to_string().contains("unreadable"));
    }
}
