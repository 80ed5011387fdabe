//! Read-only file-tree access.

use anyhow::{Context, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::collections::BTreeMap;

/// Read-only access to a tree of regular files.
///
/// Implementations report files in sorted relative-path order so that every
/// walk over a tree is deterministic.
pub trait FileTree {
    /// Relative paths of every regular file in the tree, sorted.
    fn files(&self) -> anyhow::Result<Vec<Utf8PathBuf>>;

    /// Full contents of one file.
    fn read(&self, rel: &Utf8Path) -> anyhow::Result<Vec<u8>>;
}

/// Filesystem-backed [`FileTree`].
#[derive(Debug, Clone)]
pub struct FsTree {
    root: Utf8PathBuf,
}

impl FsTree {
    pub fn new(root: Utf8PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

impl FileTree for FsTree {
    fn files(&self) -> anyhow::Result<Vec<Utf8PathBuf>> {
        let mut out = Vec::new();
        collect_files(&self.root, &self.root, &mut out)?;
        // Deterministic order matters.
        out.sort();
        Ok(out)
    }

    fn read(&self, rel: &Utf8Path) -> anyhow::Result<Vec<u8>> {
        let abs = self.root.join(rel);
        fs::read(&abs)
            .with_context(|| format!("read {}", abs))
    }
}

fn collect_files(
    dir: &Utf8Path,
    root: &Utf8Path,
    out: &mut Vec<Utf8PathBuf>,
) -> anyhow::Result<()> {
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir))? {
        let entry = entry.with_context(|| format!("read dir entry in {}", dir))?;
        let path = Utf8PathBuf::from_path_buf(entry.path())
            .map_err(|p| anyhow!("non-UTF-8 path: {}", p.display()))?;
        let file_type = entry
            .file_type()
            .with_context(|| format!("stat {}", path))?;

        if file_type.is_dir() {
            collect_files(&path, root, out)?;
        } else if file_type.is_file() {
            let rel = path
                .strip_prefix(root)
                .with_context(|| format!("{} outside tree root {}", path, root))?;
            out.push(rel.to_path_buf());
        }
        // Symlinks and other non-regular entries are not part of a tree.
    }
    Ok(())
}

/// In-memory [`FileTree`], used in tests and for injected library sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemTree {
    files: BTreeMap<Utf8PathBuf, Vec<u8>>,
}

impl MemTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<Utf8PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, path: impl Into<Utf8PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileTree for MemTree {
    fn files(&self) -> anyhow::Result<Vec<Utf8PathBuf>> {
        Ok(self.files.keys().cloned().collect())
    }

    fn read(&self, rel: &Utf8Path) -> anyhow::Result<Vec<u8>> {
        self.files
            .get(rel)
            .cloned()
            .ok_or_else(|| anyhow!("no such file in tree: {}", rel))
    }
}
