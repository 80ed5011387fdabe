//! Virtual file trees and the in-memory overlay.
//!
//! Schema files declare imports using module-qualified paths, as if they
//! lived inside a real checked-out module tree. The [`Overlay`] fabricates
//! that tree in memory so the same resolution logic works uniformly for
//! library-internal and third-party schema sources. [`FileTree`] is the
//! read-only input seam; it has a filesystem implementation and an
//! in-memory one for tests and injected library sources.

mod overlay;
mod tree;

pub use overlay::{Overlay, OverlayError};
pub use tree::{FileTree, FsTree, MemTree};
