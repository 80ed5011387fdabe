//! On-tree layout of a CUE module and of generated outputs.

use camino::{Utf8Path, Utf8PathBuf};

/// Module-metadata directory at the root of every schema tree.
pub const MODULE_DIR: &str = "cue.mod";

/// Metadata file declaring a tree's module identity.
pub const MODULE_FILE: &str = "cue.mod/module.cue";

/// Generated/vendor subtrees the loader never descends into.
pub const VENDOR_DIRS: &[&str] = &["cue.mod/gen", "cue.mod/usr"];

/// Extension of schema source files.
pub const SCHEMA_EXT: &str = "cue";

/// Extension replacing [`SCHEMA_EXT`] on generated TypeScript files.
pub const GENERATED_EXT: &str = "gen.ts";

/// Path at which `module` is vendored inside another module's tree.
///
/// The loader reserves this path for dependency injection of the schema
/// library; input trees must not populate it themselves.
pub fn dep_path(module: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(MODULE_DIR).join("pkg").join(module)
}

/// Output path for one schema file: extension swapped, rooted under `root`.
pub fn output_path(root: &Utf8Path, schema_path: &Utf8Path) -> Utf8PathBuf {
    root.join(schema_path.with_extension(GENERATED_EXT))
}
