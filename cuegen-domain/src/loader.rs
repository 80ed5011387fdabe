//! Module-aware instance loading.
//!
//! Schema files declare imports as if their module were checked out on
//! disk next to its dependencies. The loader fabricates that layout in an
//! overlay: the input tree is anchored at `/<module identity>`, and the
//! schema library's own sources are injected either at the module root
//! (when loading the library itself) or at the reserved vendor path
//! `cue.mod/pkg/<library module>` (every other module).

use crate::ports::{LoadConfig, SchemaEngine};
use camino::{Utf8Path, Utf8PathBuf};
use cuegen_types::layout;
use cuegen_vfs::{FileTree, Overlay, OverlayError};
use thiserror::Error;
use tracing::debug;

/// The schema library injected into every loaded tree.
#[derive(Clone, Copy)]
pub struct SchemaLibrary<'a> {
    /// The library's own module identity.
    pub module: &'a str,
    /// The library's schema sources, vendored into other modules.
    pub sources: &'a dyn FileTree,
    /// The library's joint sources, overlaid at the module root when the
    /// loaded tree *is* the library.
    pub joint_sources: &'a dyn FileTree,
}

/// A fully resolved, loadable unit for one package/directory.
#[derive(Debug)]
pub struct LoadedUnit<I> {
    pub instance: I,
    /// Module identity discovered from the tree's metadata.
    pub module: String,
    /// Absolute overlay root the module was materialized under.
    pub module_root: Utf8PathBuf,
}

#[derive(Debug, Error)]
pub enum LoadError {
    /// The input tree already vendors content at the path reserved for
    /// library injection; loading it would silently corrupt resolution.
    #[error("path {0:?} already exists in the schema tree, must be absent for dynamic dependency injection")]
    ReservedPathCollision(Utf8PathBuf),

    #[error("schema tree has no cue.mod/module.cue")]
    MissingModuleMetadata,

    #[error("module metadata declares an empty module identity")]
    EmptyModuleIdentity,

    #[error("{dir}: no instance resolved")]
    NoInstance { dir: Utf8PathBuf },

    #[error(transparent)]
    Overlay(#[from] OverlayError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Load one instance from `tree` for `dir`, selecting `package`.
///
/// An empty `dir` loads the root package: the selector is forced to the
/// module root's base name and the directory to the module root itself.
pub fn load_instance<E: SchemaEngine>(
    engine: &E,
    tree: &dyn FileTree,
    library: &SchemaLibrary<'_>,
    dir: &Utf8Path,
    package: &str,
) -> Result<LoadedUnit<E::Instance>, LoadError> {
    let module = discover_module(engine, tree, library)?;

    let module_root = Utf8PathBuf::from("/").join(&module);
    let mut overlay = Overlay::build(&module_root, tree)?;
    if module == library.module {
        // Self-hosting: the library's joint sources already carry the
        // whole module layout.
        overlay.add_tree(&module_root, library.joint_sources)?;
    } else {
        overlay.add_tree(
            &module_root.join(layout::dep_path(library.module)),
            library.sources,
        )?;
    }

    let (load_dir, package) = if dir.as_str().is_empty() {
        let base = module_root
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| module.clone());
        (module_root.clone(), base)
    } else {
        (module_root.join(dir), package.to_string())
    };

    debug!(module = %module, dir = %load_dir, package = %package, "loading schema instance");

    let cfg = LoadConfig {
        overlay: &overlay,
        module_root: module_root.clone(),
        module: module.clone(),
        dir: load_dir.clone(),
        package: Some(package),
    };
    let mut instances = engine.resolve(&cfg);
    if instances.is_empty() {
        return Err(LoadError::NoInstance { dir: load_dir });
    }
    let instance = instances.remove(0)?;

    Ok(LoadedUnit {
        instance,
        module,
        module_root,
    })
}

/// Scan the tree's module-metadata directory for the declared module
/// identity, rejecting trees that populate the reserved vendor path.
fn discover_module<E: SchemaEngine>(
    engine: &E,
    tree: &dyn FileTree,
    library: &SchemaLibrary<'_>,
) -> Result<String, LoadError> {
    let reserved = layout::dep_path(library.module);
    let mut module = None;

    for path in tree.files()? {
        if !path.starts_with(layout::MODULE_DIR) {
            continue;
        }
        if layout::VENDOR_DIRS.iter().any(|d| path.starts_with(d)) {
            continue;
        }
        if path.starts_with(&reserved) {
            return Err(LoadError::ReservedPathCollision(reserved));
        }
        if path.as_path() == Utf8Path::new(layout::MODULE_FILE) {
            let src = tree.read(&path)?;
            let meta = engine.compile(&src)?;
            let name = engine.lookup_string(&meta, "module")?;
            if name.is_empty() {
                return Err(LoadError::EmptyModuleIdentity);
            }
            module = Some(name);
        }
    }

    module.ok_or(LoadError::MissingModuleMetadata)
}
