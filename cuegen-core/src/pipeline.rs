//! The directory walker and strategy dispatcher.

use crate::settings::GenerateSettings;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use cuegen_domain::{
    Emitter, ImportError, LoadConfig, LoadError, SchemaEngine, SchemaLibrary, bind_latest,
    load_instance, translate_imports,
};
use cuegen_parse::parse_imports;
use cuegen_render::render;
use cuegen_types::{GenKind, GenUnit, OutputSet, layout};
use cuegen_vfs::{FileTree, Overlay, OverlayError};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// A directory resolved to more than one package instance under the
    /// generic strategy.
    #[error("{path}: resulted in more than one instance")]
    AmbiguousInstance { path: Utf8PathBuf },

    /// A directory resolved to no instance at all.
    #[error("{path}: no instance resolved")]
    NoInstance { path: Utf8PathBuf },

    #[error("could not load CUE instance for {dir}: {source}")]
    Load { dir: Utf8PathBuf, source: LoadError },

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Overlay(#[from] OverlayError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Walk `schema_tree` once and generate TypeScript for every eligible
/// directory.
///
/// One schema file per directory is processed: directories are expected to
/// hold one coherent schema unit, and the walk order (sorted paths) makes
/// the chosen representative deterministic. Any error for any directory
/// aborts the whole run; there is no partial output.
pub fn generate<E, M>(
    engine: &E,
    emitter: &M,
    schema_tree: &dyn FileTree,
    library: &SchemaLibrary<'_>,
    settings: &GenerateSettings,
) -> Result<OutputSet, GenerateError>
where
    E: SchemaEngine,
    M: Emitter<E::Value>,
{
    let root_overlay = Overlay::build(Utf8Path::new("/"), schema_tree)?;

    let mut outputs = OutputSet::new();
    let mut seen_dirs: BTreeSet<Utf8PathBuf> = BTreeSet::new();

    for path in schema_tree.files()? {
        if path.extension() != Some(layout::SCHEMA_EXT) {
            continue;
        }
        let dir = path.parent().unwrap_or(Utf8Path::new("")).to_path_buf();
        if seen_dirs.contains(&dir) || excluded(&path, settings) {
            continue;
        }
        seen_dirs.insert(dir.clone());

        let versioned = path.as_str().contains(&settings.plugin_subtree);
        debug!(path = %path, versioned, "generating");

        let unit = if versioned {
            versioned_unit(engine, emitter, schema_tree, library, settings, &path, &dir)?
        } else {
            generic_unit(engine, emitter, &root_overlay, settings, &path, &dir)?
        };

        let contents = render(&unit);
        if outputs.insert(unit.out_path.clone(), contents).is_some() {
            debug!(path = %unit.out_path, "overwriting previously generated output");
        }
    }

    Ok(outputs)
}

/// Exact skip-list membership, plus the structural rule that nothing under
/// the module-metadata directory is ever generated from.
fn excluded(path: &Utf8Path, settings: &GenerateSettings) -> bool {
    settings.skip_paths.iter().any(|skip| skip.as_path() == path)
        || path.starts_with(layout::MODULE_DIR)
}

/// Plain single-file generation: build whatever package the directory
/// holds and emit it, with no import or version handling.
fn generic_unit<E, M>(
    engine: &E,
    emitter: &M,
    root_overlay: &Overlay,
    settings: &GenerateSettings,
    path: &Utf8Path,
    dir: &Utf8Path,
) -> Result<GenUnit, GenerateError>
where
    E: SchemaEngine,
    M: Emitter<E::Value>,
{
    let cfg = LoadConfig {
        overlay: root_overlay,
        module_root: Utf8PathBuf::from("/"),
        module: settings.module.clone(),
        dir: settings.root.join(dir),
        package: None,
    };

    let mut instances = engine.resolve(&cfg);
    if instances.len() > 1 {
        return Err(GenerateError::AmbiguousInstance {
            path: path.to_path_buf(),
        });
    }
    let instance = match instances.pop() {
        Some(instance) => instance?,
        None => {
            return Err(GenerateError::NoInstance {
                path: path.to_path_buf(),
            });
        }
    };

    let value = engine.build(&instance)?;
    let body = emitter.emit(&value)?;

    Ok(GenUnit {
        out_path: layout::output_path(&settings.root, path),
        imports: Vec::new(),
        body,
        kind: GenKind::Generic,
    })
}

/// Lineage-aware generation for plugin schemas: module-aware load, import
/// translation, and emission pinned to the latest lineage version.
fn versioned_unit<E, M>(
    engine: &E,
    emitter: &M,
    schema_tree: &dyn FileTree,
    library: &SchemaLibrary<'_>,
    settings: &GenerateSettings,
    path: &Utf8Path,
    dir: &Utf8Path,
) -> Result<GenUnit, GenerateError>
where
    E: SchemaEngine,
    M: Emitter<E::Value>,
{
    let unit = load_instance(engine, schema_tree, library, dir, &settings.plugin_package)
        .map_err(|source| GenerateError::Load {
            dir: dir.to_path_buf(),
            source,
        })?;

    // The loader does not preserve per-file import provenance, so the file
    // is parsed a second time just for its import section.
    let src = schema_tree.read(path)?;
    let text = std::str::from_utf8(&src).with_context(|| format!("{path} is not valid UTF-8"))?;
    let decls = parse_imports(text)
        .map_err(|err| anyhow::anyhow!(err))
        .with_context(|| path.to_string())?;
    let imports = translate_imports(path, &decls, &settings.import_map)?;

    let value = engine.build(&unit.instance)?;
    let (schema, version) = bind_latest(engine, &value, &settings.lineage_field)
        .with_context(|| path.to_string())?;
    let body = emitter.emit(&schema)?;

    Ok(GenUnit {
        out_path: layout::output_path(&settings.root, path),
        imports,
        body,
        kind: GenKind::Versioned { version },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excluded_matches_exact_skip_paths_only() {
        let settings = GenerateSettings {
            skip_paths: vec![Utf8PathBuf::from("a/models.cue")],
            ..GenerateSettings::default()
        };

        assert!(excluded(Utf8Path::new("a/models.cue"), &settings));
        assert!(!excluded(Utf8Path::new("a/models2.cue"), &settings));
        assert!(!excluded(Utf8Path::new("b/a/models.cue"), &settings));
    }

    #[test]
    fn excluded_covers_everything_under_the_metadata_dir() {
        let settings = GenerateSettings::default();
        assert!(excluded(Utf8Path::new("cue.mod/module.cue"), &settings));
        assert!(excluded(Utf8Path::new("cue.mod/pkg/dep/x.cue"), &settings));
        assert!(!excluded(Utf8Path::new("cue.modules/x.cue"), &settings));
    }
}
