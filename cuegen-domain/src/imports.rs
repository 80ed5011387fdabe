//! Import provenance validation and translation.

use camino::{Utf8Path, Utf8PathBuf};
use cuegen_parse::ImportDecl;
use cuegen_types::{ImportMap, TsImport};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    /// The import path is not in the allow-list. The message enumerates
    /// every permitted path; it is the operator-facing diagnostic for
    /// fixing the offending schema file.
    #[error("{file}: import \"{import}\" not allowed, schema files may only import from:\n{}", allowed_list(.allowed))]
    Disallowed {
        file: Utf8PathBuf,
        import: String,
        allowed: Vec<String>,
    },
}

fn allowed_list(allowed: &[String]) -> String {
    allowed
        .iter()
        .map(|p| format!("\t{p}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Map one file's import declarations through the allow-list.
///
/// Paths mapped to an empty specifier exist only for schema composition
/// and produce nothing. Duplicate source paths produce one translated
/// import, first occurrence wins; conflicting aliases for the same path
/// are not detected.
pub fn translate_imports(
    file: &Utf8Path,
    decls: &[ImportDecl],
    map: &ImportMap,
) -> Result<Vec<TsImport>, ImportError> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut out = Vec::new();

    for decl in decls {
        let Some(target) = map.target(&decl.path) else {
            return Err(ImportError::Disallowed {
                file: file.to_path_buf(),
                import: decl.path.clone(),
                allowed: map.allowed().map(str::to_string).collect(),
            });
        };
        if target.is_empty() || !seen.insert(&decl.path) {
            continue;
        }
        out.push(TsImport {
            ident: import_ident(decl),
            pkg: target.to_string(),
        });
    }
    Ok(out)
}

/// Identifier a translated import binds to: the explicit alias when given,
/// otherwise the final path segment, split on a `:` package marker with the
/// suffix taken.
fn import_ident(decl: &ImportDecl) -> String {
    if let Some(alias) = &decl.alias
        && !alias.is_empty()
    {
        return alias.clone();
    }
    let last = decl.path.rsplit('/').next().unwrap_or(&decl.path);
    match last.split_once(':') {
        Some((_, pkg)) => pkg.to_string(),
        None => last.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SCHEMAS: &str = "github.com/grafana/grafana/packages/grafana-schema/src/schema";

    fn map() -> ImportMap {
        ImportMap::from_iter([("github.com/grafana/thema", ""), (SCHEMAS, "@grafana/schema")])
    }

    fn decl(path: &str, alias: Option<&str>) -> ImportDecl {
        ImportDecl {
            path: path.to_string(),
            alias: alias.map(str::to_string),
        }
    }

    #[test]
    fn empty_specifier_drops_the_import() {
        let imports = translate_imports(
            Utf8Path::new("plugin/models.cue"),
            &[decl("github.com/grafana/thema", None)],
            &map(),
        )
        .expect("translate");
        assert_eq!(imports, vec![]);
    }

    #[test]
    fn ident_defaults_to_last_path_segment() {
        let imports =
            translate_imports(Utf8Path::new("plugin/models.cue"), &[decl(SCHEMAS, None)], &map())
                .expect("translate");
        assert_eq!(
            imports,
            vec![TsImport {
                ident: "schema".to_string(),
                pkg: "@grafana/schema".to_string(),
            }]
        );
    }

    #[test]
    fn explicit_alias_wins() {
        let imports = translate_imports(
            Utf8Path::new("plugin/models.cue"),
            &[decl(SCHEMAS, Some("ui"))],
            &map(),
        )
        .expect("translate");
        assert_eq!(imports[0].ident, "ui");
    }

    #[test]
    fn colon_marker_takes_the_suffix() {
        let map = ImportMap::from_iter([("example.com/pkg:variant", "@example/pkg")]);
        let imports = translate_imports(
            Utf8Path::new("x.cue"),
            &[decl("example.com/pkg:variant", None)],
            &map,
        )
        .expect("translate");
        assert_eq!(imports[0].ident, "variant");
    }

    #[test]
    fn duplicate_source_paths_translate_once() {
        let imports = translate_imports(
            Utf8Path::new("x.cue"),
            &[decl(SCHEMAS, None), decl(SCHEMAS, Some("other"))],
            &map(),
        )
        .expect("translate");
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].ident, "schema");
    }

    #[test]
    fn disallowed_import_enumerates_every_allowed_path() {
        let err = translate_imports(
            Utf8Path::new("plugin/models.cue"),
            &[decl("some/unlisted/pkg", None)],
            &map(),
        )
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("plugin/models.cue"));
        assert!(message.contains("\"some/unlisted/pkg\""));
        assert!(message.contains("\tgithub.com/grafana/thema"));
        assert!(message.contains(&format!("\t{SCHEMAS}")));
    }
}
