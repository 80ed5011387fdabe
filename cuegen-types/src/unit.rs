//! Generation units and their parts.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A two-component (major, minor) version of a schema within its lineage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion(pub u32, pub u32);

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0, self.1)
    }
}

/// A validated source import translated to its TypeScript equivalent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TsImport {
    /// Identifier the package is bound to.
    pub ident: String,
    /// TypeScript package specifier.
    pub pkg: String,
}

/// Which generation strategy produced a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum GenKind {
    /// Plain single-file generation; no import or version handling.
    Generic,
    /// Lineage-aware generation pinned to one resolved version.
    Versioned { version: SchemaVersion },
}

/// One generated file. Immutable once handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenUnit {
    /// Where the rendered bytes will be collected.
    pub out_path: Utf8PathBuf,
    /// Translated imports, ordered, deduplicated by source path.
    pub imports: Vec<TsImport>,
    /// Emitted body text, included verbatim.
    pub body: String,
    pub kind: GenKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn version_displays_dotted() {
        assert_eq!(SchemaVersion(2, 1).to_string(), "2.1");
    }

    #[test]
    fn gen_kind_serializes_with_strategy_tag() {
        let kind = GenKind::Versioned {
            version: SchemaVersion(1, 0),
        };
        let json = serde_json::to_value(kind).expect("serialize");
        assert_eq!(json["strategy"], "versioned");
        assert_eq!(json["version"], serde_json::json!([1, 0]));
    }

    #[test]
    fn versions_order_major_then_minor() {
        assert!(SchemaVersion(1, 9) < SchemaVersion(2, 0));
        assert!(SchemaVersion(2, 0) < SchemaVersion(2, 1));
    }
}
