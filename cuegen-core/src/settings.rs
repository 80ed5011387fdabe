//! Immutable configuration for a generation run.

use camino::Utf8PathBuf;
use cuegen_types::ImportMap;
use serde::Deserialize;

/// Panel schemas still maintained by hand. A path is removed from this list
/// once the generated TypeScript is adopted for that panel.
const DEFAULT_SKIP_PATHS: &[&str] = &[
    "public/app/plugins/panel/barchart/models.cue",
    "public/app/plugins/panel/canvas/models.cue",
    "public/app/plugins/panel/histogram/models.cue",
    "public/app/plugins/panel/heatmap-new/models.cue",
    "public/app/plugins/panel/candlestick/models.cue",
    "public/app/plugins/panel/state-timeline/models.cue",
    "public/app/plugins/panel/status-history/models.cue",
    "public/app/plugins/panel/table/models.cue",
    "public/app/plugins/panel/timeseries/models.cue",
];

/// Settings for one generation run.
///
/// Built once, read-only afterwards. Parallel runs are safe as long as each
/// receives its own settings, overlay, and output set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerateSettings {
    /// Root the generated tree (and generic load directories) are joined
    /// under. May be empty for tree-relative output paths.
    pub root: Utf8PathBuf,

    /// Module identity assumed for schema files outside the plugin subtree.
    pub module: String,

    /// The only sanctioned cross-module imports, mapped to their TypeScript
    /// specifiers.
    pub import_map: ImportMap,

    /// Exact schema paths excluded from generation.
    pub skip_paths: Vec<Utf8PathBuf>,

    /// Path fragment selecting the versioned strategy.
    pub plugin_subtree: String,

    /// Package selector used when loading plugin schemas. Plugin directory
    /// names may contain dashes, which CUE package names cannot, so the
    /// package cannot be derived from the directory.
    pub plugin_package: String,

    /// Top-level field plugin lineages are bound at.
    pub lineage_field: String,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            root: Utf8PathBuf::new(),
            module: "github.com/grafana/grafana".to_string(),
            import_map: ImportMap::from_iter([
                ("github.com/grafana/thema", ""),
                (
                    "github.com/grafana/grafana/packages/grafana-schema/src/schema",
                    "@grafana/schema",
                ),
            ]),
            skip_paths: DEFAULT_SKIP_PATHS.iter().map(Utf8PathBuf::from).collect(),
            plugin_subtree: "public/app/plugins".to_string(),
            plugin_package: "grafanaschema".to_string(),
            lineage_field: "Panel".to_string(),
        }
    }
}
