//! Port traits abstracting the schema engine and the syntax emitter away
//! from the pipeline.

use camino::Utf8PathBuf;
use cuegen_types::SchemaVersion;
use cuegen_vfs::Overlay;

/// Load configuration handed to the schema engine.
///
/// Built per directory-of-interest. Two cases: the root package (selector
/// forced to the module root's base name, directory forced to the module
/// root) and a named package (both supplied verbatim).
#[derive(Debug)]
pub struct LoadConfig<'a> {
    /// In-memory file tree backing resolution.
    pub overlay: &'a Overlay,
    /// Absolute virtual path the module is anchored at.
    pub module_root: Utf8PathBuf,
    /// Module identity imports are resolved against.
    pub module: String,
    /// Working directory for the load.
    pub dir: Utf8PathBuf,
    /// Package selector; `None` loads whatever package the directory holds.
    pub package: Option<String>,
}

/// The schema evaluation engine, an opaque capability.
///
/// Real implementations wrap a CUE evaluator with lineage support; the
/// pipeline only ever drives it through this trait.
pub trait SchemaEngine {
    /// A fully resolved, loadable compilation unit for one
    /// package/directory.
    type Instance;
    /// A queryable schema value.
    type Value;
    /// An ordered history of compatible schema versions.
    type Lineage;

    /// Resolve package instances for `cfg`.
    ///
    /// Per-instance resolution failures are preserved as error entries so
    /// callers decide whether ambiguity or a broken instance is fatal.
    fn resolve(&self, cfg: &LoadConfig<'_>) -> Vec<anyhow::Result<Self::Instance>>;

    /// Build a queryable value from a resolved instance.
    fn build(&self, instance: &Self::Instance) -> anyhow::Result<Self::Value>;

    /// Compile standalone schema text into a queryable value.
    fn compile(&self, src: &[u8]) -> anyhow::Result<Self::Value>;

    /// Look up a field within a value.
    fn lookup(&self, value: &Self::Value, field: &str) -> anyhow::Result<Self::Value>;

    /// Look up a field within a value and decode it as a string.
    fn lookup_string(&self, value: &Self::Value, field: &str) -> anyhow::Result<String>;

    /// Bind a value to the schema lineage it declares.
    fn bind_lineage(&self, value: &Self::Value) -> anyhow::Result<Self::Lineage>;

    /// The most recent version in a lineage.
    fn latest_version(&self, lineage: &Self::Lineage) -> SchemaVersion;

    /// The lineage's schema restricted to exactly `version`.
    fn schema_at(
        &self,
        lineage: &Self::Lineage,
        version: SchemaVersion,
    ) -> anyhow::Result<Self::Value>;
}

/// Target-language body emission, an opaque capability.
pub trait Emitter<V> {
    /// Produce body text for a schema value.
    fn emit(&self, value: &V) -> anyhow::Result<String>;
}
