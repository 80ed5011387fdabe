//! Lineage binding.

use crate::ports::SchemaEngine;
use anyhow::Context;
use cuegen_types::SchemaVersion;

/// Bind the lineage `value` declares at `field` and extract the schema for
/// its most recent version, along with that version.
pub fn bind_latest<E: SchemaEngine>(
    engine: &E,
    value: &E::Value,
    field: &str,
) -> anyhow::Result<(E::Value, SchemaVersion)> {
    let lineage = engine
        .lookup(value, field)
        .and_then(|v| engine.bind_lineage(&v))
        .context("failed to bind lineage")?;

    let version = engine.latest_version(&lineage);
    let schema = engine
        .schema_at(&lineage, version)
        .with_context(|| format!("no schema for version {version}"))?;
    Ok((schema, version))
}
