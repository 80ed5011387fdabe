//! The generation pipeline, extracted behind ports.
//!
//! The entry point is [`generate`]: walk a schema tree once, route each
//! directory to the generic or the versioned strategy, and collect rendered
//! TypeScript into an [`OutputSet`](cuegen_types::OutputSet). All schema
//! evaluation and body emission happens through the port traits in
//! `cuegen-domain`, so the pipeline itself performs no I/O beyond reading
//! the input trees.

mod pipeline;
mod settings;

pub use pipeline::{GenerateError, generate};
pub use settings::GenerateSettings;
