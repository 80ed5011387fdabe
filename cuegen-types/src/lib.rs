//! Shared DTOs for the cuegen workspace.
//!
//! # Design constraints
//! - These types cross crate boundaries and, for settings, process
//!   boundaries; keep them serde-friendly.
//! - Layout constants describe the on-tree CUE module convention and the
//!   generated-output naming; everything else derives from them.

pub mod imports;
pub mod layout;
pub mod output;
pub mod unit;

pub use imports::ImportMap;
pub use output::OutputSet;
pub use unit::{GenKind, GenUnit, SchemaVersion, TsImport};
