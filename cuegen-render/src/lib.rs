//! The fixed TypeScript output template.
//!
//! Deterministic text substitution, not user-configurable: header comment,
//! one import line per translated import, an optional frozen model-version
//! constant, then the emitted body verbatim. No escaping is applied;
//! identifiers and specifiers must already be valid TypeScript tokens.

use cuegen_types::{GenKind, GenUnit};

/// Header stamped on every generated file.
const HEADER: &str = "\
//~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// This file is autogenerated. DO NOT EDIT.
//
// To regenerate, run \"make gen-cue\" from the repository root.
//~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~";

/// Render one generation unit to its final bytes.
pub fn render(unit: &GenUnit) -> Vec<u8> {
    let mut out = String::with_capacity(HEADER.len() + unit.body.len() + 128);
    out.push_str(HEADER);
    out.push('\n');
    for import in &unit.imports {
        out.push_str(&format!(
            "\nimport * as {} from '{}';",
            import.ident, import.pkg
        ));
    }
    out.push('\n');
    if let GenKind::Versioned { version } = unit.kind {
        out.push_str(&format!(
            "\nexport const modelVersion = Object.freeze([{}, {}]);\n",
            version.0, version.1
        ));
    }
    out.push('\n');
    out.push_str(&unit.body);
    out.into_bytes()
}
