//! Dataset registry — loads all dataset definitions from embedded TOML.
//!
//! Each `.toml` file in `packages/source/datasets/` is baked into the
//! binary at compile time via [`include_str!`]. Adding a new dataset is as
//! simple as creating a new TOML file and adding it to the list below.

use crate::dataset::{DatasetDefinition, parse_dataset_toml};

/// TOML configs embedded at compile time.
const DATASET_TOMLS: &[(&str, &str)] = &[
    // ── Daily structured datasets ────────────────────────────────────
    ("agency", include_str!("../datasets/agency.toml")),
    ("slip_capture", include_str!("../datasets/slip_capture.toml")),
    ("mesa", include_str!("../datasets/mesa.toml")),
    ("interpol", include_str!("../datasets/interpol.toml")),
    ("trace_tp_tp", include_str!("../datasets/trace_tp_tp.toml")),
    ("trace_cp_cp", include_str!("../datasets/trace_cp_cp.toml")),
    // ── Monthly daily datasets ───────────────────────────────────────
    ("cfpb", include_str!("../datasets/cfpb.toml")),
    // ── Consolidated snapshots ───────────────────────────────────────
    (
        "agency_consolidated",
        include_str!("../datasets/agency_consolidated.toml"),
    ),
];

/// Total number of configured datasets (used in tests).
#[cfg(test)]
const EXPECTED_DATASET_COUNT: usize = 8;

/// Returns all configured dataset definitions, parsed from embedded TOML.
///
/// # Panics
///
/// Panics if any TOML config is malformed (this is a compile-time
/// guarantee since the configs are embedded).
#[must_use]
pub fn all_datasets() -> Vec<DatasetDefinition> {
    DATASET_TOMLS
        .iter()
        .map(|(name, toml)| {
            parse_dataset_toml(toml).unwrap_or_else(|e| panic!("Failed to parse {name}.toml: {e}"))
        })
        .collect()
}

/// Looks a dataset definition up by id.
#[must_use]
pub fn dataset(id: &str) -> Option<DatasetDefinition> {
    all_datasets().into_iter().find(|d| d.id == id)
}
