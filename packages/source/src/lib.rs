#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Config-driven loader for daily identification report snapshots.
//!
//! Each dataset is described by an embedded TOML definition ([`registry`])
//! naming its base path, file-naming scheme, and tree schema. The loader
//! ([`fetch`]) turns a definition plus a date window into a sorted list of
//! [`afis_stats_report_models::DailyRecord`]s, skipping any day whose file
//! is absent or malformed — skip-and-continue is the only failure policy
//! at this boundary.

pub mod catalog;
pub mod dataset;
pub mod fetch;
pub mod registry;

pub use dataset::{DatasetDefinition, PathScheme, parse_dataset_toml};
pub use fetch::{LoadOptions, load_consolidated, load_daily_records};

/// Errors that can occur while fetching or parsing a source file.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed or returned a non-success status.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not match the dataset's tree schema.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Environment variable overriding the data-file origin.
pub const DATA_ROOT_ENV: &str = "AFIS_STATS_DATA_ROOT";

/// Returns the origin that dataset base paths are joined onto.
///
/// Reads [`DATA_ROOT_ENV`], falling back to the local dev server.
#[must_use]
pub fn default_data_root() -> String {
    std::env::var(DATA_ROOT_ENV).unwrap_or_else(|_| "http://localhost:5000".to_owned())
}
