//! Reference catalogs backing the act and section filter dropdowns.

use serde::{Deserialize, Serialize};

use crate::SourceError;

/// Origin-relative path of the acts catalog.
pub const ACTS_PATH: &str = "/assets/data/acts/acts_full.json";

/// Origin-relative path of the sections catalog.
pub const SECTIONS_PATH: &str = "/assets/data/section/section.json";

/// One raw entry of the acts catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct ActEntry {
    /// Short act code (e.g. `"IPC"`).
    #[serde(rename = "Code")]
    pub code: String,
    /// Full act description.
    #[serde(rename = "Description")]
    pub description: String,
}

/// One raw entry of the sections catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionEntry {
    /// Parent act code.
    pub code: String,
    /// Section number.
    pub section: String,
}

/// A value/label pair ready for a filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogOption {
    /// Machine value used in filter sets.
    pub value: String,
    /// Display label.
    pub label: String,
}

/// Fetches the acts catalog and builds dropdown options.
///
/// The upstream file repeats codes; duplicates are dropped keeping the
/// first occurrence.
///
/// # Errors
///
/// Returns [`SourceError`] if the request fails or the body is not the
/// expected array shape.
pub async fn fetch_act_options(
    client: &reqwest::Client,
    data_root: &str,
) -> Result<Vec<CatalogOption>, SourceError> {
    let url = format!("{data_root}{ACTS_PATH}");
    let entries: Vec<ActEntry> = client.get(&url).send().await?.error_for_status()?.json().await?;
    Ok(dedupe_acts(entries))
}

fn dedupe_acts(entries: Vec<ActEntry>) -> Vec<CatalogOption> {
    let mut seen = std::collections::BTreeSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.code.clone()))
        .map(|entry| CatalogOption {
            label: format!("{} ({})", entry.description, entry.code),
            value: entry.code,
        })
        .collect()
}

/// Fetches the sections catalog and builds dropdown options.
///
/// # Errors
///
/// Returns [`SourceError`] if the request fails or the body is not the
/// expected array shape.
pub async fn fetch_section_options(
    client: &reqwest::Client,
    data_root: &str,
) -> Result<Vec<CatalogOption>, SourceError> {
    let url = format!("{data_root}{SECTIONS_PATH}");
    let entries: Vec<SectionEntry> =
        client.get(&url).send().await?.error_for_status()?.json().await?;
    Ok(entries
        .into_iter()
        .map(|entry| CatalogOption {
            label: entry.section.clone(),
            value: entry.section,
        })
        .collect())
}
