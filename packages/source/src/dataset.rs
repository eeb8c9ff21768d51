//! Config-driven dataset definition.
//!
//! [`DatasetDefinition`] captures everything unique about one published
//! dataset — where its files live, how they are named, and which tree
//! schema they follow — in a serializable config struct. A single generic
//! loader handles every dataset, eliminating per-report boilerplate.

use afis_stats_report_models::{DateRange, TreeKind};
use chrono::{Datelike as _, NaiveDate};
use serde::Deserialize;

/// A complete dataset definition, loaded from TOML at compile time.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetDefinition {
    /// Unique identifier (e.g. `"slip_capture"`).
    pub id: String,
    /// Human-readable name (e.g. `"Slip capture report"`).
    pub name: String,
    /// Origin-relative directory the files are published under.
    pub base_path: String,
    /// Which nested-tree schema the files follow.
    pub tree: TreeKind,
    /// Default date window when the caller does not supply one.
    pub window: DateWindow,
    /// How file names are derived from a date.
    pub scheme: PathScheme,
}

/// Default publication window for a dataset.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DateWindow {
    /// First published day.
    pub from: NaiveDate,
    /// Last published day.
    pub to: NaiveDate,
}

impl DateWindow {
    /// The window as an inclusive [`DateRange`].
    #[must_use]
    pub const fn range(self) -> DateRange {
        DateRange::new(self.from, self.to)
    }
}

/// How a dataset derives one file path per day.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PathScheme {
    /// `<base>/<month>/<day>/<prefix>_<day>_structured.json`
    DailyStructured {
        /// File-name prefix before the day component.
        file_prefix: String,
    },
    /// `<base>/<month>/daily/<prefix>_<month>_<day>_<year>.json`
    MonthlyDaily {
        /// File-name prefix before the date components.
        file_prefix: String,
    },
    /// A single `<base>/<file_name>` snapshot with no date axis.
    Consolidated {
        /// The snapshot file name.
        file_name: String,
    },
}

impl DatasetDefinition {
    /// Builds the origin-relative path of the file for `date`.
    ///
    /// [`PathScheme::Consolidated`] datasets ignore the date.
    #[must_use]
    pub fn file_path(&self, date: NaiveDate) -> String {
        let month = date.month();
        let day = date.day();
        match &self.scheme {
            PathScheme::DailyStructured { file_prefix } => format!(
                "{}/{month:02}/{day:02}/{file_prefix}_{day:02}_structured.json",
                self.base_path
            ),
            PathScheme::MonthlyDaily { file_prefix } => format!(
                "{}/{month:02}/daily/{file_prefix}_{month:02}_{day:02}_{}.json",
                self.base_path,
                date.year()
            ),
            PathScheme::Consolidated { file_name } => {
                format!("{}/{file_name}", self.base_path)
            }
        }
    }

    /// Whether this dataset is a single snapshot rather than a daily series.
    #[must_use]
    pub const fn is_consolidated(&self) -> bool {
        matches!(self.scheme, PathScheme::Consolidated { .. })
    }
}

/// Parses one embedded dataset TOML.
///
/// # Errors
///
/// Returns the TOML deserialization error as a string.
pub fn parse_dataset_toml(toml_str: &str) -> Result<DatasetDefinition, String> {
    toml::de::from_str(toml_str).map_err(|e| e.to_string())
}
