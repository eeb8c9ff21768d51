#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Presentation adapters: reshape aggregated results into the literal
//! row/column/series shapes the chart and table components render.
//!
//! Adapters never mutate their aggregated input, and an invalid selection
//! (nothing to plot) comes back as an explicit [`ViewResult::Empty`]
//! sentinel with a user-facing message — a recoverable input state, not
//! an error.

pub mod chart;
pub mod csv_export;
pub mod table;

use serde::Serialize;

pub use chart::{SERIES_PALETTE, series_color};
pub use csv_export::CsvDocument;
pub use table::StateTableRow;

/// Outcome of shaping data for a rendering component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ViewResult<T> {
    /// Nothing to render; show the message instead of an empty chart.
    Empty {
        /// User-facing explanation (e.g. "Select at least one status").
        message: String,
    },
    /// A renderable shape.
    Data(T),
}

impl<T> ViewResult<T> {
    /// Whether this is the empty sentinel.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }

    /// The shaped data, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Empty { .. } => None,
            Self::Data(data) => Some(data),
        }
    }
}

/// Errors that can occur while serializing an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The CSV writer's buffer could not be recovered.
    #[error("CSV buffer error: {0}")]
    Buffer(String),

    /// The serialized CSV was not valid UTF-8.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
