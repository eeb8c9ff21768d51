//! CSV row building and serialization.
//!
//! Builders produce a [`CsvDocument`] — plain headers and string cells —
//! that the frontend hands to its download helper;
//! [`CsvDocument::to_csv_string`] serializes with RFC-4180 quoting for
//! callers that want the bytes directly.

use afis_stats_aggregate_models::{GroupedTotals, TimeSeriesRow};

use crate::{ExportError, table::StateTableRow};

/// A rectangular export: one header row plus data rows of equal width.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvDocument {
    /// Header row values.
    pub headers: Vec<String>,
    /// Data rows; every row has one cell per header.
    pub rows: Vec<Vec<String>>,
}

impl CsvDocument {
    /// Serializes the document to a CSV string with RFC-4180 quoting.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] if CSV serialization fails.
    pub fn to_csv_string(&self) -> Result<String, ExportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| ExportError::Buffer(e.to_string()))?;
        Ok(String::from_utf8(bytes)?)
    }
}

/// One CSV row per (key, category) pair of a grouped-totals result.
///
/// Columns are the requested data types plus the `total` column; an
/// empty data-type selection exports the sorted union of counter names
/// seen in the result.
#[must_use]
pub fn grouped_totals_csv(totals: &GroupedTotals, data_types: &[String]) -> CsvDocument {
    let columns: Vec<String> = if data_types.is_empty() {
        let mut names: Vec<String> = totals
            .rows
            .iter()
            .flat_map(|row| row.categories.values())
            .flat_map(|bag| bag.itemized().map(|(name, _)| name.to_owned()))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    } else {
        data_types.to_vec()
    };

    let mut headers = vec!["State".to_owned(), "Category".to_owned()];
    headers.extend(columns.iter().cloned());
    headers.push("Total".to_owned());

    let rows = totals
        .rows
        .iter()
        .flat_map(|row| {
            row.categories.iter().map(|(category, bag)| {
                let mut cells = vec![row.key.clone(), category.clone()];
                cells.extend(columns.iter().map(|name| bag.get(name).to_string()));
                cells.push(bag.get("total").to_string());
                cells
            })
        })
        .collect();

    CsvDocument { headers, rows }
}

/// One CSV row per state table row, with the requested status columns.
#[must_use]
pub fn state_table_csv(rows: &[StateTableRow], statuses: &[String]) -> CsvDocument {
    let mut headers = vec!["State".to_owned()];
    headers.extend(statuses.iter().cloned());
    headers.push("Total".to_owned());

    let data = rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.state.clone()];
            cells.extend(statuses.iter().map(|status| row.cell(status).to_string()));
            cells.push(row.total.to_string());
            cells
        })
        .collect();

    CsvDocument {
        headers,
        rows: data,
    }
}

/// One CSV row per time-series bucket over the sorted union of columns.
#[must_use]
pub fn time_series_csv(rows: &[TimeSeriesRow]) -> CsvDocument {
    let mut columns: Vec<String> = rows
        .iter()
        .flat_map(|row| row.columns.keys().cloned())
        .collect();
    columns.sort_unstable();
    columns.dedup();

    let mut headers = vec!["Date".to_owned()];
    headers.extend(columns.iter().cloned());

    let data = rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.date.to_string()];
            cells.extend(columns.iter().map(|column| row.get(column).to_string()));
            cells
        })
        .collect();

    CsvDocument {
        headers,
        rows: data,
    }
}
