//! Chart series shaping.

use std::collections::BTreeMap;

use afis_stats_aggregate_models::TimeSeriesRow;
use chrono::NaiveDate;
use serde::Serialize;

use crate::{ViewResult, table::StateTableRow};

/// Series colors, assigned positionally.
pub const SERIES_PALETTE: [&str; 15] = [
    "#8884d8", "#82ca9d", "#ffc658", "#ff7300", "#8dd1e1", "#d084d0", "#ffb347", "#87ceeb",
    "#dda0dd", "#98fb98", "#f0e68c", "#ff6347", "#40e0d0", "#ee82ee", "#90ee90",
];

/// The palette color for series position `index`, wrapping around.
#[must_use]
pub const fn series_color(index: usize) -> &'static str {
    SERIES_PALETTE[index % SERIES_PALETTE.len()]
}

/// One plotted series: its data key, legend label, and color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    /// Key into each datum's value map.
    pub key: String,
    /// Legend label.
    pub label: String,
    /// Positional palette color.
    pub color: &'static str,
}

/// One bar-chart group: a label with one value per series key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonDatum {
    /// Group label (state or district).
    pub label: String,
    /// Value per series key; keys a group lacks read as 0.
    pub values: BTreeMap<String, u64>,
}

/// A grouped bar chart comparing statuses across states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonChart {
    /// One series per status, colors assigned by position.
    pub series: Vec<ChartSeries>,
    /// One group per table row, plus zero-valued groups for selected
    /// keys absent from the data.
    pub data: Vec<ComparisonDatum>,
}

/// Shapes table rows into a grouped bar chart.
///
/// Selected states that produced no rows still appear as zero-valued
/// groups so the axis reflects the user's selection; duplicate selections
/// are collapsed. An empty status selection is the sentinel case, not an
/// error.
#[must_use]
pub fn comparison_chart(
    rows: &[StateTableRow],
    statuses: &[String],
    selected_states: &[String],
) -> ViewResult<ComparisonChart> {
    if statuses.is_empty() {
        return ViewResult::Empty {
            message: "Select at least one status to display.".to_owned(),
        };
    }
    if rows.is_empty() && selected_states.is_empty() {
        return ViewResult::Empty {
            message: "No data for the current selection.".to_owned(),
        };
    }

    let series = build_series(statuses);

    let mut data: Vec<ComparisonDatum> = rows
        .iter()
        .map(|row| ComparisonDatum {
            label: row.state.clone(),
            values: statuses
                .iter()
                .map(|status| (status.clone(), row.cell(status)))
                .collect(),
        })
        .collect();

    for state in selected_states {
        if data.iter().any(|datum| &datum.label == state) {
            continue;
        }
        data.push(ComparisonDatum {
            label: state.clone(),
            values: statuses.iter().map(|status| (status.clone(), 0)).collect(),
        });
    }

    ViewResult::Data(ComparisonChart { series, data })
}

/// One line-chart point: a date with one value per series key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Bucket date.
    pub date: NaiveDate,
    /// Value per plotted column; columns a bucket lacks read as 0.
    pub values: BTreeMap<String, u64>,
}

/// A date-axis line chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendChart {
    /// One series per plotted column, colors assigned by position.
    pub series: Vec<ChartSeries>,
    /// Points ascending by date (input order is preserved; time-series
    /// rows arrive date-sorted).
    pub points: Vec<TrendPoint>,
}

/// Shapes time-series rows into a line chart over the given columns.
#[must_use]
pub fn trend_chart(rows: &[TimeSeriesRow], columns: &[String]) -> ViewResult<TrendChart> {
    if columns.is_empty() {
        return ViewResult::Empty {
            message: "Select at least one metric to display.".to_owned(),
        };
    }
    if rows.is_empty() {
        return ViewResult::Empty {
            message: "No data for the current selection.".to_owned(),
        };
    }

    let series = build_series(columns);
    let points = rows
        .iter()
        .map(|row| TrendPoint {
            date: row.date,
            values: columns
                .iter()
                .map(|column| (column.clone(), row.get(column)))
                .collect(),
        })
        .collect();

    ViewResult::Data(TrendChart { series, points })
}

fn build_series(keys: &[String]) -> Vec<ChartSeries> {
    keys.iter()
        .enumerate()
        .map(|(index, key)| ChartSeries {
            key: key.clone(),
            label: key.clone(),
            color: series_color(index),
        })
        .collect()
}
