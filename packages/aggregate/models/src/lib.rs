#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Aggregated result types produced by the `afis_stats_aggregate` crate.
//!
//! These are ephemeral view-model values keyed by state, district, or date
//! label: recomputed on every filter change, never persisted.

use std::collections::BTreeMap;

use afis_stats_report_models::MetricBag;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One aggregated output row: a state (or district) key with its summed
/// counters broken down per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyTotals {
    /// The state or district key, verbatim from the source data.
    pub key: String,
    /// Summed counters per category key.
    pub categories: BTreeMap<String, MetricBag>,
}

impl KeyTotals {
    /// Summed counters for one category, or `None` if the category never
    /// appeared under this key.
    #[must_use]
    pub fn category(&self, category: &str) -> Option<&MetricBag> {
        self.categories.get(category)
    }

    /// Grand total across every category, using each bag's `total` counter.
    #[must_use]
    pub fn grand_total(&self) -> u64 {
        self.categories.values().map(|bag| bag.get("total")).sum()
    }
}

/// Per-state (or per-district) aggregation result.
///
/// Rows keep first-encounter order over the walked input — the documented
/// ordering policy for table display. Lookup by key is provided for
/// callers that treat the result as a map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupedTotals {
    /// Output rows in first-encounter order.
    pub rows: Vec<KeyTotals>,
}

impl GroupedTotals {
    /// Looks a row up by its state/district key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&KeyTotals> {
        self.rows.iter().find(|row| row.key == key)
    }

    /// The row keys, in output order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.key.as_str())
    }

    /// Whether no key passed the filters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of output rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// One time-series row: a date with one column per (category, counter)
/// pair, keyed `"<category>.<counter>"` (bare counter name for schemas
/// without a category level).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesRow {
    /// Snapshot date of the bucket.
    pub date: NaiveDate,
    /// Summed value per column key.
    pub columns: BTreeMap<String, u64>,
}

impl TimeSeriesRow {
    /// Value of one column, or 0 when the column never appeared.
    #[must_use]
    pub fn get(&self, column: &str) -> u64 {
        self.columns.get(column).copied().unwrap_or(0)
    }
}

/// One requested status with its summed count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusTotal {
    /// The status label as requested by the caller.
    pub status: String,
    /// Sum over every leaf that passed the filters.
    pub total: u64,
}

/// Per-district hit/no-hit breakdown inside a [`StateStats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictStats {
    /// District key.
    pub district: String,
    /// Summed hits.
    pub hit: u64,
    /// Summed no-hits.
    pub nohit: u64,
}

/// One state's hit/no-hit totals with its district breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateStats {
    /// State key.
    pub state: String,
    /// Summed hits.
    pub hit: u64,
    /// Summed no-hits.
    pub nohit: u64,
    /// Per-district breakdown, in first-encounter order.
    pub districts: Vec<DistrictStats>,
}

/// Top-N ranking result: the leading states by hit count and by no-hit
/// count over the selected window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopStates {
    /// States ranked by descending hit count.
    pub by_hit: Vec<StateStats>,
    /// States ranked by descending no-hit count.
    pub by_nohit: Vec<StateStats>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouped_totals_lookup_by_key() {
        let totals = GroupedTotals {
            rows: vec![
                KeyTotals {
                    key: "Delhi".to_owned(),
                    categories: BTreeMap::new(),
                },
                KeyTotals {
                    key: "Goa".to_owned(),
                    categories: BTreeMap::new(),
                },
            ],
        };
        assert!(totals.get("Goa").is_some());
        assert!(totals.get("Punjab").is_none());
        assert_eq!(totals.keys().collect::<Vec<_>>(), vec!["Delhi", "Goa"]);
    }

    #[test]
    fn time_series_missing_column_reads_zero() {
        let row = TimeSeriesRow {
            date: "2025-04-01".parse().unwrap(),
            columns: BTreeMap::new(),
        };
        assert_eq!(row.get("tp.hit"), 0);
    }
}
