//! Concurrent per-day snapshot loading.
//!
//! One HTTP fetch per calendar day in the window, issued through a bounded
//! [`buffer_unordered`](futures::StreamExt::buffer_unordered) fan-out.
//! Each fetch settles into its own slot; the slots are merged, the
//! failures dropped, and the survivors sorted by date only after every
//! attempt has settled, so completion order never matters. No retries and
//! no caching — every invocation re-fetches.

use afis_stats_report_models::{DailyRecord, DatasetTree, DateRange, TreeKind};
use chrono::NaiveDate;
use futures::{StreamExt as _, stream};

use crate::{SourceError, dataset::DatasetDefinition, default_data_root};

/// Default number of in-flight day fetches.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Options for one load invocation.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Date window to load; `None` uses the dataset's published window.
    pub date_range: Option<DateRange>,
    /// Optional load-time restriction to a single state. Applies the same
    /// exact-membership test as the aggregation-time state predicate, so
    /// the two can never diverge.
    pub state_filter: Option<String>,
    /// Maximum number of in-flight fetches.
    pub concurrency: usize,
    /// Origin the dataset's base path is joined onto.
    pub data_root: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            date_range: None,
            state_filter: None,
            concurrency: DEFAULT_CONCURRENCY,
            data_root: default_data_root(),
        }
    }
}

/// Loads every available day of a dataset, ascending by date.
///
/// A day whose file is missing, unreachable, or malformed is skipped;
/// loading the other days proceeds regardless. Zero successful days is an
/// empty list, never an error.
pub async fn load_daily_records(
    client: &reqwest::Client,
    dataset: &DatasetDefinition,
    options: &LoadOptions,
) -> Vec<DailyRecord> {
    let window = options
        .date_range
        .unwrap_or_else(|| dataset.window.range());
    let dates = days_in(window);
    let total = dates.len();

    let results: Vec<Option<DailyRecord>> = stream::iter(dates.into_iter().map(|date| {
        let url = format!("{}{}", options.data_root, dataset.file_path(date));
        let tree_kind = dataset.tree;
        let state_filter = options.state_filter.as_deref();
        async move {
            match fetch_day(client, &url, tree_kind, date, state_filter).await {
                Ok(record) => record,
                Err(e) => {
                    log::debug!("Skipping {date}: {e}");
                    None
                }
            }
        }
    }))
    .buffer_unordered(options.concurrency.max(1))
    .collect()
    .await;

    let records = assemble(results);

    log::info!(
        "Loaded {} of {total} days for dataset {}",
        records.len(),
        dataset.id
    );

    records
}

/// Merges the settled per-day slots: failed days drop out, survivors sort
/// ascending by date regardless of completion order.
fn assemble(results: Vec<Option<DailyRecord>>) -> Vec<DailyRecord> {
    let mut records: Vec<DailyRecord> = results.into_iter().flatten().collect();
    records.sort_by_key(|record| record.date);
    records
}

/// Loads a consolidated single-snapshot dataset.
///
/// Returns `None` when the snapshot is missing or malformed (logged and
/// treated as "no data", matching the per-day policy).
pub async fn load_consolidated(
    client: &reqwest::Client,
    dataset: &DatasetDefinition,
    options: &LoadOptions,
) -> Option<DatasetTree> {
    let url = format!(
        "{}{}",
        options.data_root,
        dataset.file_path(dataset.window.from)
    );
    match fetch_tree(client, &url, dataset.tree, options.state_filter.as_deref()).await {
        Ok(tree) => Some(tree),
        Err(e) => {
            log::warn!("Failed to load consolidated dataset {}: {e}", dataset.id);
            None
        }
    }
}

/// Every day in the window, inclusive and ascending.
fn days_in(window: DateRange) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = window.from;
    while current <= window.to {
        dates.push(current);
        let Some(next) = current.succ_opt() else {
            break;
        };
        current = next;
    }
    dates
}

async fn fetch_day(
    client: &reqwest::Client,
    url: &str,
    kind: TreeKind,
    date: NaiveDate,
    state_filter: Option<&str>,
) -> Result<Option<DailyRecord>, SourceError> {
    let tree = fetch_tree(client, url, kind, state_filter).await?;
    if tree.is_empty() {
        return Ok(None);
    }
    Ok(Some(DailyRecord { date, data: tree }))
}

async fn fetch_tree(
    client: &reqwest::Client,
    url: &str,
    kind: TreeKind,
    state_filter: Option<&str>,
) -> Result<DatasetTree, SourceError> {
    log::debug!("Fetching {url}");
    let response = client.get(url).send().await?.error_for_status()?;
    let body: serde_json::Value = response.json().await?;

    let mut tree = DatasetTree::from_value(kind, normalize_body(body))?;
    if let Some(state) = state_filter {
        tree.retain_states(|key| key == state);
    }
    Ok(tree)
}

/// Normalises the published body shapes into one state-keyed object.
///
/// Producers emit three shapes: a state-keyed object tree, the same tree
/// wrapped in a single `"state"` envelope, and an array of per-state
/// objects each carrying a `state` name field. Array entries without a
/// usable `state` field are dropped.
fn normalize_body(body: serde_json::Value) -> serde_json::Value {
    match body {
        serde_json::Value::Object(mut map) => {
            if map.len() == 1
                && let Some(inner) = map.get("state")
                && inner.is_object()
            {
                return map.remove("state").unwrap_or_default();
            }
            serde_json::Value::Object(map)
        }
        serde_json::Value::Array(entries) => {
            let mut folded = serde_json::Map::new();
            for entry in entries {
                let serde_json::Value::Object(mut fields) = entry else {
                    continue;
                };
                let Some(state) = fields.remove("state").and_then(|v| match v {
                    serde_json::Value::String(s) => Some(s),
                    _ => None,
                }) else {
                    continue;
                };
                folded.insert(state, serde_json::Value::Object(fields));
            }
            serde_json::Value::Object(folded)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn days_in_window_is_inclusive() {
        let dates = days_in(DateRange::new(date("2025-04-29"), date("2025-05-02")));
        assert_eq!(
            dates,
            vec![
                date("2025-04-29"),
                date("2025-04-30"),
                date("2025-05-01"),
                date("2025-05-02"),
            ]
        );
    }

    #[test]
    fn inverted_window_yields_no_days() {
        assert!(days_in(DateRange::new(date("2025-05-02"), date("2025-05-01"))).is_empty());
    }

    #[test]
    fn normalize_unwraps_state_envelope() {
        let body = serde_json::json!({"state": {"Delhi": {"tp": {"hit": 1}}}});
        assert_eq!(
            normalize_body(body),
            serde_json::json!({"Delhi": {"tp": {"hit": 1}}})
        );
    }

    #[test]
    fn normalize_folds_array_of_state_objects() {
        let body = serde_json::json!([
            {"state": "Delhi", "tp": {"hit": 1}},
            {"state": "Goa", "tp": {"hit": 2}},
            {"no_state_field": true},
        ]);
        assert_eq!(
            normalize_body(body),
            serde_json::json!({
                "Delhi": {"tp": {"hit": 1}},
                "Goa": {"tp": {"hit": 2}},
            })
        );
    }

    #[test]
    fn failed_day_between_two_successes_is_dropped_and_rest_sorted() {
        let day = |d: &str| DailyRecord {
            date: date(d),
            data: DatasetTree::from_value(
                TreeKind::Trace,
                serde_json::json!({"Delhi": {"tp": {"hit": 1}}}),
            )
            .unwrap(),
        };
        // Completion order is arbitrary under buffer_unordered; the middle
        // day's 404 settles to None.
        let records = assemble(vec![Some(day("2025-04-03")), None, Some(day("2025-04-01"))]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, date("2025-04-01"));
        assert_eq!(records[1].date, date("2025-04-03"));
    }

    #[test]
    fn normalize_passes_plain_tree_through() {
        let body = serde_json::json!({"Delhi": {"tp": {"hit": 1}}, "Goa": {"tp": {"hit": 2}}});
        assert_eq!(normalize_body(body.clone()), body);
    }

    #[tokio::test]
    async fn unreachable_days_yield_empty_not_error() {
        // No server is listening on this port, so every fetch fails the
        // same way a 404 would; the loader must settle to an empty list,
        // not an error.
        let client = reqwest::Client::new();
        let dataset = crate::registry::dataset("agency").unwrap();
        let options = LoadOptions {
            date_range: Some(DateRange::new(date("2025-04-01"), date("2025-04-03"))),
            data_root: "http://127.0.0.1:9".to_owned(),
            ..LoadOptions::default()
        };
        let records = load_daily_records(&client, &dataset, &options).await;
        assert!(records.is_empty());
    }
}
