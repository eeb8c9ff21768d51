//! Date-bucketed time series.

use std::collections::BTreeMap;

use afis_stats_aggregate_models::TimeSeriesRow;
use afis_stats_report_models::{DailyRecord, FilterState, TOTAL_KEY};

use crate::walk::{for_each_leaf, passes};

/// Buckets every leaf passing the filters by snapshot date.
///
/// One row per date with one column per (category, counter) pair, keyed
/// `"<category>.<counter>"` — bare counter names for schemas without a
/// category level. Every bucket also carries a per-category `total`
/// column following the supplied-else-derived rule. Rows are sorted
/// ascending by date regardless of input order; a record whose leaves are
/// all filtered out still contributes an all-zero row so trend charts
/// show the gap.
#[must_use]
pub fn aggregate_time_series(records: &[DailyRecord], filters: &FilterState) -> Vec<TimeSeriesRow> {
    let mut buckets: BTreeMap<chrono::NaiveDate, BTreeMap<String, u64>> = BTreeMap::new();

    for record in records {
        if !filters.accepts_date(record.date) {
            continue;
        }
        let columns = buckets.entry(record.date).or_default();
        for_each_leaf(&record.data, &mut |path, bag| {
            if !passes(filters, path) {
                return;
            }
            for (name, count) in bag.itemized() {
                if !filters.accepts_data_type(name) {
                    continue;
                }
                *columns.entry(column_key(path.category, name)).or_insert(0) += count;
            }
            *columns
                .entry(column_key(path.category, TOTAL_KEY))
                .or_insert(0) += bag.supplied_total().unwrap_or_else(|| bag.derived_total());
        });
    }

    buckets
        .into_iter()
        .map(|(date, columns)| TimeSeriesRow { date, columns })
        .collect()
}

fn column_key(category: Option<&str>, name: &str) -> String {
    category.map_or_else(|| name.to_owned(), |c| format!("{c}.{name}"))
}
