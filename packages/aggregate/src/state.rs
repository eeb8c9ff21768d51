//! Per-state and per-district totals.

use afis_stats_aggregate_models::{GroupedTotals, KeyTotals};
use afis_stats_report_models::{DailyRecord, FilterState, MetricBag, TOTAL_KEY};

use crate::walk::{LeafPath, for_each_leaf, passes};

/// Bucket used for schemas without a category level.
pub const ALL_CATEGORY: &str = "all";

/// Sums every leaf passing the filters into one row per state.
///
/// Each row breaks the sums down by the tree's category key; schemas
/// without a category level land under [`ALL_CATEGORY`]. Alongside the
/// itemized counters, every bag carries a `total` column summing the
/// upstream-supplied total where present and the derived total otherwise.
///
/// Ordering policy: rows keep first-encounter order over the walked input
/// (records ascending by date, tree keys in key order within a day).
#[must_use]
pub fn aggregate_by_state(records: &[DailyRecord], filters: &FilterState) -> GroupedTotals {
    aggregate_grouped(records, filters, |path| Some(path.state))
}

/// Sums every leaf passing the filters into one row per district.
///
/// Leaves of schemas without a district level are skipped. Ordering policy
/// matches [`aggregate_by_state`].
#[must_use]
pub fn aggregate_by_district(records: &[DailyRecord], filters: &FilterState) -> GroupedTotals {
    aggregate_grouped(records, filters, |path| path.district)
}

fn aggregate_grouped<'a>(
    records: &'a [DailyRecord],
    filters: &FilterState,
    group_key: impl Fn(&LeafPath<'a>) -> Option<&'a str>,
) -> GroupedTotals {
    let mut totals = GroupedTotals::default();

    for record in records {
        if !filters.accepts_date(record.date) {
            continue;
        }
        for_each_leaf(&record.data, &mut |path, bag| {
            if !passes(filters, path) {
                return;
            }
            let Some(key) = group_key(path) else {
                return;
            };
            let category = path.category.unwrap_or(ALL_CATEGORY);

            let index = totals.rows.iter().position(|row| row.key == key).unwrap_or_else(|| {
                totals.rows.push(KeyTotals {
                    key: key.to_owned(),
                    categories: std::collections::BTreeMap::new(),
                });
                totals.rows.len() - 1
            });
            let sums = totals.rows[index]
                .categories
                .entry(category.to_owned())
                .or_default();
            accumulate(sums, bag, filters);
        });
    }

    log::debug!(
        "Aggregated {} records into {} rows",
        records.len(),
        totals.rows.len()
    );

    totals
}

/// Adds one leaf bag into an accumulator, respecting the data-type filter.
///
/// The `total` column uses the upstream-supplied total when the producer
/// wrote one, and the derived sum of itemized counters otherwise.
fn accumulate(sums: &mut MetricBag, bag: &MetricBag, filters: &FilterState) {
    for (name, count) in bag.itemized() {
        if filters.accepts_data_type(name) {
            sums.add(name, count);
        }
    }
    sums.add(
        TOTAL_KEY,
        bag.supplied_total().unwrap_or_else(|| bag.derived_total()),
    );
}

/// Sums one category's counters across every state and district passing
/// the filters, then masks counters outside the data-type selection to 0.
///
/// The masked counters stay present in the result so card layouts can
/// render a zero instead of dropping the stat; the `total` column is
/// never masked.
#[must_use]
pub fn combined_totals(
    records: &[DailyRecord],
    category: &str,
    filters: &FilterState,
) -> MetricBag {
    let mut sums = MetricBag::new();

    for record in records {
        if !filters.accepts_date(record.date) {
            continue;
        }
        for_each_leaf(&record.data, &mut |path, bag| {
            if !passes(filters, path) {
                return;
            }
            if path.category.is_some_and(|c| c != category) {
                return;
            }
            for (name, count) in bag.itemized() {
                sums.add(name, count);
            }
            sums.add(
                TOTAL_KEY,
                bag.supplied_total().unwrap_or_else(|| bag.derived_total()),
            );
        });
    }

    sums.iter()
        .map(|(name, count)| {
            if name == TOTAL_KEY || filters.accepts_data_type(name) {
                (name.to_owned(), count)
            } else {
                (name.to_owned(), 0)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use afis_stats_report_models::{DatasetTree, TreeKind};

    use super::*;

    fn record(date: &str, kind: TreeKind, body: serde_json::Value) -> DailyRecord {
        DailyRecord {
            date: date.parse().unwrap(),
            data: DatasetTree::from_value(kind, body).unwrap(),
        }
    }

    fn delhi_records() -> Vec<DailyRecord> {
        vec![
            record(
                "2025-04-01",
                TreeKind::Trace,
                serde_json::json!({
                    "Delhi": {"tp": {"enrollment": 5, "hit": 2, "nohit": 3}},
                }),
            ),
            record(
                "2025-04-02",
                TreeKind::Trace,
                serde_json::json!({
                    "Delhi": {"tp": {"enrollment": 1, "hit": 0, "nohit": 1}},
                }),
            ),
        ]
    }

    #[test]
    fn sums_across_days_per_state_and_category() {
        let filters = FilterState::all()
            .with_states(["Delhi"])
            .with_categories(["tp"])
            .with_data_types(["enrollment", "hit", "nohit"]);
        let totals = aggregate_by_state(&delhi_records(), &filters);

        let tp = totals.get("Delhi").unwrap().category("tp").unwrap();
        assert_eq!(tp.get("enrollment"), 6);
        assert_eq!(tp.get("hit"), 2);
        assert_eq!(tp.get("nohit"), 4);
    }

    #[test]
    fn non_matching_state_filter_yields_empty_result() {
        let filters = FilterState::all().with_states(["Mumbai"]);
        let totals = aggregate_by_state(&delhi_records(), &filters);
        assert!(totals.is_empty());
    }

    #[test]
    fn full_pass_identity_matches_unconditional_sum() {
        let totals = aggregate_by_state(&delhi_records(), &FilterState::all());
        let tp = totals.get("Delhi").unwrap().category("tp").unwrap();
        assert_eq!(tp.get("enrollment"), 6);
        assert_eq!(tp.get("hit"), 2);
        assert_eq!(tp.get("nohit"), 4);
        assert_eq!(tp.get("total"), 12);
    }

    #[test]
    fn output_keys_are_members_of_the_state_filter() {
        let mut records = delhi_records();
        records.push(record(
            "2025-04-03",
            TreeKind::Trace,
            serde_json::json!({"Goa": {"tp": {"hit": 9}}}),
        ));
        let filters = FilterState::all().with_states(["Goa"]);
        let totals = aggregate_by_state(&records, &filters);
        assert!(totals.keys().all(|key| key == "Goa"));
    }

    #[test]
    fn order_independent_over_input_permutations() {
        let mut records = delhi_records();
        let forward = aggregate_by_state(&records, &FilterState::all());
        records.reverse();
        let reversed = aggregate_by_state(&records, &FilterState::all());
        assert_eq!(forward, reversed);
    }

    #[test]
    fn idempotent_for_same_inputs() {
        let records = delhi_records();
        let filters = FilterState::all().with_categories(["tp"]);
        assert_eq!(
            aggregate_by_state(&records, &filters),
            aggregate_by_state(&records, &filters)
        );
    }

    #[test]
    fn date_range_excludes_out_of_window_records() {
        let filters = FilterState::all().with_date_range(
            afis_stats_report_models::DateRange::new(
                "2025-04-02".parse().unwrap(),
                "2025-04-30".parse().unwrap(),
            ),
        );
        let totals = aggregate_by_state(&delhi_records(), &filters);
        let tp = totals.get("Delhi").unwrap().category("tp").unwrap();
        assert_eq!(tp.get("enrollment"), 1);
    }

    #[test]
    fn district_rows_group_by_district_key() {
        let records = vec![record(
            "2025-04-01",
            TreeKind::Agency,
            serde_json::json!({
                "Maharashtra": {
                    "Pune": {"tp": {"enrol": 3, "hit": 1, "nohit": 0}},
                    "Nagpur": {"tp": {"enrol": 2, "hit": 0, "nohit": 2}},
                },
            }),
        )];
        let totals = aggregate_by_district(&records, &FilterState::all());
        assert_eq!(totals.len(), 2);
        let pune = totals.get("Pune").unwrap().category("tp").unwrap();
        assert_eq!(pune.get("enrollment"), 3);
    }

    #[test]
    fn trace_leaves_skipped_in_district_fold() {
        let totals = aggregate_by_district(&delhi_records(), &FilterState::all());
        assert!(totals.is_empty());
    }

    #[test]
    fn slip_leaves_bucket_under_all_category() {
        let records = vec![record(
            "2025-04-01",
            TreeKind::Slip,
            serde_json::json!({
                "Maharashtra": {
                    "Pune": {"IPC": {"302": {"arresty_received_tp": 4}}},
                },
            }),
        )];
        let totals = aggregate_by_state(&records, &FilterState::all());
        let bag = totals
            .get("Maharashtra")
            .unwrap()
            .category(ALL_CATEGORY)
            .unwrap();
        assert_eq!(bag.get("arresty_received_tp"), 4);
        assert_eq!(bag.get("total"), 4);
    }

    #[test]
    fn combined_totals_masks_unselected_data_types() {
        let filters = FilterState::all().with_data_types(["enrollment"]);
        let sums = combined_totals(&delhi_records(), "tp", &filters);
        assert_eq!(sums.get("enrollment"), 6);
        assert_eq!(sums.get("hit"), 0);
        assert_eq!(sums.get("nohit"), 0);
        assert_eq!(sums.get("total"), 12);
    }

    #[test]
    fn supplied_total_preferred_over_derived_in_total_column() {
        let records = vec![record(
            "2025-04-01",
            TreeKind::Trace,
            serde_json::json!({
                "Delhi": {"tp": {"hit": 2, "nohit": 1, "total": 99}},
            }),
        )];
        let totals = aggregate_by_state(&records, &FilterState::all());
        let tp = totals.get("Delhi").unwrap().category("tp").unwrap();
        assert_eq!(tp.get("total"), 99);
    }
}
