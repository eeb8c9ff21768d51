//! Leaf flattening — the common substrate under tables and status totals.

use afis_stats_report_models::{DailyRecord, FilterState, LeafRecord};

use crate::walk::{for_each_leaf, passes};

/// Produces one [`LeafRecord`] per leaf of every record, unconditionally.
///
/// Every leaf's `total` is derived by summing its itemized counters; an
/// upstream-supplied total rides along untouched in `supplied_total`.
/// Both the table builders and the status-total computations consume this
/// flattening, so the two presentations can never disagree.
#[must_use]
pub fn flatten_records(records: &[DailyRecord]) -> Vec<LeafRecord> {
    let mut leaves = Vec::new();
    for record in records {
        for_each_leaf(&record.data, &mut |path, bag| {
            leaves.push(LeafRecord {
                date: record.date,
                state: path.state.to_owned(),
                district: path.district.map(str::to_owned),
                act: path.act.map(str::to_owned),
                section: path.section.map(str::to_owned),
                category: path.category.map(str::to_owned),
                metrics: bag.clone(),
                total: bag.derived_total(),
                supplied_total: bag.supplied_total(),
            });
        });
    }
    leaves
}

/// Flattens only the leaves passing every active filter predicate.
///
/// The data-type filter is not applied here — a leaf record always
/// carries every known counter; counter selection happens at the
/// presentation layer.
#[must_use]
pub fn filtered_leaves(records: &[DailyRecord], filters: &FilterState) -> Vec<LeafRecord> {
    let mut leaves = Vec::new();
    for record in records {
        if !filters.accepts_date(record.date) {
            continue;
        }
        for_each_leaf(&record.data, &mut |path, bag| {
            if !passes(filters, path) {
                return;
            }
            leaves.push(LeafRecord {
                date: record.date,
                state: path.state.to_owned(),
                district: path.district.map(str::to_owned),
                act: path.act.map(str::to_owned),
                section: path.section.map(str::to_owned),
                category: path.category.map(str::to_owned),
                metrics: bag.clone(),
                total: bag.derived_total(),
                supplied_total: bag.supplied_total(),
            });
        });
    }
    leaves
}

#[cfg(test)]
mod tests {
    use afis_stats_report_models::{DatasetTree, TreeKind};

    use super::*;

    fn slip_records() -> Vec<DailyRecord> {
        vec![DailyRecord {
            date: "2025-05-10".parse().unwrap(),
            data: DatasetTree::from_value(
                TreeKind::Slip,
                serde_json::json!({
                    "Maharashtra": {
                        "Pune": {
                            "IPC": {
                                "302": {
                                    "arresty_received_tp": 4,
                                    "convicted_received_tp": 2,
                                    "suspect_received_tp": 1,
                                },
                                "307": {"arresty_received_tp": 1, "total": 9},
                            },
                        },
                    },
                }),
            )
            .unwrap(),
        }]
    }

    #[test]
    fn leaf_total_equals_sum_of_itemized_counters() {
        let leaves = flatten_records(&slip_records());
        for leaf in &leaves {
            let summed: u64 = leaf.metrics.itemized().map(|(_, count)| count).sum();
            assert_eq!(leaf.total, summed);
        }
    }

    #[test]
    fn supplied_total_is_preserved_not_reconciled() {
        let leaves = flatten_records(&slip_records());
        let leaf = leaves
            .iter()
            .find(|l| l.section.as_deref() == Some("307"))
            .unwrap();
        assert_eq!(leaf.total, 1);
        assert_eq!(leaf.supplied_total, Some(9));
    }

    #[test]
    fn flatten_qualifies_every_level() {
        let leaves = flatten_records(&slip_records());
        assert_eq!(leaves.len(), 2);
        let leaf = &leaves[0];
        assert_eq!(leaf.state, "Maharashtra");
        assert_eq!(leaf.district.as_deref(), Some("Pune"));
        assert_eq!(leaf.act.as_deref(), Some("IPC"));
        assert!(leaf.category.is_none());
    }

    #[test]
    fn filtered_leaves_applies_section_predicate() {
        let filters = FilterState::all().with_sections(["302"]);
        let leaves = filtered_leaves(&slip_records(), &filters);
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].section.as_deref(), Some("302"));
    }

    #[test]
    fn filtered_leaves_keeps_all_counters_despite_data_type_filter() {
        let filters = FilterState::all().with_data_types(["arresty_received_tp"]);
        let leaves = filtered_leaves(&slip_records(), &filters);
        let leaf = leaves
            .iter()
            .find(|l| l.section.as_deref() == Some("302"))
            .unwrap();
        assert_eq!(leaf.metrics.get("convicted_received_tp"), 2);
    }
}
