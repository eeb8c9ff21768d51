//! Distinct-key extraction for cascading filter dropdowns.
//!
//! Each function narrows by the selection above it: districts for the
//! chosen states, acts for the chosen states and districts, and so on.
//! An empty selection means no restriction, the same convention the
//! aggregation predicates use. Output is sorted and deduplicated.

use std::collections::BTreeSet;

use afis_stats_report_models::DailyRecord;

use crate::walk::for_each_leaf;

fn member(set: &[String], key: &str) -> bool {
    set.is_empty() || set.iter().any(|s| s == key)
}

/// Every state key appearing in the records.
#[must_use]
pub fn states(records: &[DailyRecord]) -> Vec<String> {
    let mut keys = BTreeSet::new();
    for record in records {
        for state in record.data.states() {
            keys.insert(state.to_owned());
        }
    }
    keys.into_iter().collect()
}

/// Every district key under the selected states.
#[must_use]
pub fn districts(records: &[DailyRecord], selected_states: &[String]) -> Vec<String> {
    let mut keys = BTreeSet::new();
    for record in records {
        for_each_leaf(&record.data, &mut |path, _| {
            if let Some(district) = path.district
                && member(selected_states, path.state)
            {
                keys.insert(district.to_owned());
            }
        });
    }
    keys.into_iter().collect()
}

/// Every act key under the selected states and districts.
#[must_use]
pub fn acts(
    records: &[DailyRecord],
    selected_states: &[String],
    selected_districts: &[String],
) -> Vec<String> {
    let mut keys = BTreeSet::new();
    for record in records {
        for_each_leaf(&record.data, &mut |path, _| {
            if let Some(act) = path.act
                && member(selected_states, path.state)
                && path.district.is_some_and(|d| member(selected_districts, d))
            {
                keys.insert(act.to_owned());
            }
        });
    }
    keys.into_iter().collect()
}

/// Every section key under the selected states, districts, and acts.
#[must_use]
pub fn sections(
    records: &[DailyRecord],
    selected_states: &[String],
    selected_districts: &[String],
    selected_acts: &[String],
) -> Vec<String> {
    let mut keys = BTreeSet::new();
    for record in records {
        for_each_leaf(&record.data, &mut |path, _| {
            if let Some(section) = path.section
                && member(selected_states, path.state)
                && path.district.is_some_and(|d| member(selected_districts, d))
                && path.act.is_some_and(|a| member(selected_acts, a))
            {
                keys.insert(section.to_owned());
            }
        });
    }
    keys.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use afis_stats_report_models::{DatasetTree, TreeKind};

    use super::*;

    fn records() -> Vec<DailyRecord> {
        vec![
            DailyRecord {
                date: "2025-04-01".parse().unwrap(),
                data: DatasetTree::from_value(
                    TreeKind::Slip,
                    serde_json::json!({
                        "Maharashtra": {
                            "Pune": {"IPC": {"302": {"arresty_received_tp": 1}}},
                            "Nagpur": {"CrPC": {"41": {"arresty_received_tp": 1}}},
                        },
                    }),
                )
                .unwrap(),
            },
            DailyRecord {
                date: "2025-04-02".parse().unwrap(),
                data: DatasetTree::from_value(
                    TreeKind::Slip,
                    serde_json::json!({
                        "Karnataka": {
                            "Mysuru": {"IPC": {"420": {"suspect_received_tp": 2}}},
                        },
                    }),
                )
                .unwrap(),
            },
        ]
    }

    #[test]
    fn states_are_sorted_and_distinct() {
        assert_eq!(states(&records()), vec!["Karnataka", "Maharashtra"]);
    }

    #[test]
    fn districts_narrow_by_selected_states() {
        let selected = vec!["Maharashtra".to_owned()];
        assert_eq!(districts(&records(), &selected), vec!["Nagpur", "Pune"]);
    }

    #[test]
    fn empty_selection_means_no_restriction() {
        assert_eq!(districts(&records(), &[]), vec!["Mysuru", "Nagpur", "Pune"]);
    }

    #[test]
    fn sections_narrow_by_state_district_and_act() {
        let sections = sections(
            &records(),
            &["Maharashtra".to_owned()],
            &["Pune".to_owned()],
            &["IPC".to_owned()],
        );
        assert_eq!(sections, vec!["302"]);
    }

    #[test]
    fn acts_narrow_by_district() {
        let acts = acts(&records(), &[], &["Nagpur".to_owned()]);
        assert_eq!(acts, vec!["CrPC"]);
    }
}
