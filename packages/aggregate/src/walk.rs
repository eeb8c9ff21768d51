//! Schema-specific leaf walks over the tagged dataset trees.
//!
//! One walk per schema keeps shape mismatches loud at parse time instead
//! of silently skipping levels the way an optional-chained generic walker
//! would.

use afis_stats_report_models::{DatasetTree, FilterState, MetricBag};

/// The fully-qualified position of one leaf inside a dataset tree.
///
/// Levels the schema lacks are `None`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LeafPath<'a> {
    pub state: &'a str,
    pub district: Option<&'a str>,
    pub act: Option<&'a str>,
    pub section: Option<&'a str>,
    pub category: Option<&'a str>,
}

/// Invokes `visit` once per leaf [`MetricBag`] in the tree.
pub(crate) fn for_each_leaf<'a>(
    tree: &'a DatasetTree,
    visit: &mut impl FnMut(&LeafPath<'a>, &'a MetricBag),
) {
    match tree {
        DatasetTree::Agency(states) => {
            for (state, districts) in states {
                for (district, categories) in districts {
                    for (category, bag) in categories {
                        visit(
                            &LeafPath {
                                state,
                                district: Some(district),
                                act: None,
                                section: None,
                                category: Some(category),
                            },
                            bag,
                        );
                    }
                }
            }
        }
        DatasetTree::Slip(states) => {
            for (state, districts) in states {
                for (district, acts) in districts {
                    for (act, sections) in acts {
                        for (section, bag) in sections {
                            visit(
                                &LeafPath {
                                    state,
                                    district: Some(district),
                                    act: Some(act),
                                    section: Some(section),
                                    category: None,
                                },
                                bag,
                            );
                        }
                    }
                }
            }
        }
        DatasetTree::Trace(states) => {
            for (state, categories) in states {
                for (category, bag) in categories {
                    visit(
                        &LeafPath {
                            state,
                            district: None,
                            act: None,
                            section: None,
                            category: Some(category),
                        },
                        bag,
                    );
                }
            }
        }
    }
}

/// Whether every level present in `path` passes its filter-set predicate.
///
/// Predicates for levels the schema lacks are vacuously true; the date
/// predicate is applied by callers before walking.
pub(crate) fn passes(filters: &FilterState, path: &LeafPath<'_>) -> bool {
    filters.accepts_state(path.state)
        && path.district.is_none_or(|d| filters.accepts_district(d))
        && path.act.is_none_or(|a| filters.accepts_act(a))
        && path.section.is_none_or(|s| filters.accepts_section(s))
        && path.category.is_none_or(|c| filters.accepts_category(c))
}

#[cfg(test)]
mod tests {
    use afis_stats_report_models::TreeKind;

    use super::*;

    #[test]
    fn walks_every_slip_leaf() {
        let tree = DatasetTree::from_value(
            TreeKind::Slip,
            serde_json::json!({
                "Maharashtra": {
                    "Pune": {
                        "IPC": {"302": {"arresty_received_tp": 1}, "307": {"arresty_received_tp": 2}},
                    },
                    "Nagpur": {
                        "CrPC": {"41": {"suspect_received_tp": 3}},
                    },
                },
            }),
        )
        .unwrap();

        let mut seen = Vec::new();
        for_each_leaf(&tree, &mut |path, bag| {
            seen.push((
                path.district.unwrap().to_owned(),
                path.section.unwrap().to_owned(),
                bag.derived_total(),
            ));
        });
        assert_eq!(seen.len(), 3);
        assert!(seen.contains(&("Nagpur".to_owned(), "41".to_owned(), 3)));
    }

    #[test]
    fn passes_skips_predicates_for_absent_levels() {
        let filters = FilterState::all().with_districts(["Pune"]);
        let trace_path = LeafPath {
            state: "Delhi",
            district: None,
            act: None,
            section: None,
            category: Some("tp_tp"),
        };
        // A trace leaf has no district, so the district filter cannot
        // exclude it.
        assert!(passes(&filters, &trace_path));
    }
}
