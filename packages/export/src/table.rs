//! Table row building over flattened leaves.

use std::collections::BTreeMap;

use afis_stats_report_models::{LeafRecord, SlipStatus};

/// One table row: a state with its per-status sums and row total.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateTableRow {
    /// State key.
    pub state: String,
    /// Summed count per requested status label.
    pub cells: BTreeMap<String, u64>,
    /// Sum of the leaves' derived totals.
    pub total: u64,
}

impl StateTableRow {
    /// One cell's value, or 0 when the status never appeared.
    #[must_use]
    pub fn cell(&self, status: &str) -> u64 {
        self.cells.get(status).copied().unwrap_or(0)
    }
}

/// Maps a requested status label to the counter name it reads.
fn status_field(status: &str) -> String {
    status
        .parse::<SlipStatus>()
        .map_or_else(|_| status.to_owned(), |s| s.source_field().to_owned())
}

/// Groups leaves by state with one column per requested status.
///
/// Ordering policy: rows keep first-encounter order over the input
/// leaves. Both this and the status-total cards are computed from the
/// same flattening, so the two presentations cannot disagree.
#[must_use]
pub fn state_rows(leaves: &[LeafRecord], statuses: &[String]) -> Vec<StateTableRow> {
    let mut rows: Vec<StateTableRow> = Vec::new();

    for leaf in leaves {
        let index = rows
            .iter()
            .position(|row| row.state == leaf.state)
            .unwrap_or_else(|| {
                rows.push(StateTableRow {
                    state: leaf.state.clone(),
                    cells: statuses.iter().map(|s| (s.clone(), 0)).collect(),
                    total: 0,
                });
                rows.len() - 1
            });
        let row = &mut rows[index];
        for status in statuses {
            if let Some(cell) = row.cells.get_mut(status) {
                *cell += leaf.metrics.get(&status_field(status));
            }
        }
        row.total += leaf.total;
    }

    rows
}

/// [`state_rows`] sorted descending by row total.
///
/// The one descending-ordered entry point, used by the trace-report
/// tables; ties keep first-encounter order.
#[must_use]
pub fn state_rows_by_total(leaves: &[LeafRecord], statuses: &[String]) -> Vec<StateTableRow> {
    let mut rows = state_rows(leaves, statuses);
    rows.sort_by(|a, b| b.total.cmp(&a.total));
    rows
}

/// The `n` rows with the highest value in one status column, descending.
#[must_use]
pub fn top_rows_by_status(
    rows: &[StateTableRow],
    status: &str,
    n: usize,
) -> Vec<StateTableRow> {
    let mut ranked = rows.to_vec();
    ranked.sort_by(|a, b| b.cell(status).cmp(&a.cell(status)));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use afis_stats_report_models::{DailyRecord, DatasetTree, FilterState, TreeKind};

    use super::*;

    fn leaves() -> Vec<LeafRecord> {
        let records = vec![
            DailyRecord {
                date: "2025-05-10".parse().unwrap(),
                data: DatasetTree::from_value(
                    TreeKind::Slip,
                    serde_json::json!({
                        "Maharashtra": {
                            "Pune": {"IPC": {"302": {
                                "arresty_received_tp": 4,
                                "convicted_received_tp": 2,
                            }}},
                        },
                        "Karnataka": {
                            "Mysuru": {"IPC": {"420": {"arresty_received_tp": 7}}},
                        },
                    }),
                )
                .unwrap(),
            },
            DailyRecord {
                date: "2025-05-11".parse().unwrap(),
                data: DatasetTree::from_value(
                    TreeKind::Slip,
                    serde_json::json!({
                        "Maharashtra": {
                            "Pune": {"IPC": {"302": {"arresty_received_tp": 1}}},
                        },
                    }),
                )
                .unwrap(),
            },
        ];
        afis_stats_aggregate::filtered_leaves(&records, &FilterState::all())
    }

    fn statuses() -> Vec<String> {
        vec!["Arrested".to_owned(), "Convicted".to_owned()]
    }

    #[test]
    fn groups_by_state_in_first_encounter_order() {
        let rows = state_rows(&leaves(), &statuses());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].state, "Karnataka");
        assert_eq!(rows[1].state, "Maharashtra");
    }

    #[test]
    fn sums_statuses_and_row_totals_across_days() {
        let rows = state_rows(&leaves(), &statuses());
        let maharashtra = rows.iter().find(|r| r.state == "Maharashtra").unwrap();
        assert_eq!(maharashtra.cell("Arrested"), 5);
        assert_eq!(maharashtra.cell("Convicted"), 2);
        assert_eq!(maharashtra.total, 7);
    }

    #[test]
    fn by_total_sorts_descending() {
        let rows = state_rows_by_total(&leaves(), &statuses());
        assert!(rows[0].total >= rows[1].total);
        assert_eq!(rows[0].state, "Karnataka");
    }

    #[test]
    fn top_rows_ranks_one_status_column() {
        let rows = state_rows(&leaves(), &statuses());
        let top = top_rows_by_status(&rows, "Arrested", 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].state, "Karnataka");
    }

    #[test]
    fn unrequested_status_reads_zero() {
        let rows = state_rows(&leaves(), &statuses());
        assert_eq!(rows[0].cell("Suspect"), 0);
    }
}
