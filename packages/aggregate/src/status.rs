//! Totals by case status over flattened leaves.

use afis_stats_aggregate_models::StatusTotal;
use afis_stats_report_models::{LeafRecord, SlipStatus};

/// Pseudo-status that sums every leaf's derived total.
pub const TOTAL_STATUS: &str = "Total";

/// Sums each requested status across the given leaves.
///
/// A status is resolved in order: the literal [`TOTAL_STATUS`] takes each
/// leaf's derived total; a dashboard status label (e.g. `"Arrested"`)
/// resolves through its upstream counter name; anything else is used as a
/// counter name directly (covers trace statuses such as `"no_hit"`).
/// Output preserves the requested status order.
#[must_use]
pub fn totals_by_status(leaves: &[LeafRecord], statuses: &[String]) -> Vec<StatusTotal> {
    statuses
        .iter()
        .map(|status| {
            let total = if status == TOTAL_STATUS {
                leaves.iter().map(|leaf| leaf.total).sum()
            } else {
                let field = resolve_status_field(status);
                leaves.iter().map(|leaf| leaf.metrics.get(&field)).sum()
            };
            StatusTotal {
                status: status.clone(),
                total,
            }
        })
        .collect()
}

/// Maps a requested status label to the counter name to read.
fn resolve_status_field(status: &str) -> String {
    status
        .parse::<SlipStatus>()
        .map_or_else(|_| status.to_owned(), |s| s.source_field().to_owned())
}
