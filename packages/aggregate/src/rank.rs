//! Top-N state rankings by identification outcome.

use afis_stats_aggregate_models::{DistrictStats, StateStats, TopStates};
use afis_stats_report_models::{DailyRecord, FilterState};

use crate::walk::{for_each_leaf, passes};

/// Ranks states by hit and by no-hit count for one category.
///
/// Walks every leaf passing the filters whose category matches, summing
/// `hit` and no-hit counters per state with a per-district breakdown,
/// then returns the top `n` states on each axis in descending order (ties
/// keep first-encounter order). Some producers write a literal `Total`
/// state row; it is excluded from the ranking.
#[must_use]
pub fn top_states(
    records: &[DailyRecord],
    filters: &FilterState,
    category: &str,
    n: usize,
) -> TopStates {
    let mut states: Vec<StateStats> = Vec::new();

    for record in records {
        if !filters.accepts_date(record.date) {
            continue;
        }
        for_each_leaf(&record.data, &mut |path, bag| {
            if path.state.eq_ignore_ascii_case("total") {
                return;
            }
            if !passes(filters, path) {
                return;
            }
            if path.category.is_some_and(|c| c != category) {
                return;
            }

            let hit = bag.get("hit");
            let nohit = bag.get("nohit") + bag.get("no_hit");

            let index = states
                .iter()
                .position(|s| s.state == path.state)
                .unwrap_or_else(|| {
                    states.push(StateStats {
                        state: path.state.to_owned(),
                        hit: 0,
                        nohit: 0,
                        districts: Vec::new(),
                    });
                    states.len() - 1
                });
            let entry = &mut states[index];
            entry.hit += hit;
            entry.nohit += nohit;

            if let Some(district) = path.district {
                match entry.districts.iter_mut().find(|d| d.district == district) {
                    Some(existing) => {
                        existing.hit += hit;
                        existing.nohit += nohit;
                    }
                    None => entry.districts.push(DistrictStats {
                        district: district.to_owned(),
                        hit,
                        nohit,
                    }),
                }
            }
        });
    }

    log::debug!("Ranked {} states for category {category}", states.len());

    let mut by_hit = states.clone();
    by_hit.sort_by(|a, b| b.hit.cmp(&a.hit));
    by_hit.truncate(n);

    let mut by_nohit = states;
    by_nohit.sort_by(|a, b| b.nohit.cmp(&a.nohit));
    by_nohit.truncate(n);

    TopStates { by_hit, by_nohit }
}
