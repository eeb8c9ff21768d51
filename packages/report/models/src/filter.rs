//! The user's current selection, as an immutable value.
//!
//! The UI layer owns the single source of truth and produces a new
//! [`FilterState`] per change; aggregation functions only ever read one.
//! Every array field is an unordered accept-set where the empty set means
//! "no restriction" — the same convention applied at every tree level.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An inclusive calendar-date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// First day of the window.
    pub from: NaiveDate,
    /// Last day of the window.
    pub to: NaiveDate,
}

impl DateRange {
    /// Creates an inclusive range.
    #[must_use]
    pub const fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Whether `date` falls inside the window, inclusive of both ends.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }

    /// The window covering the `n` days ending at `today`, inclusive.
    #[must_use]
    pub fn last_n_days(today: NaiveDate, n: u32) -> Self {
        let from = today - chrono::Days::new(u64::from(n.saturating_sub(1)));
        Self { from, to: today }
    }
}

/// A labelled preset date window offered by the dashboard's date picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickRange {
    /// Display label.
    pub label: &'static str,
    /// Window length in days; `None` means all data.
    pub days: Option<u32>,
}

/// The preset windows in display order.
#[must_use]
pub const fn quick_ranges() -> &'static [QuickRange] {
    &[
        QuickRange {
            label: "Last 7 Days",
            days: Some(7),
        },
        QuickRange {
            label: "Last 30 Days",
            days: Some(30),
        },
        QuickRange {
            label: "Last 90 Days",
            days: Some(90),
        },
        QuickRange {
            label: "All Data",
            days: None,
        },
    ]
}

/// The user's current restriction, applied before aggregation.
///
/// All set fields use exact key membership — no prefix or pattern
/// matching — and an empty set accepts every key at that level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Accepted date window; `None` accepts every date.
    pub date_range: Option<DateRange>,
    /// Accepted state keys.
    pub states: Vec<String>,
    /// Accepted district keys.
    pub districts: Vec<String>,
    /// Accepted category keys.
    pub categories: Vec<String>,
    /// Accepted counter names.
    pub data_types: Vec<String>,
    /// Accepted act keys.
    pub acts: Vec<String>,
    /// Accepted section keys.
    pub sections: Vec<String>,
}

/// The shared empty-set-accepts-all membership predicate.
fn accepts(set: &[String], key: &str) -> bool {
    set.is_empty() || set.iter().any(|s| s == key)
}

impl FilterState {
    /// A filter that accepts everything.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Sets the date window.
    #[must_use]
    pub const fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Sets the accepted states.
    #[must_use]
    pub fn with_states<I: IntoIterator<Item = S>, S: Into<String>>(mut self, states: I) -> Self {
        self.states = states.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the accepted districts.
    #[must_use]
    pub fn with_districts<I: IntoIterator<Item = S>, S: Into<String>>(
        mut self,
        districts: I,
    ) -> Self {
        self.districts = districts.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the accepted categories.
    #[must_use]
    pub fn with_categories<I: IntoIterator<Item = S>, S: Into<String>>(
        mut self,
        categories: I,
    ) -> Self {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the accepted counter names.
    #[must_use]
    pub fn with_data_types<I: IntoIterator<Item = S>, S: Into<String>>(
        mut self,
        data_types: I,
    ) -> Self {
        self.data_types = data_types.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the accepted acts.
    #[must_use]
    pub fn with_acts<I: IntoIterator<Item = S>, S: Into<String>>(mut self, acts: I) -> Self {
        self.acts = acts.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the accepted sections.
    #[must_use]
    pub fn with_sections<I: IntoIterator<Item = S>, S: Into<String>>(
        mut self,
        sections: I,
    ) -> Self {
        self.sections = sections.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a record dated `date` passes the date-range predicate.
    #[must_use]
    pub fn accepts_date(&self, date: NaiveDate) -> bool {
        self.date_range.is_none_or(|range| range.contains(date))
    }

    /// Whether `state` passes the state predicate.
    #[must_use]
    pub fn accepts_state(&self, state: &str) -> bool {
        accepts(&self.states, state)
    }

    /// Whether `district` passes the district predicate.
    #[must_use]
    pub fn accepts_district(&self, district: &str) -> bool {
        accepts(&self.districts, district)
    }

    /// Whether `category` passes the category predicate.
    #[must_use]
    pub fn accepts_category(&self, category: &str) -> bool {
        accepts(&self.categories, category)
    }

    /// Whether the counter `name` passes the data-type predicate.
    #[must_use]
    pub fn accepts_data_type(&self, name: &str) -> bool {
        accepts(&self.data_types, name)
    }

    /// Whether `act` passes the act predicate.
    #[must_use]
    pub fn accepts_act(&self, act: &str) -> bool {
        accepts(&self.acts, act)
    }

    /// Whether `section` passes the section predicate.
    #[must_use]
    pub fn accepts_section(&self, section: &str) -> bool {
        accepts(&self.sections, section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn empty_set_accepts_every_key() {
        let filters = FilterState::all();
        assert!(filters.accepts_state("Delhi"));
        assert!(filters.accepts_district("Pune"));
        assert!(filters.accepts_data_type("enrollment"));
    }

    #[test]
    fn populated_set_is_exact_membership() {
        let filters = FilterState::all().with_states(["Delhi"]);
        assert!(filters.accepts_state("Delhi"));
        assert!(!filters.accepts_state("Delh"));
        assert!(!filters.accepts_state("delhi"));
    }

    #[test]
    fn date_range_is_inclusive() {
        let filters = FilterState::all()
            .with_date_range(DateRange::new(date("2025-04-01"), date("2025-04-03")));
        assert!(filters.accepts_date(date("2025-04-01")));
        assert!(filters.accepts_date(date("2025-04-03")));
        assert!(!filters.accepts_date(date("2025-04-04")));
        assert!(!filters.accepts_date(date("2025-03-31")));
    }

    #[test]
    fn no_date_range_accepts_every_date() {
        assert!(FilterState::all().accepts_date(date("1999-01-01")));
    }

    #[test]
    fn last_n_days_spans_n_days_inclusive() {
        let range = DateRange::last_n_days(date("2025-06-20"), 7);
        assert_eq!(range.from, date("2025-06-14"));
        assert_eq!(range.to, date("2025-06-20"));
        assert!(range.contains(date("2025-06-14")));
    }

    #[test]
    fn quick_ranges_end_with_all_data() {
        let ranges = quick_ranges();
        assert_eq!(ranges.last().unwrap().days, None);
        assert_eq!(ranges[0].days, Some(7));
    }
}
