#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Core data model for fingerprint identification statistics.
//!
//! This crate defines the canonical types shared across the afis-stats
//! system: the [`MetricBag`] counter map found at every dataset leaf, the
//! per-dataset nested trees ([`tree`]), the immutable [`FilterState`]
//! selection value ([`filter`]), and the status-key taxonomy upstream data
//! producers use.

pub mod filter;
pub mod tree;

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use filter::{DateRange, FilterState, QuickRange};
pub use tree::{AgencyTree, DailyRecord, DatasetTree, LeafRecord, SlipTree, TraceTree, TreeKind};

/// Counter name under which upstream producers sometimes supply a
/// pre-computed total.
pub const TOTAL_KEY: &str = "total";

/// A flat mapping of named counters to non-negative integer counts.
///
/// Every dataset leaf is a `MetricBag`. Counters the upstream file omits
/// read as 0; `null` counters coalesce to 0; non-numeric leaf fields
/// (e.g. the `arrest_act` description strings in slip-capture files) are
/// dropped at deserialization. The upstream `enrol` spelling is normalised
/// to `enrollment`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MetricBag {
    counters: BTreeMap<String, u64>,
}

impl MetricBag {
    /// Creates an empty bag.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counters: BTreeMap::new(),
        }
    }

    /// Returns the value of the named counter, or 0 when absent.
    #[must_use]
    pub fn get(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    /// Adds `value` to the named counter, creating it at 0 if absent.
    pub fn add(&mut self, name: &str, value: u64) {
        *self.counters.entry(name.to_owned()).or_insert(0) += value;
    }

    /// The upstream-supplied `total` counter, if the producer included one.
    ///
    /// Never reconciled with [`derived_total`](Self::derived_total); callers
    /// that need an authoritative figure must pick one explicitly.
    #[must_use]
    pub fn supplied_total(&self) -> Option<u64> {
        self.counters.get(TOTAL_KEY).copied()
    }

    /// Sum of every itemized counter, excluding any supplied `total`.
    #[must_use]
    pub fn derived_total(&self) -> u64 {
        self.itemized().map(|(_, count)| count).sum()
    }

    /// Iterates over every counter, including a supplied `total`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counters.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Iterates over the itemized counters, excluding a supplied `total`.
    pub fn itemized(&self) -> impl Iterator<Item = (&str, u64)> {
        self.iter().filter(|(name, _)| *name != TOTAL_KEY)
    }

    /// Whether the bag holds no counters at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Number of counters in the bag.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Builds a bag from a raw JSON object, applying the coercion rules
    /// described on the type.
    #[must_use]
    pub fn from_json_map(raw: &BTreeMap<String, serde_json::Value>) -> Self {
        let mut counters = BTreeMap::new();
        for (name, value) in raw {
            if let Some(count) = coerce_count(value) {
                counters.insert(normalize_counter(name), count);
            }
        }
        Self { counters }
    }
}

impl<'de> Deserialize<'de> for MetricBag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        Ok(Self::from_json_map(&raw))
    }
}

impl FromIterator<(String, u64)> for MetricBag {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self {
            counters: iter.into_iter().collect(),
        }
    }
}

/// Coerces a raw JSON value to a counter count.
///
/// `null` coalesces to 0, negative and fractional numbers floor at 0,
/// and non-numeric values yield `None` (the field is not a counter).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn coerce_count(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Null => Some(0),
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
        _ => None,
    }
}

/// Maps upstream counter-name variants onto the canonical spelling.
fn normalize_counter(name: &str) -> String {
    if name == "enrol" {
        "enrollment".to_owned()
    } else {
        name.to_owned()
    }
}

// ── Status-key taxonomy ──────────────────────────────────────────────────

/// Case-status counters carried by slip-capture and mesa files.
///
/// Display names are the dashboard labels; [`source_field`](Self::source_field)
/// gives the counter name the upstream producer writes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum SlipStatus {
    /// Arrested persons traced against the tenprint database.
    Arrested,
    /// Convicted persons.
    Convicted,
    /// Externed persons.
    Externee,
    /// Deported persons.
    Deportee,
    /// Unidentified fingerprints.
    #[strum(serialize = "UIFP")]
    #[serde(rename = "UIFP")]
    Uifp,
    /// Suspects.
    Suspect,
    /// Unidentified dead bodies.
    #[strum(serialize = "UDB")]
    #[serde(rename = "UDB")]
    Udb,
    /// Absconders.
    Absconder,
}

impl SlipStatus {
    /// All slip statuses in dashboard display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Arrested,
            Self::Convicted,
            Self::Externee,
            Self::Deportee,
            Self::Uifp,
            Self::Suspect,
            Self::Udb,
            Self::Absconder,
        ]
    }

    /// The counter name upstream slip-capture files use for this status.
    #[must_use]
    pub const fn source_field(self) -> &'static str {
        match self {
            Self::Arrested => "arresty_received_tp",
            Self::Convicted => "convicted_received_tp",
            Self::Externee => "externee_received_tp",
            Self::Deportee => "deportee_received_tp",
            Self::Uifp => "uifp_received_tp",
            Self::Suspect => "suspect_received_tp",
            Self::Udb => "udb_received_tp",
            Self::Absconder => "absconder_received_tp",
        }
    }
}

/// Outcome counters carried by trace-report files.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TraceStatus {
    /// Trace produced a match.
    Hit,
    /// Trace produced no match.
    NoHit,
    /// Upstream-supplied total.
    Total,
    /// Match found within the originating state.
    OwnState,
    /// Match found in another state.
    InterState,
}

impl TraceStatus {
    /// All trace statuses in dashboard display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Hit,
            Self::NoHit,
            Self::Total,
            Self::OwnState,
            Self::InterState,
        ]
    }
}

/// Per-category metrics carried by agency enrollment files.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AgencyDataType {
    /// New enrollments.
    Enrollment,
    /// Searches that matched.
    Hit,
    /// Searches that did not match.
    Nohit,
}

impl AgencyDataType {
    /// All agency data types in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Enrollment, Self::Hit, Self::Nohit]
    }
}

/// Print-category axis of the agency enrollment files.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AgencyCategory {
    /// Tenprint records.
    Tp,
    /// Chance (crime-scene) prints.
    Cp,
    /// MESA workflow records.
    Mesha,
}

impl AgencyCategory {
    /// All agency categories in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Tp, Self::Cp, Self::Mesha]
    }
}
