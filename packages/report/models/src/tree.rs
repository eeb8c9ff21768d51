//! Nested dataset trees and the records derived from them.
//!
//! Each dataset generation publishes one JSON file per day whose body is a
//! nested mapping ending in a [`MetricBag`]. The depth and key set vary by
//! dataset family, so the tree is a tagged union with one schema per family
//! rather than a generic deep-map walker — a file whose shape does not match
//! its declared schema degrades to empty counters instead of silently
//! producing partial sums.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::MetricBag;

/// Agency enrollment tree: state → district → category → counters.
pub type AgencyTree = BTreeMap<String, BTreeMap<String, BTreeMap<String, MetricBag>>>;

/// Slip-capture tree: state → district → act → section → counters.
pub type SlipTree =
    BTreeMap<String, BTreeMap<String, BTreeMap<String, BTreeMap<String, MetricBag>>>>;

/// Trace-report tree: state → category → counters.
pub type TraceTree = BTreeMap<String, BTreeMap<String, MetricBag>>;

/// Which tree schema a dataset's files follow.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TreeKind {
    /// [`AgencyTree`] shape.
    Agency,
    /// [`SlipTree`] shape.
    Slip,
    /// [`TraceTree`] shape.
    Trace,
}

/// One day's dataset snapshot, parsed into its declared schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatasetTree {
    /// State → district → act → section leaves.
    Slip(SlipTree),
    /// State → district → category leaves.
    Agency(AgencyTree),
    /// State → category leaves.
    Trace(TraceTree),
}

impl DatasetTree {
    /// Parses a JSON body into the tree schema for `kind`.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the body is not an object tree of
    /// the expected depth.
    pub fn from_value(
        kind: TreeKind,
        value: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            TreeKind::Agency => Self::Agency(serde_json::from_value(value)?),
            TreeKind::Slip => Self::Slip(serde_json::from_value(value)?),
            TreeKind::Trace => Self::Trace(serde_json::from_value(value)?),
        })
    }

    /// The schema this tree was parsed against.
    #[must_use]
    pub const fn kind(&self) -> TreeKind {
        match self {
            Self::Agency(_) => TreeKind::Agency,
            Self::Slip(_) => TreeKind::Slip,
            Self::Trace(_) => TreeKind::Trace,
        }
    }

    /// Iterates the top-level state keys.
    pub fn states(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Self::Agency(tree) => Box::new(tree.keys().map(String::as_str)),
            Self::Slip(tree) => Box::new(tree.keys().map(String::as_str)),
            Self::Trace(tree) => Box::new(tree.keys().map(String::as_str)),
        }
    }

    /// Drops every state whose key does not satisfy `keep`.
    ///
    /// Used for the optional load-time state filter; membership semantics
    /// are identical to the aggregation-time state predicate.
    pub fn retain_states(&mut self, keep: impl Fn(&str) -> bool) {
        match self {
            Self::Agency(tree) => tree.retain(|state, _| keep(state)),
            Self::Slip(tree) => tree.retain(|state, _| keep(state)),
            Self::Trace(tree) => tree.retain(|state, _| keep(state)),
        }
    }

    /// Whether the tree holds no states.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Agency(tree) => tree.is_empty(),
            Self::Slip(tree) => tree.is_empty(),
            Self::Trace(tree) => tree.is_empty(),
        }
    }
}

/// One calendar day's fetched dataset snapshot. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// The day the snapshot describes.
    pub date: NaiveDate,
    /// The parsed nested tree.
    pub data: DatasetTree,
}

/// One fully-qualified leaf of a daily snapshot with its counters copied
/// out flat.
///
/// Levels a dataset family lacks are `None` (trace reports have no
/// district, agency reports no act or section). `total` is always derived
/// by summing the itemized counters; an upstream-supplied total is carried
/// verbatim in `supplied_total` and never reconciled against the derived
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafRecord {
    /// Snapshot date.
    pub date: NaiveDate,
    /// State key, verbatim from the source file.
    pub state: String,
    /// District key, when the schema has that level.
    pub district: Option<String>,
    /// Act key, when the schema has that level.
    pub act: Option<String>,
    /// Section key, when the schema has that level.
    pub section: Option<String>,
    /// Category key, when the schema has that level.
    pub category: Option<String>,
    /// The leaf counters.
    pub metrics: MetricBag,
    /// Sum of the itemized counters.
    pub total: u64,
    /// Upstream-supplied total, if the producer wrote one.
    pub supplied_total: Option<u64>,
}
