use serde::{Deserialize, Serialize};

use crate::similarity::SIMILARITY_THRESHOLD;

/// Tuning for a [`SnapshotList`][crate::SnapshotList].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Advisory target length. Reconciliation never trims to it; exceeding
    /// it is only logged.
    pub max_length: usize,

    /// Seconds without a reconcile before the maintained roster is thrown
    /// away and replaced by the next snapshot.
    pub max_age_secs: u64,

    /// Identifiers match when their similarity is strictly above this.
    pub similarity_threshold: u8,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            max_length: 12,
            max_age_secs: 5 * 60,
            similarity_threshold: SIMILARITY_THRESHOLD,
        }
    }
}

impl RosterConfig {
    pub fn new(max_length: usize, max_age_secs: u64) -> Self {
        Self {
            max_length,
            max_age_secs,
            ..Self::default()
        }
    }
}

/// Which branch of reconciliation ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcilePath {
    /// The roster was stale and was replaced by the snapshot wholesale.
    Replaced,
    /// Neither anchor matched; the snapshot was appended verbatim.
    Appended,
    /// At least one anchor matched; overlaps, drops and new rows were applied.
    Merged,
}

/// What a reconcile call did to the roster.
///
/// Indices in `overlaps` and `dropped` refer to the roster as it was before
/// the call; `added` counts snapshot entries placed at either end.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileOutcome {
    pub path: ReconcilePath,
    pub first_found: bool,
    pub last_found: bool,
    /// `(roster index, snapshot index)` for every matched row.
    pub overlaps: Vec<(usize, usize)>,
    pub dropped: Vec<usize>,
    pub added: usize,
    /// `true` when new rows went to the front rather than the back.
    pub prepended: bool,
}

impl ReconcileOutcome {
    pub(crate) fn replaced(added: usize) -> Self {
        Self {
            path: ReconcilePath::Replaced,
            first_found: false,
            last_found: false,
            overlaps: Vec::new(),
            dropped: Vec::new(),
            added,
            prepended: false,
        }
    }

    pub(crate) fn appended(added: usize) -> Self {
        Self {
            path: ReconcilePath::Appended,
            first_found: false,
            last_found: false,
            overlaps: Vec::new(),
            dropped: Vec::new(),
            added,
            prepended: false,
        }
    }

    pub fn is_merge(&self) -> bool {
        self.path == ReconcilePath::Merged
    }
}
