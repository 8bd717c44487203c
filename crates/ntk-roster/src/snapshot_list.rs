use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::EditError;
use crate::listing::{snapshot_from_rows, Listing, ListingId};
use crate::types::RosterConfig;

/// The maintained roster: an ordered sequence of rows plus the clock that
/// decides when it has gone stale.
///
/// Order is physical row position, not arrival order. A single ingestion
/// cycle owns the list at a time; readers get `&[Listing]` between
/// reconcile calls.
#[derive(Clone, Debug)]
pub struct SnapshotList {
    pub(crate) entries: Vec<Listing>,
    pub(crate) last_update: DateTime<Utc>,
    pub(crate) config: RosterConfig,
}

impl SnapshotList {
    pub fn new(initial: Vec<Listing>, config: RosterConfig) -> Self {
        Self::new_at(initial, config, Utc::now())
    }

    pub fn new_at(initial: Vec<Listing>, config: RosterConfig, now: DateTime<Utc>) -> Self {
        Self {
            entries: initial,
            last_update: now,
            config,
        }
    }

    /// Build from raw OCR rows; `None` and `""` rows become `Empty`.
    pub fn from_rows<I>(rows: I, config: RosterConfig) -> Self
    where
        I: IntoIterator<Item = Option<ListingId>>,
    {
        Self::from_rows_at(rows, config, Utc::now())
    }

    pub fn from_rows_at<I>(rows: I, config: RosterConfig, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = Option<ListingId>>,
    {
        Self::new_at(snapshot_from_rows(rows, now), config, now)
    }

    pub fn entries(&self) -> &[Listing] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Listing> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last_update(&self) -> DateTime<Utc> {
        self.last_update
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    pub fn max_length(&self) -> usize {
        self.config.max_length
    }

    pub fn max_age(&self) -> TimeDelta {
        i64::try_from(self.config.max_age_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX)
    }

    pub fn is_stale(&self) -> bool {
        self.is_stale_at(Utc::now())
    }

    /// `true` once strictly more than `max_age` has passed since the last
    /// update.
    pub fn is_stale_at(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.last_update) > self.max_age()
    }

    /// `true` if some row fuzzy-matches `probe` under this list's threshold.
    pub fn contains(&self, probe: &Listing) -> bool {
        self.position(probe).is_some()
    }

    /// First non-empty row that fuzzy-matches `probe`. `Empty` rows never
    /// anchor anything.
    pub(crate) fn position_observed(&self, probe: &Listing) -> Option<usize> {
        if probe.is_empty() {
            return None;
        }
        let threshold = self.config.similarity_threshold;
        self.entries
            .iter()
            .position(|entry| !entry.is_empty() && entry.matches(probe, threshold))
    }

    fn position(&self, probe: &Listing) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.matches(probe, self.config.similarity_threshold))
    }

    // -----------------------------------------------------------------------
    // Direct sequence editors
    // -----------------------------------------------------------------------

    /// Remove a contiguous run starting at `start`.
    ///
    /// The run holds as many rows as `start..stop` stepped by `step` would
    /// visit, all taken from `start` onwards. `stop` defaults to the end.
    pub fn drop_range(
        &mut self,
        start: usize,
        stop: Option<usize>,
        step: usize,
    ) -> Result<(), EditError> {
        let range = self.resolve_range(start, stop, step)?;
        self.entries.drain(range);
        Ok(())
    }

    /// Remove every row whose index is listed. Survivors keep their order.
    pub fn drop_by_indices(&mut self, indices: &[usize]) -> Result<(), EditError> {
        let len = self.entries.len();
        if let Some(&index) = indices.iter().find(|&&index| index >= len) {
            return Err(EditError::IndexOutOfRange { index, len });
        }
        self.retain_except(&indices.iter().copied().collect());
        Ok(())
    }

    /// Splice `new_entries` in before position `at` (`at == len` appends).
    pub fn insert(&mut self, new_entries: Vec<Listing>, at: usize) -> Result<(), EditError> {
        let len = self.entries.len();
        if at > len {
            return Err(EditError::IndexOutOfRange { index: at, len });
        }
        self.entries.splice(at..at, new_entries);
        Ok(())
    }

    /// Append `new_entries` to the back, or prepend them to the front.
    pub fn extend(&mut self, new_entries: Vec<Listing>, append: bool) {
        if append {
            self.entries.extend(new_entries);
        } else {
            self.entries.splice(0..0, new_entries);
        }
    }

    /// Overwrite the run `drop_range` would remove.
    ///
    /// Same-length replacements are written in place. Otherwise the run is
    /// dropped and `new_entries` inserted at `start`.
    pub fn replace(
        &mut self,
        new_entries: Vec<Listing>,
        start: usize,
        stop: Option<usize>,
        step: usize,
    ) -> Result<(), EditError> {
        let range = self.resolve_range(start, stop, step)?;

        if new_entries.len() != range.len() {
            self.entries.drain(range);
            return self.insert(new_entries, start);
        }

        for (slot, entry) in self.entries[range].iter_mut().zip(new_entries) {
            *slot = entry;
        }
        Ok(())
    }

    pub(crate) fn retain_except(&mut self, dropped: &BTreeSet<usize>) {
        if dropped.is_empty() {
            return;
        }
        let mut index = 0;
        self.entries.retain(|_| {
            let keep = !dropped.contains(&index);
            index += 1;
            keep
        });
    }

    fn resolve_range(
        &self,
        start: usize,
        stop: Option<usize>,
        step: usize,
    ) -> Result<Range<usize>, EditError> {
        if step == 0 {
            return Err(EditError::ZeroStep);
        }
        let len = self.entries.len();
        let stop = stop.unwrap_or(len);
        if stop > len {
            return Err(EditError::RangeOutOfBounds { start, stop, len });
        }
        if start > stop {
            return Err(EditError::InvalidRange { start, stop });
        }
        let count = (stop - start).div_ceil(step);
        Ok(start..start + count)
    }
}

impl fmt::Display for SnapshotList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SnapshotList(")?;
        writeln!(f, "\tNo. Listings: {},", self.entries.len())?;
        writeln!(f, "\tLast Update: {},", self.last_update.to_rfc3339())?;
        writeln!(f, "\tMax Age: {}s,", self.config.max_age_secs)?;
        writeln!(f, "\tMax Length: {},", self.config.max_length)?;
        write!(f, ")")
    }
}
