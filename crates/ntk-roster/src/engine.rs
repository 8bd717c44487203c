use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::gaps::missing_values;
use crate::listing::Listing;
use crate::snapshot_list::SnapshotList;
use crate::types::{ReconcileOutcome, ReconcilePath};

/// One row of the overlap map built from a fresh snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OverlapSlot {
    /// Snapshot row `observed` matched roster row `roster`.
    Matched { roster: usize, observed: usize },
    /// Snapshot row was empty (and not the first row): a position is there
    /// but its identity is unknown.
    Gap,
}

impl SnapshotList {
    /// Merge a freshly observed snapshot into the roster.
    pub fn reconcile(&mut self, observed: Vec<Listing>) -> ReconcileOutcome {
        self.reconcile_at(observed, Utc::now())
    }

    /// Merge `observed` into the roster as of `now`.
    ///
    /// - Stale roster: replaced by `observed` wholesale.
    /// - Neither the first nor the last non-empty snapshot row is known: the
    ///   snapshot is appended verbatim.
    /// - Otherwise known rows are updated in place, rows that vanished from
    ///   between matched rows are dropped, and unknown rows are appended
    ///   (first row known) or prepended (only last row known).
    ///
    /// Never fails. `last_update` moves to `now` on every path.
    pub fn reconcile_at(&mut self, observed: Vec<Listing>, now: DateTime<Utc>) -> ReconcileOutcome {
        if self.is_stale_at(now) {
            info!(
                last_update = %self.last_update,
                rows = observed.len(),
                "roster stale; replacing with snapshot"
            );
            let added = observed.len();
            self.entries = observed;
            self.last_update = now;
            return ReconcileOutcome::replaced(added);
        }

        let first_listing = observed.iter().find(|l| !l.is_empty());
        let last_listing = observed.iter().rev().find(|l| !l.is_empty());

        let first_found = first_listing.is_some_and(|l| self.position_observed(l).is_some());
        let last_found = last_listing.is_some_and(|l| self.position_observed(l).is_some());

        let outcome = if !first_found && !last_found {
            let added = observed.len();
            self.entries.extend(observed);
            debug!(added, "no anchor matched; snapshot appended");
            ReconcileOutcome::appended(added)
        } else {
            self.merge(observed, first_found, last_found)
        };

        self.last_update = now;
        if self.entries.len() > self.config.max_length {
            warn!(
                len = self.entries.len(),
                max_length = self.config.max_length,
                "roster exceeds advisory max length"
            );
        }
        outcome
    }

    fn merge(
        &mut self,
        observed: Vec<Listing>,
        first_found: bool,
        last_found: bool,
    ) -> ReconcileOutcome {
        let slots = self.overlap_map(&observed);
        let dropped = dropped_roster_indices(&slots);

        let mut overlaps = Vec::new();
        let mut matched_observed = BTreeSet::new();
        for slot in &slots {
            if let OverlapSlot::Matched {
                roster,
                observed: observed_index,
            } = *slot
            {
                overlaps.push((roster, observed_index));
                matched_observed.insert(observed_index);
            }
        }

        // Classify every snapshot row before any entry is moved out.
        let mut incoming: Vec<Option<Listing>> = observed.into_iter().map(Some).collect();
        for &(roster, observed_index) in &overlaps {
            if let Some(entry) = incoming[observed_index].take() {
                self.apply_overlap(roster, entry);
            }
        }

        self.retain_except(&dropped.iter().copied().collect());

        let new_entries: Vec<Listing> = incoming
            .into_iter()
            .enumerate()
            .filter(|(index, _)| !matched_observed.contains(index))
            .filter_map(|(index, entry)| entry.filter(|l| !(index == 0 && l.is_empty())))
            .collect();
        let added = new_entries.len();

        // Both anchors found: append wins.
        let append = first_found;
        self.extend(new_entries, append);

        debug!(
            overlaps = overlaps.len(),
            dropped = dropped.len(),
            added,
            append,
            "snapshot merged"
        );

        ReconcileOutcome {
            path: ReconcilePath::Merged,
            first_found,
            last_found,
            overlaps,
            dropped,
            added,
            prepended: !append,
        }
    }

    fn overlap_map(&self, observed: &[Listing]) -> Vec<OverlapSlot> {
        let mut slots = Vec::new();
        for (index, listing) in observed.iter().enumerate() {
            if listing.is_empty() {
                // The first row cannot itself signal a boundary.
                if index > 0 {
                    slots.push(OverlapSlot::Gap);
                }
            } else if let Some(roster) = self.position_observed(listing) {
                slots.push(OverlapSlot::Matched {
                    roster,
                    observed: index,
                });
            }
        }
        slots
    }

    /// Priority: empty roster row is replaced; empty incoming row is ignored;
    /// locked roster row is kept; locked incoming row replaces; otherwise the
    /// roster row takes the incoming fields.
    fn apply_overlap(&mut self, roster: usize, incoming: Listing) {
        let Some(existing) = self.entries.get_mut(roster) else {
            return;
        };

        if existing.is_empty() {
            *existing = incoming;
        } else if incoming.is_empty() || existing.is_full_match() {
            // keep
        } else if incoming.is_full_match() {
            *existing = incoming;
        } else {
            existing.update(&incoming);
        }
    }
}

/// Roster rows that sit between matched rows but were neither re-observed nor
/// masked by an empty snapshot row.
fn dropped_roster_indices(slots: &[OverlapSlot]) -> Vec<usize> {
    let sequence: Vec<Option<usize>> = slots
        .iter()
        .map(|slot| match slot {
            OverlapSlot::Matched { roster, .. } => Some(*roster),
            OverlapSlot::Gap => None,
        })
        .collect();

    // Gaps before the first match carry no position to impute from.
    let start = sequence
        .iter()
        .position(Option::is_some)
        .unwrap_or(sequence.len());

    match missing_values(&sequence[start..]) {
        Ok(missing) => missing,
        Err(err) => {
            warn!(%err, "gap imputation rejected overlap sequence; nothing dropped");
            Vec::new()
        }
    }
}
