//! Shared fixtures for roster scenario tests.
//!
//! All fixture listings are stamped with [`fixed_now`] so tests can reason
//! about staleness and elapsed time without touching the wall clock.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use ntk_roster::{
    snapshot_from_rows, Listing, ListingId, ReconcileOutcome, RosterConfig, SnapshotList, Stats,
};

/// 2022-07-21 12:00:01 UTC.
pub const FIXED_EPOCH_SECS: i64 = 1_658_404_801;

pub fn fixed_now() -> DateTime<Utc> {
    Utc.timestamp_opt(FIXED_EPOCH_SECS, 0)
        .single()
        .expect("fixture timestamp is valid")
}

/// `fixed_now() + secs`.
pub fn at_offset(secs: i64) -> DateTime<Utc> {
    fixed_now() + TimeDelta::seconds(secs)
}

pub fn listing(id: &str) -> Listing {
    Listing::new_at(id, fixed_now())
}

pub fn locked(id: &str) -> Listing {
    Listing::full_match_at(id, fixed_now())
}

/// `"1"` through `"10"`.
pub fn ten_listings_no_empty() -> Vec<Listing> {
    (1..=10).map(|n| listing(&n.to_string())).collect()
}

/// `[E, 1, 2, 3, 4, E, 5, 6, 7, 8, 9, 10]`.
pub fn twelve_listings_two_empty() -> Vec<Listing> {
    let mut out = vec![Listing::Empty];
    out.extend((1..=4).map(|n| listing(&n.to_string())));
    out.push(Listing::Empty);
    out.extend((5..=10).map(|n| listing(&n.to_string())));
    out
}

/// `"1"` through `"10"` without `"7"` (index 6).
pub fn nine_listings_removed_6() -> Vec<Listing> {
    ten_listings_no_empty()
        .into_iter()
        .enumerate()
        .filter(|(index, _)| *index != 6)
        .map(|(_, l)| l)
        .collect()
}

pub fn rows(raw: &[Option<&str>]) -> Vec<Option<ListingId>> {
    raw.iter().map(|row| row.map(ListingId::from)).collect()
}

pub fn sample_stats() -> Stats {
    Stats::new(serde_json::json!({
        "K/D Ratio": 1.25,
        "Kills": 1024,
        "Win %": 51.2,
    }))
}

/// Identifiers in order; `Empty` renders as `""`.
pub fn render(entries: &[Listing]) -> Vec<String> {
    entries.iter().map(|l| l.to_string()).collect()
}

/// Pairwise fuzzy equality at the default threshold, same length.
pub fn same_roster(actual: &[Listing], expected: &[Listing]) -> bool {
    actual.len() == expected.len()
        && actual
            .iter()
            .zip(expected)
            .all(|(lhs, rhs)| lhs.equals(rhs))
}

/// Panics with both renderings when the rosters differ.
pub fn assert_same_roster(actual: &[Listing], expected: &[Listing]) {
    assert!(
        same_roster(actual, expected),
        "roster mismatch\n  actual:   {:?}\n  expected: {:?}",
        render(actual),
        render(expected)
    );
}

/// Seed a roster from the first frame at [`fixed_now`], then reconcile frame
/// `k` at `k * interval_secs` seconds later. Returns the roster and one
/// outcome per reconciled frame.
pub fn replay(
    frames: &[&[Option<&str>]],
    config: RosterConfig,
    interval_secs: i64,
) -> (SnapshotList, Vec<ReconcileOutcome>) {
    let mut list = SnapshotList::from_rows_at(
        frames.first().map(|f| rows(f)).unwrap_or_default(),
        config,
        fixed_now(),
    );
    let outcomes = frames
        .iter()
        .enumerate()
        .skip(1)
        .map(|(k, frame)| {
            let now = at_offset(k as i64 * interval_secs);
            list.reconcile_at(snapshot_from_rows(rows(frame), now), now)
        })
        .collect();
    (list, outcomes)
}
