//! ntk-roster
//!
//! Roster reconciliation engine.
//!
//! Keeps a stable, positionally-ordered list of player listings built from
//! noisy periodic OCR snapshots of an on-screen list:
//! - rows are compared by fuzzy identifier similarity, never exactly
//! - a full-match lock protects a confirmed identity from later overwrites
//! - a stale roster is replaced wholesale instead of merged
//! - rows that vanish from between matched rows are dropped; rows scrolled
//!   into view are appended or prepended
//!
//! Deterministic, pure logic. No IO. Callers that need a frozen clock use the
//! `_at` variants and pass the time in.

mod engine;
mod error;
pub mod gaps;
mod listing;
pub mod similarity;
mod snapshot_list;
mod types;

pub use error::{EditError, GapError};
pub use listing::{snapshot_from_rows, Listing, ListingId, Stats};
pub use similarity::{similarity, SIMILARITY_THRESHOLD};
pub use snapshot_list::SnapshotList;
pub use types::*;
