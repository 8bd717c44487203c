//! Registry of config keys the roster tooling actually reads.
//!
//! Entries are JSON-pointer prefixes. A leaf under any listed prefix is
//! consumed; anything else under [`ROSTER_ROOT`] is reported as unused.
//! Only list pointers that code reads today.

/// Section of the merged document that holds roster tuning.
pub const ROSTER_ROOT: &str = "/roster";

static ROSTER: &[&str] = &[
    // ntk_roster::RosterConfig
    "/roster/max_length",
    "/roster/max_age_secs",
    "/roster/similarity_threshold",
];

pub fn consumed_pointers() -> &'static [&'static str] {
    ROSTER
}
