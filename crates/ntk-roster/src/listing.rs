use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::similarity::{is_similar, SIMILARITY_THRESHOLD};

/// Row content as recognized by OCR: either free text or a bare number.
///
/// Comparison always goes through the rendered text form, so `Number(42)`
/// and `Text("42")` are the same identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListingId {
    Number(i64),
    Text(String),
}

impl ListingId {
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            ListingId::Number(n) => Cow::Owned(n.to_string()),
            ListingId::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }

    /// An empty text token carries no identity (OCR saw the row but read
    /// nothing).
    pub fn is_blank(&self) -> bool {
        matches!(self, ListingId::Text(s) if s.is_empty())
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingId::Number(n) => write!(f, "{n}"),
            ListingId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ListingId {
    fn from(s: &str) -> Self {
        ListingId::Text(s.to_string())
    }
}

impl From<String> for ListingId {
    fn from(s: String) -> Self {
        ListingId::Text(s)
    }
}

impl From<i64> for ListingId {
    fn from(n: i64) -> Self {
        ListingId::Number(n)
    }
}

/// Opaque per-player payload produced by the stat-lookup collaborator.
///
/// The roster stores and moves it around but never looks inside.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stats(serde_json::Value);

impl Stats {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

/// One physical row of the roster.
///
/// `Observed` carries an identity sample; `Empty` stands for a row where
/// recognition failed. Every mutator is inert on `Empty`.
///
/// Invariant: once `full_match` is set it is never cleared, and neither `id`
/// nor `observed_at` change again unless the whole value is replaced.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Listing {
    Observed {
        id: ListingId,
        full_match: bool,
        observed_at: DateTime<Utc>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stats: Option<Stats>,
    },
    Empty,
}

impl Listing {
    pub fn new(id: impl Into<ListingId>) -> Self {
        Self::new_at(id, Utc::now())
    }

    pub fn new_at(id: impl Into<ListingId>, observed_at: DateTime<Utc>) -> Self {
        Listing::Observed {
            id: id.into(),
            full_match: false,
            observed_at,
            stats: None,
        }
    }

    /// A listing whose identity is already confirmed.
    pub fn full_match_at(id: impl Into<ListingId>, observed_at: DateTime<Utc>) -> Self {
        Listing::Observed {
            id: id.into(),
            full_match: true,
            observed_at,
            stats: None,
        }
    }

    /// Convert one raw OCR row. `None` and the empty string become `Empty`.
    pub fn from_row_at(row: Option<ListingId>, observed_at: DateTime<Utc>) -> Self {
        match row {
            Some(id) if !id.is_blank() => Listing::new_at(id, observed_at),
            _ => Listing::Empty,
        }
    }

    pub fn with_stats(mut self, new_stats: Stats) -> Self {
        self.attach_stats(new_stats);
        self
    }

    pub fn id(&self) -> Option<&ListingId> {
        match self {
            Listing::Observed { id, .. } => Some(id),
            Listing::Empty => None,
        }
    }

    pub fn is_full_match(&self) -> bool {
        matches!(self, Listing::Observed { full_match: true, .. })
    }

    /// Time of creation or last accepted update. `Empty` reports the epoch,
    /// meaning "never observed".
    pub fn observed_at(&self) -> DateTime<Utc> {
        match self {
            Listing::Observed { observed_at, .. } => *observed_at,
            Listing::Empty => DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    pub fn stats(&self) -> Option<&Stats> {
        match self {
            Listing::Observed { stats, .. } => stats.as_ref(),
            Listing::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Listing::Empty)
    }

    pub fn has_stats(&self) -> bool {
        self.stats().is_some()
    }

    /// Fuzzy identity at the default threshold.
    pub fn equals(&self, other: &Listing) -> bool {
        self.matches(other, SIMILARITY_THRESHOLD)
    }

    /// Fuzzy identity: two observed listings match when their identifier
    /// similarity is strictly above `threshold`. `Empty` only matches `Empty`.
    pub fn matches(&self, other: &Listing, threshold: u8) -> bool {
        match (self, other) {
            (Listing::Empty, Listing::Empty) => true,
            (Listing::Observed { id: lhs, .. }, Listing::Observed { id: rhs, .. }) => {
                is_similar(&lhs.as_text(), &rhs.as_text(), threshold)
            }
            _ => false,
        }
    }

    /// Take every field from `other` unless this listing is already locked.
    pub fn update(&mut self, other: &Listing) {
        if let Listing::Observed {
            full_match: false, ..
        } = self
        {
            *self = other.clone();
        }
    }

    /// Replace the identifier with a confirmed one and lock it. Keeps
    /// `observed_at`.
    pub fn promote(&mut self, new_id: impl Into<ListingId>) {
        if let Listing::Observed { id, full_match, .. } = self {
            if !*full_match {
                *id = new_id.into();
                *full_match = true;
            }
        }
    }

    pub fn touch(&mut self) {
        self.touch_at(Utc::now());
    }

    /// Set `observed_at`. Locked listings keep their timestamp.
    pub fn touch_at(&mut self, at: DateTime<Utc>) {
        if let Listing::Observed {
            full_match: false,
            observed_at,
            ..
        } = self
        {
            *observed_at = at;
        }
    }

    /// Stats are not part of identity, so the lock does not apply.
    pub fn attach_stats(&mut self, new_stats: Stats) {
        if let Listing::Observed { stats, .. } = self {
            *stats = Some(new_stats);
        }
    }

    /// Elapsed time since `observed_at` as `MMm:SSs`; empty for `Empty`.
    pub fn time_since(&self, now: DateTime<Utc>) -> String {
        match self {
            Listing::Observed { observed_at, .. } => {
                let secs = (now - *observed_at).num_seconds().max(0);
                format!("{:02}m:{:02}s", secs / 60, secs % 60)
            }
            Listing::Empty => String::new(),
        }
    }

    /// Diagnostic rendering, e.g. `Listing(Ghost, Threshold: 80, Time: 01m:05s)`.
    pub fn describe(&self, now: DateTime<Utc>) -> String {
        match self {
            Listing::Observed { id, .. } => format!(
                "Listing({id}, Threshold: {SIMILARITY_THRESHOLD}, Time: {})",
                self.time_since(now)
            ),
            Listing::Empty => "EmptyListing()".to_string(),
        }
    }
}

/// Renders the identifier alone; `Empty` renders as nothing.
impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listing::Observed { id, .. } => write!(f, "{id}"),
            Listing::Empty => Ok(()),
        }
    }
}

/// Convert a whole OCR frame into a snapshot, one listing per row.
pub fn snapshot_from_rows<I>(rows: I, observed_at: DateTime<Utc>) -> Vec<Listing>
where
    I: IntoIterator<Item = Option<ListingId>>,
{
    rows.into_iter()
        .map(|row| Listing::from_row_at(row, observed_at))
        .collect()
}
