use std::fmt;

/// Error returned by [`missing_values`][crate::gaps::missing_values] when the
/// input violates its caller contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GapError {
    /// The sequence starts with a placeholder, so there is no concrete value
    /// to impute from.
    LeadingPlaceholder,
}

impl fmt::Display for GapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GapError::LeadingPlaceholder => {
                write!(f, "first value must be concrete, got a placeholder")
            }
        }
    }
}

impl std::error::Error for GapError {}

/// Rejected request to one of the direct sequence editors on
/// [`SnapshotList`][crate::SnapshotList].
///
/// Editors never clamp: a request that does not fit the current sequence is
/// a programming error and is reported as-is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditError {
    /// A single index lies outside `0..=len` (insert) or `0..len` (drop).
    IndexOutOfRange { index: usize, len: usize },

    /// `start..stop` reaches past the end of the sequence.
    RangeOutOfBounds { start: usize, stop: usize, len: usize },

    /// `start` is after `stop`.
    InvalidRange { start: usize, stop: usize },

    /// A step of zero never advances.
    ZeroStep,
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for roster of length {len}")
            }
            EditError::RangeOutOfBounds { start, stop, len } => write!(
                f,
                "range {start}..{stop} out of bounds for roster of length {len}"
            ),
            EditError::InvalidRange { start, stop } => {
                write!(f, "invalid range: start {start} is after stop {stop}")
            }
            EditError::ZeroStep => write!(f, "step must be at least 1"),
        }
    }
}

impl std::error::Error for EditError {}
