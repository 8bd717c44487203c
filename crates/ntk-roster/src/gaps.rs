//! Gap arithmetic over ordered sequences with `None` placeholders.
//!
//! A placeholder marks a row whose value is unknown (OCR failed, or the row
//! was blank). These helpers recover structure from such sequences:
//! - [`chunks`]: the contiguous runs of known values
//! - [`alternating_boundaries`]: where the known/unknown runs switch
//! - [`missing_values`]: integers genuinely absent from an ascending
//!   sequence, as opposed to integers merely hidden behind a placeholder
//!
//! Pure functions. No state, no IO.

use std::collections::BTreeSet;

use crate::error::GapError;

/// Split `data` into maximal runs of `Some` values, dropping every run of
/// placeholders regardless of its length.
pub fn chunks<T: Clone>(data: &[Option<T>]) -> Vec<Vec<T>> {
    let mut out = Vec::new();
    let mut current: Vec<T> = Vec::new();

    for item in data {
        match item {
            Some(value) => current.push(value.clone()),
            None => {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        out.push(current);
    }

    out
}

/// Index of every transition from a value to a placeholder and from a
/// placeholder back to a value, in order.
///
/// `[1, 2, 3, _, 4, 5, 6, _, _, 7]` yields `[3, 4, 7, 9]`. A sequence with no
/// placeholders yields nothing; a sequence of only placeholders yields `[0]`.
pub fn alternating_boundaries<T>(data: &[Option<T>]) -> Vec<usize> {
    let mut out = Vec::new();
    let mut in_gap = false;

    for (index, item) in data.iter().enumerate() {
        match (item.is_none(), in_gap) {
            (true, false) => {
                out.push(index);
                in_gap = true;
            }
            (false, true) => {
                out.push(index);
                in_gap = false;
            }
            _ => {}
        }
    }

    out
}

/// Integers missing from an ascending sequence once placeholders are imputed.
///
/// Every placeholder is read as "previous value + 1" (chaining through runs
/// of placeholders, including a trailing run, which extends the effective
/// maximum). The result is every integer in `[first, effective max]` that
/// does not appear in the imputed sequence:
///
/// - `[1, 2, 3, _, 5, 6, _, _, 9, 10]` → `[]` (4, 7, 8 are masked, not gone)
/// - `[1, 2, 3, _, 6, 7, _, 9, 10, _]` → `[5]`
///
/// An empty input yields an empty result. An input whose first element is a
/// placeholder is rejected with [`GapError::LeadingPlaceholder`].
pub fn missing_values(data: &[Option<usize>]) -> Result<Vec<usize>, GapError> {
    let first = match data.first() {
        None => return Ok(Vec::new()),
        Some(None) => return Err(GapError::LeadingPlaceholder),
        Some(Some(first)) => *first,
    };

    let mut present = BTreeSet::new();
    let mut prev = first;
    present.insert(first);
    for item in &data[1..] {
        let value = item.unwrap_or(prev + 1);
        present.insert(value);
        prev = value;
    }

    let Some(&effective_max) = present.last() else {
        return Ok(Vec::new());
    };

    Ok((first..=effective_max)
        .filter(|value| !present.contains(value))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunks_tolerate_double_placeholders() {
        let data = [
            Some(1),
            Some(2),
            Some(3),
            None,
            None,
            Some(4),
            Some(5),
            Some(6),
            None,
            None,
            Some(7),
            Some(8),
            Some(9),
            Some(10),
        ];
        assert_eq!(
            chunks(&data),
            vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9, 10]]
        );
    }

    #[test]
    fn boundaries_for_leading_gap_start_at_zero() {
        let data = [None, None, Some(1), Some(2)];
        assert_eq!(alternating_boundaries(&data), vec![0, 2]);
    }

    #[test]
    fn missing_values_without_placeholders() {
        let data = [Some(2), Some(3), Some(5)];
        assert_eq!(missing_values(&data).unwrap(), vec![4]);
    }

    #[test]
    fn missing_values_empty_input_is_empty() {
        assert!(missing_values(&[]).unwrap().is_empty());
    }
}
