//! In-place selection sort over packed arrays.
//!
//! Elements are decoded for every comparison and moved with the array's
//! own [`swap`](crate::PackedArray::swap), so the same routine serves both
//! fixed-width byte swaps and variable-width value-level swaps.

use stride_core::{StrideError, Value};

use crate::traits::PackedArray;

/// Sort order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl Direction {
    /// Whether `candidate` should replace `best` as the next element to place.
    ///
    /// Strict: an equal candidate never wins, so the first one found stays.
    fn prefers(self, candidate: &Value, best: &Value) -> bool {
        let ord = candidate.total_cmp(best);
        match self {
            Self::Ascending => ord.is_lt(),
            Self::Descending => ord.is_gt(),
        }
    }
}

/// Project an element onto its sort key. Missing sub-fields sort as `Null`.
pub(crate) fn sort_key(value: Value, key: Option<&str>) -> Value {
    match key {
        Some(k) => value.field(k).cloned().unwrap_or(Value::Null),
        None => value,
    }
}

/// Selection sort: O(n²) comparisons, at most n−1 swaps.
pub(crate) fn selection_sort<A: PackedArray>(
    array: &mut A,
    direction: Direction,
    key: Option<&str>,
) -> Result<(), StrideError> {
    let len = array.len();
    for i in 0..len {
        // `None` until the first element of the pass is seen.
        let mut best: Option<(usize, Value)> = None;
        for j in i..len {
            let candidate = sort_key(array.get(j)?, key);
            let replace = match &best {
                None => true,
                Some((_, current)) => direction.prefers(&candidate, current),
            };
            if replace {
                best = Some((j, candidate));
            }
        }
        if let Some((found, _)) = best {
            if found != i {
                array.swap(i, found)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_values_do_not_displace() {
        assert!(!Direction::Ascending.prefers(&Value::Int(3), &Value::Int(3)));
        assert!(!Direction::Descending.prefers(&Value::Int(3), &Value::Int(3)));
    }

    #[test]
    fn direction_picks_extremum() {
        assert!(Direction::Ascending.prefers(&Value::Int(1), &Value::Int(2)));
        assert!(Direction::Descending.prefers(&Value::Int(2), &Value::Int(1)));
    }

    #[test]
    fn missing_key_sorts_as_null() {
        let v: Value = [5].into_iter().collect();
        assert_eq!(sort_key(v.clone(), Some("0")), Value::Int(5));
        assert_eq!(sort_key(v, Some("3")), Value::Null);
    }
}
