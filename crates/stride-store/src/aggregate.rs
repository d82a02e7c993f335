//! Linear-scan aggregates over decoded elements.
//!
//! Every function consumes decoded values, skips anything that is not
//! numeric, and never fails. `min`/`max` seed with `None` so an array
//! with no numeric data is distinguishable from one whose extremum is 0.

use stride_core::warning::{report, StrideWarning};
use stride_core::Value;

/// Keep numeric elements (or their numeric sub-field, when `key` is given).
pub(crate) fn numeric(value: Value, key: Option<&str>) -> Option<Value> {
    let projected = match key {
        Some(k) => value.field(k).cloned()?,
        None => value,
    };
    projected.is_numeric().then_some(projected)
}

/// Sum of numeric values. Empty input sums to `0.0`.
pub fn sum<I: IntoIterator<Item = Value>>(values: I) -> f64 {
    values.into_iter().filter_map(|v| v.as_f64()).sum()
}

/// Product of numeric values. Empty input yields the identity `1.0`.
pub fn product<I: IntoIterator<Item = Value>>(values: I) -> f64 {
    values.into_iter().filter_map(|v| v.as_f64()).product()
}

/// Arithmetic mean, or `None` without numeric input.
pub fn mean<I: IntoIterator<Item = Value>>(values: I) -> Option<f64> {
    let (count, total) = values
        .into_iter()
        .filter_map(|v| v.as_f64())
        .fold((0usize, 0.0f64), |(n, s), v| (n + 1, s + v));
    (count > 0).then(|| total / count as f64)
}

/// Population variance (divides by the count). Empty input yields `0.0`.
pub fn variance<I: IntoIterator<Item = Value>>(values: I) -> f64 {
    // Welford's single-pass update.
    let mut count = 0usize;
    let mut mean = 0.0f64;
    let mut m2 = 0.0f64;
    for v in values.into_iter().filter_map(|v| v.as_f64()) {
        count += 1;
        let delta = v - mean;
        mean += delta / count as f64;
        m2 += delta * (v - mean);
    }
    if count == 0 {
        0.0
    } else {
        m2 / count as f64
    }
}

/// Smallest numeric value, keeping its original kind. First found wins ties.
pub fn min<I: IntoIterator<Item = Value>>(values: I) -> Option<Value> {
    extremum(values, |candidate, best| candidate < best)
}

/// Largest numeric value, keeping its original kind. First found wins ties.
pub fn max<I: IntoIterator<Item = Value>>(values: I) -> Option<Value> {
    extremum(values, |candidate, best| candidate > best)
}

fn extremum<I, F>(values: I, beats: F) -> Option<Value>
where
    I: IntoIterator<Item = Value>,
    F: Fn(f64, f64) -> bool,
{
    let mut best: Option<(f64, Value)> = None;
    for value in values {
        let Some(v) = value.as_f64() else { continue };
        match &best {
            Some((current, _)) if !beats(v, *current) => {}
            _ => best = Some((v, value)),
        }
    }
    best.map(|(_, value)| value)
}

/// Min-max scale `values` into `[0, 1]`.
///
/// Empty input reports [`StrideWarning::EmptyCollection`] and yields an
/// empty vector. Constant input (`max == min`) reports
/// [`StrideWarning::DegenerateRange`] and yields all zeros.
pub fn normalise_values(values: &[f64]) -> Vec<f64> {
    let Some((lo, hi)) = values.iter().fold(None, |acc: Option<(f64, f64)>, &v| {
        Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
    }) else {
        report(StrideWarning::EmptyCollection {
            operation: "normalise",
        });
        return Vec::new();
    };
    let range = hi - lo;
    if range == 0.0 {
        report(StrideWarning::DegenerateRange { value: lo });
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (v - lo) / range).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().map(|&v| Value::Int(v)).collect()
    }

    #[test]
    fn empty_identities() {
        assert_eq!(sum(Vec::new()), 0.0);
        assert_eq!(product(Vec::new()), 1.0);
        assert_eq!(variance(Vec::new()), 0.0);
        assert_eq!(mean(Vec::new()), None);
        assert_eq!(min(Vec::new()), None);
        assert_eq!(max(Vec::new()), None);
    }

    #[test]
    fn non_numeric_values_are_skipped() {
        let values = vec![Value::Int(2), Value::from("x"), Value::Double(0.5), Value::Null];
        assert_eq!(sum(values.clone()), 2.5);
        assert_eq!(product(values.clone()), 1.0);
        assert_eq!(mean(values), Some(1.25));
    }

    #[test]
    fn zero_minimum_is_not_absent() {
        assert_eq!(min(ints(&[3, 0, 7])), Some(Value::Int(0)));
        assert_eq!(max(ints(&[0, 0])), Some(Value::Int(0)));
    }

    #[test]
    fn extremum_keeps_first_tie() {
        let values = vec![Value::Int(4), Value::Double(4.0)];
        assert_eq!(max(values), Some(Value::Int(4)));
    }

    #[test]
    fn population_variance() {
        let v = variance(ints(&[2, 4, 4, 4, 5, 5, 7, 9]));
        assert!((v - 4.0).abs() < 1e-12);
    }

    #[test]
    fn normalise_scales_to_unit_range() {
        assert_eq!(
            normalise_values(&[0.0, 5.0, 10.0, 15.0, 20.0]),
            vec![0.0, 0.25, 0.5, 0.75, 1.0]
        );
    }

    #[test]
    fn normalise_constant_input_is_zeros() {
        assert_eq!(normalise_values(&[3.0, 3.0]), vec![0.0, 0.0]);
        assert!(normalise_values(&[]).is_empty());
    }

    #[test]
    fn numeric_projection_by_key() {
        let list: Value = [1, 2].into_iter().collect();
        assert_eq!(numeric(list.clone(), Some("1")), Some(Value::Int(2)));
        assert_eq!(numeric(list, None), None);
        assert_eq!(numeric(Value::from("s"), None), None);
    }
}
