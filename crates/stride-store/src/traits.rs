//! The [`PackedArray`] trait shared by both array variants.
//!
//! Implementors provide the storage primitives (`len`, `get`, `add`,
//! `set`, `insert`, `delete`, `clear`, `empty_like`). Everything else
//! (sorting, aggregates, slicing, filtering, rolling windows, iteration)
//! is built on top of those primitives here.
//!
//! Downstream consumers (tabular wrappers, importers) should only rely on
//! `len`, `get`, `add`, `iter` and `clear`.

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use stride_core::warning::{report, StrideWarning};
use stride_core::{ElementKind, StrideError, Value};

use crate::aggregate;
use crate::fixed::FixedArray;
use crate::iter::Iter;
use crate::sort::{selection_sort, Direction};
use crate::variable::VarArray;
use crate::window::{min_observations, RollingWindow};

/// A packed, byte-encoded array of [`Value`]s.
pub trait PackedArray: Sized {
    /// Number of elements.
    fn len(&self) -> usize;

    /// Whether the array holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode the element at `index`.
    ///
    /// # Errors
    ///
    /// [`StrideError::IndexOutOfBounds`] if `index >= len()`.
    fn get(&self, index: usize) -> Result<Value, StrideError>;

    /// Append one value.
    ///
    /// # Errors
    ///
    /// [`StrideError::InvalidValue`] if the value cannot be encoded; the
    /// array is unchanged.
    fn add(&mut self, value: Value) -> Result<(), StrideError>;

    /// Replace the element at `index`, or append when `index >= len()`.
    ///
    /// # Errors
    ///
    /// [`StrideError::InvalidValue`] if the value cannot be encoded; the
    /// array is unchanged.
    fn set(&mut self, index: usize, value: Value) -> Result<(), StrideError>;

    /// Insert before `index`, shifting later elements right. `index ==
    /// len()` appends.
    ///
    /// # Errors
    ///
    /// [`StrideError::IndexOutOfBounds`] if `index > len()`;
    /// [`StrideError::InvalidValue`] if the value cannot be encoded.
    fn insert(&mut self, index: usize, value: Value) -> Result<(), StrideError>;

    /// Remove and return the element at `index`, shifting later elements left.
    ///
    /// # Errors
    ///
    /// [`StrideError::IndexOutOfBounds`] if `index >= len()`; the array is
    /// unchanged.
    fn delete(&mut self, index: usize) -> Result<Value, StrideError>;

    /// Remove every element.
    fn clear(&mut self);

    /// A new, empty array with the same encoding configuration.
    fn empty_like(&self) -> Self;

    /// Exchange the elements at `a` and `b` by value: two decodes, two sets.
    ///
    /// # Errors
    ///
    /// [`StrideError::IndexOutOfBounds`] if either index is out of range.
    fn swap(&mut self, a: usize, b: usize) -> Result<(), StrideError> {
        let len = self.len();
        for index in [a, b] {
            if index >= len {
                return Err(StrideError::IndexOutOfBounds { index, len });
            }
        }
        if a == b {
            return Ok(());
        }
        let first = self.get(a)?;
        let second = self.get(b)?;
        self.set(a, second)?;
        self.set(b, first)
    }

    /// Append every value, or none of them if any fails to encode.
    ///
    /// The default stages the batch in an empty copy first; both variants
    /// override it to encode the batch without the extra decode pass.
    ///
    /// # Errors
    ///
    /// The first encoding error.
    fn add_all<I: IntoIterator<Item = Value>>(&mut self, values: I) -> Result<(), StrideError> {
        let mut staged = self.empty_like();
        for value in values {
            staged.add(value)?;
        }
        for (_, value) in staged.iter() {
            self.add(value)?;
        }
        Ok(())
    }

    /// Remove and return the last element.
    ///
    /// On an empty array this reports [`StrideWarning::EmptyCollection`]
    /// and returns `None`.
    fn pop(&mut self) -> Option<Value> {
        match self.len() {
            0 => {
                report(StrideWarning::EmptyCollection { operation: "pop" });
                None
            }
            len => self.delete(len - 1).ok(),
        }
    }

    /// Remove and return the first element.
    ///
    /// On an empty array this reports [`StrideWarning::EmptyCollection`]
    /// and returns `None`.
    fn shift(&mut self) -> Option<Value> {
        if self.is_empty() {
            report(StrideWarning::EmptyCollection { operation: "shift" });
            return None;
        }
        self.delete(0).ok()
    }

    /// The first element, if any.
    fn first(&self) -> Option<Value> {
        self.get(0).ok()
    }

    /// The last element, if any.
    fn last(&self) -> Option<Value> {
        self.len().checked_sub(1).and_then(|i| self.get(i).ok())
    }

    /// Iterate `(index, value)` pairs.
    fn iter(&self) -> Iter<'_, Self> {
        Iter::new(self)
    }

    /// Decode every element.
    ///
    /// # Errors
    ///
    /// The first decoding error.
    fn to_vec(&self) -> Result<Vec<Value>, StrideError> {
        (0..self.len()).map(|i| self.get(i)).collect()
    }

    /// Position of the first element equal to `value`.
    fn index_of(&self, value: &Value) -> Option<usize> {
        self.iter().find(|(_, v)| v == value).map(|(i, _)| i)
    }

    /// Whether any element equals `value`.
    fn contains(&self, value: &Value) -> bool {
        self.index_of(value).is_some()
    }

    /// Selection-sort the elements in place.
    ///
    /// # Errors
    ///
    /// Propagates storage errors from the underlying swaps.
    fn sort(&mut self, direction: Direction) -> Result<(), StrideError> {
        selection_sort(self, direction, None)
    }

    /// Selection-sort structured elements by the sub-field `key`.
    /// Elements lacking the field sort as `Null`.
    ///
    /// # Errors
    ///
    /// Propagates storage errors from the underlying swaps.
    fn sort_by_key(&mut self, direction: Direction, key: &str) -> Result<(), StrideError> {
        selection_sort(self, direction, Some(key))
    }

    /// Reverse element order in place by swapping `i` with `n - 1 - i`.
    ///
    /// # Errors
    ///
    /// Propagates storage errors from the underlying swaps.
    fn reverse(&mut self) -> Result<(), StrideError> {
        let len = self.len();
        for i in 0..len / 2 {
            self.swap(i, len - 1 - i)?;
        }
        Ok(())
    }

    /// Sum of numeric elements.
    fn sum(&self) -> f64 {
        aggregate::sum(self.numeric_values(None))
    }

    /// Sum of the numeric sub-field `key`.
    fn sum_by(&self, key: &str) -> f64 {
        aggregate::sum(self.numeric_values(Some(key)))
    }

    /// Mean of numeric elements, `None` without numeric data.
    fn avg(&self) -> Option<f64> {
        aggregate::mean(self.numeric_values(None))
    }

    /// Mean of the numeric sub-field `key`.
    fn avg_by(&self, key: &str) -> Option<f64> {
        aggregate::mean(self.numeric_values(Some(key)))
    }

    /// Smallest numeric element.
    fn min(&self) -> Option<Value> {
        aggregate::min(self.numeric_values(None))
    }

    /// Smallest numeric sub-field `key`.
    fn min_by(&self, key: &str) -> Option<Value> {
        aggregate::min(self.numeric_values(Some(key)))
    }

    /// Largest numeric element.
    fn max(&self) -> Option<Value> {
        aggregate::max(self.numeric_values(None))
    }

    /// Largest numeric sub-field `key`.
    fn max_by(&self, key: &str) -> Option<Value> {
        aggregate::max(self.numeric_values(Some(key)))
    }

    /// Product of numeric elements; `1.0` when there are none.
    fn product(&self) -> f64 {
        aggregate::product(self.numeric_values(None))
    }

    /// Product of the numeric sub-field `key`.
    fn product_by(&self, key: &str) -> f64 {
        aggregate::product(self.numeric_values(Some(key)))
    }

    /// Population variance of numeric elements; `0.0` when there are none.
    fn variance(&self) -> f64 {
        aggregate::variance(self.numeric_values(None))
    }

    /// Population variance of the numeric sub-field `key`.
    fn variance_by(&self, key: &str) -> f64 {
        aggregate::variance(self.numeric_values(Some(key)))
    }

    /// Numeric elements (or sub-fields), in order, non-numeric ones skipped.
    fn numeric_values(&self, key: Option<&str>) -> impl Iterator<Item = Value> + '_ {
        let key = key.map(str::to_owned);
        self.iter()
            .filter_map(move |(_, v)| aggregate::numeric(v, key.as_deref()))
    }

    /// Min-max scale numeric elements into a new `Float64` array.
    ///
    /// Non-numeric elements are skipped. No numeric input reports
    /// [`StrideWarning::EmptyCollection`] and returns an empty array; a
    /// constant input yields all zeros.
    ///
    /// # Errors
    ///
    /// Propagates storage errors from building the result.
    fn normalise(&self) -> Result<FixedArray, StrideError> {
        let values: Vec<f64> = self
            .numeric_values(None)
            .filter_map(|v| v.as_f64())
            .collect();
        let scaled = aggregate::normalise_values(&values);
        FixedArray::from_values(ElementKind::Float64, scaled.into_iter().map(Value::Double))
    }

    /// Copy of up to `length` elements starting at `start` (to the end when
    /// `length` is `None`). Ranges past the end are clipped.
    ///
    /// # Errors
    ///
    /// Propagates storage errors from building the result.
    fn slice(&self, start: usize, length: Option<usize>) -> Result<Self, StrideError> {
        let len = self.len();
        let start = start.min(len);
        let end = length.map_or(len, |n| start.saturating_add(n).min(len));
        let mut out = self.empty_like();
        for index in start..end {
            out.add(self.get(index)?)?;
        }
        Ok(out)
    }

    /// Copy of the first `n` elements.
    ///
    /// # Errors
    ///
    /// Propagates storage errors from building the result.
    fn head(&self, n: usize) -> Result<Self, StrideError> {
        self.slice(0, Some(n))
    }

    /// Copy of the last `n` elements.
    ///
    /// # Errors
    ///
    /// Propagates storage errors from building the result.
    fn tail(&self, n: usize) -> Result<Self, StrideError> {
        self.slice(self.len().saturating_sub(n), None)
    }

    /// Copy of `n` distinct elements chosen by a generator seeded with
    /// `seed`, kept in their original order. `n` is clamped to `len()`.
    ///
    /// # Errors
    ///
    /// Propagates storage errors from building the result.
    fn sample(&self, n: usize, seed: u64) -> Result<Self, StrideError> {
        let len = self.len();
        let n = n.min(len);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut picks: Vec<usize> = (0..len).collect();
        // Partial Fisher-Yates: the first `n` slots end up a uniform sample.
        for i in 0..n {
            let j = i + (rng.next_u64() % (len - i) as u64) as usize;
            picks.swap(i, j);
        }
        picks.truncate(n);
        picks.sort_unstable();
        let mut out = self.empty_like();
        for index in picks {
            out.add(self.get(index)?)?;
        }
        Ok(out)
    }

    /// New array of the elements for which `predicate` holds.
    ///
    /// # Errors
    ///
    /// Propagates storage errors from building the result.
    fn filter<F>(&self, mut predicate: F) -> Result<Self, StrideError>
    where
        F: FnMut(&Value) -> bool,
    {
        let mut out = self.empty_like();
        for index in 0..self.len() {
            let value = self.get(index)?;
            if predicate(&value) {
                out.add(value)?;
            }
        }
        Ok(out)
    }

    /// New array of `transform` applied to every element.
    ///
    /// # Errors
    ///
    /// [`StrideError::InvalidValue`] if a transformed value cannot be
    /// encoded by this array's configuration.
    fn map<F>(&self, mut transform: F) -> Result<Self, StrideError>
    where
        F: FnMut(Value) -> Value,
    {
        let mut out = self.empty_like();
        for index in 0..self.len() {
            out.add(transform(self.get(index)?))?;
        }
        Ok(out)
    }

    /// Slide a window of the last `window` values over the array.
    ///
    /// Once the window holds at least `min_observations` values (default
    /// `window`; larger requests are clamped with a warning), `callback`
    /// receives the window, oldest first, and the current index. Every
    /// non-null result it returns is appended to the output; `None` and
    /// `Some(Value::Null)` are both skipped.
    ///
    /// # Errors
    ///
    /// [`StrideError::InvalidValue`] for a zero window.
    fn rolling<F>(
        &self,
        window: usize,
        min_obs: Option<usize>,
        mut callback: F,
    ) -> Result<VarArray, StrideError>
    where
        F: FnMut(&[Value], usize) -> Option<Value>,
    {
        if window == 0 {
            return Err(StrideError::invalid("rolling window must hold at least one value"));
        }
        let threshold = min_observations(window, min_obs);
        let mut fifo = RollingWindow::new(window);
        let mut out = VarArray::new();
        for index in 0..self.len() {
            fifo.push(self.get(index)?);
            if fifo.len() >= threshold {
                let result = callback(fifo.as_slice(), index).filter(|v| !v.is_null());
                if let Some(result) = result {
                    out.add(result)?;
                }
            }
        }
        Ok(out)
    }
}
