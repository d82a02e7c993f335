//! Pull-based iteration over packed arrays.
//!
//! [`Iter`] borrows the array, so it cannot be mutated mid-traversal. To
//! restart, ask the array for a fresh iterator.

use stride_core::Value;

use crate::traits::PackedArray;

/// Yields `(index, value)` pairs front to back (or back to front).
///
/// Decoding failures end the iteration early; they are logged, not
/// yielded. Use [`PackedArray::to_vec`] to surface them as errors.
pub struct Iter<'a, A> {
    array: &'a A,
    front: usize,
    back: usize,
}

impl<'a, A: PackedArray> Iter<'a, A> {
    pub(crate) fn new(array: &'a A) -> Self {
        Self {
            array,
            front: 0,
            back: array.len(),
        }
    }

    fn read(&mut self, index: usize) -> Option<(usize, Value)> {
        match self.array.get(index) {
            Ok(value) => Some((index, value)),
            Err(error) => {
                tracing::error!(target: "stride", index, %error, "iteration stopped on unreadable element");
                self.front = self.back;
                None
            }
        }
    }
}

impl<A: PackedArray> Iterator for Iter<'_, A> {
    type Item = (usize, Value);

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let index = self.front;
        self.front += 1;
        self.read(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.back.saturating_sub(self.front)))
    }
}

impl<A: PackedArray> DoubleEndedIterator for Iter<'_, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        let index = self.back;
        self.read(index)
    }
}
