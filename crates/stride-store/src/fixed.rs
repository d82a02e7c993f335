//! Fixed-stride packed array.
//!
//! Every element occupies exactly [`ElementKind::width`] bytes, stored
//! back to back in one [`ByteBuffer`]. Element `i` lives at byte
//! `i * width`, so access is plain offset arithmetic and the element count
//! is `buffer.len() / width`.
//!
//! ```text
//! width = 4
//! ┌────────┬────────┬────────┬────────┐
//! │ elem 0 │ elem 1 │ elem 2 │ elem 3 │   buffer.len() == 16
//! └────────┴────────┴────────┴────────┘
//! 0        4        8        12
//! ```

use smallvec::SmallVec;
use stride_core::kind::ElementBytes;
use stride_core::{ElementKind, StrideError, Value};

use crate::buffer::ByteBuffer;
use crate::traits::PackedArray;

/// A homogeneous array of fixed-width encoded elements.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedArray {
    kind: ElementKind,
    buffer: ByteBuffer,
}

impl FixedArray {
    /// Create an empty array of `kind` elements.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            buffer: ByteBuffer::new(),
        }
    }

    /// Create an empty array with room for `elements` values reserved.
    pub fn with_capacity(kind: ElementKind, elements: usize) -> Self {
        Self {
            kind,
            buffer: ByteBuffer::with_capacity(elements.saturating_mul(kind.width())),
        }
    }

    /// Create an empty array of opaque `width`-byte records.
    ///
    /// # Errors
    ///
    /// [`StrideError::InvalidConfig`] for a zero width.
    pub fn with_width(width: usize) -> Result<Self, StrideError> {
        Ok(Self::new(ElementKind::raw(width)?))
    }

    /// Build an array from `values`.
    ///
    /// # Errors
    ///
    /// [`StrideError::InvalidValue`] if any value does not fit `kind`.
    pub fn from_values<I>(kind: ElementKind, values: I) -> Result<Self, StrideError>
    where
        I: IntoIterator<Item = Value>,
    {
        let mut array = Self::new(kind);
        array.add_all(values)?;
        Ok(array)
    }

    /// The element kind.
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Bytes per element.
    pub fn width(&self) -> usize {
        self.kind.width()
    }

    /// The packed element bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    /// Heap bytes reserved by the buffer.
    pub fn memory_bytes(&self) -> usize {
        self.buffer.memory_bytes()
    }

    fn check_index(&self, index: usize) -> Result<(), StrideError> {
        let len = self.len();
        if index >= len {
            return Err(StrideError::IndexOutOfBounds { index, len });
        }
        Ok(())
    }

    fn element_bytes(&self, index: usize) -> Result<&[u8], StrideError> {
        self.check_index(index)?;
        let width = self.width();
        self.buffer.read_at(index * width, width)
    }

    /// Shift elements `index..` one slot right, highest first, then write
    /// `bytes` into the freed slot.
    fn insert_bytes(&mut self, index: usize, bytes: &[u8]) -> Result<(), StrideError> {
        let len = self.len();
        let width = self.width();
        self.buffer.extend_zeroed(width);
        for i in (index..len).rev() {
            self.buffer.copy_within(i * width, width, (i + 1) * width)?;
        }
        self.buffer.write_at(index * width, bytes)
    }

    /// Shift elements after `index` one slot left, lowest first, then drop
    /// the final slot.
    fn remove_slot(&mut self, index: usize) -> Result<(), StrideError> {
        let len = self.len();
        let width = self.width();
        for i in index + 1..len {
            self.buffer.copy_within(i * width, width, (i - 1) * width)?;
        }
        self.buffer.truncate((len - 1) * width);
        Ok(())
    }

    // ── Integer side-array access ─────────────────────────────────
    //
    // `VarArray` keeps offsets, lengths and tags in integer-kind
    // `FixedArray`s. These skip the `Value` round trip.

    pub(crate) fn get_int(&self, index: usize) -> Result<i64, StrideError> {
        self.kind.decode_int(self.element_bytes(index)?)
    }

    pub(crate) fn get_usize(&self, index: usize) -> Result<usize, StrideError> {
        let raw = self.get_int(index)?;
        usize::try_from(raw)
            .map_err(|_| StrideError::corrupt(format!("negative index entry {raw} at {index}")))
    }

    pub(crate) fn set_int(&mut self, index: usize, value: i64) -> Result<(), StrideError> {
        self.check_index(index)?;
        let bytes = self.kind.encode_int(value)?;
        self.buffer.write_at(index * self.width(), &bytes)
    }

    pub(crate) fn push_int(&mut self, value: i64) -> Result<(), StrideError> {
        let bytes = self.kind.encode_int(value)?;
        self.buffer.append(&bytes);
        Ok(())
    }

    pub(crate) fn insert_int(&mut self, index: usize, value: i64) -> Result<(), StrideError> {
        let bytes = self.kind.encode_int(value)?;
        if index > self.len() {
            return Err(StrideError::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        self.insert_bytes(index, &bytes)
    }

    pub(crate) fn remove(&mut self, index: usize) -> Result<(), StrideError> {
        self.check_index(index)?;
        self.remove_slot(index)
    }
}

impl PackedArray for FixedArray {
    fn len(&self) -> usize {
        self.buffer.len() / self.width()
    }

    fn get(&self, index: usize) -> Result<Value, StrideError> {
        self.kind.decode(self.element_bytes(index)?)
    }

    fn add(&mut self, value: Value) -> Result<(), StrideError> {
        let bytes = self.kind.encode(&value)?;
        self.buffer.append(&bytes);
        Ok(())
    }

    fn set(&mut self, index: usize, value: Value) -> Result<(), StrideError> {
        let bytes = self.kind.encode(&value)?;
        if index >= self.len() {
            self.buffer.append(&bytes);
            return Ok(());
        }
        self.buffer.write_at(index * self.width(), &bytes)
    }

    fn insert(&mut self, index: usize, value: Value) -> Result<(), StrideError> {
        let len = self.len();
        if index > len {
            return Err(StrideError::IndexOutOfBounds { index, len });
        }
        let bytes = self.kind.encode(&value)?;
        self.insert_bytes(index, &bytes)
    }

    fn delete(&mut self, index: usize) -> Result<Value, StrideError> {
        let removed = self.get(index)?;
        self.remove_slot(index)?;
        Ok(removed)
    }

    fn clear(&mut self) {
        self.buffer.clear();
    }

    fn empty_like(&self) -> Self {
        Self::new(self.kind)
    }

    /// Byte-level swap: both elements have the same width.
    fn swap(&mut self, a: usize, b: usize) -> Result<(), StrideError> {
        let first: ElementBytes = SmallVec::from_slice(self.element_bytes(a)?);
        let second: ElementBytes = SmallVec::from_slice(self.element_bytes(b)?);
        if a == b {
            return Ok(());
        }
        let width = self.width();
        self.buffer.write_at(a * width, &second)?;
        self.buffer.write_at(b * width, &first)
    }

    fn add_all<I: IntoIterator<Item = Value>>(&mut self, values: I) -> Result<(), StrideError> {
        let mut staged = Vec::new();
        for value in values {
            staged.extend_from_slice(&self.kind.encode(&value)?);
        }
        self.buffer.append(&staged);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a FixedArray {
    type Item = (usize, Value);
    type IntoIter = crate::iter::Iter<'a, FixedArray>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
