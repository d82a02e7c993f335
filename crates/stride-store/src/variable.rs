//! Variable-stride packed array.
//!
//! Heterogeneous values are encoded with [`stride_core::codec`] and packed
//! back to back in one value buffer. Three parallel fixed-stride side
//! arrays record, per element, where its bytes start, how many there are,
//! and how to decode them:
//!
//! ```text
//! values   │1│0│0│0│d│a│y│·│·│·│·│·│·│·│·│
//!           └─int─┘ └str┘ └────double─────┘
//! offsets  [ 0, 4, 7 ]
//! lengths  [ 4, 3, 8 ]
//! tags     [ int, string, double ]
//! ```
//!
//! The payload region has no gaps: element `i + 1` starts where element
//! `i` ends, and the buffer length equals the sum of the lengths. Every
//! mutation restores that before returning.

use stride_core::codec::{self, Encoded, TypeTag};
use stride_core::{ElementKind, StrideError, Value};

use crate::buffer::ByteBuffer;
use crate::config::StoreConfig;
use crate::fixed::FixedArray;
use crate::traits::PackedArray;

/// A heterogeneous array of variable-length encoded values.
#[derive(Clone, Debug, PartialEq)]
pub struct VarArray {
    values: ByteBuffer,
    offsets: FixedArray,
    lengths: FixedArray,
    tags: FixedArray,
    /// Largest value-buffer size the side arrays can address.
    max_bytes: usize,
    /// Value-buffer bytes reserved for this array and every empty copy.
    initial_capacity: usize,
}

impl VarArray {
    /// Create an empty array with the default [`StoreConfig`].
    pub fn new() -> Self {
        let config = StoreConfig::default();
        Self::build(&config)
    }

    /// Create an empty array with a custom configuration.
    ///
    /// # Errors
    ///
    /// [`StrideError::InvalidConfig`] if the configuration is rejected by
    /// [`StoreConfig::validate`].
    pub fn with_config(config: StoreConfig) -> Result<Self, StrideError> {
        config.validate()?;
        Ok(Self::build(&config))
    }

    fn build(config: &StoreConfig) -> Self {
        Self {
            values: ByteBuffer::with_capacity(config.initial_capacity),
            offsets: FixedArray::new(config.index_kind),
            lengths: FixedArray::new(config.index_kind),
            tags: FixedArray::new(ElementKind::UInt8),
            max_bytes: config.max_buffer_bytes(),
            initial_capacity: config.initial_capacity,
        }
    }

    /// Build an array from `values`.
    ///
    /// # Errors
    ///
    /// [`StrideError::InvalidValue`] if any value is `Null`.
    pub fn from_values<I>(values: I) -> Result<Self, StrideError>
    where
        I: IntoIterator<Item = Value>,
    {
        let mut array = Self::new();
        array.add_all(values)?;
        Ok(array)
    }

    /// The packed payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.values.as_slice()
    }

    /// Size of the payload region in bytes.
    pub fn value_bytes(&self) -> usize {
        self.values.len()
    }

    /// Heap bytes reserved by the value buffer and the three side arrays.
    pub fn memory_bytes(&self) -> usize {
        self.values.memory_bytes()
            + self.offsets.memory_bytes()
            + self.lengths.memory_bytes()
            + self.tags.memory_bytes()
    }

    /// Type tag of the element at `index`.
    ///
    /// # Errors
    ///
    /// [`StrideError::IndexOutOfBounds`] if `index >= len()`.
    pub fn type_tag(&self, index: usize) -> Result<TypeTag, StrideError> {
        self.slot(index).map(|(_, _, tag)| tag)
    }

    /// Encoded length in bytes of the element at `index`.
    ///
    /// # Errors
    ///
    /// [`StrideError::IndexOutOfBounds`] if `index >= len()`.
    pub fn encoded_len(&self, index: usize) -> Result<usize, StrideError> {
        self.slot(index).map(|(_, len, _)| len)
    }

    /// Verify the bookkeeping: equal side-array lengths, contiguous
    /// offsets starting at zero, non-empty elements, known tags, and a
    /// value buffer exactly as long as the sum of element lengths.
    ///
    /// # Errors
    ///
    /// [`StrideError::Corrupt`] describing the first violation found.
    pub fn check_invariants(&self) -> Result<(), StrideError> {
        let count = self.offsets.len();
        if self.lengths.len() != count || self.tags.len() != count {
            return Err(StrideError::corrupt(format!(
                "side arrays disagree: {} offsets, {} lengths, {} tags",
                count,
                self.lengths.len(),
                self.tags.len()
            )));
        }
        let mut expected = 0usize;
        for index in 0..count {
            let (offset, len, _) = self.slot(index)?;
            if offset != expected {
                return Err(StrideError::corrupt(format!(
                    "element {index} starts at {offset}, expected {expected}"
                )));
            }
            if len == 0 {
                return Err(StrideError::corrupt(format!("element {index} has zero length")));
            }
            expected += len;
        }
        if expected != self.values.len() {
            return Err(StrideError::corrupt(format!(
                "value buffer holds {} bytes, lengths sum to {expected}",
                self.values.len()
            )));
        }
        Ok(())
    }

    /// `(offset, length, tag)` of the element at `index`.
    fn slot(&self, index: usize) -> Result<(usize, usize, TypeTag), StrideError> {
        let len = self.len();
        if index >= len {
            return Err(StrideError::IndexOutOfBounds { index, len });
        }
        let offset = self.offsets.get_usize(index)?;
        let length = self.lengths.get_usize(index)?;
        let raw_tag = self.tags.get_int(index)?;
        let tag = u8::try_from(raw_tag)
            .map_err(|_| StrideError::corrupt(format!("tag {raw_tag} out of range")))
            .and_then(TypeTag::from_u8)?;
        Ok((offset, length, tag))
    }

    /// Fail unless a payload of `total` bytes is addressable.
    fn ensure_addressable(&self, total: usize) -> Result<(), StrideError> {
        if total > self.max_bytes {
            return Err(StrideError::CapacityExceeded {
                requested: total,
                capacity: self.max_bytes,
            });
        }
        Ok(())
    }

    fn push_slot(&mut self, offset: usize, encoded: &Encoded) -> Result<(), StrideError> {
        self.offsets.push_int(offset as i64)?;
        self.lengths.push_int(encoded.len() as i64)?;
        self.tags.push_int(encoded.tag.as_u8() as i64)
    }

    /// Append an already-encoded element. Capacity must be checked first.
    fn append_encoded(&mut self, encoded: &Encoded) -> Result<(), StrideError> {
        let offset = self.values.append(&encoded.bytes);
        self.push_slot(offset, encoded)
    }

    /// Insert an already-encoded element before `index`.
    ///
    /// Reserves `new_len` bytes at the tail, then walks from the last
    /// element down to `index` moving each element's bytes `new_len`
    /// further along and updating its offset. The freed gap at the old
    /// offset of `index` receives the new bytes. Cost is proportional to
    /// the bytes moved.
    fn insert_encoded(&mut self, index: usize, encoded: &Encoded) -> Result<(), StrideError> {
        let count = self.len();
        if index == count {
            return self.append_encoded(encoded);
        }
        let (origin, _, _) = self.slot(index)?;
        let shift = encoded.len();
        self.values.extend_zeroed(shift);
        for j in (index..count).rev() {
            let (offset, len, _) = self.slot(j)?;
            self.values.copy_within(offset, len, offset + shift)?;
            self.offsets.set_int(j, (offset + shift) as i64)?;
        }
        self.values.write_at(origin, &encoded.bytes)?;
        self.offsets.insert_int(index, origin as i64)?;
        self.lengths.insert_int(index, shift as i64)?;
        self.tags.insert_int(index, encoded.tag.as_u8() as i64)
    }

    /// Remove the element at `index`: move every following element's
    /// bytes left by the removed length, fix their offsets, truncate the
    /// buffer, then drop the side-array entries.
    fn remove_slot(&mut self, index: usize) -> Result<Value, StrideError> {
        let (origin, removed_len, tag) = self.slot(index)?;
        let removed = codec::decode(self.values.read_at(origin, removed_len)?, tag)?;
        let count = self.len();
        for j in index + 1..count {
            let (offset, len, _) = self.slot(j)?;
            self.values.copy_within(offset, len, offset - removed_len)?;
            self.offsets.set_int(j, (offset - removed_len) as i64)?;
        }
        self.values.truncate(self.values.len() - removed_len);
        self.offsets.remove(index)?;
        self.lengths.remove(index)?;
        self.tags.remove(index)?;
        Ok(removed)
    }
}

impl Default for VarArray {
    fn default() -> Self {
        Self::new()
    }
}

impl PackedArray for VarArray {
    fn len(&self) -> usize {
        self.offsets.len()
    }

    fn get(&self, index: usize) -> Result<Value, StrideError> {
        let (offset, len, tag) = self.slot(index)?;
        codec::decode(self.values.read_at(offset, len)?, tag)
    }

    fn add(&mut self, value: Value) -> Result<(), StrideError> {
        let encoded = codec::encode(&value)?;
        self.ensure_addressable(self.values.len() + encoded.len())?;
        self.append_encoded(&encoded)
    }

    /// Delete then re-insert at `index`; appends when `index >= len()`.
    /// The value is encoded before anything is removed.
    fn set(&mut self, index: usize, value: Value) -> Result<(), StrideError> {
        let encoded = codec::encode(&value)?;
        if index >= self.len() {
            self.ensure_addressable(self.values.len() + encoded.len())?;
            return self.append_encoded(&encoded);
        }
        let (_, old_len, _) = self.slot(index)?;
        self.ensure_addressable(self.values.len() - old_len + encoded.len())?;
        self.remove_slot(index)?;
        self.insert_encoded(index, &encoded)
    }

    fn insert(&mut self, index: usize, value: Value) -> Result<(), StrideError> {
        let len = self.len();
        if index > len {
            return Err(StrideError::IndexOutOfBounds { index, len });
        }
        let encoded = codec::encode(&value)?;
        self.ensure_addressable(self.values.len() + encoded.len())?;
        self.insert_encoded(index, &encoded)
    }

    fn delete(&mut self, index: usize) -> Result<Value, StrideError> {
        self.remove_slot(index)
    }

    fn clear(&mut self) {
        self.values.clear();
        self.offsets.clear();
        self.lengths.clear();
        self.tags.clear();
    }

    fn empty_like(&self) -> Self {
        Self {
            values: ByteBuffer::with_capacity(self.initial_capacity),
            offsets: self.offsets.empty_like(),
            lengths: self.lengths.empty_like(),
            tags: self.tags.empty_like(),
            max_bytes: self.max_bytes,
            initial_capacity: self.initial_capacity,
        }
    }

    fn add_all<I: IntoIterator<Item = Value>>(&mut self, values: I) -> Result<(), StrideError> {
        let batch = values
            .into_iter()
            .map(|v| codec::encode(&v))
            .collect::<Result<Vec<_>, _>>()?;
        let total = batch.iter().map(Encoded::len).sum::<usize>();
        self.ensure_addressable(self.values.len().saturating_add(total))?;
        for encoded in &batch {
            self.append_encoded(encoded)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a VarArray {
    type Item = (usize, Value);
    type IntoIter = crate::iter::Iter<'a, VarArray>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
