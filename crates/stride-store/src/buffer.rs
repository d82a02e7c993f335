//! Growable, randomly addressable byte storage.
//!
//! A [`ByteBuffer`] is the backing store of every packed array. It behaves
//! like an in-memory file: a cursor that `seek`/`read`/`write` move, plus
//! offset-addressed helpers the arrays use for their shifting algorithms.
//! It is exclusively owned by its array; cloning copies the bytes.

use stride_core::StrideError;

/// An owned byte vector with a cursor.
///
/// Equality compares stored bytes only; the cursor is not part of the
/// observable content.
#[derive(Clone, Debug, Default)]
pub struct ByteBuffer {
    data: Vec<u8>,
    /// Read/write position in bytes. May sit past the end after a seek.
    cursor: usize,
}

impl ByteBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with `capacity` bytes reserved.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            cursor: 0,
        }
    }

    /// Number of bytes stored.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Move the cursor to `pos`. Seeking past the end is allowed; a later
    /// [`write`](Self::write) zero-fills the gap.
    pub fn seek(&mut self, pos: usize) {
        self.cursor = pos;
    }

    /// Read `len` bytes at the cursor and advance past them.
    ///
    /// # Errors
    ///
    /// Returns [`StrideError::IndexOutOfBounds`] if fewer than `len` bytes
    /// remain after the cursor.
    pub fn read(&mut self, len: usize) -> Result<&[u8], StrideError> {
        let start = self.cursor;
        let end = self.checked_end(start, len)?;
        self.cursor = end;
        Ok(&self.data[start..end])
    }

    /// Write `bytes` at the cursor, overwriting and extending as needed,
    /// and advance past them.
    ///
    /// # Errors
    ///
    /// Returns [`StrideError::IndexOutOfBounds`] if the write would end
    /// past `usize::MAX`, or [`StrideError::CapacityExceeded`] if the gap
    /// after a far seek cannot be allocated. The buffer and cursor are
    /// unchanged on error.
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), StrideError> {
        let start = self.cursor;
        let end = start
            .checked_add(bytes.len())
            .ok_or(StrideError::IndexOutOfBounds {
                index: usize::MAX,
                len: self.data.len(),
            })?;
        if start > self.data.len() {
            self.data
                .try_reserve(end - self.data.len())
                .map_err(|_| StrideError::CapacityExceeded {
                    requested: end,
                    capacity: self.data.len(),
                })?;
            self.data.resize(start, 0);
        }
        let overlap = self.data.len().min(end) - start;
        self.data[start..start + overlap].copy_from_slice(&bytes[..overlap]);
        self.data.extend_from_slice(&bytes[overlap..]);
        self.cursor = end;
        Ok(())
    }

    /// Borrow `len` bytes at `offset` without moving the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`StrideError::IndexOutOfBounds`] if the range exceeds the buffer.
    pub fn read_at(&self, offset: usize, len: usize) -> Result<&[u8], StrideError> {
        let end = self.checked_end(offset, len)?;
        Ok(&self.data[offset..end])
    }

    /// Overwrite bytes at `offset` in place without moving the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`StrideError::IndexOutOfBounds`] if the range exceeds the
    /// buffer. Use [`append`](Self::append) to grow.
    pub fn write_at(&mut self, offset: usize, bytes: &[u8]) -> Result<(), StrideError> {
        let end = self.checked_end(offset, bytes.len())?;
        self.data[offset..end].copy_from_slice(bytes);
        Ok(())
    }

    /// Append `bytes` at the tail, returning the offset they landed at.
    pub fn append(&mut self, bytes: &[u8]) -> usize {
        let offset = self.data.len();
        self.data.extend_from_slice(bytes);
        offset
    }

    /// Grow the tail by `len` zero bytes.
    pub fn extend_zeroed(&mut self, len: usize) {
        self.data.resize(self.data.len() + len, 0);
    }

    /// Copy `len` bytes from `src` to `dst` within the buffer. The ranges
    /// may overlap.
    ///
    /// # Errors
    ///
    /// Returns [`StrideError::IndexOutOfBounds`] if either range exceeds the buffer.
    pub fn copy_within(&mut self, src: usize, len: usize, dst: usize) -> Result<(), StrideError> {
        let src_end = self.checked_end(src, len)?;
        self.checked_end(dst, len)?;
        self.data.copy_within(src..src_end, dst);
        Ok(())
    }

    /// Shrink the buffer to `len` bytes. Growing is a no-op. The cursor is
    /// clamped to the new length.
    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
        self.cursor = self.cursor.min(self.data.len());
    }

    /// Remove every byte and rewind the cursor.
    pub fn clear(&mut self) {
        self.data.clear();
        self.cursor = 0;
    }

    /// The stored bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Heap bytes reserved by the backing vector.
    pub fn memory_bytes(&self) -> usize {
        self.data.capacity()
    }

    fn checked_end(&self, offset: usize, len: usize) -> Result<usize, StrideError> {
        match offset.checked_add(len) {
            Some(end) if end <= self.data.len() => Ok(end),
            _ => Err(StrideError::IndexOutOfBounds {
                index: offset.saturating_add(len),
                len: self.data.len(),
            }),
        }
    }
}

impl PartialEq for ByteBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for ByteBuffer {}
