//! Variable-stride array configuration.

use stride_core::{ElementKind, StrideError};

/// Configuration for a [`VarArray`](crate::VarArray).
///
/// Controls the up-front value-buffer reservation and the element kind of
/// the offset and length side arrays. Validated at construction; immutable
/// afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Bytes reserved in the value buffer at creation.
    ///
    /// Default: 256.
    pub initial_capacity: usize,

    /// Element kind of the offset and length side arrays.
    ///
    /// Default: [`ElementKind::Int32`], addressing up to 2 GiB of payload.
    /// Must be `Int32` or `Int64`.
    pub index_kind: ElementKind,
}

impl StoreConfig {
    /// Default value-buffer reservation in bytes.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 256;

    /// Default side-array index kind.
    pub const DEFAULT_INDEX_KIND: ElementKind = ElementKind::Int32;

    /// Create a config with default values.
    pub fn new() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
            index_kind: Self::DEFAULT_INDEX_KIND,
        }
    }

    /// Replace the side-array index kind.
    pub fn with_index_kind(mut self, index_kind: ElementKind) -> Self {
        self.index_kind = index_kind;
        self
    }

    /// Replace the initial value-buffer reservation.
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Check that every setting is usable.
    ///
    /// # Errors
    ///
    /// Returns [`StrideError::InvalidConfig`] if `index_kind` is not
    /// `Int32` or `Int64`.
    pub fn validate(&self) -> Result<(), StrideError> {
        match self.index_kind {
            ElementKind::Int32 | ElementKind::Int64 => Ok(()),
            other => Err(StrideError::InvalidConfig {
                reason: format!("index kind must be int32 or int64, got {other}"),
            }),
        }
    }

    /// Largest value-buffer size the side arrays can address.
    pub fn max_buffer_bytes(&self) -> usize {
        self.index_kind
            .int_range()
            .map_or(0, |(_, hi)| usize::try_from(hi).unwrap_or(usize::MAX))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new()
    }
}
