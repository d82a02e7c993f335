//! Error types for packed array operations.
//!
//! Every fallible operation returns [`StrideError`]. Errors are raised
//! before any byte movement, so a failed call never leaves a partially
//! mutated array behind.

use std::error::Error;
use std::fmt;

/// Errors that can occur while encoding, decoding, or mutating a packed array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StrideError {
    /// The value cannot be encoded by this array (a `Null` on the
    /// variable-stride path, or a value that does not fit the configured
    /// element kind on the fixed-stride path). Also used for invalid
    /// operation arguments such as a zero rolling window.
    InvalidValue {
        /// Human-readable description of what was rejected.
        reason: String,
    },
    /// An index outside the valid range for the operation.
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// Number of elements at the time of the call.
        len: usize,
    },
    /// The value buffer would grow past what the side arrays can address.
    CapacityExceeded {
        /// Total bytes the operation would need.
        requested: usize,
        /// Largest addressable value-buffer size.
        capacity: usize,
    },
    /// Stored bytes could not be decoded (truncated or corrupt data).
    Corrupt {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// A configuration value was rejected at construction.
    InvalidConfig {
        /// Human-readable description of the rejected setting.
        reason: String,
    },
}

impl StrideError {
    /// Shorthand for an [`StrideError::InvalidValue`] with the given reason.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`StrideError::Corrupt`] with the given detail.
    pub fn corrupt(detail: impl Into<String>) -> Self {
        Self::Corrupt {
            detail: detail.into(),
        }
    }
}

impl fmt::Display for StrideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { reason } => write!(f, "invalid value: {reason}"),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::CapacityExceeded {
                requested,
                capacity,
            } => {
                write!(
                    f,
                    "capacity exceeded: requested {requested} bytes, capacity {capacity} bytes"
                )
            }
            Self::Corrupt { detail } => write!(f, "corrupt data: {detail}"),
            Self::InvalidConfig { reason } => write!(f, "invalid config: {reason}"),
        }
    }
}

impl Error for StrideError {}
