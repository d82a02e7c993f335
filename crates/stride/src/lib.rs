//! Stride: packed arrays that store values as bytes in one owned buffer.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Stride sub-crates. For most users, adding `stride` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use stride::prelude::*;
//!
//! // Heterogeneous values, packed back to back.
//! let mut array = VarArray::new();
//! array.add(Value::from(1)).unwrap();
//! array.add(Value::from("a string")).unwrap();
//! array.add(Value::from(4)).unwrap();
//! array.insert(2, Value::from("bill")).unwrap();
//! assert_eq!(array.get(2).unwrap(), Value::from("bill"));
//! assert_eq!(array.sum(), 5.0);
//!
//! // Homogeneous values at a fixed width.
//! let mut ints = FixedArray::new(ElementKind::Int32);
//! for n in [0, 5, 10, 15, 20] {
//!     ints.add(Value::from(n)).unwrap();
//! }
//! let scaled = ints.normalise().unwrap();
//! assert_eq!(scaled.get(1).unwrap(), Value::Double(0.25));
//!
//! // Null is never storable, and a rejected call changes nothing.
//! assert!(matches!(array.add(Value::Null), Err(StrideError::InvalidValue { .. })));
//! assert_eq!(array.len(), 4);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `stride-core` | Value model, element kinds, codec, errors, warnings |
//! | [`store`] | `stride-store` | Byte buffer, fixed and variable arrays, sort, aggregates |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Value model, element kinds and codec (`stride-core`).
///
/// Contains [`types::Value`], the fixed-width [`types::ElementKind`]
/// catalogue, the variable-stride [`types::codec`], and the
/// [`types::StrideError`] and [`types::warning::StrideWarning`] types.
pub use stride_core as types;

/// Packed array storage (`stride-store`).
///
/// [`store::FixedArray`] for homogeneous fixed-width elements,
/// [`store::VarArray`] for heterogeneous values, and the shared
/// [`store::PackedArray`] operation set.
pub use stride_store as store;

/// Common imports for typical Stride usage.
///
/// ```rust
/// use stride::prelude::*;
/// ```
///
/// This imports both array variants, the shared trait, the value model
/// and the error type.
pub mod prelude {
    // Core types
    pub use stride_core::{ElementKind, StrideError, TypeTag, Value};

    // Warnings
    pub use stride_core::warning::StrideWarning;

    // Arrays
    pub use stride_store::{Direction, FixedArray, PackedArray, StoreConfig, VarArray};
}
