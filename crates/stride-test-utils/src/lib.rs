//! Test utilities for Stride development.
//!
//! - [`fixtures`]: canned value sets used across unit, integration and
//!   bench code.
//! - [`strategies`]: proptest strategies for storable values and random
//!   operation sequences.
//! - [`model`]: a `Vec<Value>` reference model that random operation
//!   sequences are checked against.
//! - [`tracing_capture`]: a thread-local subscriber that collects the
//!   warnings arrays report, for asserting on them.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod model;
pub mod strategies;
pub mod tracing_capture;

use stride_core::Value;
use stride_store::{FixedArray, PackedArray, VarArray};

/// Assert that `array` decodes to exactly `expected` and that its
/// offset/length/tag bookkeeping is sound.
///
/// # Panics
///
/// On any mismatch or invariant violation.
pub fn assert_var_matches(array: &VarArray, expected: &[Value]) {
    if let Err(e) = array.check_invariants() {
        panic!("variable-stride invariants violated: {e}");
    }
    assert_eq!(array.len(), expected.len(), "element count");
    assert_eq!(array.to_vec().as_deref(), Ok(expected));
}

/// Assert that `array` decodes to exactly `expected` and that its buffer
/// holds exactly `len * width` bytes.
///
/// # Panics
///
/// On any mismatch.
pub fn assert_fixed_matches(array: &FixedArray, expected: &[Value]) {
    assert_eq!(
        array.as_bytes().len(),
        array.len() * array.width(),
        "buffer size is not a whole number of elements"
    );
    assert_eq!(array.len(), expected.len(), "element count");
    assert_eq!(array.to_vec().as_deref(), Ok(expected));
}
