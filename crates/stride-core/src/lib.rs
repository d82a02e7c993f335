//! Core types for the Stride packed array engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the value model shared by every array variant, the fixed-width
//! element catalogue, the variable-stride type tags and codec, and the
//! error and warning types.
//!
//! # Encoding overview
//!
//! ```text
//! Value ──encode──▶ (bytes, TypeTag)     variable-stride path
//! Value ──ElementKind::encode──▶ [u8; w] fixed-stride path
//! ```
//!
//! Both paths are pure: decoding the produced bytes yields a value equal
//! in kind and content to the input.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod kind;
pub mod value;
pub mod warning;

pub use codec::{decode, encode, Encoded, TypeTag};
pub use error::StrideError;
pub use kind::ElementKind;
pub use value::Value;
pub use warning::StrideWarning;
