//! Packed arrays over owned byte buffers.
//!
//! Two array variants share the [`PackedArray`] operation set:
//!
//! - [`FixedArray`]: homogeneous elements of one [`ElementKind`], each
//!   exactly `width` bytes, addressed by `index * width`.
//! - [`VarArray`]: heterogeneous values encoded with
//!   [`stride_core::codec`], packed contiguously and located through three
//!   fixed-stride side arrays.
//!
//! # Architecture
//!
//! ```text
//! VarArray
//! ├── ByteBuffer        (packed payload, no gaps)
//! ├── FixedArray<index> (offsets)
//! ├── FixedArray<index> (lengths)
//! └── FixedArray<u8>    (type tags)
//!
//! FixedArray
//! └── ByteBuffer        (len == count * width)
//! ```
//!
//! Both variants exclusively own their buffers; `Clone` is a deep copy.
//! Every mutating operation either completes or leaves the array exactly
//! as it was: values are encoded and capacity is checked before any byte
//! moves.
//!
//! [`ElementKind`]: stride_core::ElementKind

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod buffer;
pub mod config;
pub mod fixed;
pub mod iter;
pub mod sort;
pub mod traits;
pub mod variable;
pub mod window;

// Public re-exports for the primary API surface.
pub use buffer::ByteBuffer;
pub use config::StoreConfig;
pub use fixed::FixedArray;
pub use iter::Iter;
pub use sort::Direction;
pub use traits::PackedArray;
pub use variable::VarArray;
pub use window::RollingWindow;
