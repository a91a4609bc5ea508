//! Core types for the timeskew tiling planner.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! inclusive integer ranges the planner is built from, the per-axis tile
//! shape tag, and the flat bounds-checked 4D field array shared by every
//! executor and harness.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod field;
pub mod range;

pub use field::Field4D;
pub use range::{AxisShape, Range1D, Range3D};
