//! Leap-frog stencil kernels for the timeskew verification harnesses.
//!
//! The electric/magnetic update is written once, generic over a
//! [`CellAlgebra`]. The `f32` instance is the scalar numeric kernel; the
//! [`Expr`] instance runs the same update over symbolic expression trees
//! so that executing a tiling plan out of order produces a structurally
//! different (and therefore detectably wrong) result instead of a
//! floating-point coincidence.
//!
//! The [`counter`] module holds the cheap alternative: per-cell
//! half-step counters with leap-frog consistency checks.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod algebra;
pub mod counter;
pub mod expr;
pub mod stencil;

pub use algebra::CellAlgebra;
pub use counter::CounterError;
pub use expr::{Expr, ExprComparer};
pub use stencil::{
    update_electric_cell, update_electric_range, update_magnetic_cell, update_magnetic_range,
};
