//! Timeskew: a time-space tiling planner and verification harness for
//! leap-frog 3D stencil updates.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all timeskew sub-crates. For most users, adding `timeskew` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use timeskew::prelude::*;
//!
//! // Plan a 10x10x10 grid with trapezoid I/J axes and a parallelogram
//! // K axis, four half-steps per tile.
//! let config = RunConfig {
//!     grid_size: [10, 10, 10],
//!     tile_size: [8, 8, 4],
//!     tile_shape: [
//!         AxisShape::Trapezoid,
//!         AxisShape::Trapezoid,
//!         AxisShape::Parallelogram,
//!     ],
//!     tile_half_steps: 4,
//!     timesteps: 4,
//! };
//!
//! // TTP composition: 4 stages, each holding independent tiles.
//! let schedule = TiledSchedule::build(&config).unwrap();
//! assert_eq!(schedule.main_plan().stage_count(), 4);
//! assert_eq!(schedule.main_batches(), 2);
//!
//! // Prove the schedule equals the naive reference execution.
//! verify_symbolic(&config).unwrap();
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `timeskew-core` | Ranges, axis shapes, the 4D field array |
//! | [`plan`] | `timeskew-plan` | Tile generators, 3D composition, diagnostics |
//! | [`kernel`] | `timeskew-kernel` | Stencil kernels, symbolic algebra, counters |
//! | [`engine`] | `timeskew-engine` | Reference and tiled executors |
//! | [`verify`] | `timeskew-verify` | Symbolic and counter harnesses |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub use timeskew_core as types;
pub use timeskew_engine as engine;
pub use timeskew_kernel as kernel;
pub use timeskew_plan as plan;
pub use timeskew_verify as verify;

/// The most commonly used types, re-exported flat.
pub mod prelude {
    pub use timeskew_core::{AxisShape, Field4D, Range1D, Range3D};
    pub use timeskew_engine::{
        run_reference, Coefficients, RunConfig, StencilSweeper, Stepper, TiledSchedule,
    };
    pub use timeskew_kernel::{CellAlgebra, Expr};
    pub use timeskew_plan::{build_plan, Plan1D, Plan3D, PlanError};
    pub use timeskew_verify::{verify_counters, verify_symbolic};
}
