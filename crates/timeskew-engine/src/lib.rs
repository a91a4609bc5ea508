//! Executors for timeskew plans.
//!
//! [`run_reference`] is the specification of the correct answer: a
//! naive, strictly-ordered full-grid sweep per timestep. A
//! [`TiledSchedule`] is the production path: it batches a run's
//! timesteps into repetitions of one main plan plus an optional
//! remainder plan and drives them in the plan's mandated order.
//!
//! Both executors advance fields through the [`Stepper`] seam, so the
//! symbolic stencil, the scalar stencil, and the half-step counter
//! checks all share the same driver code.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod reference;
pub mod stepper;
pub mod tiled;

pub use config::{ConfigError, RunConfig};
pub use reference::run_reference;
pub use stepper::{Coefficients, CounterSweeper, StencilSweeper, Stepper};
pub use tiled::TiledSchedule;
