//! Time-space tiling plans for leap-frog 3D stencil updates.
//!
//! This crate turns a grid width, tile width, and tile height into 1D
//! tile shapes ([`parallelogram_tiles`], [`trapezoid_tiles`]), composes
//! three per-axis plans into a multi-stage 3D plan ([`combine_ttt`],
//! [`combine_ttp`], [`build_plan`]), and provides plan diagnostics
//! (ASCII visualization, subtile shape histograms, DRAM traffic
//! estimation).
//!
//! # Execution contract
//!
//! A published [`Plan3D`] encodes the only legal execution order:
//!
//! 1. Stages execute in plan order, with a barrier between stages.
//! 2. Tiles within one stage are mutually independent and may run
//!    concurrently.
//! 3. Subtiles within a tile execute in order on a single worker.
//! 4. Half-steps within a subtile execute in index order: the even index
//!    of each pair is the electric update, the odd index the magnetic
//!    update that reads the electric values just written.
//!
//! Any driver that obeys (1)-(4) sees no data race and produces results
//! identical to a naive, strictly-ordered full-grid sweep.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod combine;
pub mod error;
pub mod parallelogram;
pub mod stats;
pub mod subtile;
pub mod tile;
pub mod traffic;
pub mod trapezoid;
pub mod viz;

pub use combine::{build_plan, combine_ttp, combine_ttt};
pub use error::PlanError;
pub use parallelogram::parallelogram_tiles;
pub use stats::ShapeHistogram;
pub use subtile::{Plan3D, Subtile3D, Tile3D, TileList3D};
pub use tile::{Plan1D, Tile1D, TileList1D};
pub use traffic::plan_traffic;
pub use trapezoid::trapezoid_tiles;
pub use viz::render_plan;
