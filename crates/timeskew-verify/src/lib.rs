//! Verification harnesses proving that tiled execution reproduces the
//! naive reference execution cell for cell.
//!
//! The symbolic harness ([`verify_symbolic`]) runs both executors over
//! expression trees: every field cell starts as a unique symbol, so a
//! single cell read at the wrong time yields a structurally different
//! expression that floating-point identities cannot mask.
//! The price is memory that grows with every half-step; a 20x20x20 grid
//! at 60 timesteps is a practical ceiling on commodity hardware.
//!
//! The counter harness ([`verify_counters`]) trades completeness for
//! constant memory: each cell carries only its half-step count, checked
//! against the leap-frog dependency pattern at every update.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod harness;
pub mod sanity;

pub use harness::{verify_symbolic, Divergence, VerifyError};
pub use sanity::{verify_counters, SanityError};
