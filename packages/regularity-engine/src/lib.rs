//! Regularity Engine
//!
//! Decides whether a binary or ternary matrix represents a regular matroid
//! and, if so, builds a decomposition tree witnessing regularity via
//! Seymour's decomposition theorem.
//!
//! Architecture:
//! - domain/   : Matrix/node/task/queue types (the data model)
//! - pipeline/ : Stage contracts, dispatcher, and the driver entry points
//! - io/       : Minimal sparse-triplet reader for literal test matrices
//! - config/errors/stats : Ambient parameters, error taxonomy, instrumentation
//!
//! This crate implements the decomposition *driver*: the work-queue
//! scheduler that pushes nodes through a fixed diagnostic pipeline. The
//! individual mathematical subroutines (graphicness testing, R10
//! recognition, wheel-minor extraction, ...) are implemented here as
//! bounded, exhaustive reference algorithms sufficient to exercise the
//! driver correctly on small-to-moderate inputs; a production engine would
//! swap in industrial-strength versions of those subroutines without
//! changing the driver around them.

pub mod config;
pub mod domain;
pub mod errors;
pub mod io;
pub mod pipeline;
pub mod stats;

pub use config::{RegularParams, ThreeSumStrategy};
pub use domain::matrix::SparseMatrix;
pub use domain::node::{DecompositionKind, DecompositionNode, RegularityTag};
pub use errors::RegularityError;
pub use io::parse_triplets;
pub use pipeline::driver::{complete_decomposition, test, ForbiddenMinor, RegularityOutcome};
pub use stats::RegularStats;
