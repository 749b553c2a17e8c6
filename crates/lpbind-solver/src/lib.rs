//! Solve driver for lpbind models.
//!
//! A [`Model`](lpbind_core::Model) is lowered into a backend-neutral
//! [`LinearProblem`], handed to a [`Backend`], and the outcome is recorded
//! back into the model in lp_solve's result layout.
//!
//! # Overview
//!
//! - [`SolverConfig`]: Configuration options for backend behavior
//! - [`SolverStatus`]: Backend outcome before it becomes an lp_solve code
//! - [`SolverError`]: Error types for solver operations
//! - [`Backend`]: Trait for backend implementations
//! - [`solve`] / [`solve_with`]: The driver

mod backend;
mod config;
mod driver;
mod error;
mod lower;
mod microlp_backend;
mod status;

#[cfg(feature = "highs")]
mod highs_backend;

pub use backend::{Backend, BackendSolution, available_backends, backend_for};
pub use config::{BackendKind, SolverConfig};
pub use driver::{solve, solve_with};
pub use error::SolverError;
pub use lower::{LinearProblem, LoweredColumn, LoweredRow, lower};
pub use microlp_backend::MicrolpBackend;
pub use status::SolverStatus;

#[cfg(feature = "highs")]
pub use highs_backend::{HighsBackend, highs_version};
