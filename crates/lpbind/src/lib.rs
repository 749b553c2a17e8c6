//! Dynamic-value binding layer over the lpbind model.
//!
//! A scripting host hands in loosely typed [`Value`]s. The marshaler checks
//! and decodes sparse rows, objectives and special ordered sets; every other
//! operation goes through the declarative [`forward`] table. [`LpHandle`]
//! owns the model and turns calls on a destroyed handle into
//! [`BindError::InvalidHandle`].

pub mod consts;
pub mod error;
pub mod forward;
pub mod handle;
pub mod logging;
pub mod marshal;
pub mod value;

pub use error::{BindError, ErrorKind};
pub use forward::{Entry, FromValue, IntoValue};
pub use handle::{LP_SOLVE_VERSION, LpHandle};
pub use logging::{LoggingError, init_logging};
pub use marshal::{add_constraint, add_special_ordered_set, set_objective};
pub use value::Value;

pub use lpbind_core::{LogSink, Model, SolveStatus, Verbosity};
pub use lpbind_solver::{BackendKind, SolverConfig};
