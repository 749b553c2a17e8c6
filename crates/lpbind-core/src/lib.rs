//! Lpbind core model with lp_solve 5.5 conventions.
//!
//! Rows and columns are 1-based ordinals. Row 0 is the objective function.
//! The model owns bounds, names, special ordered sets, solver parameters,
//! the diagnostic sink and the results of the most recent solve. Optimization
//! itself is delegated to `lpbind-solver`.

pub mod diagnostics;
pub mod format;
pub mod model;
pub mod params;
pub mod status;
pub mod types;

pub use diagnostics::{Diagnostics, LogSink};
pub use format::{FileFormat, FormatError};
pub use model::{
    Column, ColumnView, Model, ModelError, ModelSnapshot, OutputTarget, Row, RowView,
    SolveRecord, SosGroup, UNNAMED_MODEL,
};
pub use params::Params;
pub use status::{SolveStatus, status_text};
pub use types::{DEFAULT_INFINITY, Relation, Sense, Verbosity};
