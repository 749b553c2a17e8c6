//! Solver error types.

/// Error type for solver operations.
///
/// Outcomes such as infeasibility are not errors; they are recorded on the
/// model as a [`SolveStatus`](lpbind_core::SolveStatus).
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The model uses a feature the backend formulation cannot express.
    LoweringFailed { reason: String },
    /// The requested backend was not compiled in.
    BackendUnavailable { backend: &'static str },
    /// Internal solver error.
    Internal(String),
}

impl SolverError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::LoweringFailed { .. } => "LOWERING_FAILED",
            SolverError::BackendUnavailable { .. } => "BACKEND_UNAVAILABLE",
            SolverError::Internal(_) => "SOLVER_INTERNAL",
        }
    }
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::LoweringFailed { reason } => {
                write!(f, "[{}] Cannot lower model: {}", self.code(), reason)
            }
            SolverError::BackendUnavailable { backend } => write!(
                f,
                "[{}] Backend '{}' is not available in this build",
                self.code(),
                backend
            ),
            SolverError::Internal(msg) => {
                write!(f, "[{}] Solver internal error: {}", self.code(), msg)
            }
        }
    }
}

impl std::error::Error for SolverError {}
