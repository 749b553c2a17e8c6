//! Backend abstraction over LP/MIP engines.

use crate::{BackendKind, LinearProblem, MicrolpBackend, SolverConfig, SolverError, SolverStatus};

/// What a backend returns for one solve of a [`LinearProblem`].
///
/// Vectors cover every lowered column and row, indicator columns and linking
/// rows included.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendSolution {
    pub status: SolverStatus,
    /// Column values; `None` when the backend produced no solution.
    pub column_values: Option<Vec<f64>>,
    pub row_duals: Option<Vec<f64>>,
    pub reduced_costs: Option<Vec<f64>>,
    pub iterations: u64,
}

impl BackendSolution {
    /// Outcome without a solution.
    pub fn without_solution(status: SolverStatus) -> Self {
        Self {
            status,
            column_values: None,
            row_duals: None,
            reduced_costs: None,
            iterations: 0,
        }
    }
}

/// Trait for solver backends.
///
/// Infeasible and unbounded problems are reported through
/// [`BackendSolution::status`]; `Err` is reserved for failures of the
/// backend itself.
pub trait Backend {
    fn name(&self) -> &'static str;

    fn solve(
        &self,
        problem: &LinearProblem,
        config: &SolverConfig,
    ) -> Result<BackendSolution, SolverError>;
}

/// Backends compiled into this build.
pub fn available_backends() -> Vec<BackendKind> {
    let mut kinds = vec![BackendKind::Microlp];
    if cfg!(feature = "highs") {
        kinds.push(BackendKind::Highs);
    }
    kinds
}

/// Instantiate the backend for `kind`.
///
/// # Errors
///
/// Returns [`SolverError::BackendUnavailable`] when `kind` was not compiled in.
pub fn backend_for(kind: BackendKind) -> Result<Box<dyn Backend>, SolverError> {
    match kind {
        BackendKind::Microlp => Ok(Box::new(MicrolpBackend)),
        #[cfg(feature = "highs")]
        BackendKind::Highs => Ok(Box::new(crate::HighsBackend)),
        #[cfg(not(feature = "highs"))]
        BackendKind::Highs => Err(SolverError::BackendUnavailable {
            backend: kind.as_str(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_microlp_is_always_available() {
        assert!(available_backends().contains(&BackendKind::Microlp));
        assert_eq!(backend_for(BackendKind::Microlp).unwrap().name(), "microlp");
    }

    #[cfg(not(feature = "highs"))]
    #[test]
    fn test_highs_requires_feature() {
        let err = backend_for(BackendKind::Highs).err().unwrap();
        assert_eq!(err.code(), "BACKEND_UNAVAILABLE");
    }
}
