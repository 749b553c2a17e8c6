//! Backend outcome and its lp_solve result code.

use lpbind_core::SolveStatus;

/// Status a backend reports for one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverStatus {
    Optimal,
    Infeasible,
    Unbounded,
    /// Time limit reached; a solution may still be attached.
    ReachedTimeLimit,
    /// Iteration or node limit reached; a solution may still be attached.
    ReachedIterationLimit,
    /// Status is unknown or solver did not complete.
    Unknown,
}

impl SolverStatus {
    pub fn is_optimal(self) -> bool {
        matches!(self, SolverStatus::Optimal)
    }

    /// Check if the status indicates a feasible solution (optimal or limit-reached with solution).
    pub fn is_feasible(self) -> bool {
        matches!(
            self,
            SolverStatus::Optimal
                | SolverStatus::ReachedTimeLimit
                | SolverStatus::ReachedIterationLimit
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SolverStatus::Optimal => "optimal",
            SolverStatus::Infeasible => "infeasible",
            SolverStatus::Unbounded => "unbounded",
            SolverStatus::ReachedTimeLimit => "time_limit",
            SolverStatus::ReachedIterationLimit => "iteration_limit",
            SolverStatus::Unknown => "unknown",
        }
    }

    /// lp_solve result code for this outcome.
    ///
    /// An iteration limit is always `SUBOPTIMAL`. A time limit is
    /// `SUBOPTIMAL` when it still produced a solution and `TIMEOUT` otherwise.
    pub fn to_solve_status(self, has_solution: bool) -> SolveStatus {
        match self {
            SolverStatus::Optimal => SolveStatus::Optimal,
            SolverStatus::Infeasible => SolveStatus::Infeasible,
            SolverStatus::Unbounded => SolveStatus::Unbounded,
            SolverStatus::ReachedTimeLimit if has_solution => SolveStatus::Suboptimal,
            SolverStatus::ReachedTimeLimit => SolveStatus::Timeout,
            SolverStatus::ReachedIterationLimit => SolveStatus::Suboptimal,
            SolverStatus::Unknown => SolveStatus::NumFailure,
        }
    }
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
