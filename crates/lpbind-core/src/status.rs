//! Solve result codes and their texts.

use serde::{Deserialize, Serialize};

/// Result code of a solve, numerically identical to lp_solve's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolveStatus {
    NotSolved,
    UnknownError,
    DataIgnored,
    NoBfp,
    NoMemory,
    NotRun,
    Optimal,
    Suboptimal,
    Infeasible,
    Unbounded,
    Degenerate,
    NumFailure,
    UserAbort,
    Timeout,
    Running,
    Presolved,
    ProcFail,
    ProcBreak,
    FeasFound,
    NoFeasFound,
    Fathomed,
}

impl SolveStatus {
    pub const ALL: [SolveStatus; 21] = [
        SolveStatus::NotSolved,
        SolveStatus::UnknownError,
        SolveStatus::DataIgnored,
        SolveStatus::NoBfp,
        SolveStatus::NoMemory,
        SolveStatus::NotRun,
        SolveStatus::Optimal,
        SolveStatus::Suboptimal,
        SolveStatus::Infeasible,
        SolveStatus::Unbounded,
        SolveStatus::Degenerate,
        SolveStatus::NumFailure,
        SolveStatus::UserAbort,
        SolveStatus::Timeout,
        SolveStatus::Running,
        SolveStatus::Presolved,
        SolveStatus::ProcFail,
        SolveStatus::ProcBreak,
        SolveStatus::FeasFound,
        SolveStatus::NoFeasFound,
        SolveStatus::Fathomed,
    ];

    pub fn code(self) -> i32 {
        match self {
            SolveStatus::NotSolved => -10,
            SolveStatus::UnknownError => -5,
            SolveStatus::DataIgnored => -4,
            SolveStatus::NoBfp => -3,
            SolveStatus::NoMemory => -2,
            SolveStatus::NotRun => -1,
            SolveStatus::Optimal => 0,
            SolveStatus::Suboptimal => 1,
            SolveStatus::Infeasible => 2,
            SolveStatus::Unbounded => 3,
            SolveStatus::Degenerate => 4,
            SolveStatus::NumFailure => 5,
            SolveStatus::UserAbort => 6,
            SolveStatus::Timeout => 7,
            SolveStatus::Running => 8,
            SolveStatus::Presolved => 9,
            SolveStatus::ProcFail => 10,
            SolveStatus::ProcBreak => 11,
            SolveStatus::FeasFound => 12,
            SolveStatus::NoFeasFound => 13,
            SolveStatus::Fathomed => 14,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| i64::from(status.code()) == code)
    }

    /// True when primal values are available after the solve.
    pub fn has_solution(self) -> bool {
        matches!(
            self,
            SolveStatus::Optimal
                | SolveStatus::Suboptimal
                | SolveStatus::Presolved
                | SolveStatus::FeasFound
        )
    }

    pub fn text(self) -> &'static str {
        match self {
            SolveStatus::NotSolved => "Model has not been solved yet",
            SolveStatus::UnknownError => "Unknown error",
            SolveStatus::DataIgnored => "Data ignored",
            SolveStatus::NoBfp => "No external factorization package",
            SolveStatus::NoMemory => "Out of memory",
            SolveStatus::NotRun => "Model has not been optimized",
            SolveStatus::Optimal => "OPTIMAL solution",
            SolveStatus::Suboptimal => "SUB-OPTIMAL solution",
            SolveStatus::Infeasible => "Model is primal INFEASIBLE",
            SolveStatus::Unbounded => "Model is primal UNBOUNDED",
            SolveStatus::Degenerate => "DEGENERATE situation",
            SolveStatus::NumFailure => "Numerical failure encountered",
            SolveStatus::UserAbort => "User-requested termination",
            SolveStatus::Timeout => "Termination due to timeout",
            SolveStatus::Running => "Solver is currently running",
            SolveStatus::Presolved => "Model solved by presolve",
            SolveStatus::ProcFail => "B&B routine failed",
            SolveStatus::ProcBreak => "B&B routine terminated",
            SolveStatus::FeasFound => "Feasible B&B solution found",
            SolveStatus::NoFeasFound => "No feasible B&B solution found",
            SolveStatus::Fathomed => "Fathomed/pruned branch",
        }
    }
}

/// Text for an arbitrary status code, including unknown ones.
pub fn status_text(code: i64) -> &'static str {
    SolveStatus::from_code(code)
        .map(SolveStatus::text)
        .unwrap_or("Undefined internal error")
}
