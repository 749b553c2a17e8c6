//! HiGHS backend.
//!
//! This module contains unsafe code for reading solve info through the C API.
#![allow(unsafe_code)]

use std::ffi::{CStr, CString};

use highs::{HighsModelStatus, RowProblem, Sense as HighsSense, SolvedModel};
use lpbind_core::Sense;
use tracing::{debug, trace, warn};

use crate::{Backend, BackendSolution, LinearProblem, SolverConfig, SolverError, SolverStatus};

/// Primal solution status reported by HiGHS when a feasible point exists.
const SOLUTION_STATUS_FEASIBLE: highs_sys::HighsInt = 2;

/// HiGHS through the `highs` crate, with duals and iteration counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighsBackend;

enum HighsOption {
    Bool(bool),
    Int(i32),
    Float(f64),
    Str(&'static str),
}

fn configure(config: &SolverConfig) -> Vec<(&'static str, HighsOption)> {
    let mut options = Vec::new();
    if let Some(limit) = config.time_limit {
        options.push(("time_limit", HighsOption::Float(limit)));
    }
    if let Some(gap) = config.mip_gap_rel {
        options.push(("mip_rel_gap", HighsOption::Float(gap)));
    }
    if let Some(gap) = config.mip_gap_abs {
        options.push(("mip_abs_gap", HighsOption::Float(gap)));
    }
    if let Some(presolve) = config.presolve {
        let value = if presolve { "on" } else { "off" };
        options.push(("presolve", HighsOption::Str(value)));
    }
    if let Some(threads) = config.threads {
        let threads = i32::try_from(threads).unwrap_or(i32::MAX);
        options.push(("threads", HighsOption::Int(threads)));
    }
    if let Some(tolerance) = config.tolerance {
        options.push(("primal_feasibility_tolerance", HighsOption::Float(tolerance)));
        options.push(("dual_feasibility_tolerance", HighsOption::Float(tolerance)));
    }
    let console = config.log_to_console.unwrap_or(false);
    // lp_solve levels above NORMAL turn on solver output
    let chatty = config.verbosity.unwrap_or(0) > 4;
    options.push(("output_flag", HighsOption::Bool(console || chatty)));
    if console {
        options.push(("log_to_console", HighsOption::Bool(true)));
    }
    options
}

impl Backend for HighsBackend {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn solve(
        &self,
        problem: &LinearProblem,
        config: &SolverConfig,
    ) -> Result<BackendSolution, SolverError> {
        let mut rows = RowProblem::default();
        let columns: Vec<_> = problem
            .columns
            .iter()
            .map(|column| {
                if column.is_int {
                    rows.add_integer_column(column.objective, column.lower..=column.upper)
                } else {
                    rows.add_column(column.objective, column.lower..=column.upper)
                }
            })
            .collect();
        for row in &problem.rows {
            rows.add_row(
                row.lower..=row.upper,
                row.terms.iter().map(|&(index, value)| (columns[index], value)),
            );
        }

        debug!(
            num_cols = rows.num_cols(),
            num_rows = rows.num_rows(),
            component = "solver",
            operation = "solve",
            status = "success",
            backend = self.name(),
            "Solving model"
        );

        let sense = match problem.sense {
            Sense::Minimize => HighsSense::Minimise,
            Sense::Maximize => HighsSense::Maximise,
        };
        let mut model = rows.optimise(sense);
        model.make_quiet();
        for (option, value) in configure(config) {
            match value {
                HighsOption::Bool(val) => model.set_option(option, val),
                HighsOption::Int(val) => model.set_option(option, val),
                HighsOption::Float(val) => model.set_option(option, val),
                HighsOption::Str(val) => model.set_option(option, val),
            }
        }

        let solved = model.solve();
        let status = map_status(solved.status());
        trace!(
            component = "solver",
            operation = "solve",
            status = "success",
            ?status,
            "Solution status received"
        );

        let has_solution = match status {
            SolverStatus::Optimal => true,
            SolverStatus::ReachedTimeLimit | SolverStatus::ReachedIterationLimit => {
                int_info(&solved, "primal_solution_status") == Some(SOLUTION_STATUS_FEASIBLE)
            }
            _ => false,
        };
        let iterations = iteration_count(&solved);
        if !has_solution {
            return Ok(BackendSolution {
                iterations,
                ..BackendSolution::without_solution(status)
            });
        }

        let solution = solved.get_solution();
        let (row_duals, reduced_costs) = if problem.is_mip() {
            (None, None)
        } else {
            (
                Some(solution.dual_rows().to_vec()),
                Some(solution.dual_columns().to_vec()),
            )
        };
        Ok(BackendSolution {
            status,
            column_values: Some(solution.columns().to_vec()),
            row_duals,
            reduced_costs,
            iterations,
        })
    }
}

fn int_info(solved: &SolvedModel, name: &str) -> Option<highs_sys::HighsInt> {
    let c_name = CString::new(name).ok()?;
    let mut value: highs_sys::HighsInt = 0;
    let status = unsafe {
        highs_sys::Highs_getIntInfoValue(solved.as_ptr(), c_name.as_ptr(), &raw mut value)
    };
    if status == highs_sys::STATUS_OK {
        Some(value)
    } else {
        warn!(
            component = "solver",
            operation = "solve_info",
            status = "warn",
            info = name,
            status_code = status,
            "Failed to read solve info"
        );
        None
    }
}

/// Simplex iterations, or branch-and-bound nodes for a MIP.
fn iteration_count(solved: &SolvedModel) -> u64 {
    let simplex = int_info(solved, "simplex_iteration_count").unwrap_or(0);
    u64::try_from(simplex).unwrap_or(0)
}

fn map_status(status: HighsModelStatus) -> SolverStatus {
    match status {
        HighsModelStatus::Optimal => SolverStatus::Optimal,
        HighsModelStatus::Infeasible => SolverStatus::Infeasible,
        HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
            SolverStatus::Unbounded
        }
        HighsModelStatus::ReachedTimeLimit => SolverStatus::ReachedTimeLimit,
        HighsModelStatus::ReachedIterationLimit => SolverStatus::ReachedIterationLimit,
        _ => SolverStatus::Unknown,
    }
}

/// Return the HiGHS solver version string, if available.
pub fn highs_version() -> Option<String> {
    unsafe {
        let ptr = highs_sys::Highs_version();
        if ptr.is_null() {
            None
        } else {
            CStr::from_ptr(ptr).to_str().ok().map(str::to_string)
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::{LoweredColumn, LoweredRow};

    #[test]
    fn test_duals_for_lp() {
        let problem = LinearProblem {
            sense: Sense::Maximize,
            columns: vec![
                LoweredColumn {
                    objective: 1.0,
                    lower: 0.0,
                    upper: f64::INFINITY,
                    is_int: false,
                },
                LoweredColumn {
                    objective: 2.0,
                    lower: 0.0,
                    upper: f64::INFINITY,
                    is_int: false,
                },
            ],
            rows: vec![LoweredRow {
                lower: f64::NEG_INFINITY,
                upper: 4.0,
                terms: vec![(0, 1.0), (1, 1.0)],
            }],
            model_columns: 2,
            model_rows: 1,
        };
        let solution = HighsBackend.solve(&problem, &SolverConfig::new()).unwrap();
        assert_eq!(solution.status, SolverStatus::Optimal);
        let values = solution.column_values.unwrap();
        assert!((values[1] - 4.0).abs() < 1e-9);
        let duals = solution.row_duals.unwrap();
        assert!((duals[0].abs() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_thread_count_saturates_at_option_range() {
        let config = SolverConfig::new().with_threads(u32::MAX);
        let threads = configure(&config)
            .into_iter()
            .find_map(|(name, option)| match (name, option) {
                ("threads", HighsOption::Int(value)) => Some(value),
                _ => None,
            });
        assert_eq!(threads, Some(i32::MAX));
    }

    #[test]
    fn test_version_is_reported() {
        assert!(highs_version().is_some());
    }
}
