//! Pure-Rust backend built on `microlp`.

use microlp::{ComparisonOp, OptimizationDirection, Problem, Variable};

use lpbind_core::Sense;

use crate::{
    Backend, BackendSolution, LinearProblem, LoweredColumn, SolverConfig, SolverError,
    SolverStatus,
};

/// Dense simplex with branch and bound for integer columns.
///
/// It honours neither time limits nor gaps and reports no duals or
/// iteration counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicrolpBackend;

impl Backend for MicrolpBackend {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(
        &self,
        problem: &LinearProblem,
        config: &SolverConfig,
    ) -> Result<BackendSolution, SolverError> {
        if config.time_limit.is_some() || config.threads.is_some() {
            tracing::debug!(
                component = "solver",
                operation = "configure",
                status = "skipped",
                backend = self.name(),
                "Backend ignores time limit and thread settings"
            );
        }

        let integral = problem.columns.iter().any(|column| column.is_int);
        if problem.columns.iter().any(is_open_integer) {
            // microlp only takes i32 integer bounds, so open integer columns
            // are decided on the relaxation first.
            let (relaxed, _) = build_problem(problem, false)?;
            match relaxed.solve() {
                Err(microlp::Error::Unbounded) => {
                    return Ok(BackendSolution::without_solution(SolverStatus::Unbounded));
                }
                Err(microlp::Error::Infeasible) => {
                    return Ok(BackendSolution::without_solution(SolverStatus::Infeasible));
                }
                Err(microlp::Error::InternalError(msg)) => return Err(SolverError::Internal(msg)),
                Ok(_) => {}
            }
        }

        let (lp, vars) = build_problem(problem, integral)?;
        match lp.solve() {
            Ok(solution) => {
                let values: Vec<f64> = vars.iter().map(|&var| *solution.var_value(var)).collect();
                let clamped = problem
                    .columns
                    .iter()
                    .zip(&values)
                    .position(|(column, value)| {
                        is_open_integer(column) && value.abs() >= f64::from(i32::MAX)
                    });
                if let Some(index) = clamped {
                    return Err(SolverError::LoweringFailed {
                        reason: format!(
                            "integer column {} reached the backend's 32-bit bound",
                            index + 1
                        ),
                    });
                }
                Ok(BackendSolution {
                    status: SolverStatus::Optimal,
                    column_values: Some(values),
                    row_duals: None,
                    reduced_costs: None,
                    iterations: 0,
                })
            }
            Err(microlp::Error::Infeasible) => {
                Ok(BackendSolution::without_solution(SolverStatus::Infeasible))
            }
            Err(microlp::Error::Unbounded) => {
                Ok(BackendSolution::without_solution(SolverStatus::Unbounded))
            }
            Err(microlp::Error::InternalError(msg)) => Err(SolverError::Internal(msg)),
        }
    }
}

/// Builds the microlp problem; integer columns stay integral only when
/// `integral` is set.
fn build_problem(
    problem: &LinearProblem,
    integral: bool,
) -> Result<(Problem, Vec<Variable>), SolverError> {
    let direction = match problem.sense {
        Sense::Minimize => OptimizationDirection::Minimize,
        Sense::Maximize => OptimizationDirection::Maximize,
    };
    let mut lp = Problem::new(direction);
    let mut vars = Vec::with_capacity(problem.columns.len());
    for (index, column) in problem.columns.iter().enumerate() {
        let var = if integral && column.is_int {
            let lower = integer_bound(index, column.lower.ceil(), i32::MIN)?;
            let upper = integer_bound(index, column.upper.floor(), i32::MAX)?;
            lp.add_integer_var(column.objective, (lower, upper))
        } else {
            lp.add_var(column.objective, (column.lower, column.upper))
        };
        vars.push(var);
    }

    for row in &problem.rows {
        let terms = row.terms.iter().map(|&(index, value)| (vars[index], value));
        if row.lower == row.upper {
            lp.add_constraint(terms, ComparisonOp::Eq, row.upper);
            continue;
        }
        if row.lower.is_finite() {
            lp.add_constraint(terms.clone(), ComparisonOp::Ge, row.lower);
        }
        if row.upper.is_finite() {
            lp.add_constraint(terms, ComparisonOp::Le, row.upper);
        }
    }
    Ok((lp, vars))
}

fn is_open_integer(column: &LoweredColumn) -> bool {
    column.is_int && !(column.lower.is_finite() && column.upper.is_finite())
}

/// Converts a rounded integer bound; infinite bounds become `open`.
fn integer_bound(index: usize, value: f64, open: i32) -> Result<i32, SolverError> {
    if value.is_infinite() {
        return Ok(open);
    }
    if value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return Err(SolverError::LoweringFailed {
            reason: format!(
                "integer column {} has bound {value} outside the backend's 32-bit range",
                index + 1
            ),
        });
    }
    // In range and integral after rounding, so the cast is exact.
    Ok(value as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LoweredRow;

    fn problem(sense: Sense, rows: Vec<LoweredRow>) -> LinearProblem {
        let column = |objective| LoweredColumn {
            objective,
            lower: 0.0,
            upper: f64::INFINITY,
            is_int: false,
        };
        LinearProblem {
            sense,
            columns: vec![column(1.0), column(1.0)],
            model_rows: rows.len(),
            rows,
            model_columns: 2,
        }
    }

    #[test]
    fn test_ranged_row_binds_both_sides() {
        let rows = vec![LoweredRow {
            lower: 2.0,
            upper: 3.0,
            terms: vec![(0, 1.0), (1, 1.0)],
        }];
        let backend = MicrolpBackend;

        let low = backend
            .solve(&problem(Sense::Minimize, rows.clone()), &SolverConfig::new())
            .unwrap();
        let values = low.column_values.unwrap();
        assert!((values[0] + values[1] - 2.0).abs() < 1e-9);

        let high = backend
            .solve(&problem(Sense::Maximize, rows), &SolverConfig::new())
            .unwrap();
        let values = high.column_values.unwrap();
        assert!((values[0] + values[1] - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_unbounded_is_a_status() {
        let rows = vec![LoweredRow {
            lower: 0.0,
            upper: f64::INFINITY,
            terms: vec![(0, 1.0), (1, -1.0)],
        }];
        let solution = MicrolpBackend
            .solve(&problem(Sense::Maximize, rows), &SolverConfig::new())
            .unwrap();
        assert_eq!(solution.status, SolverStatus::Unbounded);
        assert!(solution.column_values.is_none());
    }

    #[test]
    fn test_free_row_is_skipped() {
        let rows = vec![LoweredRow {
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
            terms: vec![(0, 1.0)],
        }];
        let solution = MicrolpBackend
            .solve(&problem(Sense::Minimize, rows), &SolverConfig::new())
            .unwrap();
        assert_eq!(solution.status, SolverStatus::Optimal);
    }
}
