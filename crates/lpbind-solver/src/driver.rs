//! Solve driver: lower, run a backend, record the outcome on the model.

use std::time::Instant;

use lpbind_core::{Model, SolveRecord, SolveStatus, Verbosity};
use tracing::{debug, info, warn};

use crate::{BackendSolution, SolverConfig, SolverError, backend_for, lower};

/// Solve `model` with the configuration derived from its own parameters.
///
/// # Errors
///
/// See [`solve_with`].
pub fn solve(model: &mut Model) -> Result<SolveStatus, SolverError> {
    let config = SolverConfig::from_model(model);
    solve_with(model, &config)
}

/// Solve `model` with an explicit configuration.
///
/// Every outcome of the optimization itself, failures included, is recorded
/// on the model and returned as a [`SolveStatus`].
///
/// # Errors
///
/// Returns [`SolverError::BackendUnavailable`] when the configured backend
/// was not compiled in. The model is left untouched in that case.
pub fn solve_with(model: &mut Model, config: &SolverConfig) -> Result<SolveStatus, SolverError> {
    let backend = backend_for(config.backend.unwrap_or_default())?;
    let started = Instant::now();
    info!(
        component = "solver",
        operation = "solve",
        status = "start",
        backend = backend.name(),
        rows = model.rows(),
        columns = model.columns(),
        "Starting solve"
    );

    let inverted = model
        .column_iter()
        .find(|(_, column)| column.lower > column.upper)
        .map(|(ordinal, column)| {
            format!(
                "Column {ordinal} has lower bound {} above upper bound {}",
                column.lower, column.upper
            )
        });
    if let Some(message) = inverted {
        model.report(Verbosity::Normal, &message);
        return Ok(finish(model, SolveStatus::Infeasible, None));
    }

    if model.columns() == 0 {
        return Ok(solve_without_columns(model, started));
    }

    let problem = match lower(model) {
        Ok(problem) => problem,
        Err(err @ SolverError::LoweringFailed { .. }) => {
            model.report(Verbosity::Important, &err.to_string());
            return Ok(finish(model, SolveStatus::ProcFail, None));
        }
        Err(err) => return Err(err),
    };
    let load_seconds = started.elapsed().as_secs_f64();

    let backend_started = Instant::now();
    let outcome = match backend.solve(&problem, config) {
        Ok(outcome) => outcome,
        Err(SolverError::Internal(msg)) => {
            warn!(
                component = "solver",
                operation = "solve",
                status = "error",
                backend = backend.name(),
                error = %msg,
                "Backend failed"
            );
            model.report(Verbosity::Important, &format!("Backend failure: {msg}"));
            return Ok(finish(model, SolveStatus::NumFailure, None));
        }
        Err(err @ SolverError::LoweringFailed { .. }) => {
            model.report(Verbosity::Important, &err.to_string());
            return Ok(finish(model, SolveStatus::ProcFail, None));
        }
        Err(err) => return Err(err),
    };
    let simplex_seconds = backend_started.elapsed().as_secs_f64();

    let status = outcome
        .status
        .to_solve_status(outcome.column_values.is_some());
    let record = outcome.column_values.as_deref().map(|values| {
        let mut record = build_record(
            model,
            &values[..problem.model_columns.min(values.len())],
            &outcome,
            problem.model_rows,
        );
        record.load_seconds = load_seconds;
        record.simplex_seconds = simplex_seconds;
        record
    });
    Ok(finish(model, status, record))
}

/// Results for the model's own rows and columns. Row activities and the
/// objective are recomputed from the model coefficients so that indicator
/// columns never leak into them.
fn build_record(
    model: &Model,
    values: &[f64],
    outcome: &BackendSolution,
    model_rows: usize,
) -> SolveRecord {
    let value_of = |column: usize| values.get(column - 1).copied().unwrap_or(0.0);
    let objective = model.objective_constant()
        + model
            .objective_terms()
            .iter()
            .map(|&(column, coefficient)| coefficient * value_of(column))
            .sum::<f64>();
    let activity = model
        .row_iter()
        .map(|(_, row)| {
            row.coefficients
                .iter()
                .map(|&(column, coefficient)| coefficient * value_of(column))
                .sum()
        })
        .collect();

    let mut record = SolveRecord::new(objective, activity, values.to_vec());
    if let (Some(row_duals), Some(reduced_costs)) = (&outcome.row_duals, &outcome.reduced_costs) {
        let rows = model_rows.min(row_duals.len());
        let columns = values.len().min(reduced_costs.len());
        record = record.with_duals(&row_duals[..rows], &reduced_costs[..columns]);
    }
    record.iterations = outcome.iterations;
    record.solution_count = 1;
    record
}

/// A model without columns is feasible exactly when every row admits zero.
fn solve_without_columns(model: &mut Model, started: Instant) -> SolveStatus {
    let infeasible = model.row_iter().find_map(|(ordinal, _)| {
        let (lower, upper) = model.row_bounds(ordinal).ok()?;
        (lower > 0.0 || upper < 0.0).then_some(ordinal)
    });
    if let Some(row) = infeasible {
        debug!(
            component = "solver",
            operation = "solve",
            status = "success",
            row,
            "Empty model has a row that excludes zero"
        );
        return finish(model, SolveStatus::Infeasible, None);
    }
    let mut record = SolveRecord::new(
        model.objective_constant(),
        vec![0.0; model.rows()],
        Vec::new(),
    );
    record.load_seconds = started.elapsed().as_secs_f64();
    finish(model, SolveStatus::Optimal, Some(record))
}

fn finish(model: &mut Model, status: SolveStatus, record: Option<SolveRecord>) -> SolveStatus {
    let iterations = record.as_ref().map_or(0, |r| r.iterations);
    info!(
        component = "solver",
        operation = "solve",
        status = "success",
        code = status.code(),
        result = status.text(),
        iterations,
        "Solve finished"
    );
    model.report(
        Verbosity::Normal,
        &format!("{} after {iterations} iter", status.text()),
    );
    model.record_solve(status, record);
    status
}
