//! Solve record, result accessors and timers.

use serde::{Deserialize, Serialize};

use crate::status::SolveStatus;

use super::Model;
use super::error::ModelError;

/// Results of one solve.
///
/// `primal` and `dual` share the lp_solve layout
/// `[objective, row 1..rows, column 1..columns]`. The column part of `dual`
/// holds reduced costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveRecord {
    pub objective: f64,
    pub primal: Vec<f64>,
    pub dual: Vec<f64>,
    pub duals_available: bool,
    pub rows: usize,
    pub columns: usize,
    pub iterations: u64,
    pub solution_count: u32,
    pub load_seconds: f64,
    pub presolve_seconds: f64,
    pub simplex_seconds: f64,
}

impl SolveRecord {
    /// Build a record from row activities and column values. Duals start
    /// zeroed and unavailable.
    pub fn new(objective: f64, row_activity: Vec<f64>, column_values: Vec<f64>) -> Self {
        let rows = row_activity.len();
        let columns = column_values.len();
        let mut primal = Vec::with_capacity(1 + rows + columns);
        primal.push(objective);
        primal.extend(row_activity);
        primal.extend(column_values);
        Self {
            objective,
            dual: vec![0.0; primal.len()],
            primal,
            duals_available: false,
            rows,
            columns,
            iterations: 0,
            solution_count: 1,
            load_seconds: 0.0,
            presolve_seconds: 0.0,
            simplex_seconds: 0.0,
        }
    }

    /// Attach row duals and reduced costs.
    pub fn with_duals(mut self, row_duals: &[f64], reduced_costs: &[f64]) -> Self {
        let mut dual = Vec::with_capacity(self.primal.len());
        dual.push(0.0);
        dual.extend(row_duals.iter().copied().chain(std::iter::repeat(0.0)).take(self.rows));
        dual.extend(
            reduced_costs
                .iter()
                .copied()
                .chain(std::iter::repeat(0.0))
                .take(self.columns),
        );
        self.dual = dual;
        self.duals_available = true;
        self
    }

    pub fn row_activity(&self) -> &[f64] {
        &self.primal[1..=self.rows]
    }

    pub fn column_values(&self) -> &[f64] {
        &self.primal[1 + self.rows..]
    }

    pub fn row_duals(&self) -> &[f64] {
        &self.dual[1..=self.rows]
    }

    pub fn reduced_costs(&self) -> &[f64] {
        &self.dual[1 + self.rows..]
    }
}

impl Model {
    /// Store the outcome of a solve. `record` is `None` when the solve
    /// produced no solution; earlier results are discarded either way.
    pub fn record_solve(&mut self, status: SolveStatus, record: Option<SolveRecord>) {
        tracing::debug!(
            component = "model",
            operation = "record_solve",
            status = "success",
            code = status.code(),
            has_solution = record.is_some(),
            "Recorded solve"
        );
        self.status = status;
        self.record = record;
    }

    pub fn status(&self) -> SolveStatus {
        self.status
    }

    pub fn solve_record(&self) -> Option<&SolveRecord> {
        self.record.as_ref()
    }

    fn results(&self) -> Result<&SolveRecord, ModelError> {
        self.record.as_ref().ok_or(ModelError::NoResults)
    }

    /// Objective value of the most recent solve.
    pub fn objective_value(&self) -> Result<f64, ModelError> {
        Ok(self.results()?.objective)
    }

    /// Column values of the most recent solve.
    pub fn variables(&self) -> Result<&[f64], ModelError> {
        Ok(self.results()?.column_values())
    }

    /// Row activities of the most recent solve.
    pub fn constraint_values(&self) -> Result<&[f64], ModelError> {
        Ok(self.results()?.row_activity())
    }

    /// Row duals of the most recent solve; zeros when unavailable.
    pub fn duals(&self) -> Result<&[f64], ModelError> {
        Ok(self.results()?.row_duals())
    }

    pub fn reduced_costs(&self) -> Result<&[f64], ModelError> {
        Ok(self.results()?.reduced_costs())
    }

    pub fn duals_available(&self) -> bool {
        self.record.as_ref().is_some_and(|r| r.duals_available)
    }

    /// Primal value at position `index` of `[objective, rows, columns]`.
    pub fn var_primal_result(&self, index: usize) -> Result<f64, ModelError> {
        lookup(&self.results()?.primal, index)
    }

    /// Dual value at position `index` of `[objective, rows, columns]`.
    pub fn var_dual_result(&self, index: usize) -> Result<f64, ModelError> {
        lookup(&self.results()?.dual, index)
    }

    pub fn solution_count(&self) -> u32 {
        self.record.as_ref().map_or(0, |r| r.solution_count)
    }

    pub fn total_iter(&self) -> u64 {
        self.record.as_ref().map_or(0, |r| r.iterations)
    }

    /// Seconds spent loading the model into the backend.
    pub fn time_load(&self) -> f64 {
        self.record.as_ref().map_or(0.0, |r| r.load_seconds)
    }

    pub fn time_presolve(&self) -> f64 {
        self.record.as_ref().map_or(0.0, |r| r.presolve_seconds)
    }

    pub fn time_simplex(&self) -> f64 {
        self.record.as_ref().map_or(0.0, |r| r.simplex_seconds)
    }

    pub fn time_total(&self) -> f64 {
        self.record.as_ref().map_or(0.0, |r| {
            r.load_seconds + r.presolve_seconds + r.simplex_seconds
        })
    }

    /// Seconds since the model was created.
    pub fn time_elapsed(&self) -> f64 {
        self.created.elapsed().as_secs_f64()
    }
}

fn lookup(values: &[f64], index: usize) -> Result<f64, ModelError> {
    values
        .get(index)
        .copied()
        .ok_or(ModelError::InvalidResultIndex {
            index: index as i64,
            len: values.len(),
        })
}
