//! Model snapshots for debug dumps and JSON reports.

use serde::{Deserialize, Serialize};

use crate::params::Params;
use crate::status::SolveStatus;
use crate::types::{Relation, Sense};

use super::{Model, SolveRecord, SosGroup};

/// View of a row in a model snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowView {
    pub name: String,
    pub relation: Relation,
    pub rhs: f64,
    pub lower: f64,
    pub upper: f64,
    pub coefficients: Vec<(usize, f64)>,
}

/// View of a column in a model snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnView {
    pub name: String,
    pub lower: f64,
    pub upper: f64,
    pub is_int: bool,
    pub is_semicont: bool,
}

/// A complete snapshot of a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub name: String,
    pub sense: Sense,
    pub objective: Vec<(usize, f64)>,
    pub objective_constant: f64,
    pub rows: Vec<RowView>,
    pub columns: Vec<ColumnView>,
    pub sos: Vec<SosGroup>,
    pub params: Params,
    pub verbosity: i32,
    pub status: SolveStatus,
    pub results: Option<SolveRecord>,
}

impl Model {
    /// Capture the model, its parameters and the latest results.
    pub fn snapshot(&self) -> ModelSnapshot {
        let rows = self
            .row_iter()
            .map(|(ordinal, row)| {
                let (lower, upper) = self
                    .row_bounds(ordinal)
                    .unwrap_or((f64::NEG_INFINITY, f64::INFINITY));
                RowView {
                    name: self
                        .get_row_name(ordinal)
                        .unwrap_or_else(|_| super::metadata::default_row_name(ordinal)),
                    relation: row.relation,
                    rhs: row.rhs,
                    lower,
                    upper,
                    coefficients: row.coefficients.clone(),
                }
            })
            .collect();
        let columns = self
            .column_iter()
            .map(|(ordinal, column)| ColumnView {
                name: self
                    .get_col_name(ordinal)
                    .unwrap_or_else(|_| super::metadata::default_column_name(ordinal)),
                lower: column.lower,
                upper: column.upper,
                is_int: column.is_int,
                is_semicont: column.is_semicont,
            })
            .collect();

        ModelSnapshot {
            name: self.get_lp_name().to_string(),
            sense: self.sense,
            objective: self.objective.clone(),
            objective_constant: self.objective_constant,
            rows,
            columns,
            sos: self.sos.clone(),
            params: self.params.clone(),
            verbosity: self.diagnostics.verbosity().code(),
            status: self.status,
            results: self.record.clone(),
        }
    }
}
