//! Model module for building LP/MIP models with lp_solve conventions.
//!
//! # Module Organization
//!
//! - [`error`]: Model error types
//! - [`builder`]: Row, objective, column and SOS primitives
//! - [`storage`]: Dimension queries and dense row/column access
//! - [`bounds`]: Bounds, variable types, right-hand sides and sense
//! - [`metadata`]: Model, row and column names
//! - [`settings`]: Parameter accessors and the diagnostic channel
//! - [`results`]: Solve record, result accessors and timers
//! - [`pretty`]: Report printing to the output target
//! - [`inspect`]: Serializable snapshots

mod bounds;
mod builder;
mod error;
mod inspect;
mod metadata;
mod pretty;
mod results;
mod settings;
mod storage;

use std::collections::HashMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostics;
use crate::params::Params;
use crate::status::SolveStatus;
use crate::types::{Relation, Sense};

pub use error::ModelError;
pub use metadata::UNNAMED_MODEL;
pub(crate) use metadata::{default_column_name, default_row_name};
pub use inspect::{ColumnView, ModelSnapshot, RowView};
pub use pretty::OutputTarget;
pub use results::SolveRecord;

/// A decision variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: Option<String>,
    pub lower: f64,
    pub upper: f64,
    pub is_int: bool,
    pub is_semicont: bool,
}

impl Column {
    fn with_infinity(infinity: f64) -> Self {
        Self {
            name: None,
            lower: 0.0,
            upper: infinity,
            is_int: false,
            is_semicont: false,
        }
    }
}

/// A constraint row with its sparse coefficients in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub name: Option<String>,
    pub relation: Relation,
    pub rhs: f64,
    /// Range width set through `set_rh_range`.
    pub range: Option<f64>,
    pub coefficients: Vec<(usize, f64)>,
}

impl Row {
    fn empty(relation: Relation) -> Self {
        Self {
            name: None,
            relation,
            rhs: 0.0,
            range: None,
            coefficients: Vec::new(),
        }
    }
}

/// A special ordered set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SosGroup {
    pub name: String,
    pub sos_type: i32,
    pub priority: i32,
    /// (column, weight) pairs; columns are not range-checked when added.
    pub members: Vec<(i32, f64)>,
}

/// In-memory LP/MIP model.
///
/// Rows and columns are 1-based; row 0 is the objective function.
#[derive(Debug, Clone)]
pub struct Model {
    pub(crate) name: Option<String>,
    pub(crate) objective_name: Option<String>,
    pub(crate) sense: Sense,
    pub(crate) objective: Vec<(usize, f64)>,
    pub(crate) objective_constant: f64,
    pub(crate) columns: Vec<Column>,
    pub(crate) rows: Vec<Row>,
    pub(crate) sos: Vec<SosGroup>,
    pub(crate) params: Params,
    pub(crate) diagnostics: Diagnostics,
    pub(crate) output: OutputTarget,
    pub(crate) row_mode: bool,
    pub(crate) status: SolveStatus,
    pub(crate) record: Option<SolveRecord>,
    pub(crate) created: Instant,
}

impl Model {
    /// Create an empty model with no rows and no columns.
    pub fn new() -> Self {
        Self {
            name: None,
            objective_name: None,
            sense: Sense::Minimize,
            objective: Vec::new(),
            objective_constant: 0.0,
            columns: Vec::new(),
            rows: Vec::new(),
            sos: Vec::new(),
            params: Params::default(),
            diagnostics: Diagnostics::default(),
            output: OutputTarget::Stdout,
            row_mode: false,
            status: SolveStatus::NotSolved,
            record: None,
            created: Instant::now(),
        }
    }

    /// Create a model with `rows` empty rows and `columns` default columns.
    pub fn make(rows: usize, columns: usize) -> Self {
        let mut model = Self::new();
        let infinity = model.params.infinity;
        model
            .columns
            .resize_with(columns, || Column::with_infinity(infinity));
        model
            .rows
            .resize_with(rows, || Row::empty(DEFAULT_EMPTY_ROW_RELATION));
        tracing::debug!(
            component = "model",
            operation = "make_lp",
            status = "success",
            rows,
            columns,
            "Created model"
        );
        model
    }

    pub(crate) fn ensure_column(&self, column: usize) -> Result<(), ModelError> {
        if (1..=self.columns.len()).contains(&column) {
            Ok(())
        } else {
            Err(ModelError::InvalidColumn {
                column: column as i64,
                columns: self.columns.len(),
            })
        }
    }

    pub(crate) fn ensure_row(&self, row: usize) -> Result<(), ModelError> {
        if (1..=self.rows.len()).contains(&row) {
            Ok(())
        } else {
            Err(ModelError::InvalidRow {
                row: row as i64,
                rows: self.rows.len(),
            })
        }
    }

    /// Accepts row 0 (the objective) as well as constraint rows.
    pub(crate) fn ensure_row_or_objective(&self, row: usize) -> Result<(), ModelError> {
        if row == 0 {
            Ok(())
        } else {
            self.ensure_row(row)
        }
    }

    pub(crate) fn ensure_not_row_mode(&self, operation: &'static str) -> Result<(), ModelError> {
        if self.row_mode {
            Err(ModelError::RowModeActive { operation })
        } else {
            Ok(())
        }
    }

    pub(crate) fn new_column(&self) -> Column {
        Column::with_infinity(self.params.infinity)
    }

    pub(crate) fn new_row(&self, relation: Relation) -> Row {
        Row::empty(relation)
    }

    pub(crate) fn is_infinite(&self, value: f64) -> bool {
        value.abs() >= self.params.infinity
    }

    /// Reject NaN and clamp magnitudes at or beyond `infinity` to it.
    pub(crate) fn clamp_value(&self, value: f64) -> Result<f64, ModelError> {
        let infinity = self.params.infinity;
        if value.is_nan() {
            Err(ModelError::InvalidNumber { value })
        } else if value >= infinity {
            Ok(infinity)
        } else if value <= -infinity {
            Ok(-infinity)
        } else {
            Ok(value)
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

/// Relation given to rows created without one (by `make_lp` or by naming
/// row `rows + 1`).
pub(crate) const DEFAULT_EMPTY_ROW_RELATION: Relation = Relation::GreaterEqual;

pub(crate) fn check_finite(value: f64) -> Result<f64, ModelError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::InvalidNumber { value })
    }
}

/// Merge a sparse row: duplicate indices are summed into their first
/// occurrence and exact zeros are dropped, preserving input order.
pub(crate) fn merge_sparse(indices: &[usize], values: &[f64]) -> Vec<(usize, f64)> {
    let mut merged: Vec<(usize, f64)> = Vec::with_capacity(indices.len());
    let mut positions: HashMap<usize, usize> = HashMap::with_capacity(indices.len());
    for (&index, &value) in indices.iter().zip(values) {
        match positions.get(&index) {
            Some(&at) => merged[at].1 += value,
            None => {
                positions.insert(index, merged.len());
                merged.push((index, value));
            }
        }
    }
    merged.retain(|(_, coeff)| *coeff != 0.0);
    merged
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    mod builder;
    mod metadata;
    mod reports;
    mod support;

    #[test]
    fn test_new_model_is_empty() {
        let model = Model::new();
        assert_eq!(model.rows(), 0);
        assert_eq!(model.columns(), 0);
        assert_eq!(model.status(), SolveStatus::NotSolved);
        assert!(!model.is_maxim());
    }

    #[test]
    fn test_make_creates_dimensions() {
        let model = Model::make(3, 4);
        assert_eq!(model.rows(), 3);
        assert_eq!(model.columns(), 4);
        assert_eq!(model.get_upbo(1).unwrap(), 1e30);
        assert_eq!(model.get_lowbo(4).unwrap(), 0.0);
        assert_eq!(
            model.get_constr_type(1).unwrap(),
            DEFAULT_EMPTY_ROW_RELATION
        );
    }

    #[test]
    fn test_merge_sparse_sums_duplicates_in_order() {
        let merged = merge_sparse(&[3, 1, 3, 2], &[1.0, 2.0, 4.0, 0.0]);
        assert_eq!(merged, vec![(3, 5.0), (1, 2.0)]);
    }

    #[test]
    fn test_check_finite_rejects_nan() {
        assert!(check_finite(f64::NAN).is_err());
        assert!(check_finite(f64::INFINITY).is_err());
        assert_eq!(check_finite(2.5).unwrap(), 2.5);
    }
}
