//! Storage access methods for the model.

use crate::types::{Relation, Sense};

use super::error::ModelError;
use super::{Column, Model, Row, SosGroup};

impl Model {
    /// Number of constraint rows (the objective is not counted).
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns.len()
    }

    /// Row count before presolve; presolve runs inside the backend, so this
    /// is the current count.
    pub fn orig_rows(&self) -> usize {
        self.rows.len()
    }

    /// Column count before presolve.
    pub fn orig_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of nonzeros in the constraint matrix, objective excluded.
    pub fn get_nonzeros(&self) -> usize {
        self.rows.iter().map(|row| row.coefficients.len()).sum()
    }

    /// Read one matrix element; row 0 addresses the objective.
    pub fn get_mat(&self, row: usize, column: usize) -> Result<f64, ModelError> {
        self.ensure_not_row_mode("get_mat")?;
        self.ensure_row_or_objective(row)?;
        self.ensure_column(column)?;
        Ok(self
            .row_terms(row)
            .iter()
            .find_map(|(index, value)| (*index == column).then_some(*value))
            .unwrap_or(0.0))
    }

    /// Dense row of `columns + 1` values; slot 0 is always zero.
    pub fn get_row(&self, row: usize) -> Result<Vec<f64>, ModelError> {
        self.ensure_row_or_objective(row)?;
        let mut dense = vec![0.0; self.columns.len() + 1];
        for &(column, value) in self.row_terms(row) {
            dense[column] = value;
        }
        Ok(dense)
    }

    /// Dense column of `rows + 1` values; slot 0 holds the objective
    /// coefficient.
    pub fn get_column(&self, column: usize) -> Result<Vec<f64>, ModelError> {
        self.ensure_column(column)?;
        let mut dense = vec![0.0; self.rows.len() + 1];
        for (slot, terms) in std::iter::once(&self.objective)
            .chain(self.rows.iter().map(|row| &row.coefficients))
            .enumerate()
        {
            if let Some((_, value)) = terms.iter().find(|(index, _)| *index == column) {
                dense[slot] = *value;
            }
        }
        Ok(dense)
    }

    /// Sparse (column, value) terms of a row; row 0 is the objective.
    ///
    /// Callers must have validated `row`.
    pub(crate) fn row_terms(&self, row: usize) -> &[(usize, f64)] {
        if row == 0 {
            &self.objective
        } else {
            &self.rows[row - 1].coefficients
        }
    }

    /// Objective coefficients in insertion order.
    pub fn objective_terms(&self) -> &[(usize, f64)] {
        &self.objective
    }

    /// Constant term of the objective (`get_rh(0)`).
    pub fn objective_constant(&self) -> f64 {
        self.objective_constant
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    /// Column data by 1-based ordinal.
    pub fn column(&self, column: usize) -> Result<&Column, ModelError> {
        self.ensure_column(column)?;
        Ok(&self.columns[column - 1])
    }

    /// Row data by 1-based ordinal.
    pub fn row(&self, row: usize) -> Result<&Row, ModelError> {
        self.ensure_row(row)?;
        Ok(&self.rows[row - 1])
    }

    /// Iterate columns with their 1-based ordinals.
    pub fn column_iter(&self) -> impl Iterator<Item = (usize, &Column)> {
        self.columns.iter().enumerate().map(|(i, c)| (i + 1, c))
    }

    /// Iterate rows with their 1-based ordinals.
    pub fn row_iter(&self) -> impl Iterator<Item = (usize, &Row)> {
        self.rows.iter().enumerate().map(|(i, r)| (i + 1, r))
    }

    pub fn sos_groups(&self) -> &[SosGroup] {
        &self.sos
    }

    /// Effective `[lower, upper]` activity bounds of a row.
    ///
    /// Infinite sides are reported as `±infinity` of the model.
    pub fn row_bounds(&self, row: usize) -> Result<(f64, f64), ModelError> {
        self.ensure_row(row)?;
        let data = &self.rows[row - 1];
        let infinity = self.params.infinity;
        let rhs = data.rhs;
        let (lower, upper) = match (data.relation, data.range) {
            (Relation::Free, _) => (-infinity, infinity),
            (Relation::LessEqual, None) => (-infinity, rhs),
            (Relation::LessEqual, Some(delta)) => (rhs - delta.abs(), rhs),
            (Relation::GreaterEqual, None) => (rhs, infinity),
            (Relation::GreaterEqual, Some(delta)) => (rhs, rhs + delta.abs()),
            (Relation::Equal, None) => (rhs, rhs),
            (Relation::Equal, Some(delta)) if delta >= 0.0 => (rhs, rhs + delta),
            (Relation::Equal, Some(delta)) => (rhs + delta, rhs),
        };
        Ok((lower.max(-infinity), upper.min(infinity)))
    }
}
