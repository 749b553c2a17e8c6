//! Model, row and column names.

use super::error::ModelError;
use super::{DEFAULT_EMPTY_ROW_RELATION, Model};

/// Name reported for a model without an explicit name.
pub const UNNAMED_MODEL: &str = "Unnamed";

impl Model {
    pub fn set_lp_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }

    /// Model name, `"Unnamed"` when none was set.
    pub fn get_lp_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED_MODEL)
    }

    /// Name a row. Row 0 names the objective; naming row `rows + 1`
    /// appends an empty row first.
    pub fn set_row_name(&mut self, row: usize, name: &str) -> Result<(), ModelError> {
        if row == self.rows.len() + 1 {
            let empty = self.new_row(DEFAULT_EMPTY_ROW_RELATION);
            self.rows.push(empty);
        }
        self.ensure_row_or_objective(row)?;
        if row == 0 {
            self.objective_name = Some(name.to_string());
        } else {
            self.rows[row - 1].name = Some(name.to_string());
        }
        Ok(())
    }

    /// Row name, `R<n>` when not set explicitly.
    pub fn get_row_name(&self, row: usize) -> Result<String, ModelError> {
        self.ensure_row_or_objective(row)?;
        let explicit = if row == 0 {
            self.objective_name.as_deref()
        } else {
            self.rows[row - 1].name.as_deref()
        };
        Ok(explicit.map_or_else(|| default_row_name(row), str::to_string))
    }

    /// Row name before presolve.
    pub fn get_origrow_name(&self, row: usize) -> Result<String, ModelError> {
        self.get_row_name(row)
    }

    /// Name a column; naming column `columns + 1` appends a column first.
    pub fn set_col_name(&mut self, column: usize, name: &str) -> Result<(), ModelError> {
        if column == self.columns.len() + 1 {
            let fresh = self.new_column();
            self.columns.push(fresh);
        }
        self.ensure_column(column)?;
        self.columns[column - 1].name = Some(name.to_string());
        Ok(())
    }

    /// Column name, `C<n>` when not set explicitly.
    pub fn get_col_name(&self, column: usize) -> Result<String, ModelError> {
        let data = self.column(column)?;
        Ok(data
            .name
            .as_deref()
            .map_or_else(|| default_column_name(column), str::to_string))
    }

    /// Column name before presolve.
    pub fn get_origcol_name(&self, column: usize) -> Result<String, ModelError> {
        self.get_col_name(column)
    }

    /// Look up a column by its explicit name.
    pub fn get_col_num(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.name.as_deref() == Some(name))
            .map(|index| index + 1)
    }

    /// Look up a row by its explicit name; the objective matches as row 0.
    pub fn get_row_num(&self, name: &str) -> Option<usize> {
        if self.objective_name.as_deref() == Some(name) {
            return Some(0);
        }
        self.rows
            .iter()
            .position(|row| row.name.as_deref() == Some(name))
            .map(|index| index + 1)
    }
}

pub(crate) fn default_row_name(row: usize) -> String {
    format!("R{row}")
}

pub(crate) fn default_column_name(column: usize) -> String {
    format!("C{column}")
}
