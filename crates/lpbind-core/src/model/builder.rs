//! Model builder methods for rows, the objective, columns and SOS groups.

use crate::types::Relation;

use crate::model::error::ModelError;
use crate::model::{Model, SosGroup, check_finite, merge_sparse};

impl Model {
    /// Add a constraint row from sparse buffers and return its ordinal.
    ///
    /// Duplicate column indices are summed into their first occurrence.
    pub fn add_constraintex(
        &mut self,
        values: &[f64],
        indices: &[usize],
        relation: Relation,
        rhs: f64,
    ) -> Result<usize, ModelError> {
        let coefficients = self.sparse_terms(values, indices)?;
        let rhs = self.clamp_value(rhs)?;

        let mut row = self.new_row(relation);
        row.rhs = rhs;
        row.coefficients = coefficients;
        self.rows.push(row);

        let ordinal = self.rows.len();
        tracing::debug!(
            component = "model",
            operation = "add_constraintex",
            status = "success",
            row = ordinal,
            relation = relation.as_str(),
            nonzeros = self.rows[ordinal - 1].coefficients.len(),
            "Added constraint"
        );
        Ok(ordinal)
    }

    /// Replace the objective row with the given sparse coefficients.
    pub fn set_obj_fnex(&mut self, values: &[f64], indices: &[usize]) -> Result<(), ModelError> {
        let coefficients = self.sparse_terms(values, indices)?;
        self.objective = coefficients;
        tracing::debug!(
            component = "model",
            operation = "set_obj_fnex",
            status = "success",
            terms = self.objective.len(),
            "Set objective function"
        );
        Ok(())
    }

    /// Replace row `row` (0 for the objective) with sparse coefficients.
    pub fn set_rowex(
        &mut self,
        row: usize,
        values: &[f64],
        indices: &[usize],
    ) -> Result<(), ModelError> {
        self.ensure_row_or_objective(row)?;
        let coefficients = self.sparse_terms(values, indices)?;
        if row == 0 {
            self.objective = coefficients;
        } else {
            self.rows[row - 1].coefficients = coefficients;
        }
        Ok(())
    }

    /// Append a column from sparse buffers over rows; row 0 is the objective.
    pub fn add_columnex(&mut self, values: &[f64], rows: &[usize]) -> Result<usize, ModelError> {
        self.ensure_not_row_mode("add_columnex")?;
        if values.len() != rows.len() {
            return Err(ModelError::LengthMismatch {
                indices: rows.len(),
                values: values.len(),
            });
        }
        for (&row, &value) in rows.iter().zip(values) {
            self.ensure_row_or_objective(row)?;
            check_finite(value)?;
        }

        let column = self.new_column();
        self.columns.push(column);
        let ordinal = self.columns.len();
        for (row, value) in merge_sparse(rows, values) {
            if row == 0 {
                self.objective.push((ordinal, value));
            } else {
                self.rows[row - 1].coefficients.push((ordinal, value));
            }
        }
        Ok(ordinal)
    }

    /// Add a constraint from a dense row of whitespace-separated numbers.
    pub fn str_add_constraint(
        &mut self,
        text: &str,
        relation: Relation,
        rhs: f64,
    ) -> Result<usize, ModelError> {
        let dense = parse_dense(text, self.columns.len())?;
        let (indices, values) = dense_to_sparse(&dense, 1);
        self.add_constraintex(&values, &indices, relation, rhs)
    }

    /// Set the objective from a dense row of whitespace-separated numbers.
    pub fn str_set_obj_fn(&mut self, text: &str) -> Result<(), ModelError> {
        let dense = parse_dense(text, self.columns.len())?;
        let (indices, values) = dense_to_sparse(&dense, 1);
        self.set_obj_fnex(&values, &indices)
    }

    /// Append a column from dense text; the first value is the objective
    /// coefficient, followed by one value per row.
    pub fn str_add_column(&mut self, text: &str) -> Result<usize, ModelError> {
        let dense = parse_dense(text, self.rows.len() + 1)?;
        let (rows, values) = dense_to_sparse(&dense, 0);
        self.add_columnex(&values, &rows)
    }

    /// Add a special ordered set and return its 1-based ordinal.
    ///
    /// Member columns are stored as given. Sets of type 3 and above require
    /// every member to be an existing integer, semi-continuous column.
    pub fn add_sos(
        &mut self,
        name: &str,
        sos_type: i32,
        priority: i32,
        columns: &[i32],
        weights: &[f64],
    ) -> Result<usize, ModelError> {
        if sos_type < 1 {
            return Err(ModelError::InvalidSosType { sos_type });
        }
        if columns.len() != weights.len() {
            return Err(ModelError::LengthMismatch {
                indices: columns.len(),
                values: weights.len(),
            });
        }
        for &weight in weights {
            check_finite(weight)?;
        }
        if sos_type >= 3 {
            for &column in columns {
                let Some(data) = usize::try_from(column)
                    .ok()
                    .filter(|&c| c >= 1)
                    .and_then(|c| self.columns.get(c - 1))
                else {
                    return Err(ModelError::InvalidSosMember {
                        column,
                        reason: "column does not exist",
                    });
                };
                if !(data.is_int && data.is_semicont) {
                    return Err(ModelError::InvalidSosMember {
                        column,
                        reason: "members of SOS3 and above must be integer and semi-continuous",
                    });
                }
            }
        }

        self.sos.push(SosGroup {
            name: name.to_string(),
            sos_type,
            priority,
            members: columns.iter().copied().zip(weights.iter().copied()).collect(),
        });
        let ordinal = self.sos.len();
        tracing::debug!(
            component = "model",
            operation = "add_sos",
            status = "success",
            sos = ordinal,
            sos_type,
            members = columns.len(),
            "Added special ordered set"
        );
        Ok(ordinal)
    }

    /// Delete a constraint row; later rows shift down by one.
    pub fn del_constraint(&mut self, row: usize) -> Result<(), ModelError> {
        self.ensure_row(row)?;
        self.rows.remove(row - 1);
        Ok(())
    }

    /// Delete a column; later columns shift down by one.
    pub fn del_column(&mut self, column: usize) -> Result<(), ModelError> {
        self.ensure_not_row_mode("del_column")?;
        self.ensure_column(column)?;
        self.columns.remove(column - 1);

        let renumber = |terms: &mut Vec<(usize, f64)>| {
            terms.retain(|(index, _)| *index != column);
            for (index, _) in terms.iter_mut() {
                if *index > column {
                    *index -= 1;
                }
            }
        };
        renumber(&mut self.objective);
        for row in &mut self.rows {
            renumber(&mut row.coefficients);
        }

        let removed = column as i64;
        for group in &mut self.sos {
            group
                .members
                .retain(|(member, _)| i64::from(*member) != removed);
            for (member, _) in group.members.iter_mut() {
                if i64::from(*member) > removed {
                    *member -= 1;
                }
            }
        }
        Ok(())
    }

    /// Switch add-row mode; returns whether the mode changed.
    pub fn set_add_rowmode(&mut self, on: bool) -> bool {
        let changed = self.row_mode != on;
        self.row_mode = on;
        changed
    }

    /// Whether add-row mode is on.
    pub fn is_add_rowmode(&self) -> bool {
        self.row_mode
    }

    /// Set a single matrix element; row 0 addresses the objective.
    pub fn set_mat(&mut self, row: usize, column: usize, value: f64) -> Result<(), ModelError> {
        self.ensure_not_row_mode("set_mat")?;
        self.ensure_row_or_objective(row)?;
        self.ensure_column(column)?;
        let value = check_finite(value)?;

        let terms = if row == 0 {
            &mut self.objective
        } else {
            &mut self.rows[row - 1].coefficients
        };
        match terms.iter().position(|(index, _)| *index == column) {
            Some(at) if value == 0.0 => {
                terms.remove(at);
            }
            Some(at) => terms[at].1 = value,
            None if value == 0.0 => {}
            None => terms.push((column, value)),
        }
        Ok(())
    }

    /// Validate sparse buffers and merge them into (column, value) terms.
    fn sparse_terms(
        &self,
        values: &[f64],
        indices: &[usize],
    ) -> Result<Vec<(usize, f64)>, ModelError> {
        if values.len() != indices.len() {
            return Err(ModelError::LengthMismatch {
                indices: indices.len(),
                values: values.len(),
            });
        }
        for (&index, &value) in indices.iter().zip(values) {
            self.ensure_column(index)?;
            check_finite(value)?;
        }
        Ok(merge_sparse(indices, values))
    }
}

/// Parse at most `limit` whitespace-separated numbers.
fn parse_dense(text: &str, limit: usize) -> Result<Vec<f64>, ModelError> {
    let mut dense = Vec::new();
    for token in text.split_whitespace() {
        let value: f64 = token.parse().map_err(|_| ModelError::InvalidText {
            reason: format!("'{token}' is not a number"),
        })?;
        dense.push(check_finite(value)?);
    }
    if dense.len() > limit {
        return Err(ModelError::InvalidText {
            reason: format!("{} values given, at most {} expected", dense.len(), limit),
        });
    }
    Ok(dense)
}

/// Non-zero positions of a dense row, numbered from `first`.
fn dense_to_sparse(dense: &[f64], first: usize) -> (Vec<usize>, Vec<f64>) {
    dense
        .iter()
        .enumerate()
        .filter(|(_, value)| **value != 0.0)
        .map(|(offset, value)| (first + offset, *value))
        .unzip()
}
