//! Column bounds and types, right-hand sides, relations and sense.

use crate::types::{Relation, Sense};

use super::error::ModelError;
use super::{Model, check_finite};

impl Model {
    /// Set both bounds of a column.
    pub fn set_bounds(&mut self, column: usize, lower: f64, upper: f64) -> Result<(), ModelError> {
        self.ensure_column(column)?;
        if lower.is_nan() || upper.is_nan() || lower > upper {
            return Err(ModelError::InvalidBounds { lower, upper });
        }
        let lower = self.clamp_value(lower)?;
        let upper = self.clamp_value(upper)?;
        let data = &mut self.columns[column - 1];
        data.lower = lower;
        data.upper = upper;
        Ok(())
    }

    pub fn set_lowbo(&mut self, column: usize, value: f64) -> Result<(), ModelError> {
        self.ensure_column(column)?;
        self.columns[column - 1].lower = self.clamp_value(value)?;
        Ok(())
    }

    pub fn set_upbo(&mut self, column: usize, value: f64) -> Result<(), ModelError> {
        self.ensure_column(column)?;
        self.columns[column - 1].upper = self.clamp_value(value)?;
        Ok(())
    }

    pub fn get_lowbo(&self, column: usize) -> Result<f64, ModelError> {
        Ok(self.column(column)?.lower)
    }

    pub fn get_upbo(&self, column: usize) -> Result<f64, ModelError> {
        Ok(self.column(column)?.upper)
    }

    /// Make a column free: `[-infinity, infinity]`.
    pub fn set_unbounded(&mut self, column: usize) -> Result<(), ModelError> {
        self.ensure_column(column)?;
        let infinity = self.params.infinity;
        let data = &mut self.columns[column - 1];
        data.lower = -infinity;
        data.upper = infinity;
        Ok(())
    }

    pub fn is_unbounded(&self, column: usize) -> Result<bool, ModelError> {
        let data = self.column(column)?;
        Ok(self.is_infinite(data.lower) && data.lower < 0.0 && self.is_infinite(data.upper))
    }

    pub fn set_int(&mut self, column: usize, is_int: bool) -> Result<(), ModelError> {
        self.ensure_column(column)?;
        self.columns[column - 1].is_int = is_int;
        Ok(())
    }

    pub fn is_int(&self, column: usize) -> Result<bool, ModelError> {
        Ok(self.column(column)?.is_int)
    }

    /// Mark a column binary (integer in `[0, 1]`), or clear integrality.
    pub fn set_binary(&mut self, column: usize, is_binary: bool) -> Result<(), ModelError> {
        self.ensure_column(column)?;
        let data = &mut self.columns[column - 1];
        data.is_int = is_binary;
        if is_binary {
            data.lower = 0.0;
            data.upper = 1.0;
        }
        Ok(())
    }

    /// True for integer columns bounded by `[0, 1]`.
    pub fn is_binary(&self, column: usize) -> Result<bool, ModelError> {
        let data = self.column(column)?;
        Ok(data.is_int && data.lower == 0.0 && data.upper == 1.0)
    }

    pub fn set_semicont(&mut self, column: usize, is_semicont: bool) -> Result<(), ModelError> {
        self.ensure_column(column)?;
        self.columns[column - 1].is_semicont = is_semicont;
        Ok(())
    }

    pub fn is_semicont(&self, column: usize) -> Result<bool, ModelError> {
        Ok(self.column(column)?.is_semicont)
    }

    /// True when the column is a member of any special ordered set.
    pub fn is_sos_var(&self, column: usize) -> Result<bool, ModelError> {
        self.ensure_column(column)?;
        let column = column as i64;
        Ok(self.sos.iter().any(|group| {
            group
                .members
                .iter()
                .any(|(member, _)| i64::from(*member) == column)
        }))
    }

    /// Set the right-hand side of a row; row 0 sets the objective constant.
    pub fn set_rh(&mut self, row: usize, value: f64) -> Result<(), ModelError> {
        self.ensure_row_or_objective(row)?;
        if row == 0 {
            self.objective_constant = check_finite(value)?;
        } else {
            self.rows[row - 1].rhs = self.clamp_value(value)?;
        }
        Ok(())
    }

    pub fn get_rh(&self, row: usize) -> Result<f64, ModelError> {
        self.ensure_row_or_objective(row)?;
        Ok(if row == 0 {
            self.objective_constant
        } else {
            self.rows[row - 1].rhs
        })
    }

    /// Turn a row into a range constraint of width `delta`.
    ///
    /// LE rows become `[rhs - |delta|, rhs]` and GE rows `[rhs, rhs + |delta|]`.
    /// EQ rows extend towards the sign of `delta`.
    pub fn set_rh_range(&mut self, row: usize, delta: f64) -> Result<(), ModelError> {
        self.ensure_row(row)?;
        let delta = self.clamp_value(delta)?;
        let data = &mut self.rows[row - 1];
        if data.relation == Relation::Free {
            return Err(ModelError::InvalidRelation {
                code: i64::from(Relation::Free.code()),
            });
        }
        data.range = Some(delta);
        Ok(())
    }

    /// Change the relation of a row; an existing range is cleared.
    pub fn set_constr_type(&mut self, row: usize, relation: Relation) -> Result<(), ModelError> {
        self.ensure_row(row)?;
        let data = &mut self.rows[row - 1];
        data.relation = relation;
        data.range = None;
        Ok(())
    }

    pub fn get_constr_type(&self, row: usize) -> Result<Relation, ModelError> {
        Ok(self.row(row)?.relation)
    }

    pub fn set_maxim(&mut self) {
        self.sense = Sense::Maximize;
    }

    pub fn set_minim(&mut self) {
        self.sense = Sense::Minimize;
    }

    pub fn set_sense(&mut self, maximize: bool) {
        self.sense = if maximize {
            Sense::Maximize
        } else {
            Sense::Minimize
        };
    }

    pub fn is_maxim(&self) -> bool {
        self.sense == Sense::Maximize
    }

    pub fn get_infinite(&self) -> f64 {
        self.params.infinity
    }

    /// Change the value treated as infinite. Stored bounds and right-hand
    /// sides at the old infinity move to the new one.
    pub fn set_infinite(&mut self, value: f64) -> Result<(), ModelError> {
        if !(value.is_finite() && value > 0.0) {
            return Err(ModelError::InvalidParameter {
                name: "infinity",
                value: value.to_string(),
            });
        }
        let old = self.params.infinity;
        let rescale = |v: &mut f64| {
            if v.abs() >= old {
                *v = value.copysign(*v);
            }
        };
        for column in &mut self.columns {
            rescale(&mut column.lower);
            rescale(&mut column.upper);
        }
        for row in &mut self.rows {
            rescale(&mut row.rhs);
        }
        self.params.infinity = value;
        Ok(())
    }
}
