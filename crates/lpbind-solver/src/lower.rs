//! Lowering of a model into a plain linear problem.
//!
//! Backends only understand continuous and integer columns with bounds and
//! two-sided rows. Semi-continuous columns and special ordered sets are
//! expressed with binary indicator columns and linking rows appended after
//! the model's own columns and rows, so model ordinals map to the leading
//! entries of the lowered problem.

use lpbind_core::{Model, Sense};

use crate::SolverError;

/// A column of the lowered problem.
#[derive(Debug, Clone, PartialEq)]
pub struct LoweredColumn {
    pub objective: f64,
    /// Lower bound; `f64::NEG_INFINITY` when unbounded.
    pub lower: f64,
    /// Upper bound; `f64::INFINITY` when unbounded.
    pub upper: f64,
    pub is_int: bool,
}

/// A two-sided row `lower <= sum(terms) <= upper`.
#[derive(Debug, Clone, PartialEq)]
pub struct LoweredRow {
    pub lower: f64,
    pub upper: f64,
    /// (0-based column index, coefficient) pairs without duplicates.
    pub terms: Vec<(usize, f64)>,
}

impl LoweredRow {
    /// True when neither side restricts the row.
    pub fn is_free(&self) -> bool {
        self.lower == f64::NEG_INFINITY && self.upper == f64::INFINITY
    }
}

/// Backend-neutral linear problem.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearProblem {
    pub sense: Sense,
    pub columns: Vec<LoweredColumn>,
    pub rows: Vec<LoweredRow>,
    /// Number of leading columns that correspond to model columns.
    pub model_columns: usize,
    /// Number of leading rows that correspond to model rows.
    pub model_rows: usize,
}

impl LinearProblem {
    /// True when any column is integer.
    pub fn is_mip(&self) -> bool {
        self.columns.iter().any(|column| column.is_int)
    }

    fn push_binary(&mut self) -> usize {
        self.columns.push(LoweredColumn {
            objective: 0.0,
            lower: 0.0,
            upper: 1.0,
            is_int: true,
        });
        self.columns.len() - 1
    }

    fn push_row(&mut self, lower: f64, upper: f64, terms: Vec<(usize, f64)>) {
        self.rows.push(LoweredRow {
            lower,
            upper,
            terms,
        });
    }
}

/// Lower `model` into a [`LinearProblem`].
///
/// # Errors
///
/// Returns [`SolverError::LoweringFailed`] when a semi-continuous column or
/// an SOS member lacks the finite bound its indicator formulation needs, or
/// when an SOS names a column that does not exist.
pub fn lower(model: &Model) -> Result<LinearProblem, SolverError> {
    let infinity = model.get_infinite();
    let clamp = |value: f64| {
        if value >= infinity {
            f64::INFINITY
        } else if value <= -infinity {
            f64::NEG_INFINITY
        } else {
            value
        }
    };

    let mut problem = LinearProblem {
        sense: model.sense(),
        columns: model
            .column_iter()
            .map(|(_, column)| LoweredColumn {
                objective: 0.0,
                lower: clamp(column.lower),
                upper: clamp(column.upper),
                is_int: column.is_int,
            })
            .collect(),
        rows: Vec::with_capacity(model.rows()),
        model_columns: model.columns(),
        model_rows: model.rows(),
    };
    for &(column, value) in model.objective_terms() {
        problem.columns[column - 1].objective = value;
    }

    for (ordinal, row) in model.row_iter() {
        let (lower, upper) = model
            .row_bounds(ordinal)
            .map_err(|err| SolverError::Internal(err.to_string()))?;
        let terms = row
            .coefficients
            .iter()
            .map(|&(column, value)| (column - 1, value))
            .collect();
        problem.push_row(clamp(lower), clamp(upper), terms);
    }

    for (ordinal, column) in model.column_iter() {
        if column.is_semicont {
            lower_semicontinuous(&mut problem, ordinal - 1)?;
        }
    }

    for group in model.sos_groups() {
        lower_sos(&mut problem, &group.name, group.sos_type, &group.members)?;
    }

    tracing::debug!(
        component = "solver",
        operation = "lower",
        status = "success",
        columns = problem.columns.len(),
        rows = problem.rows.len(),
        indicators = problem.columns.len() - problem.model_columns,
        "Lowered model"
    );
    Ok(problem)
}

/// `x = 0` or `lower <= x <= upper`.
///
/// A non-positive lower bound already admits zero and needs no indicator.
fn lower_semicontinuous(problem: &mut LinearProblem, index: usize) -> Result<(), SolverError> {
    let LoweredColumn { lower, upper, .. } = problem.columns[index];
    if lower <= 0.0 {
        return Ok(());
    }
    if !upper.is_finite() {
        return Err(SolverError::LoweringFailed {
            reason: format!(
                "column {} is semi-continuous without a finite upper bound",
                index + 1
            ),
        });
    }
    let indicator = problem.push_binary();
    problem.columns[index].lower = 0.0;
    problem.push_row(
        f64::NEG_INFINITY,
        0.0,
        vec![(index, 1.0), (indicator, -upper)],
    );
    problem.push_row(0.0, f64::INFINITY, vec![(index, 1.0), (indicator, -lower)]);
    Ok(())
}

/// At most `count` members nonzero, and those adjacent in weight order.
fn lower_sos(
    problem: &mut LinearProblem,
    name: &str,
    count: i32,
    members: &[(i32, f64)],
) -> Result<(), SolverError> {
    let mut ordered: Vec<(usize, f64)> = Vec::with_capacity(members.len());
    for &(column, weight) in members {
        let index = usize::try_from(column)
            .ok()
            .filter(|&c| c >= 1 && c <= problem.model_columns)
            .map(|c| c - 1)
            .ok_or_else(|| SolverError::LoweringFailed {
                reason: format!("SOS '{name}' refers to column {column}, which does not exist"),
            })?;
        if !ordered.iter().any(|&(seen, _)| seen == index) {
            ordered.push((index, weight));
        }
    }
    ordered.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut indicators = Vec::with_capacity(ordered.len());
    for &(index, _) in &ordered {
        let LoweredColumn { lower, upper, .. } = problem.columns[index];
        if (upper > 0.0 && !upper.is_finite()) || (lower < 0.0 && !lower.is_finite()) {
            return Err(SolverError::LoweringFailed {
                reason: format!(
                    "SOS '{name}' member column {} needs finite bounds",
                    index + 1
                ),
            });
        }
        let indicator = problem.push_binary();
        if upper > 0.0 {
            problem.push_row(
                f64::NEG_INFINITY,
                0.0,
                vec![(index, 1.0), (indicator, -upper)],
            );
        }
        if lower < 0.0 {
            problem.push_row(0.0, f64::INFINITY, vec![(index, 1.0), (indicator, -lower)]);
        }
        indicators.push(indicator);
    }

    let count = usize::try_from(count).unwrap_or(0).max(1);
    if indicators.len() > count {
        problem.push_row(
            f64::NEG_INFINITY,
            count as f64,
            indicators.iter().map(|&y| (y, 1.0)).collect(),
        );
    }
    if count >= 2 {
        for (i, &first) in indicators.iter().enumerate() {
            for &second in indicators.iter().skip(i + count) {
                problem.push_row(f64::NEG_INFINITY, 1.0, vec![(first, 1.0), (second, 1.0)]);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use lpbind_core::Relation;

    fn two_column_model() -> Model {
        let mut model = Model::make(0, 2);
        model.set_obj_fnex(&[1.0, -2.0], &[1, 2]).unwrap();
        model
            .add_constraintex(&[1.0, 1.0], &[1, 2], Relation::LessEqual, 4.0)
            .unwrap();
        model
    }

    #[test]
    fn test_lower_plain_model() {
        let mut model = two_column_model();
        model.set_int(2, true).unwrap();
        model.set_unbounded(1).unwrap();
        let problem = lower(&model).unwrap();

        assert_eq!(problem.model_columns, 2);
        assert_eq!(problem.model_rows, 1);
        assert_eq!(problem.columns[0].objective, 1.0);
        assert_eq!(problem.columns[0].lower, f64::NEG_INFINITY);
        assert_eq!(problem.columns[1].upper, f64::INFINITY);
        assert!(problem.is_mip());
        assert_eq!(problem.rows[0].lower, f64::NEG_INFINITY);
        assert_eq!(problem.rows[0].upper, 4.0);
        assert_eq!(problem.rows[0].terms, vec![(0, 1.0), (1, 1.0)]);
    }

    #[test]
    fn test_free_row_is_marked() {
        let mut model = two_column_model();
        model.set_constr_type(1, Relation::Free).unwrap();
        let problem = lower(&model).unwrap();
        assert!(problem.rows[0].is_free());
    }

    #[test]
    fn test_semicontinuous_gets_indicator() {
        let mut model = two_column_model();
        model.set_bounds(1, 2.0, 5.0).unwrap();
        model.set_semicont(1, true).unwrap();
        let problem = lower(&model).unwrap();

        assert_eq!(problem.columns.len(), 3);
        assert_eq!(problem.columns[0].lower, 0.0);
        assert!(problem.columns[2].is_int);
        assert_eq!(problem.rows.len(), 3);
        assert_eq!(problem.rows[1].terms, vec![(0, 1.0), (2, -5.0)]);
        assert_eq!(problem.rows[2].terms, vec![(0, 1.0), (2, -2.0)]);
    }

    #[test]
    fn test_semicontinuous_from_zero_needs_nothing() {
        let mut model = two_column_model();
        model.set_semicont(2, true).unwrap();
        let problem = lower(&model).unwrap();
        assert_eq!(problem.columns.len(), 2);
    }

    #[test]
    fn test_semicontinuous_without_upper_fails() {
        let mut model = two_column_model();
        model.set_lowbo(1, 1.0).unwrap();
        model.set_semicont(1, true).unwrap();
        let err = lower(&model).unwrap_err();
        assert_eq!(err.code(), "LOWERING_FAILED");
    }

    #[test]
    fn test_sos2_adjacency_rows() {
        let mut model = Model::make(0, 4);
        for column in 1..=4 {
            model.set_upbo(column, 10.0).unwrap();
        }
        model
            .add_sos("s2", 2, 1, &[4, 3, 2, 1], &[4.0, 3.0, 2.0, 1.0])
            .unwrap();
        let problem = lower(&model).unwrap();

        assert_eq!(problem.columns.len(), 8);
        // four links, one cardinality row, pairs (1,3) (1,4) (2,4)
        assert_eq!(problem.rows.len(), 4 + 1 + 3);
        let cardinality = &problem.rows[4];
        assert_eq!(cardinality.upper, 2.0);
        assert_eq!(cardinality.terms.len(), 4);
        // indicators follow weight order, so column 1 owns the first one
        assert_eq!(problem.rows[0].terms, vec![(0, 1.0), (4, -10.0)]);
    }

    #[test]
    fn test_sos_member_must_exist() {
        let mut model = Model::make(0, 2);
        model.add_sos("bad", 1, 1, &[1, 7], &[1.0, 2.0]).unwrap();
        let err = lower(&model).unwrap_err();
        assert!(err.to_string().contains("column 7"));
    }

    #[test]
    fn test_sos_member_needs_finite_upper() {
        let mut model = Model::make(0, 2);
        model.add_sos("open", 1, 1, &[1, 2], &[1.0, 2.0]).unwrap();
        assert_eq!(lower(&model).unwrap_err().code(), "LOWERING_FAILED");
    }
}
