//! Sparse row and objective marshaling.
//!
//! Host values are checked in a fixed order and decoded into a pair of owned
//! index/value buffers before any model primitive runs. The first failing
//! check decides the error. Every failure is also reported at `IMPORTANT`
//! through the model's diagnostic channel, so a host with a log sink sees it
//! even when it ignores the returned error.

use lpbind_core::{Model, Relation, Verbosity};

use crate::error::BindError;
use crate::value::Value;

const ADD_CONSTRAINT: &str = "add_constraintex";
const SET_OBJECTIVE: &str = "set_obj_fnex";
const ADD_SOS: &str = "add_SOS";

/// Decoded sparse row, columns are 1-based.
#[derive(Debug, Default)]
struct SparseBuffers {
    indices: Vec<usize>,
    values: Vec<f64>,
}

/// Add a constraint row from `[(column, coefficient), ...]` and return its
/// ordinal.
///
/// `name` is `Nil` or a string. The row is named only after it was added.
pub fn add_constraint(
    model: &mut Model,
    name: &Value,
    entries: &Value,
    relation: &Value,
    rhs: &Value,
) -> Result<usize, BindError> {
    let result = try_add_constraint(model, name, entries, relation, rhs);
    report_failure(model, result)
}

pub(crate) fn try_add_constraint(
    model: &mut Model,
    name: &Value,
    entries: &Value,
    relation: &Value,
    rhs: &Value,
) -> Result<usize, BindError> {
    let name = match name {
        Value::Nil => None,
        Value::Str(name) => Some(name.as_str()),
        other => {
            return Err(BindError::type_mismatch(
                ADD_CONSTRAINT,
                format!(
                    "constraint name, parameter 1, should be nil or a string, got {}",
                    other.type_name()
                ),
            ));
        }
    };
    let items = entries_array(ADD_CONSTRAINT, entries, 2)?;
    let Some(code) = relation.as_int() else {
        return Err(BindError::type_mismatch(
            ADD_CONSTRAINT,
            format!(
                "constraint type, parameter 3, is not an integer, got {}",
                relation.type_name()
            ),
        ));
    };
    let relation = Relation::from_code(code)
        .filter(|relation| relation.is_ordering())
        .ok_or_else(|| {
            BindError::range(
                ADD_CONSTRAINT,
                format!("constraint type, parameter 3, should be LE, EQ or GE, got {code}"),
            )
        })?;
    let buffers = decode_entries(ADD_CONSTRAINT, items, model.columns())?;
    let Some(rhs) = rhs.as_number() else {
        return Err(BindError::type_mismatch(
            ADD_CONSTRAINT,
            format!(
                "right-hand side, parameter 4, is not a number, got {}",
                rhs.type_name()
            ),
        ));
    };

    let row = model
        .add_constraintex(&buffers.values, &buffers.indices, relation, rhs)
        .map_err(|err| BindError::from_model(ADD_CONSTRAINT, &err))?;
    if let Some(name) = name {
        model
            .set_row_name(row, name)
            .map_err(|err| BindError::from_model(ADD_CONSTRAINT, &err))?;
    }
    tracing::debug!(
        component = "marshal",
        operation = ADD_CONSTRAINT,
        status = "success",
        row,
        entries = buffers.indices.len(),
        "Marshaled constraint"
    );
    Ok(row)
}

/// Replace the objective row with `[(column, coefficient), ...]`.
pub fn set_objective(model: &mut Model, entries: &Value) -> Result<bool, BindError> {
    let result = try_set_objective(model, entries);
    report_failure(model, result)
}

pub(crate) fn try_set_objective(model: &mut Model, entries: &Value) -> Result<bool, BindError> {
    let items = entries_array(SET_OBJECTIVE, entries, 1)?;
    let buffers = decode_entries(SET_OBJECTIVE, items, model.columns())?;
    model
        .set_obj_fnex(&buffers.values, &buffers.indices)
        .map_err(|err| BindError::from_model(SET_OBJECTIVE, &err))?;
    tracing::debug!(
        component = "marshal",
        operation = SET_OBJECTIVE,
        status = "success",
        entries = buffers.indices.len(),
        "Marshaled objective"
    );
    Ok(true)
}

/// Add a special ordered set from `[(column, weight), ...]` and return its
/// ordinal.
///
/// Weights must be integers, unlike row coefficients. Member columns are
/// passed through without a range check.
pub fn add_special_ordered_set(
    model: &mut Model,
    name: &Value,
    sos_type: &Value,
    priority: &Value,
    members: &Value,
) -> Result<usize, BindError> {
    let result = try_add_special_ordered_set(model, name, sos_type, priority, members);
    report_failure(model, result)
}

pub(crate) fn try_add_special_ordered_set(
    model: &mut Model,
    name: &Value,
    sos_type: &Value,
    priority: &Value,
    members: &Value,
) -> Result<usize, BindError> {
    let Some(sos_type) = sos_type.as_int() else {
        return Err(BindError::type_mismatch(
            ADD_SOS,
            format!("SOS type, parameter 2, is not an integer, got {}", sos_type.type_name()),
        ));
    };
    let Some(priority) = priority.as_int() else {
        return Err(BindError::type_mismatch(
            ADD_SOS,
            format!(
                "priority, parameter 3, is not an integer, got {}",
                priority.type_name()
            ),
        ));
    };
    let Some(name) = name.as_str() else {
        return Err(BindError::type_mismatch(
            ADD_SOS,
            format!("SOS name, parameter 1, is not a string, got {}", name.type_name()),
        ));
    };
    if sos_type < 1 {
        return Err(BindError::range(
            ADD_SOS,
            format!("SOS type, parameter 2, should be at least 1, got {sos_type}"),
        ));
    }
    let sos_type = native_int(ADD_SOS, "SOS type", sos_type)?;
    let priority = native_int(ADD_SOS, "priority", priority)?;

    let Some(items) = members.as_array() else {
        return Err(BindError::type_mismatch(
            ADD_SOS,
            format!("members, parameter 4, is not an array, got {}", members.type_name()),
        ));
    };
    if items.is_empty() {
        return Err(BindError::shape(
            ADD_SOS,
            "members array has to have at least one item",
        ));
    }

    let mut columns = Vec::with_capacity(items.len());
    let mut weights = Vec::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        let tuple = tuple_of_two(ADD_SOS, "member", position, item)?;
        let Some(column) = tuple[0].as_int() else {
            return Err(BindError::type_mismatch(
                ADD_SOS,
                format!("column of member {position} is not an integer"),
            ));
        };
        let Some(weight) = tuple[1].as_int() else {
            return Err(BindError::type_mismatch(
                ADD_SOS,
                format!("weight of member {position} is not an integer"),
            ));
        };
        columns.push(native_int(ADD_SOS, "member column", column)?);
        weights.push(weight as f64);
    }

    let ordinal = model
        .add_sos(name, sos_type, priority, &columns, &weights)
        .map_err(|err| BindError::from_model(ADD_SOS, &err))?;
    tracing::debug!(
        component = "marshal",
        operation = ADD_SOS,
        status = "success",
        sos = ordinal,
        members = columns.len(),
        "Marshaled special ordered set"
    );
    Ok(ordinal)
}

fn report_failure<T>(model: &Model, result: Result<T, BindError>) -> Result<T, BindError> {
    if let Err(err) = &result {
        model.report(Verbosity::Important, &err.to_string());
    }
    result
}

fn entries_array<'a>(
    operation: &'static str,
    entries: &'a Value,
    parameter: usize,
) -> Result<&'a [Value], BindError> {
    entries.as_array().ok_or_else(|| {
        BindError::type_mismatch(
            operation,
            format!(
                "row coefficients, parameter {parameter}, is not an array, got {}",
                entries.type_name()
            ),
        )
    })
}

fn decode_entries(
    operation: &'static str,
    items: &[Value],
    columns: usize,
) -> Result<SparseBuffers, BindError> {
    if items.is_empty() {
        return Err(BindError::shape(
            operation,
            "row coefficients array has to have at least one item",
        ));
    }

    let mut buffers = SparseBuffers {
        indices: Vec::with_capacity(items.len()),
        values: Vec::with_capacity(items.len()),
    };
    for (position, item) in items.iter().enumerate() {
        let tuple = tuple_of_two(operation, "row coefficient", position, item)?;
        let Some(index) = tuple[0].as_int() else {
            return Err(BindError::type_mismatch(
                operation,
                format!("column number of tuple {position} is not an integer"),
            ));
        };
        let Some(value) = tuple[1].as_number() else {
            return Err(BindError::type_mismatch(
                operation,
                format!("coefficient of tuple {position} is not a number"),
            ));
        };
        let index = usize::try_from(index)
            .ok()
            .filter(|column| (1..=columns).contains(column))
            .ok_or_else(|| {
                BindError::range(
                    operation,
                    format!("column number {index} of tuple {position} is outside 1..={columns}"),
                )
            })?;
        buffers.indices.push(index);
        buffers.values.push(value);
    }
    Ok(buffers)
}

fn tuple_of_two<'a>(
    operation: &'static str,
    what: &str,
    position: usize,
    item: &'a Value,
) -> Result<&'a [Value], BindError> {
    let Some(tuple) = item.as_array() else {
        return Err(BindError::type_mismatch(
            operation,
            format!("{what} element {position} is not an array"),
        ));
    };
    if tuple.len() != 2 {
        return Err(BindError::shape(
            operation,
            format!(
                "{what} element {position} has {} items, expected 2",
                tuple.len()
            ),
        ));
    }
    Ok(tuple)
}

fn native_int(operation: &'static str, what: &str, value: i64) -> Result<i32, BindError> {
    i32::try_from(value)
        .map_err(|_| BindError::range(operation, format!("{what} {value} does not fit in i32")))
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn entries(pairs: &[(i64, f64)]) -> Value {
        Value::Array(pairs.iter().map(|&(i, v)| Value::pair(i, v)).collect())
    }

    fn le() -> Value {
        Value::Int(1)
    }

    #[test]
    fn test_adds_row_in_input_order() {
        let mut model = Model::make(0, 2);
        let row = add_constraint(
            &mut model,
            &Value::Nil,
            &entries(&[(1, 2.0), (2, 3.0)]),
            &le(),
            &Value::Float(10.0),
        )
        .unwrap();
        assert_eq!(row, 1);
        assert_eq!(model.rows(), 1);
        assert_eq!(model.get_row(1).unwrap(), vec![0.0, 2.0, 3.0]);
        assert_eq!(model.get_rh(1).unwrap(), 10.0);
        assert_eq!(model.get_row_name(1).unwrap(), "R1");
    }

    #[test]
    fn test_integer_coefficients_and_rhs_are_accepted() {
        let mut model = Model::make(0, 1);
        let items = Value::Array(vec![Value::pair(1, 4)]);
        add_constraint(&mut model, &"c1".into(), &items, &Value::Int(3), &Value::Int(8)).unwrap();
        assert_eq!(model.get_mat(1, 1).unwrap(), 4.0);
        assert_eq!(model.get_row_name(1).unwrap(), "c1");
    }

    #[test]
    fn test_validation_order() {
        let mut model = Model::make(0, 2);
        // bad name wins over everything after it
        let err = add_constraint(
            &mut model,
            &Value::Int(1),
            &Value::Nil,
            &Value::Nil,
            &Value::Nil,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert!(err.detail().contains("parameter 1"));

        let err = add_constraint(&mut model, &Value::Nil, &Value::Int(0), &Value::Nil, &Value::Nil)
            .unwrap_err();
        assert!(err.detail().contains("parameter 2"));

        let err = add_constraint(
            &mut model,
            &Value::Nil,
            &Value::Array(vec![]),
            &Value::Float(1.0),
            &Value::Nil,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);

        // relation before emptiness
        let err = add_constraint(
            &mut model,
            &Value::Nil,
            &Value::Array(vec![]),
            &Value::Int(4),
            &Value::Nil,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RangeViolation);

        // elements before rhs
        let err = add_constraint(
            &mut model,
            &Value::Nil,
            &entries(&[(3, 1.0)]),
            &le(),
            &Value::Str("x".into()),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RangeViolation);

        let err = add_constraint(
            &mut model,
            &Value::Nil,
            &entries(&[(1, 1.0)]),
            &le(),
            &Value::Bool(true),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert!(err.detail().contains("parameter 4"));
        assert_eq!(model.rows(), 0);
    }

    #[test]
    fn test_element_errors() {
        let mut model = Model::make(0, 2);
        let cases = [
            (Value::Array(vec![Value::Int(1)]), ErrorKind::TypeMismatch),
            (
                Value::Array(vec![Value::Array(vec![Value::Int(1)])]),
                ErrorKind::ShapeViolation,
            ),
            (
                Value::Array(vec![Value::pair(1.0, 1.0)]),
                ErrorKind::TypeMismatch,
            ),
            (
                Value::Array(vec![Value::pair(1, "a")]),
                ErrorKind::TypeMismatch,
            ),
            (
                Value::Array(vec![Value::pair(1, true)]),
                ErrorKind::TypeMismatch,
            ),
            (entries(&[(0, 1.0)]), ErrorKind::RangeViolation),
            (entries(&[(-1, 1.0)]), ErrorKind::RangeViolation),
            (entries(&[(1, 1.0), (99, 1.0)]), ErrorKind::RangeViolation),
        ];
        for (items, kind) in cases {
            let err = add_constraint(&mut model, &Value::Nil, &items, &le(), &Value::Float(1.0))
                .unwrap_err();
            assert_eq!(err.kind(), kind, "{items:?}");
        }
        assert_eq!(model.rows(), 0);
    }

    #[test]
    fn test_non_finite_coefficient_is_primitive_failure() {
        let mut model = Model::make(0, 1);
        let err = add_constraint(
            &mut model,
            &Value::Nil,
            &entries(&[(1, f64::NAN)]),
            &le(),
            &Value::Float(1.0),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PrimitiveFailure);
        assert_eq!(model.rows(), 0);
    }

    #[test]
    fn test_set_objective_replaces_row() {
        let mut model = Model::make(0, 3);
        assert!(set_objective(&mut model, &entries(&[(1, 1.0), (3, 2.0)])).unwrap());
        assert!(set_objective(&mut model, &entries(&[(2, 5.0)])).unwrap());
        assert_eq!(model.get_row(0).unwrap(), vec![0.0, 0.0, 5.0, 0.0]);

        let err = set_objective(&mut model, &Value::Array(vec![])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShapeViolation);
        let err = set_objective(&mut model, &Value::Nil).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert!(err.detail().contains("parameter 1"));
    }

    #[test]
    fn test_sos_validation_order() {
        let mut model = Model::make(0, 2);
        let members = Value::Array(vec![Value::pair(1, 1), Value::pair(2, 2)]);

        let err = add_special_ordered_set(
            &mut model,
            &Value::Nil,
            &Value::Float(1.0),
            &Value::Nil,
            &members,
        )
        .unwrap_err();
        assert!(err.detail().contains("SOS type"));

        let err = add_special_ordered_set(
            &mut model,
            &Value::Nil,
            &Value::Int(0),
            &Value::Nil,
            &members,
        )
        .unwrap_err();
        assert!(err.detail().contains("priority"));

        let err = add_special_ordered_set(
            &mut model,
            &Value::Nil,
            &Value::Int(0),
            &Value::Int(1),
            &members,
        )
        .unwrap_err();
        assert!(err.detail().contains("SOS name"));

        let err = add_special_ordered_set(
            &mut model,
            &"s".into(),
            &Value::Int(0),
            &Value::Int(1),
            &members,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RangeViolation);

        let err = add_special_ordered_set(
            &mut model,
            &"s".into(),
            &Value::Int(1),
            &Value::Int(1),
            &Value::Array(vec![]),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShapeViolation);
        assert!(model.sos_groups().is_empty());
    }

    #[test]
    fn test_sos_weights_must_be_integers() {
        let mut model = Model::make(0, 2);
        let members = Value::Array(vec![Value::pair(1, 1.5)]);
        let err = add_special_ordered_set(
            &mut model,
            &"s".into(),
            &Value::Int(1),
            &Value::Int(1),
            &members,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert!(err.detail().contains("weight"));
    }

    #[test]
    fn test_sos_columns_are_not_range_checked() {
        let mut model = Model::make(0, 2);
        let members = Value::Array(vec![Value::pair(1, 1), Value::pair(7, 2)]);
        let ordinal = add_special_ordered_set(
            &mut model,
            &"s".into(),
            &Value::Int(2),
            &Value::Int(3),
            &members,
        )
        .unwrap();
        assert_eq!(ordinal, 1);
        assert_eq!(model.sos_groups()[0].members, vec![(1, 1.0), (7, 2.0)]);

        let overflow = Value::Array(vec![Value::pair(i64::from(i32::MAX) + 1, 1)]);
        let err = add_special_ordered_set(
            &mut model,
            &"t".into(),
            &Value::Int(1),
            &Value::Int(1),
            &overflow,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RangeViolation);
    }
}
