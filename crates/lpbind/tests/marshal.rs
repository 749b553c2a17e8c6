#![allow(clippy::float_cmp)]

use std::sync::{Arc, Mutex};

use lpbind::{ErrorKind, LogSink, Model, Value, Verbosity};
use lpbind::{add_constraint, add_special_ordered_set, set_objective};
use proptest::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn entries(items: &[(i64, f64)]) -> Value {
    Value::Array(
        items
            .iter()
            .map(|&(index, value)| Value::pair(index, value))
            .collect(),
    )
}

fn capture(model: &mut Model) -> Arc<Mutex<Vec<(Verbosity, String)>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink: LogSink = {
        let seen = Arc::clone(&seen);
        Arc::new(move |severity, message| {
            seen.lock().unwrap().push((severity, message.to_string()));
        })
    };
    model.set_log_sink(Some(sink));
    model.set_verbose(4).unwrap();
    seen
}

#[test]
fn test_add_constraint_scenario() {
    init_tracing();
    let mut model = Model::make(0, 2);
    let row = add_constraint(
        &mut model,
        &Value::Nil,
        &entries(&[(1, 2.0), (2, 3.0)]),
        &Value::Int(1),
        &Value::Float(4.0),
    )
    .unwrap();

    assert_eq!(row, 1);
    assert_eq!(model.rows(), 1);
    assert_eq!(model.get_row(1).unwrap(), vec![0.0, 2.0, 3.0]);
    assert_eq!(model.get_rh(1).unwrap(), 4.0);
    assert_eq!(model.get_row_name(1).unwrap(), "R1");
}

#[test]
fn test_named_constraint_keeps_name() {
    init_tracing();
    let mut model = Model::make(0, 2);
    add_constraint(
        &mut model,
        &Value::Str("c1".into()),
        &entries(&[(1, 1.0)]),
        &Value::Int(3),
        &Value::Int(2),
    )
    .unwrap();
    assert_eq!(model.get_row_name(1).unwrap(), "c1");
    assert_eq!(model.get_row_num("c1"), Some(1));
}

#[test]
fn test_failures_leave_rows_unchanged() {
    init_tracing();
    let mut model = Model::make(0, 3);
    let seen = capture(&mut model);

    let err = add_constraint(
        &mut model,
        &Value::Nil,
        &Value::Array(vec![]),
        &Value::Int(1),
        &Value::Float(1.0),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ShapeViolation);

    let err = add_constraint(
        &mut model,
        &Value::Nil,
        &entries(&[(99, 1.0)]),
        &Value::Int(1),
        &Value::Float(1.0),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RangeViolation);

    let err = add_constraint(
        &mut model,
        &Value::Nil,
        &entries(&[(1, 1.0)]),
        &Value::Int(9),
        &Value::Float(1.0),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RangeViolation);

    let err = add_constraint(
        &mut model,
        &Value::Nil,
        &entries(&[(1, 1.0)]),
        &Value::Int(1),
        &Value::Str("four".into()),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);

    assert_eq!(model.rows(), 0);
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 4);
    assert!(seen.iter().all(|(severity, _)| *severity == Verbosity::Important));
    assert!(seen[0].1.contains("SHAPE_VIOLATION"));
}

#[test]
fn test_set_objective_is_idempotent() {
    init_tracing();
    let mut model = Model::make(0, 3);
    let objective = entries(&[(1, 1.5), (3, -2.0)]);
    assert!(set_objective(&mut model, &objective).unwrap());
    let first = model.get_row(0).unwrap();
    assert!(set_objective(&mut model, &objective).unwrap());
    assert_eq!(model.get_row(0).unwrap(), first);
    assert_eq!(first, vec![0.0, 1.5, 0.0, -2.0]);
}

#[test]
fn test_set_objective_rejects_malformed_pairs() {
    init_tracing();
    let mut model = Model::make(0, 2);
    let bad = Value::Array(vec![Value::Array(vec![Value::Int(1)])]);
    let err = set_objective(&mut model, &bad).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ShapeViolation);

    let bad = Value::Array(vec![Value::pair("x", 1.0)]);
    let err = set_objective(&mut model, &bad).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(model.get_row(0).unwrap(), vec![0.0, 0.0, 0.0]);
}

#[test]
fn test_special_ordered_set() {
    init_tracing();
    let mut model = Model::make(0, 3);
    let members = Value::Array(vec![Value::pair(1, 1), Value::pair(3, 2)]);
    let count = add_special_ordered_set(
        &mut model,
        &Value::Str("s1".into()),
        &Value::Int(1),
        &Value::Int(2),
        &members,
    )
    .unwrap();
    assert_eq!(count, 1);
    assert!(model.is_sos_var(1).unwrap());
    assert!(!model.is_sos_var(2).unwrap());

    let group = &model.sos_groups()[0];
    assert_eq!(group.name, "s1");
    assert_eq!(group.priority, 2);

    let err = add_special_ordered_set(
        &mut model,
        &Value::Str("s2".into()),
        &Value::Int(0),
        &Value::Int(1),
        &members,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RangeViolation);

    let float_weight = Value::Array(vec![Value::pair(1, 1.5)]);
    let err = add_special_ordered_set(
        &mut model,
        &Value::Str("s3".into()),
        &Value::Int(1),
        &Value::Int(1),
        &float_weight,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(model.sos_groups().len(), 1);
}

proptest! {
    #[test]
    fn prop_valid_entries_add_exactly_one_row(
        items in prop::collection::vec((1i64..=5, -100.0f64..100.0), 1..8),
        relation in 1i64..=3,
        rhs in -50.0f64..50.0,
    ) {
        let mut model = Model::make(0, 5);
        let before = model.rows();
        let row = add_constraint(
            &mut model,
            &Value::Nil,
            &entries(&items),
            &Value::Int(relation),
            &Value::Float(rhs),
        )
        .unwrap();
        prop_assert_eq!(row, before + 1);
        prop_assert_eq!(model.rows(), before + 1);
    }

    #[test]
    fn prop_out_of_range_index_never_adds_row(
        good in prop::collection::vec((1i64..=4, -10.0f64..10.0), 0..4),
        bad in prop_oneof![i64::MIN..=0, 5i64..=i64::MAX],
    ) {
        let mut model = Model::make(0, 4);
        let mut items = good;
        items.push((bad, 1.0));
        let err = add_constraint(
            &mut model,
            &Value::Nil,
            &entries(&items),
            &Value::Int(1),
            &Value::Float(0.0),
        )
        .unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::RangeViolation);
        prop_assert_eq!(model.rows(), 0);
    }
}
