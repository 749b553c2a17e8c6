#![allow(clippy::float_cmp)]

use std::sync::{Arc, Mutex};

use lpbind::{ErrorKind, LogSink, LpHandle, SolveStatus, Value, Verbosity, consts};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

fn entries(items: &[(i64, f64)]) -> Value {
    Value::Array(
        items
            .iter()
            .map(|&(index, value)| Value::pair(index, value))
            .collect(),
    )
}

fn relation(name: &str) -> Value {
    Value::Int(consts::lookup(name).unwrap())
}

/// The lp_solve reference example driven through named calls.
fn basic_handle() -> LpHandle {
    let mut handle = LpHandle::make_lp(0, 4).unwrap();
    handle
        .call(
            "set_obj_fnex",
            &[entries(&[(1, 2.0), (2, 3.0), (3, -2.0), (4, 3.0)])],
        )
        .unwrap();
    handle
        .call(
            "add_constraint",
            &[
                Value::Nil,
                entries(&[(1, 3.0), (2, 2.0), (3, 2.0), (4, 1.0)]),
                relation("LE"),
                Value::Float(4.0),
            ],
        )
        .unwrap();
    handle
        .call(
            "add_constraintex",
            &[
                Value::Str("second".into()),
                entries(&[(2, 4.0), (3, 3.0), (4, 1.0)]),
                relation("GE"),
                Value::Int(3),
            ],
        )
        .unwrap();
    handle
}

#[test]
fn test_basic_solve_through_calls() {
    init_tracing();
    let mut handle = basic_handle();
    assert_eq!(handle.call("Nrows", &[]).unwrap(), Value::Int(2));

    let status = handle.call("solve", &[]).unwrap();
    assert_eq!(status, Value::Int(i64::from(SolveStatus::Optimal.code())));
    assert_eq!(
        handle.call("statustext", &[]).unwrap(),
        Value::Str("OPTIMAL solution".into())
    );
    assert_close(
        handle.call("objective", &[]).unwrap().as_number().unwrap(),
        -4.0,
    );
    let Value::Array(values) = handle.call("get_variables", &[]).unwrap() else {
        panic!("variables should be an array");
    };
    assert_eq!(values.len(), 4);
    assert_close(values[2].as_number().unwrap(), 2.0);
    let Value::Array(rows) = handle.call("get_constraints", &[]).unwrap() else {
        panic!("constraints should be an array");
    };
    assert_close(rows[0].as_number().unwrap(), 4.0);
    assert_close(rows[1].as_number().unwrap(), 6.0);
}

#[test]
fn test_solve_method_matches_call() {
    init_tracing();
    let mut handle = basic_handle();
    assert_eq!(handle.solve().unwrap(), SolveStatus::Optimal);
    let model = handle.model("test").unwrap();
    assert_close(model.objective_value().unwrap(), -4.0);
}

#[test]
fn test_results_before_solve_fail() {
    init_tracing();
    let mut handle = basic_handle();
    let err = handle.call("get_variables", &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PrimitiveFailure);
}

#[test]
fn test_setter_aliases() {
    init_tracing();
    let mut handle = LpHandle::make_lp(0, 2).unwrap();
    assert_eq!(
        handle.call("timeout=", &[Value::Int(30)]).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(handle.call("timeout", &[]).unwrap(), Value::Int(30));
    handle
        .call("lp_name=", &[Value::Str("demo".into())])
        .unwrap();
    assert_eq!(
        handle.call("lp_name", &[]).unwrap(),
        Value::Str("demo".into())
    );
    assert_eq!(handle.call("maxim?", &[]).unwrap(), Value::Bool(false));
    handle.call("set_maxim", &[]).unwrap();
    assert_eq!(handle.call("maxim?", &[]).unwrap(), Value::Bool(true));
}

#[test]
fn test_lp_file_round_trip() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("basic.lp");
    let mut handle = basic_handle();
    handle
        .call("write_lp", &[Value::Str(path.display().to_string())])
        .unwrap();

    let mut loaded = LpHandle::read_lp(&path, 1, Some("reloaded")).unwrap();
    assert_eq!(
        loaded.call("get_lp_name", &[]).unwrap(),
        Value::Str("reloaded".into())
    );
    assert_eq!(loaded.call("get_Nrows", &[]).unwrap(), Value::Int(2));
    assert_eq!(loaded.call("get_verbose", &[]).unwrap(), Value::Int(1));
    assert_eq!(loaded.solve().unwrap(), SolveStatus::Optimal);
    assert_close(
        loaded.call("get_objective", &[]).unwrap().as_number().unwrap(),
        -4.0,
    );
}

#[test]
fn test_mps_file_round_trip() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("basic.mps");
    let mut handle = basic_handle();
    handle
        .call("write_mps", &[Value::Str(path.display().to_string())])
        .unwrap();

    let mut loaded = LpHandle::read_mps(&path, 0).unwrap();
    assert_eq!(loaded.call("get_Ncolumns", &[]).unwrap(), Value::Int(4));
    assert_eq!(
        loaded.call("get_row", &[Value::Int(1)]).unwrap(),
        Value::from(vec![0.0, 3.0, 2.0, 2.0, 1.0])
    );
}

#[test]
fn test_read_rejects_bad_input() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.lp");
    let err = LpHandle::read_lp(&missing, 1, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PrimitiveFailure);
    assert_eq!(err.operation(), "read_LP");

    let err = LpHandle::read_mps(&missing, 7).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RangeViolation);
}

#[test]
fn test_destroyed_handle_rejects_everything() {
    init_tracing();
    let mut handle = basic_handle();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink: LogSink = {
        let seen = Arc::clone(&seen);
        Arc::new(move |severity: Verbosity, message: &str| {
            seen.lock().unwrap().push((severity, message.to_string()));
        })
    };
    handle.put_logfunc(Some(sink)).unwrap();
    handle.call("set_verbose", &[Value::Int(4)]).unwrap();
    handle.destroy().unwrap();

    for (name, args) in [
        ("solve", vec![]),
        ("get_Nrows", vec![]),
        ("set_upbo", vec![Value::Int(1), Value::Float(2.0)]),
    ] {
        let err = handle.call(name, &args).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidHandle, "{name}");
    }
    assert_eq!(handle.solve().unwrap_err().kind(), ErrorKind::InvalidHandle);
    assert_eq!(seen.lock().unwrap().len(), 4);
}
