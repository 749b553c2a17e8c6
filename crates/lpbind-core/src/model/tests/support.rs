use std::sync::{Arc, Mutex};

use crate::diagnostics::LogSink;
use crate::model::Model;
use crate::types::{Relation, Verbosity};

/// minimise 2x1 + 3x2 - 2x3 + 3x4
/// s.t. 3x1 + 2x2 + 2x3 + x4 <= 4
///      4x2 + 3x3 + x4 >= 3
pub(super) fn basic_model() -> Model {
    let mut model = Model::make(0, 4);
    model
        .set_obj_fnex(&[2.0, 3.0, -2.0, 3.0], &[1, 2, 3, 4])
        .unwrap();
    model
        .add_constraintex(&[3.0, 2.0, 2.0, 1.0], &[1, 2, 3, 4], Relation::LessEqual, 4.0)
        .unwrap();
    model
        .add_constraintex(&[4.0, 3.0, 1.0], &[2, 3, 4], Relation::GreaterEqual, 3.0)
        .unwrap();
    model
}

pub(super) type Captured = Arc<Mutex<Vec<(Verbosity, String)>>>;

pub(super) fn capture_sink() -> (LogSink, Captured) {
    let seen: Captured = Arc::new(Mutex::new(Vec::new()));
    let clone = Arc::clone(&seen);
    let sink: LogSink = Arc::new(move |level, msg| {
        clone.lock().unwrap().push((level, msg.to_string()));
    });
    (sink, seen)
}
