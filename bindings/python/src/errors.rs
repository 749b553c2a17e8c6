//! `LpBindError` exception hierarchy.
//!
//! One subclass per binding error kind. Each subclass is also reachable as a
//! class attribute of the base named by its code, so
//! `except LpBindError.RANGE_VIOLATION` works.

use lpbind::{BindError, ErrorKind};
use pyo3::exceptions::PyException;
use pyo3::prelude::*;

pyo3::create_exception!(
    lpsolve,
    LpBindError,
    PyException,
    "Base exception for all lpsolve binding errors."
);

pyo3::create_exception!(
    lpsolve,
    TypeMismatchError,
    LpBindError,
    "An argument has the wrong dynamic type."
);
pyo3::create_exception!(
    lpsolve,
    RangeViolationError,
    LpBindError,
    "An index, relation or size is outside its valid range."
);
pyo3::create_exception!(
    lpsolve,
    ShapeViolationError,
    LpBindError,
    "A list is empty, a pair is malformed or the argument count is wrong."
);
pyo3::create_exception!(
    lpsolve,
    PrimitiveFailureError,
    LpBindError,
    "The model engine rejected the operation."
);
pyo3::create_exception!(
    lpsolve,
    InvalidHandleError,
    LpBindError,
    "The model handle has been destroyed."
);

/// Convert a `BindError` into the matching `LpBindError` subclass.
pub fn bind_error_to_py(err: BindError) -> PyErr {
    let msg = err.to_string();
    match err.kind() {
        ErrorKind::TypeMismatch => TypeMismatchError::new_err(msg),
        ErrorKind::RangeViolation => RangeViolationError::new_err(msg),
        ErrorKind::ShapeViolation => ShapeViolationError::new_err(msg),
        ErrorKind::PrimitiveFailure => PrimitiveFailureError::new_err(msg),
        ErrorKind::InvalidHandle => InvalidHandleError::new_err(msg),
    }
}

/// Register the hierarchy on the module and the code attributes on the base.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();

    m.add("LpBindError", py.get_type::<LpBindError>())?;
    m.add("TypeMismatchError", py.get_type::<TypeMismatchError>())?;
    m.add("RangeViolationError", py.get_type::<RangeViolationError>())?;
    m.add("ShapeViolationError", py.get_type::<ShapeViolationError>())?;
    m.add(
        "PrimitiveFailureError",
        py.get_type::<PrimitiveFailureError>(),
    )?;
    m.add("InvalidHandleError", py.get_type::<InvalidHandleError>())?;

    let base = py.get_type::<LpBindError>();
    for kind in ErrorKind::ALL {
        let subclass = match kind {
            ErrorKind::TypeMismatch => py.get_type::<TypeMismatchError>(),
            ErrorKind::RangeViolation => py.get_type::<RangeViolationError>(),
            ErrorKind::ShapeViolation => py.get_type::<ShapeViolationError>(),
            ErrorKind::PrimitiveFailure => py.get_type::<PrimitiveFailureError>(),
            ErrorKind::InvalidHandle => py.get_type::<InvalidHandleError>(),
        };
        base.setattr(kind.code(), subclass)?;
    }

    Ok(())
}
