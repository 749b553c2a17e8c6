//! Logging and diagnostics functions.

use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::PyObject;

/// Enable structured logging for lpsolve.
///
/// When `level` is None, this reads `LPBIND_TRACE` if set, defaulting to
/// `off`. `LPBIND_LOG_FORMAT` and `LPBIND_LOG_FILE` are honoured as well.
/// Returns True when logging is initialized, False if a subscriber is
/// already configured.
#[pyfunction]
#[pyo3(signature = (*, level=None))]
pub fn enable_logging(level: Option<String>) -> PyResult<bool> {
    lpbind::init_logging(level.as_deref()).map_err(|err| PyRuntimeError::new_err(err.to_string()))
}

/// Return solver backend metadata for debugging and diagnostics.
#[pyfunction]
pub fn solver_info(py: Python<'_>) -> PyResult<PyObject> {
    let dict = PyDict::new(py);
    let backends = PyList::empty(py);
    for kind in lpbind_solver::available_backends() {
        backends.append(kind.as_str())?;
    }
    dict.set_item("backends", backends)?;
    dict.set_item("default", lpbind::BackendKind::default().as_str())?;
    dict.set_item("lp_solve_version", lpbind::LP_SOLVE_VERSION.to_vec())?;
    #[cfg(feature = "highs")]
    let highs_version = lpbind_solver::highs_version();
    #[cfg(not(feature = "highs"))]
    let highs_version: Option<String> = None;
    dict.set_item("highs_version", highs_version)?;
    Ok(dict.unbind().into())
}

/// Register logging functions with the Python module.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(pyo3::wrap_pyfunction!(enable_logging, m)?)?;
    m.add_function(pyo3::wrap_pyfunction!(solver_info, m)?)?;
    Ok(())
}
