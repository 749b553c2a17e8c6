//! Python bindings for lpbind using PyO3
//!
//! The `lpsolve` module exposes one model class, `LPSolve`, whose methods take
//! plain Python values. Sparse rows are lists of `(column, value)` pairs;
//! every other lp_solve operation is reachable by name through `call` or as
//! an attribute.

mod convert;
mod errors;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use lpbind::{LogSink, LpHandle, Verbosity, consts, forward};
use pyo3::exceptions::PyAttributeError;
use pyo3::prelude::*;
use pyo3::types::PyTuple;

use crate::convert::{args_to_values, json_to_py, py_to_value, value_to_py};
use crate::errors::{TypeMismatchError, bind_error_to_py};

pub(crate) type PyObject = Py<PyAny>;

/// Python wrapper for one lp_solve model handle
#[pyclass(name = "LPSolve")]
pub struct PyLpSolve {
    inner: LpHandle,
}

impl PyLpSolve {
    fn wrap(result: Result<LpHandle, lpbind::BindError>) -> PyResult<Self> {
        result
            .map(|inner| PyLpSolve { inner })
            .map_err(bind_error_to_py)
    }

    fn call_values(
        &mut self,
        py: Python<'_>,
        name: &str,
        args: &Bound<'_, PyTuple>,
    ) -> PyResult<PyObject> {
        let values = args_to_values(args)?;
        let result = self.inner.call(name, &values).map_err(bind_error_to_py)?;
        value_to_py(py, &result)
    }
}

#[pymethods]
impl PyLpSolve {
    /// Create a model with `rows` empty constraints and `columns` columns
    #[new]
    #[pyo3(signature = (rows=0, columns=0))]
    fn new(rows: i64, columns: i64) -> PyResult<Self> {
        Self::wrap(LpHandle::make_lp(rows, columns))
    }

    #[staticmethod]
    fn make_lp(rows: i64, columns: i64) -> PyResult<Self> {
        Self::wrap(LpHandle::make_lp(rows, columns))
    }

    /// Read an LP file; `lp_name` overrides the model name.
    #[staticmethod]
    #[pyo3(name = "read_LP", signature = (filename, verbose=1, lp_name=None))]
    fn read_lp(filename: PathBuf, verbose: i64, lp_name: Option<String>) -> PyResult<Self> {
        Self::wrap(LpHandle::read_lp(&filename, verbose, lp_name.as_deref()))
    }

    /// Read a fixed or free MPS file.
    #[staticmethod]
    #[pyo3(name = "read_MPS", signature = (filename, verbose=1))]
    fn read_mps(filename: PathBuf, verbose: i64) -> PyResult<Self> {
        Self::wrap(LpHandle::read_mps(&filename, verbose))
    }

    /// lp_solve version as `(major, minor, release, build)`
    #[staticmethod]
    fn version() -> (i64, i64, i64, i64) {
        let [major, minor, release, build] = LpHandle::version();
        (major, minor, release, build)
    }

    /// Add a constraint from `(column, value)` pairs; returns the new row count.
    fn add_constraintex(
        &mut self,
        name: &Bound<'_, PyAny>,
        entries: &Bound<'_, PyAny>,
        relation: &Bound<'_, PyAny>,
        rhs: &Bound<'_, PyAny>,
    ) -> PyResult<usize> {
        self.inner
            .add_constraint(
                &py_to_value(name)?,
                &py_to_value(entries)?,
                &py_to_value(relation)?,
                &py_to_value(rhs)?,
            )
            .map_err(bind_error_to_py)
    }

    /// Replace the objective with the given `(column, value)` pairs.
    fn set_obj_fnex(&mut self, entries: &Bound<'_, PyAny>) -> PyResult<bool> {
        self.inner
            .set_objective(&py_to_value(entries)?)
            .map_err(bind_error_to_py)
    }

    /// Add a special ordered set of `(column, weight)` members.
    #[pyo3(name = "add_SOS")]
    fn add_sos(
        &mut self,
        name: &Bound<'_, PyAny>,
        sostype: &Bound<'_, PyAny>,
        priority: &Bound<'_, PyAny>,
        members: &Bound<'_, PyAny>,
    ) -> PyResult<usize> {
        self.inner
            .add_special_ordered_set(
                &py_to_value(name)?,
                &py_to_value(sostype)?,
                &py_to_value(priority)?,
                &py_to_value(members)?,
            )
            .map_err(bind_error_to_py)
    }

    /// Solve the model and return the lp_solve result code.
    fn solve(&mut self) -> PyResult<i32> {
        self.inner
            .solve()
            .map(|status| status.code())
            .map_err(bind_error_to_py)
    }

    /// Release the model. Every later call raises `InvalidHandleError`.
    fn destroy(&mut self) -> PyResult<()> {
        self.inner.destroy().map_err(bind_error_to_py)
    }

    #[getter]
    fn is_live(&self) -> bool {
        self.inner.is_live()
    }

    /// Route model messages to `callback(severity, message)`, or stop with None.
    #[pyo3(signature = (callback=None))]
    fn put_logfunc(&mut self, py: Python<'_>, callback: Option<PyObject>) -> PyResult<()> {
        let sink = match callback {
            Some(callback) => {
                if !callback.bind(py).is_callable() {
                    return Err(TypeMismatchError::new_err(
                        "[TYPE_MISMATCH] put_logfunc: callback must be callable",
                    ));
                }
                let sink: LogSink = Arc::new(move |severity: Verbosity, message: &str| {
                    Python::attach(|py| {
                        if let Err(err) = callback.call1(py, (severity.code(), message)) {
                            tracing::warn!(
                                component = "python",
                                operation = "put_logfunc",
                                status = "error",
                                error = %err,
                                "Log callback raised"
                            );
                        }
                    });
                });
                Some(sink)
            }
            None => None,
        };
        self.inner.put_logfunc(sink).map_err(bind_error_to_py)
    }

    /// Invoke a forwarded operation by name, e.g. `lp.call("set_upbo", 1, 4.0)`.
    #[pyo3(signature = (name, *args))]
    fn call(
        &mut self,
        py: Python<'_>,
        name: &str,
        args: &Bound<'_, PyTuple>,
    ) -> PyResult<PyObject> {
        self.call_values(py, name, args)
    }

    /// Model, parameters and latest results as nested dicts.
    fn snapshot(&self, py: Python<'_>) -> PyResult<PyObject> {
        let model = self.inner.model("snapshot").map_err(bind_error_to_py)?;
        let json = serde_json::to_value(model.snapshot())
            .map_err(|err| pyo3::exceptions::PyRuntimeError::new_err(err.to_string()))?;
        json_to_py(py, &json)
    }

    fn __getattr__(slf: &Bound<'_, Self>, name: &str) -> PyResult<PyOperation> {
        match forward::lookup(name) {
            Some(entry) => Ok(PyOperation {
                owner: slf.clone().unbind(),
                name: entry.name,
            }),
            None => Err(PyAttributeError::new_err(format!(
                "'LPSolve' object has no attribute '{name}'"
            ))),
        }
    }

    fn __repr__(&self) -> String {
        if !self.inner.is_live() {
            return "LPSolve(destroyed)".to_string();
        }
        match self.inner.model("__repr__") {
            Ok(model) => format!(
                "LPSolve(name='{}', rows={}, columns={})",
                model.get_lp_name(),
                model.rows(),
                model.columns()
            ),
            Err(_) => "LPSolve(destroyed)".to_string(),
        }
    }
}

/// A forwarded operation bound to its model, returned by attribute access.
#[pyclass(name = "Operation", frozen)]
pub struct PyOperation {
    owner: Py<PyLpSolve>,
    name: &'static str,
}

#[pymethods]
impl PyOperation {
    #[pyo3(signature = (*args))]
    fn __call__(&self, py: Python<'_>, args: &Bound<'_, PyTuple>) -> PyResult<PyObject> {
        let mut solver = self.owner.bind(py).try_borrow_mut()?;
        solver.call_values(py, self.name, args)
    }

    #[getter]
    fn name(&self) -> &str {
        self.name
    }

    fn __repr__(&self) -> String {
        match forward::lookup(self.name) {
            Some(entry) => format!("Operation('{}', arity={})", self.name, entry.arity()),
            None => format!("Operation('{}')", self.name),
        }
    }
}

fn export_constants(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let class = m.py().get_type::<PyLpSolve>();
    for &(name, value) in consts::CONSTANTS {
        m.add(name, value)?;
        class.setattr(name, value)?;
    }
    Ok(())
}

#[pymodule]
fn lpsolve(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyLpSolve>()?;
    m.add_class::<PyOperation>()?;

    errors::register(m)?;
    logging::register(m)?;
    export_constants(m)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use lpbind::consts::CONSTANTS;

    #[test]
    fn constant_names_are_class_attribute_safe() {
        for &(name, _) in CONSTANTS {
            assert!(
                name.starts_with(|c: char| c.is_ascii_uppercase()),
                "{name}"
            );
            assert!(
                name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
                "{name}"
            );
        }
    }
}
