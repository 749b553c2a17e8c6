//! Python <-> `Value` conversion.
//!
//! Conversion never fails on an unexpected object: anything without a
//! `Value` counterpart becomes `Value::Opaque` carrying the Python type name,
//! and the marshaler reports it as a type mismatch.

use lpbind::Value;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyFloat, PyInt, PyList, PyString, PyTuple};

use crate::PyObject;

pub fn py_to_value(value: &Bound<'_, PyAny>) -> PyResult<Value> {
    if value.is_none() {
        return Ok(Value::Nil);
    }
    if value.is_instance_of::<PyBool>() {
        return Ok(Value::Bool(value.extract::<bool>()?));
    }
    if value.is_instance_of::<PyInt>() {
        return Ok(match value.extract::<i64>() {
            Ok(v) => Value::Int(v),
            Err(_) => Value::Opaque("int (out of 64-bit range)".into()),
        });
    }
    if value.is_instance_of::<PyFloat>() {
        return Ok(Value::Float(value.extract::<f64>()?));
    }
    if let Ok(s) = value.cast::<PyString>() {
        return Ok(Value::Str(s.to_str()?.to_string()));
    }
    if let Ok(list) = value.cast::<PyList>() {
        let mut items = Vec::with_capacity(list.len());
        for item in list.iter() {
            items.push(py_to_value(&item)?);
        }
        return Ok(Value::Array(items));
    }
    if let Ok(tuple) = value.cast::<PyTuple>() {
        let mut items = Vec::with_capacity(tuple.len());
        for item in tuple.iter() {
            items.push(py_to_value(&item)?);
        }
        return Ok(Value::Array(items));
    }
    let type_name = value.get_type().name()?.to_string();
    Ok(Value::Opaque(type_name))
}

pub fn args_to_values(args: &Bound<'_, PyTuple>) -> PyResult<Vec<Value>> {
    args.iter().map(|arg| py_to_value(&arg)).collect()
}

pub fn value_to_py(py: Python<'_>, value: &Value) -> PyResult<PyObject> {
    match value {
        Value::Nil => Ok(py.None()),
        Value::Bool(v) => {
            let py_bool = (*v).into_pyobject(py)?;
            Ok(py_bool.to_owned().into_any().unbind())
        }
        Value::Int(v) => Ok(v.into_pyobject(py)?.into_any().unbind()),
        Value::Float(v) => Ok(v.into_pyobject(py)?.into_any().unbind()),
        Value::Str(v) | Value::Opaque(v) => Ok(v.into_pyobject(py)?.into_any().unbind()),
        Value::Array(items) => {
            let list = PyList::empty(py);
            for item in items {
                let py_item = value_to_py(py, item)?;
                list.append(py_item.bind(py))?;
            }
            Ok(list.unbind().into_any())
        }
    }
}

/// JSON tree to nested Python dicts and lists; used for model snapshots.
pub fn json_to_py(py: Python<'_>, value: &serde_json::Value) -> PyResult<PyObject> {
    match value {
        serde_json::Value::Array(items) => {
            let list = PyList::empty(py);
            for item in items {
                list.append(json_to_py(py, item)?.bind(py))?;
            }
            Ok(list.unbind().into_any())
        }
        serde_json::Value::Object(items) => {
            let dict = PyDict::new(py);
            for (k, v) in items {
                dict.set_item(k, json_to_py(py, v)?.bind(py))?;
            }
            Ok(dict.unbind().into_any())
        }
        scalar => value_to_py(py, &Value::from(scalar.clone())),
    }
}
