//! Model handle with explicit factories and explicit destroy.

use std::path::Path;

use lpbind_core::{Diagnostics, LogSink, Model, SolveStatus, Verbosity};
use lpbind_solver::SolverConfig;

use crate::error::BindError;
use crate::forward;
use crate::marshal;
use crate::value::Value;

/// lp_solve API level this binding mirrors: major, minor, release, build.
pub const LP_SOLVE_VERSION: [i64; 4] = [5, 5, 2, 11];

enum State {
    Live(Box<Model>),
    /// The model is gone; its diagnostic channel is kept so that calls on
    /// the dead handle are still reported.
    Destroyed(Diagnostics),
}

/// Owner of one model as seen by a scripting host.
pub struct LpHandle {
    state: State,
}

impl LpHandle {
    /// Wrap an existing model.
    pub fn new(model: Model) -> Self {
        Self {
            state: State::Live(Box::new(model)),
        }
    }

    /// Create a model with `rows` empty rows and `columns` columns.
    pub fn make_lp(rows: i64, columns: i64) -> Result<Self, BindError> {
        let dimension = |what: &str, value: i64| {
            usize::try_from(value).map_err(|_| {
                BindError::range(
                    "make_lp",
                    format!("{what} should not be negative, got {value}"),
                )
            })
        };
        let rows = dimension("rows", rows)?;
        let columns = dimension("columns", columns)?;
        Ok(Self::new(Model::make(rows, columns)))
    }

    /// Load an LP file; a non-`None` name overrides the model name.
    pub fn read_lp(path: &Path, verbosity: i64, name: Option<&str>) -> Result<Self, BindError> {
        let verbosity = checked_verbosity("read_LP", verbosity)?;
        let mut model =
            Model::read_lp(path).map_err(|err| BindError::from_format("read_LP", &err))?;
        model
            .set_verbose(i64::from(verbosity.code()))
            .map_err(|err| BindError::from_model("read_LP", &err))?;
        if let Some(name) = name {
            model.set_lp_name(name);
        }
        Ok(Self::new(model))
    }

    /// Load a fixed or free MPS file.
    pub fn read_mps(path: &Path, verbosity: i64) -> Result<Self, BindError> {
        let verbosity = checked_verbosity("read_MPS", verbosity)?;
        let mut model =
            Model::read_mps(path).map_err(|err| BindError::from_format("read_MPS", &err))?;
        model
            .set_verbose(i64::from(verbosity.code()))
            .map_err(|err| BindError::from_model("read_MPS", &err))?;
        Ok(Self::new(model))
    }

    /// lp_solve version this binding mirrors.
    pub fn version() -> [i64; 4] {
        LP_SOLVE_VERSION
    }

    pub fn is_live(&self) -> bool {
        matches!(self.state, State::Live(_))
    }

    /// Borrow the live model.
    pub fn model(&self, operation: &'static str) -> Result<&Model, BindError> {
        match &self.state {
            State::Live(model) => Ok(model.as_ref()),
            State::Destroyed(diagnostics) => Err(dead_handle(diagnostics, operation)),
        }
    }

    /// Mutably borrow the live model.
    pub fn model_mut(&mut self, operation: &'static str) -> Result<&mut Model, BindError> {
        match &mut self.state {
            State::Live(model) => Ok(model.as_mut()),
            State::Destroyed(diagnostics) => Err(dead_handle(diagnostics, operation)),
        }
    }

    /// Drop the model. A second destroy is an `InvalidHandle` error.
    pub fn destroy(&mut self) -> Result<(), BindError> {
        let diagnostics = self.model("destroy")?.diagnostics().clone();
        self.state = State::Destroyed(diagnostics);
        tracing::debug!(
            component = "handle",
            operation = "destroy",
            status = "success",
            "Destroyed model handle"
        );
        Ok(())
    }

    pub fn add_constraint(
        &mut self,
        name: &Value,
        entries: &Value,
        relation: &Value,
        rhs: &Value,
    ) -> Result<usize, BindError> {
        let model = self.model_mut("add_constraintex")?;
        marshal::add_constraint(model, name, entries, relation, rhs)
    }

    pub fn set_objective(&mut self, entries: &Value) -> Result<bool, BindError> {
        let model = self.model_mut("set_obj_fnex")?;
        marshal::set_objective(model, entries)
    }

    pub fn add_special_ordered_set(
        &mut self,
        name: &Value,
        sos_type: &Value,
        priority: &Value,
        members: &Value,
    ) -> Result<usize, BindError> {
        let model = self.model_mut("add_SOS")?;
        marshal::add_special_ordered_set(model, name, sos_type, priority, members)
    }

    /// Solve with the configuration derived from the model parameters.
    pub fn solve(&mut self) -> Result<SolveStatus, BindError> {
        let model = self.model_mut("solve")?;
        lpbind_solver::solve(model)
            .map_err(|err| report(model, BindError::from_solver("solve", &err)))
    }

    /// Solve with an explicit backend configuration.
    pub fn solve_with(&mut self, config: &SolverConfig) -> Result<SolveStatus, BindError> {
        let model = self.model_mut("solve")?;
        lpbind_solver::solve_with(model, config)
            .map_err(|err| report(model, BindError::from_solver("solve", &err)))
    }

    /// Install or remove the message sink (lp_solve `put_logfunc`).
    pub fn put_logfunc(&mut self, sink: Option<LogSink>) -> Result<(), BindError> {
        self.model_mut("put_logfunc")?.set_log_sink(sink);
        Ok(())
    }

    /// Forward a named call through the operation table.
    ///
    /// The name is resolved first, then the argument count is checked, then
    /// the handle, then the arguments are converted and the model is called.
    /// Failures other than an unknown name are reported at `IMPORTANT`.
    pub fn call(&mut self, name: &str, args: &[Value]) -> Result<Value, BindError> {
        let Some(entry) = forward::lookup(name) else {
            return Err(BindError::primitive(
                "call",
                format!("unknown operation '{name}'"),
            ));
        };
        if !entry.accepts(args.len()) {
            let err = BindError::shape(
                entry.name,
                format!(
                    "wrong number of arguments ({} for {})",
                    args.len(),
                    entry.arity()
                ),
            );
            self.report_error(&err);
            return Err(err);
        }

        let model = self.model_mut(entry.name)?;
        let result = (entry.call)(entry.name, model, args);
        match result {
            Ok(value) => {
                tracing::trace!(
                    component = "handle",
                    operation = entry.name,
                    status = "success",
                    "Forwarded call"
                );
                Ok(value)
            }
            Err(err) => Err(report(model, err)),
        }
    }

    fn report_error(&self, err: &BindError) {
        let diagnostics = match &self.state {
            State::Live(model) => model.diagnostics(),
            State::Destroyed(diagnostics) => diagnostics,
        };
        diagnostics.report(Verbosity::Important, &err.to_string());
    }
}

impl From<Model> for LpHandle {
    fn from(model: Model) -> Self {
        Self::new(model)
    }
}

impl std::fmt::Debug for LpHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.state {
            State::Live(model) => f
                .debug_struct("LpHandle")
                .field("name", &model.get_lp_name())
                .field("rows", &model.rows())
                .field("columns", &model.columns())
                .finish(),
            State::Destroyed(_) => f.write_str("LpHandle(destroyed)"),
        }
    }
}

fn report(model: &Model, err: BindError) -> BindError {
    model.report(Verbosity::Important, &err.to_string());
    err
}

fn dead_handle(diagnostics: &Diagnostics, operation: &'static str) -> BindError {
    let err = BindError::invalid_handle(operation);
    diagnostics.report(Verbosity::Important, &err.to_string());
    err
}

fn checked_verbosity(operation: &'static str, level: i64) -> Result<Verbosity, BindError> {
    Verbosity::from_code(level).ok_or_else(|| {
        BindError::range(
            operation,
            format!("verbosity should be between 0 and 6, got {level}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn capture(handle: &mut LpHandle) -> Arc<Mutex<Vec<(Verbosity, String)>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink: LogSink = {
            let seen = Arc::clone(&seen);
            Arc::new(move |severity, message| {
                seen.lock().unwrap().push((severity, message.to_string()));
            })
        };
        handle.put_logfunc(Some(sink)).unwrap();
        handle.call("set_verbose", &[Value::Int(4)]).unwrap();
        seen
    }

    #[test]
    fn test_make_lp_rejects_negative_dimensions() {
        let err = LpHandle::make_lp(-1, 2).unwrap_err();
        assert_eq!(err.code(), "RANGE_VIOLATION");
        let handle = LpHandle::make_lp(0, 4).unwrap();
        assert_eq!(handle.model("test").unwrap().columns(), 4);
    }

    #[test]
    fn test_destroy_twice_is_invalid_handle() {
        let mut handle = LpHandle::make_lp(0, 1).unwrap();
        handle.destroy().unwrap();
        assert!(!handle.is_live());
        assert_eq!(handle.destroy().unwrap_err().code(), "INVALID_HANDLE");
    }

    #[test]
    fn test_dead_handle_reports_through_retained_sink() {
        let mut handle = LpHandle::make_lp(0, 2).unwrap();
        let seen = capture(&mut handle);
        handle.destroy().unwrap();

        let err = handle.call("get_Nrows", &[]).unwrap_err();
        assert_eq!(err.code(), "INVALID_HANDLE");
        assert_eq!(err.operation(), "get_Nrows");
        let err = handle.set_objective(&Value::Array(vec![])).unwrap_err();
        assert_eq!(err.code(), "INVALID_HANDLE");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|(severity, _)| *severity == Verbosity::Important));
        assert!(seen[0].1.contains("INVALID_HANDLE"));
    }

    #[test]
    fn test_call_checks_arity_before_handle() {
        let mut handle = LpHandle::make_lp(0, 2).unwrap();
        handle.destroy().unwrap();
        let err = handle.call("get_Nrows", &[Value::Int(1)]).unwrap_err();
        assert_eq!(err.code(), "SHAPE_VIOLATION");
        assert!(err.detail().contains("1 for 0"));
    }

    #[test]
    fn test_call_reports_conversion_failures_once() {
        let mut handle = LpHandle::make_lp(0, 2).unwrap();
        let seen = capture(&mut handle);
        let err = handle
            .call("set_upbo", &[Value::Str("x".into()), Value::Float(1.0)])
            .unwrap_err();
        assert_eq!(err.code(), "TYPE_MISMATCH");
        let err = handle
            .call(
                "add_constraintex",
                &[Value::Nil, Value::Array(vec![]), Value::Int(1), Value::Int(0)],
            )
            .unwrap_err();
        assert_eq!(err.code(), "SHAPE_VIOLATION");
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_operation() {
        let mut handle = LpHandle::make_lp(0, 1).unwrap();
        let err = handle.call("frobnicate", &[]).unwrap_err();
        assert!(err.detail().contains("frobnicate"));
    }

    #[test]
    fn test_version_has_four_parts() {
        assert_eq!(LpHandle::version().len(), 4);
        assert_eq!(LpHandle::version()[0], 5);
    }
}
