//! Declarative table of forwarded model operations.
//!
//! Each entry names an lp_solve operation, the number of arguments it takes
//! and a plain function that converts the arguments, calls the model and
//! converts the result back. Most entries are built from a handful of
//! generic adapters; the few with string or path arguments spell out the
//! conversion inline.

use std::fmt;
use std::path::PathBuf;
use std::sync::LazyLock;

use lpbind_core::{Model, ModelError, Relation, SolveStatus, Verbosity, status_text};

use crate::error::BindError;
use crate::marshal;
use crate::value::Value;

/// Forwarding function: operation name, live model, arguments.
pub type Adapter = fn(&'static str, &mut Model, &[Value]) -> Result<Value, BindError>;

/// One forwarded operation.
#[derive(Clone, Copy)]
pub struct Entry {
    pub name: &'static str,
    pub min_args: usize,
    pub max_args: usize,
    pub call: Adapter,
}

impl Entry {
    fn fixed(name: &'static str, arity: usize, call: Adapter) -> Self {
        Self {
            name,
            min_args: arity,
            max_args: arity,
            call,
        }
    }

    fn optional(name: &'static str, min_args: usize, max_args: usize, call: Adapter) -> Self {
        Self {
            name,
            min_args,
            max_args,
            call,
        }
    }

    pub fn accepts(&self, count: usize) -> bool {
        (self.min_args..=self.max_args).contains(&count)
    }

    /// Human-readable arity, e.g. `2` or `0..1`.
    pub fn arity(&self) -> String {
        if self.min_args == self.max_args {
            self.min_args.to_string()
        } else {
            format!("{}..{}", self.min_args, self.max_args)
        }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("name", &self.name)
            .field("min_args", &self.min_args)
            .field("max_args", &self.max_args)
            .finish_non_exhaustive()
    }
}

/// Script-friendly aliases and the table entries they resolve to.
pub static ALIASES: &[(&str, &str)] = &[
    ("add_constraint", "add_constraintex"),
    ("bb_depthlimit", "get_bb_depthlimit"),
    ("bb_depthlimit=", "set_bb_depthlimit"),
    ("bb_rule", "get_bb_rule"),
    ("bb_rule=", "set_bb_rule"),
    ("debug?", "is_debug"),
    ("debug=", "set_debug"),
    ("infinite", "get_infinite"),
    ("infinite=", "set_infinite"),
    ("lp_name", "get_lp_name"),
    ("lp_name=", "set_lp_name"),
    ("maxim?", "is_maxim"),
    ("Ncolumns", "get_Ncolumns"),
    ("nonzeros", "get_nonzeros"),
    ("Norig_columns", "get_Norig_columns"),
    ("Norig_rows", "get_Norig_rows"),
    ("Nrows", "get_Nrows"),
    ("objective", "get_objective"),
    ("presolve", "get_presolve"),
    ("presolveloops", "get_presolveloops"),
    ("print", "print_lp"),
    ("scaling", "get_scaling"),
    ("scaling=", "set_scaling"),
    ("simplextype", "get_simplextype"),
    ("simplextype=", "set_simplextype"),
    ("solutioncount", "get_solutioncount"),
    ("solutionlimit", "get_solutionlimit"),
    ("solutionlimit=", "set_solutionlimit"),
    ("sos_var?", "is_SOS_var"),
    ("status", "get_status"),
    ("statustext", "get_statustext"),
    ("timeout", "get_timeout"),
    ("timeout=", "set_timeout"),
    ("total_iter", "get_total_iter"),
    ("trace?", "is_trace"),
    ("trace=", "set_trace"),
    ("variables", "get_variables"),
    ("verbose", "get_verbose"),
    ("verbose=", "set_verbose"),
];

static TABLE: LazyLock<Vec<Entry>> = LazyLock::new(build_table);

/// Every forwarded operation.
pub fn table() -> &'static [Entry] {
    &TABLE
}

/// Resolve an alias to its table name; other names pass through.
pub fn resolve(name: &str) -> &str {
    ALIASES
        .iter()
        .find_map(|&(alias, target)| (alias == name).then_some(target))
        .unwrap_or(name)
}

/// Entry for a table name or alias.
pub fn lookup(name: &str) -> Option<&'static Entry> {
    let name = resolve(name);
    table().iter().find(|entry| entry.name == name)
}

/// Conversion from a host value to a native argument.
pub trait FromValue: Sized {
    /// `position` is the 1-based parameter number used in diagnostics.
    fn from_value(
        operation: &'static str,
        position: usize,
        value: &Value,
    ) -> Result<Self, BindError>;
}

fn expected(operation: &'static str, position: usize, what: &str, value: &Value) -> BindError {
    BindError::type_mismatch(
        operation,
        format!(
            "parameter {position} should be {what}, got {}",
            value.type_name()
        ),
    )
}

impl FromValue for i64 {
    fn from_value(
        operation: &'static str,
        position: usize,
        value: &Value,
    ) -> Result<Self, BindError> {
        value
            .as_int()
            .ok_or_else(|| expected(operation, position, "an integer", value))
    }
}

impl FromValue for i32 {
    fn from_value(
        operation: &'static str,
        position: usize,
        value: &Value,
    ) -> Result<Self, BindError> {
        let wide = i64::from_value(operation, position, value)?;
        i32::try_from(wide).map_err(|_| {
            BindError::range(
                operation,
                format!("parameter {position} value {wide} does not fit in i32"),
            )
        })
    }
}

impl FromValue for usize {
    fn from_value(
        operation: &'static str,
        position: usize,
        value: &Value,
    ) -> Result<Self, BindError> {
        let wide = i64::from_value(operation, position, value)?;
        usize::try_from(wide).map_err(|_| {
            BindError::range(
                operation,
                format!("parameter {position} should not be negative, got {wide}"),
            )
        })
    }
}

impl FromValue for f64 {
    fn from_value(
        operation: &'static str,
        position: usize,
        value: &Value,
    ) -> Result<Self, BindError> {
        value
            .as_number()
            .ok_or_else(|| expected(operation, position, "a number", value))
    }
}

impl FromValue for bool {
    fn from_value(
        operation: &'static str,
        position: usize,
        value: &Value,
    ) -> Result<Self, BindError> {
        value
            .as_bool()
            .ok_or_else(|| expected(operation, position, "a boolean", value))
    }
}

impl FromValue for String {
    fn from_value(
        operation: &'static str,
        position: usize,
        value: &Value,
    ) -> Result<Self, BindError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| expected(operation, position, "a string", value))
    }
}

impl FromValue for PathBuf {
    fn from_value(
        operation: &'static str,
        position: usize,
        value: &Value,
    ) -> Result<Self, BindError> {
        value
            .as_str()
            .map(PathBuf::from)
            .ok_or_else(|| expected(operation, position, "a file name", value))
    }
}

impl FromValue for Relation {
    fn from_value(
        operation: &'static str,
        position: usize,
        value: &Value,
    ) -> Result<Self, BindError> {
        let code = i64::from_value(operation, position, value)?;
        Relation::from_code(code).ok_or_else(|| {
            BindError::range(
                operation,
                format!("parameter {position} is not a relation code: {code}"),
            )
        })
    }
}

/// `Nil` maps to `None`.
impl<T: FromValue> FromValue for Option<T> {
    fn from_value(
        operation: &'static str,
        position: usize,
        value: &Value,
    ) -> Result<Self, BindError> {
        match value {
            Value::Nil => Ok(None),
            other => T::from_value(operation, position, other).map(Some),
        }
    }
}

/// Conversion from a native result to a host value.
pub trait IntoValue {
    fn into_value(self) -> Value;
}

macro_rules! into_value_via_from {
    ($($ty:ty),* $(,)?) => {
        $(impl IntoValue for $ty {
            fn into_value(self) -> Value {
                Value::from(self)
            }
        })*
    };
}

into_value_via_from!(bool, i32, i64, u32, u64, usize, f64, String, Vec<f64>);

/// Mutators without a result report success as `true`.
impl IntoValue for () {
    fn into_value(self) -> Value {
        Value::Bool(true)
    }
}

impl IntoValue for Verbosity {
    fn into_value(self) -> Value {
        Value::Int(i64::from(self.code()))
    }
}

impl IntoValue for Relation {
    fn into_value(self) -> Value {
        Value::Int(i64::from(self.code()))
    }
}

impl IntoValue for SolveStatus {
    fn into_value(self) -> Value {
        Value::Int(i64::from(self.code()))
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        self.map_or(Value::Nil, IntoValue::into_value)
    }
}

static NIL: Value = Value::Nil;

/// Argument `index`; a missing optional argument reads as `Nil`.
fn raw(args: &[Value], index: usize) -> &Value {
    args.get(index).unwrap_or(&NIL)
}

fn arg<T: FromValue>(
    operation: &'static str,
    args: &[Value],
    index: usize,
) -> Result<T, BindError> {
    T::from_value(operation, index + 1, raw(args, index))
}

fn primitive<R: IntoValue>(
    operation: &'static str,
    result: Result<R, ModelError>,
) -> Result<Value, BindError> {
    result
        .map(IntoValue::into_value)
        .map_err(|err| BindError::from_model(operation, &err))
}

fn getter<R: IntoValue>(model: &Model, get: fn(&Model) -> R) -> Result<Value, BindError> {
    Ok(get(model).into_value())
}

fn fallible_getter<R: IntoValue>(
    operation: &'static str,
    model: &Model,
    get: fn(&Model) -> Result<R, ModelError>,
) -> Result<Value, BindError> {
    primitive(operation, get(model))
}

fn index_getter<A: FromValue, R: IntoValue>(
    operation: &'static str,
    model: &Model,
    args: &[Value],
    get: fn(&Model, A) -> Result<R, ModelError>,
) -> Result<Value, BindError> {
    let index = arg(operation, args, 0)?;
    primitive(operation, get(model, index))
}

fn mutator<A: FromValue, R: IntoValue>(
    operation: &'static str,
    model: &mut Model,
    args: &[Value],
    set: fn(&mut Model, A) -> Result<R, ModelError>,
) -> Result<Value, BindError> {
    let first = arg(operation, args, 0)?;
    primitive(operation, set(model, first))
}

fn mutator2<A: FromValue, B: FromValue, R: IntoValue>(
    operation: &'static str,
    model: &mut Model,
    args: &[Value],
    set: fn(&mut Model, A, B) -> Result<R, ModelError>,
) -> Result<Value, BindError> {
    let first = arg(operation, args, 0)?;
    let second = arg(operation, args, 1)?;
    primitive(operation, set(model, first, second))
}

fn mutator3<A: FromValue, B: FromValue, C: FromValue, R: IntoValue>(
    operation: &'static str,
    model: &mut Model,
    args: &[Value],
    set: fn(&mut Model, A, B, C) -> Result<R, ModelError>,
) -> Result<Value, BindError> {
    let first = arg(operation, args, 0)?;
    let second = arg(operation, args, 1)?;
    let third = arg(operation, args, 2)?;
    primitive(operation, set(model, first, second, third))
}

fn results_vector(
    operation: &'static str,
    values: Result<&[f64], ModelError>,
) -> Result<Value, BindError> {
    primitive(operation, values.map(<[f64]>::to_vec))
}

fn write_file(
    operation: &'static str,
    model: &Model,
    args: &[Value],
    write: fn(&Model, Option<&std::path::Path>) -> Result<(), lpbind_core::FormatError>,
) -> Result<Value, BindError> {
    let path: Option<PathBuf> = arg(operation, args, 0)?;
    write(model, path.as_deref())
        .map(|()| Value::Bool(true))
        .map_err(|err| BindError::from_format(operation, &err))
}

#[allow(clippy::too_many_lines)]
fn build_table() -> Vec<Entry> {
    vec![
        // marshaled construction
        Entry::fixed("add_constraintex", 4, |_, m, a| {
            marshal::try_add_constraint(m, raw(a, 0), raw(a, 1), raw(a, 2), raw(a, 3))
                .map(Value::from)
        }),
        Entry::fixed("set_obj_fnex", 1, |_, m, a| {
            marshal::try_set_objective(m, raw(a, 0)).map(Value::from)
        }),
        Entry::fixed("add_SOS", 4, |_, m, a| {
            marshal::try_add_special_ordered_set(m, raw(a, 0), raw(a, 1), raw(a, 2), raw(a, 3))
                .map(Value::from)
        }),
        // dense text construction
        Entry::fixed("str_add_constraint", 3, |op, m, a| {
            let text: String = arg(op, a, 0)?;
            let relation: Relation = arg(op, a, 1)?;
            let rhs: f64 = arg(op, a, 2)?;
            primitive(op, m.str_add_constraint(&text, relation, rhs))
        }),
        Entry::fixed("str_set_obj_fn", 1, |op, m, a| {
            let text: String = arg(op, a, 0)?;
            primitive(op, m.str_set_obj_fn(&text))
        }),
        Entry::fixed("str_add_column", 1, |op, m, a| {
            let text: String = arg(op, a, 0)?;
            primitive(op, m.str_add_column(&text))
        }),
        // structure
        Entry::fixed("del_constraint", 1, |op, m, a| {
            mutator(op, m, a, Model::del_constraint)
        }),
        Entry::fixed("del_column", 1, |op, m, a| mutator(op, m, a, Model::del_column)),
        Entry::fixed("set_add_rowmode", 1, |op, m, a| {
            let on: bool = arg(op, a, 0)?;
            Ok(Value::Bool(m.set_add_rowmode(on)))
        }),
        Entry::fixed("is_add_rowmode", 0, |_, m, _| getter(m, Model::is_add_rowmode)),
        // matrix
        Entry::fixed("set_mat", 3, |op, m, a| mutator3(op, m, a, Model::set_mat)),
        Entry::fixed("get_mat", 2, |op, m, a| {
            let row: usize = arg(op, a, 0)?;
            let column: usize = arg(op, a, 1)?;
            primitive(op, m.get_mat(row, column))
        }),
        Entry::fixed("get_row", 1, |op, m, a| index_getter(op, m, a, Model::get_row)),
        Entry::fixed("get_column", 1, |op, m, a| {
            index_getter(op, m, a, Model::get_column)
        }),
        Entry::fixed("get_nonzeros", 0, |_, m, _| getter(m, Model::get_nonzeros)),
        // right-hand sides and relations
        Entry::fixed("set_rh", 2, |op, m, a| mutator2(op, m, a, Model::set_rh)),
        Entry::fixed("get_rh", 1, |op, m, a| index_getter(op, m, a, Model::get_rh)),
        Entry::fixed("set_rh_range", 2, |op, m, a| {
            mutator2(op, m, a, Model::set_rh_range)
        }),
        Entry::fixed("set_constr_type", 2, |op, m, a| {
            mutator2(op, m, a, Model::set_constr_type)
        }),
        Entry::fixed("get_constr_type", 1, |op, m, a| {
            index_getter(op, m, a, Model::get_constr_type)
        }),
        // bounds and column types
        Entry::fixed("set_bounds", 3, |op, m, a| mutator3(op, m, a, Model::set_bounds)),
        Entry::fixed("set_lowbo", 2, |op, m, a| mutator2(op, m, a, Model::set_lowbo)),
        Entry::fixed("set_upbo", 2, |op, m, a| mutator2(op, m, a, Model::set_upbo)),
        Entry::fixed("get_lowbo", 1, |op, m, a| index_getter(op, m, a, Model::get_lowbo)),
        Entry::fixed("get_upbo", 1, |op, m, a| index_getter(op, m, a, Model::get_upbo)),
        Entry::fixed("set_unbounded", 1, |op, m, a| {
            mutator(op, m, a, Model::set_unbounded)
        }),
        Entry::fixed("is_unbounded", 1, |op, m, a| {
            index_getter(op, m, a, Model::is_unbounded)
        }),
        Entry::fixed("set_int", 2, |op, m, a| mutator2(op, m, a, Model::set_int)),
        Entry::fixed("is_int", 1, |op, m, a| index_getter(op, m, a, Model::is_int)),
        Entry::fixed("set_binary", 2, |op, m, a| mutator2(op, m, a, Model::set_binary)),
        Entry::fixed("is_binary", 1, |op, m, a| index_getter(op, m, a, Model::is_binary)),
        Entry::fixed("set_semicont", 2, |op, m, a| {
            mutator2(op, m, a, Model::set_semicont)
        }),
        Entry::fixed("is_semicont", 1, |op, m, a| {
            index_getter(op, m, a, Model::is_semicont)
        }),
        Entry::fixed("is_SOS_var", 1, |op, m, a| index_getter(op, m, a, Model::is_sos_var)),
        Entry::fixed("get_infinite", 0, |_, m, _| getter(m, Model::get_infinite)),
        Entry::fixed("set_infinite", 1, |op, m, a| mutator(op, m, a, Model::set_infinite)),
        // objective sense
        Entry::fixed("set_maxim", 0, |_, m, _| {
            m.set_maxim();
            Ok(Value::Bool(true))
        }),
        Entry::fixed("set_minim", 0, |_, m, _| {
            m.set_minim();
            Ok(Value::Bool(true))
        }),
        Entry::fixed("set_sense", 1, |op, m, a| {
            let maximize: bool = arg(op, a, 0)?;
            m.set_sense(maximize);
            Ok(Value::Bool(true))
        }),
        Entry::fixed("is_maxim", 0, |_, m, _| getter(m, Model::is_maxim)),
        // names
        Entry::fixed("set_lp_name", 1, |op, m, a| {
            let name: String = arg(op, a, 0)?;
            m.set_lp_name(&name);
            Ok(Value::Bool(true))
        }),
        Entry::fixed("get_lp_name", 0, |_, m, _| Ok(Value::from(m.get_lp_name()))),
        Entry::fixed("set_row_name", 2, |op, m, a| {
            let row: usize = arg(op, a, 0)?;
            let name: String = arg(op, a, 1)?;
            primitive(op, m.set_row_name(row, &name))
        }),
        Entry::fixed("get_row_name", 1, |op, m, a| {
            index_getter(op, m, a, Model::get_row_name)
        }),
        Entry::fixed("get_origrow_name", 1, |op, m, a| {
            index_getter(op, m, a, Model::get_origrow_name)
        }),
        Entry::fixed("set_col_name", 2, |op, m, a| {
            let column: usize = arg(op, a, 0)?;
            let name: String = arg(op, a, 1)?;
            primitive(op, m.set_col_name(column, &name))
        }),
        Entry::fixed("get_col_name", 1, |op, m, a| {
            index_getter(op, m, a, Model::get_col_name)
        }),
        Entry::fixed("get_origcol_name", 1, |op, m, a| {
            index_getter(op, m, a, Model::get_origcol_name)
        }),
        Entry::fixed("get_col_num", 1, |op, m, a| {
            let name: String = arg(op, a, 0)?;
            Ok(m.get_col_num(&name).into_value())
        }),
        Entry::fixed("get_row_num", 1, |op, m, a| {
            let name: String = arg(op, a, 0)?;
            Ok(m.get_row_num(&name).into_value())
        }),
        // dimensions
        Entry::fixed("get_Nrows", 0, |_, m, _| getter(m, Model::rows)),
        Entry::fixed("get_Ncolumns", 0, |_, m, _| getter(m, Model::columns)),
        Entry::fixed("get_Norig_rows", 0, |_, m, _| getter(m, Model::orig_rows)),
        Entry::fixed("get_Norig_columns", 0, |_, m, _| getter(m, Model::orig_columns)),
        // parameters
        Entry::fixed("set_verbose", 1, |op, m, a| mutator(op, m, a, Model::set_verbose)),
        Entry::fixed("get_verbose", 0, |_, m, _| getter(m, Model::get_verbose)),
        Entry::fixed("set_timeout", 1, |op, m, a| mutator(op, m, a, Model::set_timeout)),
        Entry::fixed("get_timeout", 0, |_, m, _| getter(m, Model::get_timeout)),
        Entry::fixed("set_scaling", 1, |op, m, a| mutator(op, m, a, Model::set_scaling)),
        Entry::fixed("get_scaling", 0, |_, m, _| getter(m, Model::get_scaling)),
        Entry::fixed("set_simplextype", 1, |op, m, a| {
            mutator(op, m, a, Model::set_simplextype)
        }),
        Entry::fixed("get_simplextype", 0, |_, m, _| getter(m, Model::get_simplextype)),
        Entry::fixed("set_bb_rule", 1, |op, m, a| mutator(op, m, a, Model::set_bb_rule)),
        Entry::fixed("get_bb_rule", 0, |_, m, _| getter(m, Model::get_bb_rule)),
        Entry::fixed("set_bb_depthlimit", 1, |op, m, a| {
            let limit: i32 = arg(op, a, 0)?;
            m.set_bb_depthlimit(limit);
            Ok(Value::Bool(true))
        }),
        Entry::fixed("get_bb_depthlimit", 0, |_, m, _| {
            getter(m, Model::get_bb_depthlimit)
        }),
        Entry::fixed("set_solutionlimit", 1, |op, m, a| {
            mutator(op, m, a, Model::set_solutionlimit)
        }),
        Entry::fixed("get_solutionlimit", 0, |_, m, _| {
            getter(m, Model::get_solutionlimit)
        }),
        Entry::fixed("set_presolve", 2, |op, m, a| mutator2(op, m, a, Model::set_presolve)),
        Entry::fixed("get_presolve", 0, |_, m, _| getter(m, Model::get_presolve)),
        Entry::fixed("get_presolveloops", 0, |_, m, _| {
            getter(m, Model::get_presolveloops)
        }),
        Entry::fixed("set_mip_gap", 2, |op, m, a| mutator2(op, m, a, Model::set_mip_gap)),
        Entry::fixed("get_mip_gap", 1, |op, m, a| {
            let absolute: bool = arg(op, a, 0)?;
            Ok(Value::Float(m.get_mip_gap(absolute)))
        }),
        Entry::fixed("set_debug", 1, |op, m, a| {
            let debug: bool = arg(op, a, 0)?;
            m.set_debug(debug);
            Ok(Value::Bool(true))
        }),
        Entry::fixed("is_debug", 0, |_, m, _| getter(m, Model::is_debug)),
        Entry::fixed("set_trace", 1, |op, m, a| {
            let trace: bool = arg(op, a, 0)?;
            m.set_trace(trace);
            Ok(Value::Bool(true))
        }),
        Entry::fixed("is_trace", 0, |_, m, _| getter(m, Model::is_trace)),
        // solve and results
        Entry::fixed("solve", 0, |op, m, _| {
            lpbind_solver::solve(m)
                .map(IntoValue::into_value)
                .map_err(|err| BindError::from_solver(op, &err))
        }),
        Entry::fixed("get_status", 0, |_, m, _| getter(m, Model::status)),
        Entry::optional("get_statustext", 0, 1, |op, m, a| {
            let code: Option<i64> = arg(op, a, 0)?;
            let code = code.unwrap_or_else(|| i64::from(m.status().code()));
            Ok(Value::from(status_text(code)))
        }),
        Entry::fixed("get_objective", 0, |op, m, _| {
            fallible_getter(op, m, Model::objective_value)
        }),
        Entry::fixed("get_variables", 0, |op, m, _| results_vector(op, m.variables())),
        Entry::fixed("get_constraints", 0, |op, m, _| {
            results_vector(op, m.constraint_values())
        }),
        Entry::fixed("get_dual_solution", 0, |op, m, _| results_vector(op, m.duals())),
        Entry::fixed("get_reduced_costs", 0, |op, m, _| {
            results_vector(op, m.reduced_costs())
        }),
        Entry::fixed("get_var_primalresult", 1, |op, m, a| {
            index_getter(op, m, a, Model::var_primal_result)
        }),
        Entry::fixed("get_var_dualresult", 1, |op, m, a| {
            index_getter(op, m, a, Model::var_dual_result)
        }),
        Entry::fixed("get_solutioncount", 0, |_, m, _| getter(m, Model::solution_count)),
        Entry::fixed("get_total_iter", 0, |_, m, _| getter(m, Model::total_iter)),
        Entry::fixed("time_load", 0, |_, m, _| getter(m, Model::time_load)),
        Entry::fixed("time_presolve", 0, |_, m, _| getter(m, Model::time_presolve)),
        Entry::fixed("time_simplex", 0, |_, m, _| getter(m, Model::time_simplex)),
        Entry::fixed("time_total", 0, |_, m, _| getter(m, Model::time_total)),
        Entry::fixed("time_elapsed", 0, |_, m, _| getter(m, Model::time_elapsed)),
        // reports
        Entry::fixed("set_outputfile", 1, |op, m, a| {
            let path: Option<PathBuf> = arg(op, a, 0)?;
            primitive(op, m.set_outputfile(path.as_deref()))
        }),
        Entry::fixed("print_str", 1, |op, m, a| {
            let text: String = arg(op, a, 0)?;
            primitive(op, m.print_str(&text))
        }),
        Entry::fixed("print_lp", 0, |op, m, _| fallible_getter(op, m, Model::print_lp)),
        Entry::fixed("print_objective", 0, |op, m, _| {
            fallible_getter(op, m, Model::print_objective)
        }),
        Entry::fixed("print_solution", 1, |op, m, a| {
            index_getter(op, m, a, Model::print_solution)
        }),
        Entry::fixed("print_constraints", 1, |op, m, a| {
            index_getter(op, m, a, Model::print_constraints)
        }),
        Entry::fixed("print_duals", 0, |op, m, _| fallible_getter(op, m, Model::print_duals)),
        Entry::fixed("print_debugdump", 1, |op, m, a| {
            let path: PathBuf = arg(op, a, 0)?;
            primitive(op, m.print_debugdump(&path))
        }),
        // model files
        Entry::optional("write_lp", 0, 1, |op, m, a| write_file(op, m, a, Model::write_lp)),
        Entry::optional("write_mps", 0, 1, |op, m, a| {
            write_file(op, m, a, Model::write_mps)
        }),
    ]
}
