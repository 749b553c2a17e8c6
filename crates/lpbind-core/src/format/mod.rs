//! LP and MPS model files.
//!
//! Both formats follow lp_solve 5.5: the LP text format with `int`, `sec`,
//! `sin`, `bin`, `free` and `sosN` sections, and fixed/free MPS with integer
//! markers, ranges, the lp_solve bound types and an SOS section.

pub mod lp;
pub mod mps;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::model::{Model, ModelError, default_column_name, default_row_name, merge_sparse};
use crate::types::{DEFAULT_INFINITY, Relation};

/// Errors raised while reading or writing model files.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// File could not be opened, read or written
    Io { path: String, reason: String },
    /// Malformed input at the given 1-based line
    Parse { line: usize, reason: String },
    /// Parsed content rejected by the model
    Model(ModelError),
}

impl FormatError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            FormatError::Io { .. } => "IO_ERROR",
            FormatError::Parse { .. } => "PARSE_ERROR",
            FormatError::Model(inner) => inner.code(),
        }
    }

    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        FormatError::Parse {
            line,
            reason: reason.into(),
        }
    }

    fn io(path: &Path, err: &std::io::Error) -> Self {
        FormatError::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::Io { path, reason } => {
                write!(f, "[{}] {}: {}", self.code(), path, reason)
            }
            FormatError::Parse { line, reason } => {
                write!(f, "[{}] line {}: {}", self.code(), line, reason)
            }
            FormatError::Model(inner) => write!(f, "{inner}"),
        }
    }
}

impl std::error::Error for FormatError {}

impl From<ModelError> for FormatError {
    fn from(err: ModelError) -> Self {
        FormatError::Model(err)
    }
}

/// Model file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Lp,
    Mps,
}

impl FileFormat {
    /// Guess the format from the file extension; anything but `.mps` is LP.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("mps") => FileFormat::Mps,
            _ => FileFormat::Lp,
        }
    }
}

impl Model {
    /// Load a model from an LP file.
    pub fn read_lp(path: &Path) -> Result<Model, FormatError> {
        let text = std::fs::read_to_string(path).map_err(|err| FormatError::io(path, &err))?;
        let model = lp::parse_lp(&text)?;
        log_read("read_lp", path, &model);
        Ok(model)
    }

    /// Load a model from a fixed or free MPS file.
    pub fn read_mps(path: &Path) -> Result<Model, FormatError> {
        let text = std::fs::read_to_string(path).map_err(|err| FormatError::io(path, &err))?;
        let model = mps::parse_mps(&text)?;
        log_read("read_mps", path, &model);
        Ok(model)
    }

    /// Load a model, picking the format from the extension.
    pub fn read_file(path: &Path) -> Result<Model, FormatError> {
        match FileFormat::from_path(path) {
            FileFormat::Lp => Self::read_lp(path),
            FileFormat::Mps => Self::read_mps(path),
        }
    }

    /// Write the model in LP format to `path`, or to the output target.
    pub fn write_lp(&self, path: Option<&Path>) -> Result<(), FormatError> {
        self.write_text(path, &lp::to_lp_string(self))
    }

    /// Write the model in MPS format to `path`, or to the output target.
    pub fn write_mps(&self, path: Option<&Path>) -> Result<(), FormatError> {
        self.write_text(path, &mps::to_mps_string(self))
    }

    fn write_text(&self, path: Option<&Path>, text: &str) -> Result<(), FormatError> {
        match path {
            Some(path) => std::fs::write(path, text).map_err(|err| FormatError::io(path, &err)),
            None => Ok(self.print_str(text)?),
        }
    }
}

fn log_read(operation: &'static str, path: &Path, model: &Model) {
    tracing::debug!(
        component = "format",
        operation,
        status = "success",
        path = %path.display(),
        rows = model.rows(),
        columns = model.columns(),
        "Read model file"
    );
}

#[derive(Debug)]
struct RowSpec {
    name: Option<String>,
    terms: Vec<(usize, f64)>,
    relation: Relation,
    rhs: f64,
    range: Option<f64>,
}

#[derive(Debug)]
struct ColumnSpec {
    name: String,
    lower: f64,
    upper: f64,
    is_int: bool,
    is_semicont: bool,
}

#[derive(Debug)]
struct SosSpec {
    name: String,
    sos_type: i32,
    priority: i32,
    members: Vec<(usize, f64)>,
}

/// Model contents collected by a reader before the model is built.
#[derive(Debug, Default)]
struct Draft {
    name: Option<String>,
    maximize: bool,
    objective_name: Option<String>,
    objective: Vec<(usize, f64)>,
    objective_constant: f64,
    rows: Vec<RowSpec>,
    columns: Vec<ColumnSpec>,
    column_index: HashMap<String, usize>,
    sos: Vec<SosSpec>,
}

impl Draft {
    /// Ordinal of a named column, created on first use.
    fn column(&mut self, name: &str) -> usize {
        if let Some(&ordinal) = self.column_index.get(name) {
            return ordinal;
        }
        self.columns.push(ColumnSpec {
            name: name.to_string(),
            lower: 0.0,
            upper: DEFAULT_INFINITY,
            is_int: false,
            is_semicont: false,
        });
        let ordinal = self.columns.len();
        self.column_index.insert(name.to_string(), ordinal);
        ordinal
    }

    fn resolve(&mut self, terms: &[(String, f64)]) -> Vec<(usize, f64)> {
        let (indices, values): (Vec<usize>, Vec<f64>) = terms
            .iter()
            .map(|(name, value)| (self.column(name), *value))
            .unzip();
        merge_sparse(&indices, &values)
    }

    fn build(self) -> Result<Model, FormatError> {
        let mut model = Model::make(self.rows.len(), self.columns.len());
        if let Some(name) = &self.name {
            model.set_lp_name(name);
        }
        model.set_sense(self.maximize);
        let (indices, values): (Vec<usize>, Vec<f64>) = self.objective.into_iter().unzip();
        model.set_obj_fnex(&values, &indices)?;
        model.set_rh(0, self.objective_constant)?;
        if let Some(name) = &self.objective_name {
            model.set_row_name(0, name)?;
        }

        for (index, spec) in self.rows.iter().enumerate() {
            let row = index + 1;
            let (indices, values): (Vec<usize>, Vec<f64>) = spec.terms.iter().copied().unzip();
            model.set_rowex(row, &values, &indices)?;
            model.set_constr_type(row, spec.relation)?;
            model.set_rh(row, spec.rhs)?;
            if let Some(delta) = spec.range {
                model.set_rh_range(row, delta)?;
            }
            if let Some(name) = &spec.name
                && *name != default_row_name(row)
            {
                model.set_row_name(row, name)?;
            }
        }

        for (index, spec) in self.columns.iter().enumerate() {
            let column = index + 1;
            model.set_lowbo(column, spec.lower)?;
            model.set_upbo(column, spec.upper)?;
            model.set_int(column, spec.is_int)?;
            model.set_semicont(column, spec.is_semicont)?;
            if spec.name != default_column_name(column) {
                model.set_col_name(column, &spec.name)?;
            }
        }

        for spec in &self.sos {
            let columns: Vec<i32> = spec.members.iter().map(|(c, _)| *c as i32).collect();
            let weights: Vec<f64> = spec.members.iter().map(|(_, w)| *w).collect();
            model.add_sos(&spec.name, spec.sos_type, spec.priority, &columns, &weights)?;
        }
        Ok(model)
    }
}

/// Names a writer emits for the objective, rows and columns.
///
/// Explicit names can collide with another entry's ordinal default, which
/// would merge two rows or columns on reading. When any two effective names
/// in a set coincide, that whole set is written with ordinal names.
pub(crate) struct WriteNames {
    rows: Vec<Option<String>>,
    columns: Vec<Option<String>>,
}

impl WriteNames {
    pub(crate) fn new(model: &Model) -> Self {
        let rows = std::iter::once(model.objective_name.clone())
            .chain(model.row_iter().map(|(_, row)| row.name.clone()))
            .collect();
        let columns = std::iter::once(None)
            .chain(model.column_iter().map(|(_, column)| column.name.clone()))
            .collect();
        WriteNames {
            rows: unique_or_ordinal("rows", rows, default_row_name),
            columns: unique_or_ordinal("columns", columns, default_column_name),
        }
    }

    /// Explicit name of row `row`, if it is written.
    pub(crate) fn explicit_row(&self, row: usize) -> Option<&str> {
        self.rows.get(row).and_then(Option::as_deref)
    }

    pub(crate) fn row(&self, row: usize) -> String {
        self.explicit_row(row)
            .map_or_else(|| default_row_name(row), str::to_string)
    }

    pub(crate) fn column(&self, column: usize) -> String {
        self.columns
            .get(column)
            .and_then(Option::as_deref)
            .map_or_else(|| default_column_name(column), str::to_string)
    }
}

fn unique_or_ordinal(
    kind: &'static str,
    names: Vec<Option<String>>,
    default: fn(usize) -> String,
) -> Vec<Option<String>> {
    let mut seen = HashSet::with_capacity(names.len());
    let clash = names.iter().enumerate().find_map(|(ordinal, name)| {
        let effective = name.clone().unwrap_or_else(|| default(ordinal));
        (!seen.insert(effective.clone())).then_some(effective)
    });
    match clash {
        Some(name) => {
            tracing::warn!(
                component = "format",
                operation = "write",
                status = "fallback",
                kind,
                name = %name,
                "Duplicate name; writing ordinal names"
            );
            vec![None; names.len()]
        }
        None => names,
    }
}

/// Shortest text that parses back to exactly `value`.
pub(crate) fn format_exact(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 {
        "0".to_string()
    } else if !(1e-4..1e15).contains(&magnitude) {
        format!("{value:e}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_exact_round_trips() {
        for value in [0.1, -2.5, 1e30, -1e30, 3.0, 1.0 / 3.0, 1e-9] {
            let text = format_exact(value);
            assert_eq!(text.parse::<f64>().unwrap(), value, "{text}");
        }
        assert_eq!(format_exact(4.0), "4");
        assert_eq!(format_exact(1e30), "1e30");
    }

    #[test]
    fn file_format_from_extension() {
        assert_eq!(FileFormat::from_path(Path::new("a.mps")), FileFormat::Mps);
        assert_eq!(FileFormat::from_path(Path::new("a.MPS")), FileFormat::Mps);
        assert_eq!(FileFormat::from_path(Path::new("a.lp")), FileFormat::Lp);
    }

    #[test]
    fn error_codes() {
        assert_eq!(FormatError::parse(3, "bad").code(), "PARSE_ERROR");
        let inner = FormatError::from(ModelError::InvalidSosType { sos_type: 0 });
        assert_eq!(inner.code(), "SOS_INVALID_TYPE");
        assert!(FormatError::parse(3, "bad").to_string().contains("line 3"));
    }
}
