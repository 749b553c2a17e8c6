//! Report printing to the model's output target.

use std::fmt::Write as _;
use std::fs::{File, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::format::lp;

use super::Model;
use super::error::ModelError;

const NAME_WIDTH: usize = 20;
const VALUE_WIDTH: usize = 12;

/// Destination of printed reports.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputTarget {
    #[default]
    Stdout,
    File(PathBuf),
}

impl Model {
    /// Redirect reports to a file (truncated now, appended to afterwards),
    /// or back to stdout with `None`.
    pub fn set_outputfile(&mut self, path: Option<&Path>) -> Result<(), ModelError> {
        self.output = match path {
            Some(path) => {
                File::create(path).map_err(|err| io_error(path, &err))?;
                OutputTarget::File(path.to_path_buf())
            }
            None => OutputTarget::Stdout,
        };
        Ok(())
    }

    pub fn output_target(&self) -> &OutputTarget {
        &self.output
    }

    /// Write text verbatim to the output target.
    pub fn print_str(&self, text: &str) -> Result<(), ModelError> {
        match &self.output {
            OutputTarget::Stdout => {
                let mut out = std::io::stdout().lock();
                out.write_all(text.as_bytes())
                    .and_then(|()| out.flush())
                    .map_err(|err| io_error(Path::new("<stdout>"), &err))
            }
            OutputTarget::File(path) => OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .and_then(|mut file| file.write_all(text.as_bytes()))
                .map_err(|err| io_error(path, &err)),
        }
    }

    /// Print the model in LP format.
    pub fn print_lp(&self) -> Result<(), ModelError> {
        let text = lp::to_lp_string(self);
        self.print_str(&text)
    }

    pub fn print_objective(&self) -> Result<(), ModelError> {
        let text = self.objective_report()?;
        self.print_str(&text)
    }

    pub fn print_solution(&self, columns: usize) -> Result<(), ModelError> {
        let text = self.solution_report(columns)?;
        self.print_str(&text)
    }

    pub fn print_constraints(&self, columns: usize) -> Result<(), ModelError> {
        let text = self.constraints_report(columns)?;
        self.print_str(&text)
    }

    pub fn print_duals(&self) -> Result<(), ModelError> {
        let text = self.duals_report()?;
        self.print_str(&text)
    }

    /// Write a JSON snapshot of the model and its results to `path`.
    pub fn print_debugdump(&self, path: &Path) -> Result<(), ModelError> {
        let json = serde_json::to_string_pretty(&self.snapshot()).map_err(|err| ModelError::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        std::fs::write(path, json).map_err(|err| io_error(path, &err))
    }

    pub fn objective_report(&self) -> Result<String, ModelError> {
        let value = self.objective_value()?;
        Ok(format!("\nValue of objective function: {value:.8}\n"))
    }

    /// Column values, `columns` entries per line.
    pub fn solution_report(&self, columns: usize) -> Result<String, ModelError> {
        let values = self.variables()?;
        let names = (1..=values.len()).map(|column| {
            self.get_col_name(column)
                .unwrap_or_else(|_| super::metadata::default_column_name(column))
        });
        Ok(render_block(
            "Actual values of the variables",
            names,
            values,
            columns,
        ))
    }

    /// Row activities, `columns` entries per line.
    pub fn constraints_report(&self, columns: usize) -> Result<String, ModelError> {
        let values = self.constraint_values()?;
        let names = (1..=values.len()).map(|row| {
            self.get_row_name(row)
                .unwrap_or_else(|_| super::metadata::default_row_name(row))
        });
        Ok(render_block(
            "Actual values of the constraints",
            names,
            values,
            columns,
        ))
    }

    /// Row duals followed by reduced costs.
    pub fn duals_report(&self) -> Result<String, ModelError> {
        let duals = self.duals()?;
        let reduced = self.reduced_costs()?;
        let row_names = (1..=duals.len()).map(|row| {
            self.get_row_name(row)
                .unwrap_or_else(|_| super::metadata::default_row_name(row))
        });
        let column_names = (1..=reduced.len()).map(|column| {
            self.get_col_name(column)
                .unwrap_or_else(|_| super::metadata::default_column_name(column))
        });
        let mut text = render_block("Dual value", row_names, duals, 1);
        text.push_str(&render_block("Reduced cost", column_names, reduced, 1));
        Ok(text)
    }
}

fn render_block(
    heading: &str,
    names: impl Iterator<Item = String>,
    values: &[f64],
    columns: usize,
) -> String {
    let per_line = columns.max(1);
    let mut text = format!("\n{heading}:\n");
    for (position, (name, value)) in names.zip(values).enumerate() {
        if position % per_line != 0 {
            text.push_str("       ");
        }
        let _ = write!(
            text,
            "{name:<NAME_WIDTH$} {:>VALUE_WIDTH$}",
            format_number(*value)
        );
        if (position + 1) % per_line == 0 {
            text.push('\n');
        }
    }
    if !values.is_empty() && values.len() % per_line != 0 {
        text.push('\n');
    }
    text
}

/// Format a number the way `%g` does: six significant digits, exponent
/// form outside `[1e-5, 1e6)`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() {
            "-inf".to_string()
        } else {
            "inf".to_string()
        };
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let exponent = value.abs().log10().floor() as i32;
    if !(-5..6).contains(&exponent) {
        let rendered = format!("{value:.5e}");
        let (mantissa, exp) = rendered.split_once('e').unwrap_or((&rendered, "0"));
        let exp: i32 = exp.parse().unwrap_or(0);
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{}e{sign}{:02}", trim_zeros(mantissa), exp.abs());
    }
    let decimals = (5 - exponent).max(0) as usize;
    trim_zeros(&format!("{value:.decimals$}")).to_string()
}

fn trim_zeros(rendered: &str) -> &str {
    if rendered.contains('.') {
        rendered.trim_end_matches('0').trim_end_matches('.')
    } else {
        rendered
    }
}

fn io_error(path: &Path, err: &std::io::Error) -> ModelError {
    ModelError::Io {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
