use clap::{Parser, Subcommand, ValueEnum};
use lpbind::{LogSink, LpHandle, Model, SolveStatus, consts};
use lpbind_core::FileFormat;
use lpbind_solver::{BackendKind, SolverConfig, available_backends};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "lpbind",
    author,
    version,
    about = "Solve and convert LP/MPS models through the lpbind engine"
)]
struct Cli {
    /// Tracing filter, e.g. `info` or `lpbind_solver=debug` (overrides LPBIND_TRACE)
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read a model file, solve it and print the results
    Solve(SolveArgs),
    /// Convert a model between LP and MPS formats
    Convert(ConvertArgs),
    /// Print the named constants table
    Constants(ConstantsArgs),
}

#[derive(Parser, Debug)]
struct SolveArgs {
    /// Model file to read
    file: PathBuf,

    /// Input format; `auto` picks MPS for `.mps` files and LP otherwise
    #[arg(long, value_enum, default_value = "auto")]
    format: InputFormat,

    /// Time limit in seconds
    #[arg(long)]
    time_limit: Option<u32>,

    /// Relative MIP gap
    #[arg(long)]
    mip_gap: Option<f64>,

    /// Message verbosity, 0 (neutral) to 6 (full)
    #[arg(long, default_value_t = 1)]
    verbose: i64,

    /// Solver backend (microlp, highs)
    #[arg(long)]
    backend: Option<String>,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    output: OutputFormat,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Model file to read; format taken from the extension
    input: PathBuf,

    /// File to write; `.mps` writes MPS, anything else LP
    output: PathBuf,
}

#[derive(Parser, Debug)]
struct ConstantsArgs {
    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum InputFormat {
    Lp,
    Mps,
    Auto,
}

impl InputFormat {
    fn resolve(self, path: &Path) -> FileFormat {
        match self {
            InputFormat::Lp => FileFormat::Lp,
            InputFormat::Mps => FileFormat::Mps,
            InputFormat::Auto => FileFormat::from_path(path),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Serialize)]
struct NamedValue {
    name: String,
    value: f64,
}

#[derive(Debug, Clone, Serialize)]
struct SolveReport {
    model: String,
    backend: String,
    status: i32,
    status_text: String,
    objective: Option<f64>,
    variables: Vec<NamedValue>,
    constraints: Vec<NamedValue>,
    total_iter: u64,
    duration_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
struct ConstantRow {
    name: &'static str,
    value: i64,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    lpbind::init_logging(cli.log.as_deref())?;
    match cli.command {
        Command::Solve(args) => solve_command(args),
        Command::Convert(args) => convert_command(args),
        Command::Constants(args) => constants_command(args),
    }
}

fn solve_command(args: SolveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let backend = match args.backend.as_deref() {
        Some(name) => Some(BackendKind::parse(name).ok_or_else(|| {
            boxed_input_error(&format!(
                "unknown backend '{name}' (available: {})",
                backend_names()
            ))
        })?),
        None => None,
    };
    if let Some(gap) = args.mip_gap
        && !(gap.is_finite() && gap >= 0.0)
    {
        return Err(boxed_input_error("mip gap must be a non-negative number"));
    }

    let mut handle = match args.format.resolve(&args.file) {
        FileFormat::Lp => LpHandle::read_lp(&args.file, args.verbose, None)?,
        FileFormat::Mps => LpHandle::read_mps(&args.file, args.verbose)?,
    };
    let sink: LogSink = Arc::new(|severity, message| {
        eprintln!("[{}] {message}", severity.as_str());
    });
    handle.put_logfunc(Some(sink))?;

    let model = handle.model_mut("solve")?;
    if let Some(seconds) = args.time_limit {
        model.set_timeout(i64::from(seconds))?;
    }
    if let Some(gap) = args.mip_gap {
        model.set_mip_gap(false, gap)?;
    }
    let mut config = SolverConfig::from_model(model);
    if let Some(kind) = backend {
        config = config.with_backend(kind);
    }

    let started = Instant::now();
    let status = handle.solve_with(&config)?;
    let duration_ms = started.elapsed().as_secs_f64() * 1000.0;
    tracing::info!(
        component = "cli",
        operation = "solve",
        status = status.text(),
        duration_ms,
        "Solved model file"
    );

    let model = handle.model("solve")?;
    let report = build_report(model, status, config.backend.unwrap_or_default(), duration_ms);
    match args.output {
        OutputFormat::Table => print_report_table(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn convert_command(args: ConvertArgs) -> Result<(), Box<dyn std::error::Error>> {
    let model = Model::read_file(&args.input)?;
    match FileFormat::from_path(&args.output) {
        FileFormat::Lp => model.write_lp(Some(&args.output))?,
        FileFormat::Mps => model.write_mps(Some(&args.output))?,
    }
    tracing::info!(
        component = "cli",
        operation = "convert",
        status = "success",
        input = %args.input.display(),
        output = %args.output.display(),
        "Converted model file"
    );
    println!("wrote: {}", args.output.display());
    Ok(())
}

fn constants_command(args: ConstantsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let rows: Vec<ConstantRow> = consts::CONSTANTS
        .iter()
        .map(|&(name, value)| ConstantRow { name, value })
        .collect();
    match args.output {
        OutputFormat::Table => {
            println!("{:<28} {:>12}", "name", "value");
            for row in &rows {
                println!("{:<28} {:>12}", row.name, row.value);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }
    Ok(())
}

fn build_report(
    model: &Model,
    status: SolveStatus,
    backend: BackendKind,
    duration_ms: f64,
) -> SolveReport {
    let variables = model
        .variables()
        .map(|values| {
            values
                .iter()
                .enumerate()
                .map(|(index, &value)| NamedValue {
                    name: model
                        .get_col_name(index + 1)
                        .unwrap_or_else(|_| format!("C{}", index + 1)),
                    value,
                })
                .collect()
        })
        .unwrap_or_default();
    let constraints = model
        .constraint_values()
        .map(|values| {
            values
                .iter()
                .enumerate()
                .map(|(index, &value)| NamedValue {
                    name: model
                        .get_row_name(index + 1)
                        .unwrap_or_else(|_| format!("R{}", index + 1)),
                    value,
                })
                .collect()
        })
        .unwrap_or_default();

    SolveReport {
        model: model.get_lp_name().to_string(),
        backend: backend.to_string(),
        status: status.code(),
        status_text: status.text().to_string(),
        objective: model.objective_value().ok(),
        variables,
        constraints,
        total_iter: model.total_iter(),
        duration_ms,
    }
}

fn print_report_table(report: &SolveReport) {
    println!("{:<24} {}", "model", display_or_unnamed(&report.model));
    println!("{:<24} {}", "backend", report.backend);
    println!("{:<24} {} ({})", "status", report.status_text, report.status);
    match report.objective {
        Some(value) => println!("{:<24} {value:>15.6}", "objective"),
        None => println!("{:<24} {:>15}", "objective", "-"),
    }
    println!("{:<24} {:>15.3}", "duration_ms", report.duration_ms);

    if !report.variables.is_empty() {
        println!();
        println!("{:<24} {:>15}", "variable", "value");
        for row in &report.variables {
            println!("{:<24} {:>15.6}", row.name, row.value);
        }
    }
    if !report.constraints.is_empty() {
        println!();
        println!("{:<24} {:>15}", "constraint", "activity");
        for row in &report.constraints {
            println!("{:<24} {:>15.6}", row.name, row.value);
        }
    }
}

fn display_or_unnamed(name: &str) -> &str {
    if name.is_empty() { "(unnamed)" } else { name }
}

fn backend_names() -> String {
    available_backends()
        .iter()
        .map(|kind| kind.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn boxed_input_error(message: &str) -> Box<dyn std::error::Error> {
    Box::new(std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        message.to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_solve_arguments_parse() {
        let cli = Cli::try_parse_from([
            "lpbind",
            "solve",
            "model.mps",
            "--time-limit",
            "5",
            "--output",
            "json",
        ])
        .unwrap();
        let Command::Solve(args) = cli.command else {
            panic!("expected solve");
        };
        assert_eq!(args.format.resolve(&args.file), FileFormat::Mps);
        assert_eq!(args.time_limit, Some(5));
        assert_eq!(args.output, OutputFormat::Json);
        assert_eq!(args.verbose, 1);
    }

    #[test]
    fn test_forced_format_overrides_extension() {
        assert_eq!(
            InputFormat::Lp.resolve(Path::new("model.mps")),
            FileFormat::Lp
        );
    }

    #[test]
    fn test_report_for_unsolved_model_is_empty() {
        let model = Model::make(1, 2);
        let report = build_report(&model, SolveStatus::NotRun, BackendKind::Microlp, 0.0);
        assert!(report.objective.is_none());
        assert!(report.variables.is_empty());
        assert_eq!(report.backend, "microlp");
    }
}
