use super::support::{basic_model, capture_sink};
use super::*;
use crate::types::Verbosity;

fn solved_model() -> Model {
    let mut model = basic_model();
    let record = SolveRecord::new(-4.0, vec![4.0, 6.0], vec![0.0, 0.0, 2.0, 0.0])
        .with_duals(&[0.0, -1.0], &[2.0, 7.0, 0.0, 4.0]);
    model.record_solve(SolveStatus::Optimal, Some(record));
    model
}

#[test]
fn test_results_unavailable_before_solve() {
    let model = basic_model();
    assert_eq!(model.objective_value().unwrap_err().code(), "RESULTS_UNAVAILABLE");
    assert_eq!(model.variables().unwrap_err().code(), "RESULTS_UNAVAILABLE");
    assert!(!model.duals_available());
    assert_eq!(model.solution_count(), 0);
    assert_eq!(model.time_total(), 0.0);
}

#[test]
fn test_result_layout() {
    let model = solved_model();
    assert_eq!(model.status(), SolveStatus::Optimal);
    assert_eq!(model.objective_value().unwrap(), -4.0);
    assert_eq!(model.constraint_values().unwrap(), &[4.0, 6.0]);
    assert_eq!(model.variables().unwrap(), &[0.0, 0.0, 2.0, 0.0]);
    assert_eq!(model.duals().unwrap(), &[0.0, -1.0]);
    assert_eq!(model.reduced_costs().unwrap(), &[2.0, 7.0, 0.0, 4.0]);
    assert!(model.duals_available());

    assert_eq!(model.var_primal_result(0).unwrap(), -4.0);
    assert_eq!(model.var_primal_result(2).unwrap(), 6.0);
    assert_eq!(model.var_primal_result(5).unwrap(), 2.0);
    assert_eq!(model.var_dual_result(2).unwrap(), -1.0);
    assert_eq!(
        model.var_primal_result(7).unwrap_err().code(),
        "RESULT_INVALID_INDEX"
    );
}

#[test]
fn test_failed_solve_discards_results() {
    let mut model = solved_model();
    model.record_solve(SolveStatus::Infeasible, None);
    assert_eq!(model.status(), SolveStatus::Infeasible);
    assert!(model.solve_record().is_none());
}

#[test]
fn test_report_text() {
    let mut model = solved_model();
    model.set_col_name(3, "x3").unwrap();

    let objective = model.objective_report().unwrap();
    assert_eq!(objective, "\nValue of objective function: -4.00000000\n");

    let solution = model.solution_report(1).unwrap();
    assert!(solution.contains("Actual values of the variables:"));
    let x3 = solution.lines().find(|line| line.starts_with("x3")).unwrap();
    assert!(x3.trim_end().ends_with('2'));

    let constraints = model.constraints_report(2).unwrap();
    assert!(constraints.contains("Actual values of the constraints:"));
    assert!(constraints.lines().any(|line| line.starts_with("R1") && line.contains("R2")));

    let duals = model.duals_report().unwrap();
    assert!(duals.contains("Dual value:"));
    assert!(duals.contains("Reduced cost:"));
}

#[test]
fn test_outputfile_truncates_then_appends() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.txt");
    std::fs::write(&path, "stale").unwrap();

    let mut model = solved_model();
    model.set_outputfile(Some(&path)).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    assert_eq!(model.output_target(), &OutputTarget::File(path.clone()));

    model.print_objective().unwrap();
    model.print_str("done\n").unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("\nValue of objective function:"));
    assert!(text.ends_with("done\n"));

    model.set_outputfile(None).unwrap();
    assert_eq!(model.output_target(), &OutputTarget::Stdout);
}

#[test]
fn test_outputfile_in_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("report.txt");
    let mut model = Model::new();
    assert_eq!(
        model.set_outputfile(Some(&path)).unwrap_err().code(),
        "IO_ERROR"
    );
    assert_eq!(model.output_target(), &OutputTarget::Stdout);
}

#[test]
fn test_debugdump_writes_snapshot_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dump.json");
    let mut model = solved_model();
    model.set_lp_name("dumped");
    model.print_debugdump(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let snapshot: ModelSnapshot = serde_json::from_str(&text).unwrap();
    assert_eq!(snapshot.name, "dumped");
    assert_eq!(snapshot.rows.len(), 2);
    assert_eq!(snapshot.columns[2].name, "C3");
    assert_eq!(snapshot.rows[0].upper, 4.0);
    assert_eq!(snapshot.status, SolveStatus::Optimal);
    assert_eq!(snapshot.results.unwrap().objective, -4.0);
}

#[test]
fn test_parameter_validation() {
    let mut model = Model::new();
    assert_eq!(model.get_verbose(), Verbosity::Critical);
    model.set_verbose(5).unwrap();
    assert_eq!(model.get_verbose(), Verbosity::Detailed);
    assert_eq!(model.set_verbose(7).unwrap_err().code(), "PARAMETER_INVALID");

    assert!(model.set_timeout(-1).is_err());
    model.set_timeout(30).unwrap();
    assert_eq!(model.get_timeout(), 30);

    assert!(model.set_simplextype(3).is_err());
    model.set_simplextype(crate::params::simplex::PRIMAL_PRIMAL).unwrap();
    assert_eq!(model.get_simplextype(), 5);

    assert!(model.set_solutionlimit(0).is_err());
    model.set_mip_gap(true, 1e-6).unwrap();
    assert_eq!(model.get_mip_gap(true), 1e-6);
    assert_eq!(model.get_mip_gap(false), 1e-9);

    model.set_presolve(crate::params::presolve::ROWS, 3).unwrap();
    assert_eq!(model.get_presolve(), 1);
    assert_eq!(model.get_presolveloops(), 3);
}

#[test]
fn test_sink_receives_reports_under_threshold() {
    let (sink, seen) = capture_sink();
    let mut model = Model::new();
    model.set_log_sink(Some(sink));

    model.report(Verbosity::Important, "hidden at CRITICAL");
    model.set_verbose(Verbosity::Important.code().into()).unwrap();
    model.report(Verbosity::Important, "visible");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].1, "visible");
}
