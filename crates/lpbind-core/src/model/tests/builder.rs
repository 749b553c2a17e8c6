use super::support::basic_model;
use super::*;

#[test]
fn test_add_constraintex_appends_rows() {
    let model = basic_model();
    assert_eq!(model.rows(), 2);
    assert_eq!(model.columns(), 4);
    assert_eq!(model.get_nonzeros(), 7);
    assert_eq!(model.get_mat(1, 3).unwrap(), 2.0);
    assert_eq!(model.get_mat(2, 1).unwrap(), 0.0);
    assert_eq!(model.get_mat(0, 3).unwrap(), -2.0);
    assert_eq!(model.get_rh(2).unwrap(), 3.0);
    assert_eq!(model.get_constr_type(2).unwrap(), Relation::GreaterEqual);
}

#[test]
fn test_add_constraintex_rejects_bad_input() {
    let mut model = Model::make(0, 2);
    assert_eq!(
        model
            .add_constraintex(&[1.0], &[3], Relation::LessEqual, 1.0)
            .unwrap_err()
            .code(),
        "COLUMN_INVALID_INDEX"
    );
    assert_eq!(
        model
            .add_constraintex(&[1.0], &[0], Relation::LessEqual, 1.0)
            .unwrap_err()
            .code(),
        "COLUMN_INVALID_INDEX"
    );
    assert_eq!(
        model
            .add_constraintex(&[1.0, 2.0], &[1], Relation::LessEqual, 1.0)
            .unwrap_err()
            .code(),
        "LENGTH_MISMATCH"
    );
    assert_eq!(
        model
            .add_constraintex(&[f64::NAN], &[1], Relation::LessEqual, 1.0)
            .unwrap_err()
            .code(),
        "NUMBER_INVALID"
    );
    assert_eq!(model.rows(), 0);
}

#[test]
fn test_duplicate_indices_are_summed() {
    let mut model = Model::make(0, 3);
    model
        .add_constraintex(&[1.0, 2.0, 3.0], &[2, 1, 2], Relation::Equal, 0.0)
        .unwrap();
    assert_eq!(model.get_mat(1, 2).unwrap(), 4.0);
    assert_eq!(model.get_mat(1, 1).unwrap(), 2.0);
    assert_eq!(model.get_nonzeros(), 2);
}

#[test]
fn test_set_obj_fnex_replaces_objective() {
    let mut model = basic_model();
    model.set_obj_fnex(&[5.0], &[4]).unwrap();
    assert_eq!(model.get_row(0).unwrap(), vec![0.0, 0.0, 0.0, 0.0, 5.0]);
}

#[test]
fn test_set_mat_and_dense_access() {
    let mut model = basic_model();
    model.set_mat(2, 1, 0.5).unwrap();
    assert_eq!(model.get_mat(2, 1).unwrap(), 0.5);
    assert_eq!(model.get_mat(1, 2).unwrap(), 2.0);

    model.set_mat(1, 4, 0.0).unwrap();
    assert_eq!(model.get_row(1).unwrap(), vec![0.0, 3.0, 2.0, 2.0, 0.0]);
    assert_eq!(model.get_column(3).unwrap(), vec![-2.0, 2.0, 3.0]);

    model.set_mat(0, 1, 7.0).unwrap();
    assert_eq!(model.get_column(1).unwrap()[0], 7.0);
}

#[test]
fn test_row_mode_blocks_matrix_access() {
    let mut model = basic_model();
    assert!(model.set_add_rowmode(true));
    assert!(!model.set_add_rowmode(true));
    assert!(model.is_add_rowmode());
    assert_eq!(model.get_mat(1, 1).unwrap_err().code(), "ROW_MODE_ACTIVE");
    assert_eq!(model.set_mat(1, 1, 1.0).unwrap_err().code(), "ROW_MODE_ACTIVE");
    model
        .add_constraintex(&[1.0], &[1], Relation::LessEqual, 1.0)
        .unwrap();
    assert!(model.set_add_rowmode(false));
    assert_eq!(model.get_mat(3, 1).unwrap(), 1.0);
}

#[test]
fn test_str_primitives_parse_dense_rows() {
    let mut model = Model::make(0, 3);
    model.str_set_obj_fn("1 0 2").unwrap();
    let row = model
        .str_add_constraint("3 2 2", Relation::LessEqual, 4.0)
        .unwrap();
    assert_eq!(row, 1);
    assert_eq!(model.get_row(0).unwrap(), vec![0.0, 1.0, 0.0, 2.0]);

    let column = model.str_add_column("9 5").unwrap();
    assert_eq!(column, 4);
    assert_eq!(model.get_column(4).unwrap(), vec![9.0, 5.0]);

    assert_eq!(
        model.str_set_obj_fn("1 x").unwrap_err().code(),
        "PARSE_ERROR"
    );
    assert_eq!(
        model.str_set_obj_fn("1 2 3 4 5").unwrap_err().code(),
        "PARSE_ERROR"
    );
}

#[test]
fn test_del_column_renumbers_everything() {
    let mut model = basic_model();
    model.add_sos("s", 1, 1, &[2, 3], &[1.0, 2.0]).unwrap();
    model.del_column(2).unwrap();
    assert_eq!(model.columns(), 3);
    assert_eq!(model.get_row(1).unwrap(), vec![0.0, 3.0, 2.0, 1.0]);
    assert_eq!(model.get_row(0).unwrap(), vec![0.0, 2.0, -2.0, 3.0]);
    assert_eq!(model.sos_groups()[0].members, vec![(2, 2.0)]);
}

#[test]
fn test_del_constraint_shifts_rows() {
    let mut model = basic_model();
    model.set_row_name(2, "cover").unwrap();
    model.del_constraint(1).unwrap();
    assert_eq!(model.rows(), 1);
    assert_eq!(model.get_row_name(1).unwrap(), "cover");
    assert_eq!(model.del_constraint(2).unwrap_err().code(), "ROW_INVALID_INDEX");
}

#[test]
fn test_add_sos_rules() {
    let mut model = Model::make(0, 3);
    assert_eq!(
        model.add_sos("bad", 0, 1, &[1], &[1.0]).unwrap_err().code(),
        "SOS_INVALID_TYPE"
    );
    // Member columns are not range-checked for types 1 and 2.
    assert_eq!(model.add_sos("s1", 1, 1, &[1, 9], &[1.0, 2.0]).unwrap(), 1);
    assert!(model.is_sos_var(1).unwrap());
    assert!(!model.is_sos_var(2).unwrap());

    assert_eq!(
        model.add_sos("s3", 3, 1, &[2], &[1.0]).unwrap_err().code(),
        "SOS_INVALID_MEMBER"
    );
    model.set_int(2, true).unwrap();
    model.set_semicont(2, true).unwrap();
    assert_eq!(model.add_sos("s3", 3, 1, &[2], &[1.0]).unwrap(), 2);
}

#[test]
fn test_bounds_and_types() {
    let mut model = Model::make(1, 2);
    model.set_bounds(1, -5.0, 5.0).unwrap();
    assert_eq!(model.get_lowbo(1).unwrap(), -5.0);
    assert_eq!(
        model.set_bounds(1, 3.0, 2.0).unwrap_err().code(),
        "BOUNDS_INVALID"
    );
    assert_eq!(model.set_upbo(0, 1.0).unwrap_err().code(), "COLUMN_INVALID_INDEX");

    model.set_upbo(2, f64::INFINITY).unwrap();
    assert_eq!(model.get_upbo(2).unwrap(), 1e30);
    model.set_unbounded(2).unwrap();
    assert!(model.is_unbounded(2).unwrap());

    model.set_binary(1, true).unwrap();
    assert!(model.is_int(1).unwrap());
    assert!(model.is_binary(1).unwrap());
    assert_eq!(model.get_upbo(1).unwrap(), 1.0);
}

#[test]
fn test_ranges_follow_relation() {
    let mut model = Model::make(3, 1);
    model.set_constr_type(1, Relation::LessEqual).unwrap();
    model.set_rh(1, 10.0).unwrap();
    model.set_rh_range(1, -4.0).unwrap();
    assert_eq!(model.row_bounds(1).unwrap(), (6.0, 10.0));

    model.set_constr_type(2, Relation::GreaterEqual).unwrap();
    model.set_rh(2, 1.0).unwrap();
    model.set_rh_range(2, 2.0).unwrap();
    assert_eq!(model.row_bounds(2).unwrap(), (1.0, 3.0));

    model.set_constr_type(3, Relation::Equal).unwrap();
    model.set_rh(3, 5.0).unwrap();
    model.set_rh_range(3, -1.0).unwrap();
    assert_eq!(model.row_bounds(3).unwrap(), (4.0, 5.0));

    model.set_constr_type(3, Relation::Equal).unwrap();
    assert_eq!(model.row_bounds(3).unwrap(), (5.0, 5.0));
}

#[test]
fn test_objective_constant_lives_in_row_zero() {
    let mut model = basic_model();
    model.set_rh(0, 12.5).unwrap();
    assert_eq!(model.get_rh(0).unwrap(), 12.5);
    assert_eq!(model.objective_constant(), 12.5);
}

#[test]
fn test_set_infinite_moves_stored_infinities() {
    let mut model = Model::make(0, 1);
    model.set_infinite(1e20).unwrap();
    assert_eq!(model.get_upbo(1).unwrap(), 1e20);
    assert!(model.set_infinite(-1.0).is_err());
}
