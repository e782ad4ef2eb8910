//! Per-parameter acceptance and rejection tests
//!
//! Every case starts from a set holding only the required parameters and adds
//! one parameter under test. `reject` cases must produce a non-empty report,
//! `accept` cases an empty one.

use config_engine::{verify, ParameterSet, ParameterValidator, ViolationKind};
use serde_json::{json, Value};

const DEFAULT_N: i64 = 10;
const DEFAULT_T_FINAL: i64 = 20;
const DEFAULT_TAU: f64 = 0.1;

// Helper to build a set with the required parameters filled in
fn params_with(extra: &[(&str, Value)]) -> ParameterSet {
    let mut params = ParameterSet::new()
        .with("N", DEFAULT_N)
        .with("t_final", DEFAULT_T_FINAL)
        .with("tau", DEFAULT_TAU);
    for (name, value) in extra {
        params.insert(*name, value.clone());
    }
    params
}

fn accept(extra: &[(&str, Value)]) {
    let report = verify(&params_with(extra));
    assert_eq!(report, "", "expected no violations for {extra:?}");
}

fn reject(extra: &[(&str, Value)]) -> String {
    let report = verify(&params_with(extra));
    assert_ne!(report, "", "expected violations for {extra:?}");
    assert!(report.starts_with("Error"));
    report
}

#[test]
fn test_chain_length() {
    reject(&[("N", json!("5"))]);
    reject(&[("N", json!(-1))]);
    reject(&[("N", json!(0))]);
    reject(&[("N", json!(5.0))]);
    accept(&[("N", json!(20))]);
}

#[test]
fn test_time_horizon() {
    reject(&[("t_final", json!("20"))]);
    reject(&[("t_final", json!(-20))]);
    accept(&[("t_final", json!(20))]);
    accept(&[("t_init", json!(10)), ("t_final", json!(20))]);
    reject(&[("t_init", json!(25)), ("t_final", json!(20))]);
}

#[test]
fn test_time_step() {
    reject(&[("tau", json!("20"))]);
    reject(&[("tau", json!(true))]);
    accept(&[("tau", json!(20))]);
    // Sign is not enforced unless configured
    accept(&[("tau", json!(-20))]);
}

#[test]
fn test_lattice_extents() {
    for name in ["l_x", "l_y"] {
        reject(&[(name, json!(3.3))]);
        reject(&[(name, json!(-4))]);
        accept(&[(name, json!(4))]);
    }
}

#[test]
fn test_output_step() {
    reject(&[("output_step", json!(1.1))]);
    reject(&[("output_step", json!(-1))]);
    accept(&[("output_step", json!(1))]);
    accept(&[("output_step", json!(0))]);
}

#[test]
fn test_site_field_rejections() {
    let n5 = ("N", json!(5));
    reject(&[n5.clone(), ("h_x", json!("11"))]);
    reject(&[n5.clone(), ("h_x", json!([1, 1]))]);
    reject(&[
        n5.clone(),
        (
            "h_x",
            json!([
                [0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0]
            ]),
        ),
    ]);
    reject(&[n5.clone(), ("h_x", json!([1, 2, 3, 4]))]);
    reject(&[n5.clone(), ("h_x", json!([1, 2, 3, 4, "5"]))]);
    reject(&[n5.clone(), ("h_x", json!([1, 2, 3, 4, 5, 6]))]);
    reject(&[n5, ("h_x", json!([[1, 2, 3, 4, 5], [1, 2, 3, 4, 5]]))]);
}

#[test]
fn test_site_field_acceptance() {
    accept(&[("N", json!(5)), ("h_x", json!([1, 2, 3, 4, 5]))]);
    accept(&[("N", json!(5)), ("h_x", json!([1.0, 2.5, -3.0, 4e-3, 5]))]);
    for name in ["h_y", "h_z", "g_0", "g_1", "g_2"] {
        accept(&[(name, json!(-4e-10))]);
        reject(&[(name, json!(true))]);
    }
}

#[test]
fn test_coupling_rejections() {
    let n5 = ("N", json!(5));
    reject(&[
        n5.clone(),
        (
            "J_z",
            json!([
                [2, 5, 6, "7", 9],
                [4.55, -4.1, 12, -33, 10],
                [4.55, -1.1, 17, 0, 10],
                [4.55, -4.1, 61, -33, 10],
                [4.55, -1.1, 11, -33, 10]
            ]),
        ),
    ]);
    reject(&[
        n5.clone(),
        (
            "J_z",
            json!([
                [2, 5, 6, 5, 9],
                [4.55, -4.1, 12, -33, 10],
                [4.55, -4.1, 61, -33, 10],
                [4.55, -1.1, 11, -33, 10]
            ]),
        ),
    ]);
    reject(&[
        n5.clone(),
        (
            "J_z",
            json!([
                [2, 5, 6, 7],
                [4.55, -4.1, 12, -33, 10],
                [4.55, -1.1, 17, 0, 10],
                [4.55, -4.1, 61, -33, 10],
                [4.55, -1.1, 11, -33, 10]
            ]),
        ),
    ]);
    reject(&[n5.clone(), ("J_z", json!([[1, 2, 3, 4, 5], [1, 2, 3, 4, 5]]))]);
    reject(&[n5.clone(), ("J_z", json!([[1, 2.0], [0, 0], [2, 3.0]]))]);
    reject(&[
        n5,
        (
            "J_z",
            json!([
                [1, 2, 3, 4, "P"],
                [1, 2, 3, 4, 5],
                [1, 2, 3, 4, 5],
                [1, 2, 3, 4, 5],
                [1, 2, 3, 4, 5]
            ]),
        ),
    ]);
}

#[test]
fn test_coupling_acceptance() {
    let n5 = ("N", json!(5));
    accept(&[
        n5.clone(),
        (
            "J_z",
            json!([
                [1, 2, 3, 4, 3],
                [1, 2, 3, 4, 5],
                [1, 2, 3, 4, 5],
                [1, 2, 3, 4, 5],
                [1, 2, 3, 4, 5]
            ]),
        ),
    ]);
    accept(&[n5.clone(), ("J_z", json!(-55))]);
    accept(&[
        n5.clone(),
        (
            "J_z",
            json!([
                [2, 5, 6, 7, -10],
                [4.55, -4.1, 12, -33, 10],
                [4.55, -1.1, 17, 0, 10],
                [4.55, -4.1, 61, -33, 10],
                [4.55, -1.1, 11, -33, 10]
            ]),
        ),
    ]);
    accept(&[n5.clone(), ("J_z", json!(-55.0))]);
    accept(&[
        n5,
        (
            "J",
            json!([
                [0.0, 0.0, 0.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, 0.0, 0.0]
            ]),
        ),
    ]);
}

#[test]
fn test_product_state() {
    reject(&[("init_product_state", json!("-a"))]);
    reject(&[("init_product_state", json!(-22))]);
    accept(&[("init_product_state", json!("-x"))]);
    accept(&[("init_product_state", json!("z"))]);
}

#[test]
fn test_boolean_flags() {
    for name in [
        "b_periodic_x",
        "b_periodic_y",
        "b_force_rho_trace",
        "b_force_rho_hermitian",
        "b_initial_rho_compression",
        "b_save_final_state",
    ] {
        reject(&[(name, json!(-22))]);
        reject(&[(name, json!(0))]);
        reject(&[(name, json!("False"))]);
        accept(&[(name, json!(false))]);
        accept(&[(name, json!(true))]);
    }
}

#[test]
fn test_trotter_order() {
    reject(&[("trotter_order", json!(5))]);
    reject(&[("trotter_order", json!(1))]);
    reject(&[("trotter_order", json!(3.0))]);
    for order in [2, 3, 4] {
        accept(&[("trotter_order", json!(order))]);
    }
}

#[test]
fn test_metadata() {
    reject(&[("metadata", json!("CR/LF \n"))]);
    reject(&[("metadata", json!(0))]);
    accept(&[("metadata", json!("We agree to disagree."))]);
}

#[test]
fn test_cutoffs_and_dimensions() {
    reject(&[("cut_off_rho", json!([1, 1]))]);
    accept(&[("cut_off_rho", json!(1.1e-199))]);
    reject(&[("cut_off", json!("1e-10"))]);
    reject(&[("max_dim_rho", json!(200.99))]);
    accept(&[("max_dim_rho", json!(200))]);
    accept(&[("max_dim", json!(100))]);
    reject(&[("force_rho_hermitian_step", json!("True"))]);
    accept(&[("force_rho_hermitian_step", json!(0))]);
}

#[test]
fn test_single_site_observables() {
    reject(&[("1q_components", json!([1, 1]))]);
    reject(&[("1q_components", json!(["x", "X"]))]);
    accept(&[("1q_components", json!(["x", "y"]))]);
    reject(&[("1q_indices", json!([1, 1]))]);
    reject(&[("N", json!(5)), ("1q_indices", json!([2, 5, 1]))]);
    accept(&[("N", json!(5)), ("1q_indices", json!([2, 4, 1]))]);
}

#[test]
fn test_two_site_observables() {
    reject(&[("2q_components", json!(["xx", "xx"]))]);
    reject(&[("2q_components", json!("xy"))]);
    accept(&[("2q_components", json!(["XX", "XY", "XZ", "YY", "YZ", "ZZ"]))]);
    accept(&[("2q_components", json!(["XX", "YY", "YZ", "ZZ"]))]);

    reject(&[("N", json!(5)), ("2q_indices", json!([[1, 2], [3, 1], [2, 5], [3, 4]]))]);
    reject(&[(
        "2q_indices",
        json!([[1, 0], [2, 1], [2, 1], [0, 1], [1, 0], [2, 1], [2, 1], [0, 1]]),
    ), ("N", json!(2))]);
    accept(&[("N", json!(5)), ("2q_indices", json!([[1, 2], [3, 1], [2, 4], [3, 4]]))]);
    accept(&[("N", json!(5)), ("2q_indices", json!([[1, 2], [3, 4]]))]);
    accept(&[("2q_indices", json!([]))]);
}

#[test]
fn test_graph_state_pairs() {
    accept(&[("N", json!(4)), ("init_graph_state", json!([[0, 1], [1, 2], [2, 3]]))]);
    reject(&[("N", json!(4)), ("init_graph_state", json!([[0, 4]]))]);
    reject(&[("init_graph_state", json!([0, 1]))]);
}

#[test]
fn test_violation_kinds() {
    let validator = ParameterValidator::default();
    let report = validator.report(&params_with(&[
        ("N", json!(5)),
        ("b_periodic_x", json!(0)),
        ("l_x", json!(-4)),
        ("h_x", json!([1, 2, 3])),
        ("trotter_order", json!(7)),
        ("1q_indices", json!([5])),
    ]));
    assert!(report.has_violation("b_periodic_x", ViolationKind::TypeMismatch));
    assert!(report.has_violation("l_x", ViolationKind::RangeViolation));
    assert!(report.has_violation("h_x", ViolationKind::ShapeViolation));
    assert!(report.has_violation("trotter_order", ViolationKind::DomainViolation));
    assert!(report.has_violation("1q_indices", ViolationKind::ReferentialViolation));
    assert_eq!(report.len(), 5);
}
