//! Documented defaults of the external solver's optional parameters.
//!
//! `verify` never applies these; they are merged in by the build step, under
//! whatever the caller supplied.

use lazy_static::lazy_static;
use serde_json::json;

use crate::parameters::ParameterSet;

lazy_static! {
    static ref DEFAULTS: ParameterSet = ParameterSet::new()
        .with("t_init", 0)
        .with("output_step", 1)
        .with("trotter_order", 4)
        .with("max_dim_rho", 400)
        .with("cut_off_rho", json!(1e-16))
        .with("b_force_rho_trace", true)
        .with("force_rho_hermitian_step", 4)
        .with("b_initial_rho_compression", false)
        .with("init_product_state", "+z")
        .with("b_save_final_state", false)
        .with("load_files_prefix", "")
        .with("output_files_prefix", "lindblad")
        .with("unique_id", "")
        .with("metadata", "");
}

/// The default value of every optional parameter that has one.
pub fn defaults() -> &'static ParameterSet {
    &*DEFAULTS
}
