//! The fixed catalogue of parameter rules.
//!
//! Each recognised parameter name maps to one declarative [`Rule`]. Adding a
//! parameter means adding a row to [`PARAMETER_SPECS`]; the evaluation code
//! below only knows about rule kinds, never about individual names.

use error_common::Violation;
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt::Display;

use crate::config::ValidatorConfig;
use crate::parameters::ParameterSet;
use crate::shape::Shape;

/// Axis labels accepted in `1q_components`.
pub const SINGLE_SITE_COMPONENTS: &[&str] = &["x", "y", "z"];

/// Axis-pair labels accepted in `2q_components`.
pub const TWO_SITE_COMPONENTS: &[&str] = &["XX", "XY", "XZ", "YX", "YY", "YZ", "ZX", "ZY", "ZZ"];

/// Trotter orders the solver implements.
pub const TROTTER_ORDERS: &[i64] = &[2, 3, 4];

/// Name of the chain-length parameter every per-site rule refers to.
pub const CHAIN_LENGTH: &str = "N";

/// At most this many offending positions are spelled out in one message.
const MAX_LISTED: usize = 8;

#[allow(clippy::expect_used)]
fn product_state_pattern() -> Regex {
    Regex::new(r"^[+-]?[xyz]$").expect("built-in product state pattern must compile")
}

lazy_static! {
    static ref PRODUCT_STATE: Regex = product_state_pattern();
}

/// What a parameter's value must look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Integer > 0
    PositiveInteger,
    /// Integer >= 0
    NonNegativeInteger,
    /// Any real number
    Real,
    /// Real > 0, and greater than `t_init` when that is given
    Horizon,
    /// Real; positive only when the configuration demands it
    TimeStep,
    /// Real scalar, or a sequence of exactly `N` reals
    SiteField,
    /// Real scalar, or an `N`×`N` real matrix
    Coupling,
    /// Optional sign followed by one axis label
    ProductState,
    /// Strict boolean
    Flag,
    /// Integer drawn from a fixed set
    OneOf(&'static [i64]),
    /// String without control characters
    Text,
    /// Sequence of labels drawn from a fixed alphabet
    Components(&'static [&'static str]),
    /// Sequence of distinct site indices in `[0, N)`
    SiteIndices,
    /// Sequence of distinct pairs of distinct site indices in `[0, N)`
    SitePairs,
}

/// Static metadata for one recognised parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub rule: Rule,
    /// Required parameters have no default and must always be supplied
    pub required: bool,
    pub description: &'static str,
}

const fn required(name: &'static str, rule: Rule, description: &'static str) -> ParameterSpec {
    ParameterSpec {
        name,
        rule,
        required: true,
        description,
    }
}

const fn optional(name: &'static str, rule: Rule, description: &'static str) -> ParameterSpec {
    ParameterSpec {
        name,
        rule,
        required: false,
        description,
    }
}

/// Every recognised parameter, in evaluation order.
pub static PARAMETER_SPECS: &[ParameterSpec] = &[
    // Chain and time evolution
    required(CHAIN_LENGTH, Rule::PositiveInteger, "Number of sites in the chain"),
    optional("t_init", Rule::Real, "Initial time"),
    required("t_final", Rule::Horizon, "Final time"),
    required("tau", Rule::TimeStep, "Time step of the evolution"),
    // Lattice geometry
    optional("l_x", Rule::PositiveInteger, "Lattice extent along x"),
    optional("l_y", Rule::PositiveInteger, "Lattice extent along y"),
    optional("b_periodic_x", Rule::Flag, "Periodic boundary along x"),
    optional("b_periodic_y", Rule::Flag, "Periodic boundary along y"),
    optional(
        "output_step",
        Rule::NonNegativeInteger,
        "Observables are computed every this many steps (0 disables)",
    ),
    // Hamiltonian and dissipation
    optional("h_x", Rule::SiteField, "Transverse field along x"),
    optional("h_y", Rule::SiteField, "Transverse field along y"),
    optional("h_z", Rule::SiteField, "Longitudinal field along z"),
    optional("J", Rule::Coupling, "XY coupling matrix"),
    optional("J_z", Rule::Coupling, "ZZ coupling matrix"),
    optional("g_0", Rule::SiteField, "Dissipation rate of the lowering operator"),
    optional("g_1", Rule::SiteField, "Dissipation rate of the raising operator"),
    optional("g_2", Rule::SiteField, "Dephasing rate"),
    // Initial state
    optional(
        "init_product_state",
        Rule::ProductState,
        "Initial product state, e.g. \"+z\"",
    ),
    optional(
        "init_graph_state",
        Rule::SitePairs,
        "Pairs receiving a CZ gate when preparing a graph state",
    ),
    optional("load_files_prefix", Rule::Text, "Prefix of saved state files to start from"),
    optional("b_initial_rho_compression", Rule::Flag, "Re-gauge a loaded initial state"),
    // Solver numerics
    optional("trotter_order", Rule::OneOf(TROTTER_ORDERS), "Order of the Trotter decomposition"),
    optional("max_dim", Rule::PositiveInteger, "Maximum bond dimension"),
    optional("max_dim_rho", Rule::PositiveInteger, "Maximum bond dimension of the density matrix"),
    optional("cut_off", Rule::Real, "Truncation cutoff"),
    optional("cut_off_rho", Rule::Real, "Truncation cutoff of the density matrix"),
    optional("b_force_rho_trace", Rule::Flag, "Renormalise the trace at every step"),
    optional("b_force_rho_hermitian", Rule::Flag, "Symmetrise the density matrix at every step"),
    optional(
        "force_rho_hermitian_step",
        Rule::NonNegativeInteger,
        "Symmetrise the density matrix every this many steps",
    ),
    // Output
    optional("b_save_final_state", Rule::Flag, "Save the final density matrix"),
    optional("output_files_prefix", Rule::Text, "Path and prefix of output files"),
    optional("unique_id", Rule::Text, "Identifier recorded in the output"),
    optional("metadata", Rule::Text, "Free-text note recorded in the output"),
    // Observables
    optional(
        "1q_components",
        Rule::Components(SINGLE_SITE_COMPONENTS),
        "Single-site observable axes",
    ),
    optional("1q_indices", Rule::SiteIndices, "Sites of single-site observables"),
    optional(
        "2q_components",
        Rule::Components(TWO_SITE_COMPONENTS),
        "Two-site observable axis pairs",
    ),
    optional("2q_indices", Rule::SitePairs, "Site pairs of two-site observables"),
];

/// Look up the table entry for a parameter name.
pub fn lookup(name: &str) -> Option<&'static ParameterSpec> {
    PARAMETER_SPECS.iter().find(|spec| spec.name == name)
}

pub fn is_known(name: &str) -> bool {
    lookup(name).is_some()
}

/// Names that must be present in every parameter set.
pub fn required_names() -> impl Iterator<Item = &'static str> {
    PARAMETER_SPECS
        .iter()
        .filter(|spec| spec.required)
        .map(|spec| spec.name)
}

/// Facts about other parameters that cross-field rules consult.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// `N`, when present and a positive integer
    pub chain_length: Option<usize>,
    /// `t_init`, when present and numeric
    pub t_init: Option<f64>,
    pub config: &'a ValidatorConfig,
}

impl<'a> RuleContext<'a> {
    pub fn new(params: &ParameterSet, config: &'a ValidatorConfig) -> Self {
        let chain_length = params
            .get(CHAIN_LENGTH)
            .and_then(|v| Shape::of(v).as_integer())
            .filter(|n| *n > 0)
            .and_then(|n| usize::try_from(n).ok());
        let t_init = params.get("t_init").and_then(|v| Shape::of(v).as_real());
        Self {
            chain_length,
            t_init,
            config,
        }
    }
}

impl Rule {
    /// Evaluate this rule, appending one violation per independent failure.
    pub fn check(self, name: &str, value: &Value, ctx: &RuleContext<'_>, out: &mut Vec<Violation>) {
        let shape = Shape::of(value);
        match self {
            Rule::PositiveInteger => check_integer(name, shape, 1, out),
            Rule::NonNegativeInteger => check_integer(name, shape, 0, out),
            Rule::Real => {
                if !shape.is_numeric() {
                    out.push(Violation::type_mismatch(
                        name,
                        format!("must be a real number, got {}", describe(shape)),
                    ));
                }
            }
            Rule::Horizon => check_horizon(name, shape, ctx, out),
            Rule::TimeStep => check_time_step(name, shape, ctx, out),
            Rule::SiteField => check_site_field(name, shape, ctx, out),
            Rule::Coupling => check_coupling(name, shape, ctx, out),
            Rule::ProductState => check_product_state(name, shape, out),
            Rule::Flag => {
                if !matches!(shape, Shape::Bool(_)) {
                    out.push(Violation::type_mismatch(
                        name,
                        format!("must be a boolean (true or false), got {}", describe(shape)),
                    ));
                }
            }
            Rule::OneOf(allowed) => check_one_of(name, shape, allowed, out),
            Rule::Text => check_text(name, shape, out),
            Rule::Components(alphabet) => check_components(name, shape, alphabet, out),
            Rule::SiteIndices => check_site_indices(name, shape, ctx, out),
            Rule::SitePairs => check_site_pairs(name, shape, ctx, out),
        }
    }
}

/// Shape description, with the value spelled out for numbers.
fn describe(shape: Shape<'_>) -> String {
    match shape {
        Shape::Integer(i) => format!("{} ({i})", shape.describe()),
        Shape::Real(x) => format!("{} ({x})", shape.describe()),
        _ => shape.describe().to_string(),
    }
}

fn summarize<T: Display>(items: &[T]) -> String {
    let listed = items.iter().take(MAX_LISTED).join(", ");
    if items.len() > MAX_LISTED {
        format!("{listed} and {} more", items.len() - MAX_LISTED)
    } else {
        listed
    }
}

fn check_integer(name: &str, shape: Shape<'_>, minimum: i128, out: &mut Vec<Violation>) {
    let expected = if minimum > 0 {
        "a positive integer"
    } else {
        "a non-negative integer"
    };
    match shape {
        Shape::Integer(i) if i >= minimum => {}
        Shape::Integer(i) => {
            out.push(Violation::range(name, format!("must be {expected}, got {i}")));
        }
        other => out.push(Violation::type_mismatch(
            name,
            format!("must be {expected}, got {}", describe(other)),
        )),
    }
}

fn check_horizon(name: &str, shape: Shape<'_>, ctx: &RuleContext<'_>, out: &mut Vec<Violation>) {
    let Some(t) = shape.as_real() else {
        out.push(Violation::type_mismatch(
            name,
            format!("must be a positive real number, got {}", describe(shape)),
        ));
        return;
    };
    if t <= 0.0 {
        out.push(Violation::range(name, format!("must be positive, got {t}")));
    } else if let Some(t_init) = ctx.t_init {
        if t <= t_init {
            out.push(Violation::referential(
                name,
                format!("must exceed t_init = {t_init}, got {t}"),
            ));
        }
    }
}

fn check_time_step(name: &str, shape: Shape<'_>, ctx: &RuleContext<'_>, out: &mut Vec<Violation>) {
    match shape.as_real() {
        Some(tau) if ctx.config.require_positive_tau && tau <= 0.0 => {
            out.push(Violation::range(name, format!("must be positive, got {tau}")));
        }
        Some(_) => {}
        None => out.push(Violation::type_mismatch(
            name,
            format!("must be a real number, got {}", describe(shape)),
        )),
    }
}

/// Positions of entries that are not real numbers.
fn non_numeric_positions(items: &[Value]) -> Vec<usize> {
    items
        .iter()
        .positions(|v| !Shape::of(v).is_numeric())
        .collect()
}

fn check_site_field(
    name: &str,
    shape: Shape<'_>,
    ctx: &RuleContext<'_>,
    out: &mut Vec<Violation>,
) {
    const EXPECTED: &str = "must be a real number or a sequence of N real numbers";
    match shape {
        s if s.is_numeric() => {}
        Shape::Vector(items) => {
            let bad = non_numeric_positions(items);
            if !bad.is_empty() {
                out.push(Violation::type_mismatch(
                    name,
                    format!(
                        "has entries that are not real numbers at positions [{}]",
                        summarize(&bad)
                    ),
                ));
            }
            if let Some(n) = ctx.chain_length {
                if items.len() != n {
                    out.push(Violation::shape(
                        name,
                        format!("has {} entries but N = {n}", items.len()),
                    ));
                }
            }
        }
        Shape::Matrix(_) | Shape::Mixed(_) => {
            out.push(Violation::shape(name, format!("{EXPECTED}, got {}", shape.describe())));
        }
        other => out.push(Violation::type_mismatch(
            name,
            format!("{EXPECTED}, got {}", describe(other)),
        )),
    }
}

fn check_coupling(name: &str, shape: Shape<'_>, ctx: &RuleContext<'_>, out: &mut Vec<Violation>) {
    const EXPECTED: &str = "must be a real number or an N×N matrix of real numbers";
    match shape {
        s if s.is_numeric() => {}
        Shape::Matrix(rows) => {
            let row_lengths: Vec<usize> = rows
                .iter()
                .map(|row| row.as_array().map_or(0, Vec::len))
                .collect();
            let bad: Vec<String> = rows
                .iter()
                .enumerate()
                .flat_map(|(i, row)| {
                    row.as_array()
                        .into_iter()
                        .flatten()
                        .positions(|v| !Shape::of(v).is_numeric())
                        .map(move |j| format!("({i}, {j})"))
                })
                .collect();
            if !bad.is_empty() {
                out.push(Violation::type_mismatch(
                    name,
                    format!("has entries that are not real numbers at [{}]", summarize(&bad)),
                ));
            }

            let size = rows.len();
            let columns = row_lengths.first().copied().unwrap_or(0);
            if row_lengths.iter().any(|&len| len != columns) {
                out.push(Violation::shape(
                    name,
                    format!("has rows of unequal lengths [{}]", row_lengths.iter().join(", ")),
                ));
            } else if columns != size {
                out.push(Violation::shape(
                    name,
                    format!("must be square, got {size}×{columns}"),
                ));
            } else if let Some(n) = ctx.chain_length {
                if size != n {
                    out.push(Violation::shape(
                        name,
                        format!("is {size}×{size} but N = {n}"),
                    ));
                }
            }
        }
        Shape::Vector(_) | Shape::Mixed(_) => {
            out.push(Violation::shape(name, format!("{EXPECTED}, got {}", shape.describe())));
        }
        other => out.push(Violation::type_mismatch(
            name,
            format!("{EXPECTED}, got {}", describe(other)),
        )),
    }
}

fn check_product_state(name: &str, shape: Shape<'_>, out: &mut Vec<Violation>) {
    match shape {
        Shape::Text(s) if PRODUCT_STATE.is_match(s) => {}
        Shape::Text(s) => out.push(Violation::domain(
            name,
            format!(
                "must be an optional sign (+ or -) followed by x, y or z, \
                 got a {}-character string",
                s.chars().count()
            ),
        )),
        other => out.push(Violation::type_mismatch(
            name,
            format!("must be a string such as \"+z\", got {}", describe(other)),
        )),
    }
}

fn check_one_of(name: &str, shape: Shape<'_>, allowed: &[i64], out: &mut Vec<Violation>) {
    match shape {
        Shape::Integer(i) if allowed.iter().any(|&a| i128::from(a) == i) => {}
        Shape::Integer(i) => out.push(Violation::domain(
            name,
            format!("must be one of [{}], got {i}", allowed.iter().join(", ")),
        )),
        other => out.push(Violation::type_mismatch(
            name,
            format!(
                "must be one of the integers [{}], got {}",
                allowed.iter().join(", "),
                describe(other)
            ),
        )),
    }
}

fn check_text(name: &str, shape: Shape<'_>, out: &mut Vec<Violation>) {
    match shape {
        Shape::Text(s) if s.chars().any(char::is_control) => out.push(Violation::domain(
            name,
            "must not contain control characters such as line breaks",
        )),
        Shape::Text(_) => {}
        other => out.push(Violation::type_mismatch(
            name,
            format!("must be a string, got {}", describe(other)),
        )),
    }
}

fn check_components(name: &str, shape: Shape<'_>, alphabet: &[&str], out: &mut Vec<Violation>) {
    match shape {
        Shape::Vector(items) => {
            for (pos, item) in items.iter().enumerate() {
                match Shape::of(item) {
                    Shape::Text(label) if alphabet.contains(&label) => {}
                    Shape::Text(label) => out.push(Violation::domain(
                        name,
                        format!("entry {pos} is not one of [{}]", alphabet.iter().join(", ")),
                    )),
                    other => out.push(Violation::type_mismatch(
                        name,
                        format!("entry {pos} must be a string, got {}", describe(other)),
                    )),
                }
            }
        }
        Shape::Text(_) => out.push(Violation::type_mismatch(
            name,
            "must be a sequence of strings, got a single string",
        )),
        other => out.push(Violation::type_mismatch(
            name,
            format!("must be a sequence of strings, got {}", describe(other)),
        )),
    }
}

/// Check site indices against `[0, N)`. All offending indices of one entry
/// go into a single violation: negative ones first, then those past `N`.
fn check_sites(
    name: &str,
    label: &str,
    sites: &[i128],
    ctx: &RuleContext<'_>,
) -> Option<Violation> {
    let negative: Vec<i128> = sites.iter().copied().filter(|&i| i < 0).collect();
    if !negative.is_empty() {
        let noun = if negative.len() == 1 { "index" } else { "indices" };
        return Some(Violation::range(
            name,
            format!("{label} refers to negative site {noun} {}", negative.iter().join(", ")),
        ));
    }
    let n = ctx.chain_length?;
    let outside: Vec<i128> = sites
        .iter()
        .copied()
        .filter(|&i| usize::try_from(i).map_or(true, |i| i >= n))
        .collect();
    if outside.is_empty() {
        return None;
    }
    let noun = if outside.len() == 1 { "site" } else { "sites" };
    Some(Violation::referential(
        name,
        format!("{label} refers to {noun} {}, outside [0, {n})", outside.iter().join(", ")),
    ))
}

fn check_site_indices(
    name: &str,
    shape: Shape<'_>,
    ctx: &RuleContext<'_>,
    out: &mut Vec<Violation>,
) {
    match shape {
        Shape::Vector(items) => {
            let mut seen = HashSet::new();
            for (pos, item) in items.iter().enumerate() {
                match Shape::of(item) {
                    Shape::Integer(index) => {
                        let label = format!("entry {pos}");
                        if let Some(violation) = check_sites(name, &label, &[index], ctx) {
                            out.push(violation);
                        } else if !seen.insert(index) {
                            out.push(Violation::referential(
                                name,
                                format!("{label} repeats site index {index}"),
                            ));
                        }
                    }
                    other => out.push(Violation::type_mismatch(
                        name,
                        format!(
                            "entry {pos} must be an integer site index, got {}",
                            describe(other)
                        ),
                    )),
                }
            }
        }
        other => out.push(Violation::type_mismatch(
            name,
            format!(
                "must be a flat sequence of integer site indices, got {}",
                describe(other)
            ),
        )),
    }
}

fn check_site_pairs(
    name: &str,
    shape: Shape<'_>,
    ctx: &RuleContext<'_>,
    out: &mut Vec<Violation>,
) {
    let rows = match shape {
        Shape::Vector(items) if items.is_empty() => return,
        Shape::Matrix(rows) | Shape::Mixed(rows) => rows,
        other => {
            out.push(Violation::type_mismatch(
                name,
                format!("must be a sequence of index pairs, got {}", describe(other)),
            ));
            return;
        }
    };

    let mut seen = HashSet::new();
    for (pos, row) in rows.iter().enumerate() {
        let label = format!("entry {pos}");
        let Some(entries) = row.as_array() else {
            out.push(Violation::type_mismatch(
                name,
                format!(
                    "{label} must be a pair of site indices, got {}",
                    describe(Shape::of(row))
                ),
            ));
            continue;
        };
        let [first, second] = entries.as_slice() else {
            out.push(Violation::shape(
                name,
                format!("{label} has {} elements, expected exactly 2", entries.len()),
            ));
            continue;
        };
        let (Some(a), Some(b)) = (Shape::of(first).as_integer(), Shape::of(second).as_integer())
        else {
            out.push(Violation::type_mismatch(
                name,
                format!("{label} must hold two integer site indices"),
            ));
            continue;
        };

        // One line per entry: range problems take precedence over pairing ones.
        if let Some(violation) = check_sites(name, &label, &[a, b], ctx) {
            out.push(violation);
        } else if a == b {
            out.push(Violation::referential(
                name,
                format!("{label} pairs site {a} with itself"),
            ));
        } else if !seen.insert(ctx.config.pair_ordering.key(a, b)) {
            out.push(Violation::referential(
                name,
                format!("{label} repeats the pair ({a}, {b})"),
            ));
        }
    }
}
