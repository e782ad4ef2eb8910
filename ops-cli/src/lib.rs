//! Operator tooling for Lindblad solver parameter files
//!
//! The `lindblad-params` binary wraps the functions below:
//!
//! ```bash
//! # Validate a parameter file (exit code 1 when anything is wrong)
//! lindblad-params check run.yaml
//! lindblad-params check run.json --format json
//!
//! # Treat (a, b) and (b, a) as different two-site pairs
//! LINDBLAD_PAIR_ORDERING=ordered lindblad-params check run.yaml
//!
//! # Produce the solver input file
//! lindblad-params build run.yaml --output run.input
//!
//! # Show the defaults applied by `build`
//! lindblad-params defaults
//! ```

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use config_engine::{
    defaults, rules, PairOrdering, ParameterSet, ParameterValidator, SolverInput, SourceFormat,
    TextSource, ValidationReport, ValidatorConfig,
};
use error_common::ViolationKind;
use serde::Serialize;
use tracing::{debug, info};

/// Main CLI configuration structure
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Verbose output
    pub verbose: bool,
    /// Conventions handed to the validator
    pub validator: ValidatorConfig,
}

impl CliConfig {
    pub fn new(verbose: bool, pair_ordering: PairOrdering, require_positive_tau: bool) -> Self {
        Self {
            verbose,
            validator: ValidatorConfig::default()
                .with_pair_ordering(pair_ordering)
                .with_require_positive_tau(require_positive_tau),
        }
    }

    pub fn validator(&self) -> ParameterValidator {
        ParameterValidator::new(self.validator.clone())
    }

    /// Default log directive when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "info"
        } else {
            "warn"
        }
    }
}

/// How `check` prints its report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One `Error ...` line per violation, or `OK`
    #[default]
    Text,
    /// A JSON array of violation records
    Json,
}

/// Result of a `check` run
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub valid: bool,
    pub violations: usize,
    pub output: String,
}

#[derive(Serialize)]
struct ViolationRecord<'a> {
    parameter: &'a str,
    kind: ViolationKind,
    code: &'static str,
    message: &'a str,
}

/// Read a parameter document, picking JSON or YAML by file extension.
///
/// # Errors
///
/// Fails when the file cannot be read, does not parse, or is not a mapping.
pub fn load_parameters(path: &Path) -> anyhow::Result<ParameterSet> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read parameter file {}", path.display()))?;
    let format = SourceFormat::from_path(path);
    debug!(path = %path.display(), ?format, "loading parameter file");
    let params = ParameterSet::load(&TextSource::new(format, text))
        .with_context(|| format!("failed to parse parameter file {}", path.display()))?;
    info!(path = %path.display(), parameters = params.len(), "parameter file loaded");
    Ok(params)
}

/// Verify a parameter set and render the report.
///
/// # Errors
///
/// Fails only if the JSON report cannot be serialized.
pub fn check(
    params: &ParameterSet,
    validator: &ParameterValidator,
    format: OutputFormat,
) -> anyhow::Result<CheckOutcome> {
    let report = validator.report(params);
    let output = match format {
        OutputFormat::Text => render_text(&report),
        OutputFormat::Json => render_json(&report)?,
    };
    Ok(CheckOutcome {
        valid: report.is_valid(),
        violations: report.len(),
        output,
    })
}

fn render_text(report: &ValidationReport) -> String {
    if report.is_valid() {
        "OK".to_string()
    } else {
        report.to_string()
    }
}

fn render_json(report: &ValidationReport) -> anyhow::Result<String> {
    let records: Vec<ViolationRecord<'_>> = report
        .violations()
        .iter()
        .map(|v| ViolationRecord {
            parameter: &v.parameter,
            kind: v.kind,
            code: v.code(),
            message: &v.message,
        })
        .collect();
    serde_json::to_string_pretty(&records).context("failed to serialize violation report")
}

/// Run the build step and return the solver input text.
///
/// # Errors
///
/// Fails with the full violation report when the parameters are invalid.
pub fn build(params: &ParameterSet, validator: &ParameterValidator) -> anyhow::Result<String> {
    let input = SolverInput::build(params, validator)?;
    Ok(input.render())
}

/// The defaults table, one `name = value` line per parameter, each preceded
/// by a comment describing the parameter.
pub fn render_defaults() -> String {
    let mut out = String::new();
    for (name, value) in defaults() {
        if let Some(spec) = rules::lookup(name) {
            let _ = writeln!(out, "# {}", spec.description);
        }
        let _ = writeln!(out, "{name} = {value}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> ParameterSet {
        ParameterSet::new().with("N", 4).with("t_final", 2.0).with("tau", 0.05)
    }

    #[test]
    fn test_check_valid_prints_ok() {
        let outcome = check(&valid(), &ParameterValidator::default(), OutputFormat::Text).unwrap();
        assert!(outcome.valid);
        assert_eq!(outcome.output, "OK");
    }

    #[test]
    fn test_check_json_lists_records() {
        let params = valid().with("b_periodic_x", 0).with("l_x", -1);
        let outcome = check(&params, &ParameterValidator::default(), OutputFormat::Json).unwrap();
        assert!(!outcome.valid);
        assert_eq!(outcome.violations, 2);
        let parsed: serde_json::Value = serde_json::from_str(&outcome.output).unwrap();
        let records = parsed.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["parameter"], json!("l_x"));
        assert_eq!(records[0]["code"], json!("PARAM_1002"));
        assert_eq!(records[1]["kind"], json!("type_mismatch"));
    }

    #[test]
    fn test_cli_config_builds_validator() {
        let config = CliConfig::new(true, PairOrdering::Ordered, true);
        assert_eq!(config.log_level(), "info");
        let validator = config.validator();
        assert_eq!(validator.config().pair_ordering, PairOrdering::Ordered);
        let negative_tau = valid().with("tau", -0.05);
        assert!(!check(&negative_tau, &validator, OutputFormat::Text).unwrap().valid);
    }

    #[test]
    fn test_build_renders_solver_input() {
        let text = build(&valid(), &ParameterValidator::default()).unwrap();
        assert!(text.lines().any(|l| l == "N = 4"));
        assert!(text.lines().any(|l| l == "trotter_order = 4"));
    }

    #[test]
    fn test_build_reports_violations() {
        let params = valid().with("trotter_order", 5);
        let err = build(&params, &ParameterValidator::default()).unwrap_err();
        assert!(err.to_string().contains("trotter_order"));
    }

    #[test]
    fn test_render_defaults_quotes_strings() {
        let text = render_defaults();
        assert!(text.lines().any(|l| l == "init_product_state = \"+z\""));
        assert!(text.lines().any(|l| l == "b_force_rho_trace = true"));
        assert!(text.lines().any(|l| l == "# Order of the Trotter decomposition"));
    }

    #[test]
    fn test_load_parameters_by_extension() {
        let dir = std::env::temp_dir().join(format!("lindblad-params-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let yaml = dir.join("run.yaml");
        fs::write(&yaml, "N: 3\nt_final: 1.0\ntau: 0.1\n").unwrap();
        let json_path = dir.join("run.json");
        fs::write(&json_path, r#"{"N": 3, "t_final": 1.0, "tau": 0.1}"#).unwrap();

        assert_eq!(load_parameters(&yaml).unwrap(), load_parameters(&json_path).unwrap());
        assert!(load_parameters(&dir.join("missing.json")).is_err());
        fs::remove_dir_all(&dir).unwrap();
    }
}
