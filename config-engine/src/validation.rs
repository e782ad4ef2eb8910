// Parameter validation and rule enforcement
use error_common::Violation;
use tracing::{debug, info};

use crate::config::ValidatorConfig;
use crate::error::Result;
use crate::parameters::ParameterSet;
use crate::report::ValidationReport;
use crate::rules::{self, RuleContext, PARAMETER_SPECS};

pub trait ConfigValidator {
    fn validate(&self, config: &serde_json::Value) -> Result<()>;
}

/// Evaluates the full rule catalogue against a parameter set.
///
/// Every rule for every present parameter runs; nothing short-circuits, so a
/// single call yields the complete list of problems. The validator holds no
/// state besides its configuration and is safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct ParameterValidator {
    config: ValidatorConfig,
}

impl ParameterValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Run every applicable rule and collect the violations in table order.
    pub fn report(&self, params: &ParameterSet) -> ValidationReport {
        let mut violations = Vec::new();

        for name in rules::required_names() {
            if !params.contains(name) {
                violations.push(Violation::missing(name));
            }
        }

        let ctx = RuleContext::new(params, &self.config);
        for spec in PARAMETER_SPECS {
            if let Some(value) = params.get(spec.name) {
                spec.rule.check(spec.name, value, &ctx, &mut violations);
            }
        }

        for name in params.names().filter(|name| !rules::is_known(name)) {
            debug!(parameter = name, "ignoring unrecognised parameter");
        }
        for violation in &violations {
            debug!(
                parameter = %violation.parameter,
                code = violation.code(),
                "{}",
                violation.message
            );
        }
        info!(
            parameters = params.len(),
            violations = violations.len(),
            "parameter set verified"
        );

        ValidationReport::new(violations)
    }

    /// The textual report: empty when the parameters are valid, otherwise one
    /// `Error ...` line per violation.
    pub fn verify(&self, params: &ParameterSet) -> String {
        self.report(params).to_string()
    }

    /// Escalate violations into an error.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::Validation`] when the report is non-empty.
    pub fn validate_parameters(&self, params: &ParameterSet) -> Result<()> {
        self.report(params).into_result()?;
        Ok(())
    }
}

impl ConfigValidator for ParameterValidator {
    fn validate(&self, config: &serde_json::Value) -> Result<()> {
        let params = ParameterSet::from_value(config.clone())?;
        self.validate_parameters(&params)
    }
}

/// Verify with the default configuration.
pub fn verify(params: &ParameterSet) -> String {
    ParameterValidator::default().verify(params)
}
