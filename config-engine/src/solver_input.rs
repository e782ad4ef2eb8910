//! Rendering a validated parameter set into the solver's text input format.
//!
//! The format is one `name = value` line per parameter. Booleans are written
//! as `1`/`0`; sequences, matrices (row-major) and index pairs are flattened
//! into comma-separated lists. Writing the text anywhere is the caller's job.

use error_common::{log_error, ValidationError};
use itertools::Itertools;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{info, warn};

use crate::defaults::defaults;
use crate::error::Result;
use crate::parameters::ParameterSet;
use crate::rules;
use crate::validation::ParameterValidator;

/// A validated, default-completed parameter set ready for the solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverInput {
    entries: BTreeMap<String, String>,
}

impl SolverInput {
    /// Verify `params` and, when valid, merge them over the defaults and
    /// render every value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::Validation`] carrying the full report
    /// when any rule fails, or a serialization error for a value that has no
    /// textual form.
    pub fn build(params: &ParameterSet, validator: &ParameterValidator) -> Result<Self> {
        if let Err(err) = validator.report(params).into_result() {
            log_error("solver input build", &err);
            return Err(err.into());
        }

        let mut merged = defaults().clone();
        for (name, value) in params {
            if rules::is_known(name) {
                merged.insert(name.clone(), value.clone());
            } else {
                warn!(parameter = %name, "dropping unrecognised parameter from solver input");
            }
        }

        let entries = merged
            .iter()
            .map(|(name, value)| -> Result<(String, String)> {
                Ok((name.clone(), render_value(name, value)?))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        info!(parameters = entries.len(), "solver input built");
        Ok(Self { entries })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The full input document, one `name = value` line per parameter.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SolverInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.entries {
            writeln!(f, "{name} = {value}")?;
        }
        Ok(())
    }
}

fn render_value(name: &str, value: &Value) -> Result<String> {
    match value {
        Value::Array(_) => {
            let mut leaves = Vec::new();
            flatten(name, value, &mut leaves)?;
            Ok(leaves.into_iter().join(","))
        }
        scalar => render_scalar(name, scalar),
    }
}

fn flatten(name: &str, value: &Value, leaves: &mut Vec<String>) -> Result<()> {
    match value {
        Value::Array(items) => {
            for item in items {
                flatten(name, item, leaves)?;
            }
            Ok(())
        }
        scalar => {
            leaves.push(render_scalar(name, scalar)?);
            Ok(())
        }
    }
}

fn render_scalar(name: &str, value: &Value) -> Result<String> {
    match value {
        Value::Bool(b) => Ok(if *b { "1" } else { "0" }.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        Value::Null | Value::Object(_) | Value::Array(_) => {
            Err(ValidationError::Serialization(format!(
                "parameter '{name}' has no textual solver representation"
            ))
            .into())
        }
    }
}
