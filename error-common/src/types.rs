use thiserror::Error;

use crate::codes;

/// Failures raised once a parameter set is escalated past validation
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The validator reported one or more violations
    #[error("Invalid parameters ({count} violation(s)):\n{report}")]
    InvalidParameters { count: usize, report: String },

    /// A validated value could not be rendered into solver input
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidParameters { .. } => codes::build::INVALID_PARAMETERS,
            Self::Serialization(_) => codes::build::SERIALIZATION_FAILED,
        }
    }
}

/// Result type alias for validation operations
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Emit a structured error event for a failure.
pub fn log_error(context: &str, error: &ValidationError) {
    tracing::error!(
        context = context,
        error_code = error.code(),
        error = %error,
        "parameter engine error occurred"
    );
}
