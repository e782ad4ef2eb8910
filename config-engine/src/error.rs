use error_common::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parameter document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parameter document is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ConfigError {
    /// Number of parameter violations carried by this error, if any.
    pub fn violation_count(&self) -> Option<usize> {
        match self {
            Self::Validation(ValidationError::InvalidParameters { count, .. }) => Some(*count),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
