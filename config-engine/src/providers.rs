// Parameter document providers (JSON, YAML text)
use std::path::Path;

use crate::error::{ConfigError, Result};

pub trait ConfigProvider {
    fn load(&self) -> Result<serde_json::Value>;
}

/// Text encodings a parameter document may arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFormat {
    #[default]
    Json,
    Yaml,
}

impl SourceFormat {
    /// Pick the format from a file extension; anything unrecognised is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => SourceFormat::Yaml,
            _ => SourceFormat::Json,
        }
    }
}

impl std::str::FromStr for SourceFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(SourceFormat::Json),
            "yaml" | "yml" => Ok(SourceFormat::Yaml),
            _ => Err(ConfigError::UnknownOption(format!(
                "Unknown document format: {s}. Valid options: json, yaml"
            ))),
        }
    }
}

/// An in-memory parameter document.
#[derive(Debug, Clone)]
pub struct TextSource {
    format: SourceFormat,
    text: String,
}

impl TextSource {
    pub fn new<S: Into<String>>(format: SourceFormat, text: S) -> Self {
        Self {
            format,
            text: text.into(),
        }
    }

    pub fn json<S: Into<String>>(text: S) -> Self {
        Self::new(SourceFormat::Json, text)
    }

    pub fn yaml<S: Into<String>>(text: S) -> Self {
        Self::new(SourceFormat::Yaml, text)
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }
}

impl ConfigProvider for TextSource {
    fn load(&self) -> Result<serde_json::Value> {
        let value = match self.format {
            SourceFormat::Json => serde_json::from_str(&self.text)?,
            SourceFormat::Yaml => serde_yaml::from_str(&self.text)?,
        };
        Ok(value)
    }
}
