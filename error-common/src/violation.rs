use serde::{Deserialize, Serialize};
use std::fmt;

use crate::codes;

/// Literal token every rendered violation line starts with.
pub const ERROR_TOKEN: &str = "Error";

/// Classes of parameter violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// The value's type is not one of the accepted types
    TypeMismatch,
    /// A numeric value lies outside its allowed domain
    RangeViolation,
    /// A sequence or matrix has the wrong length, is ragged, or is not square
    ShapeViolation,
    /// A categorical value is not drawn from the permitted alphabet
    DomainViolation,
    /// Valid in isolation but inconsistent with another parameter
    ReferentialViolation,
    /// A parameter without a default was not supplied
    MissingRequired,
}

impl ViolationKind {
    pub const ALL: [ViolationKind; 6] = [
        ViolationKind::TypeMismatch,
        ViolationKind::RangeViolation,
        ViolationKind::ShapeViolation,
        ViolationKind::DomainViolation,
        ViolationKind::ReferentialViolation,
        ViolationKind::MissingRequired,
    ];

    /// Stable code for machine-readable output.
    pub fn code(self) -> &'static str {
        match self {
            Self::TypeMismatch => codes::violation::TYPE_MISMATCH,
            Self::RangeViolation => codes::violation::RANGE_VIOLATION,
            Self::ShapeViolation => codes::violation::SHAPE_VIOLATION,
            Self::DomainViolation => codes::violation::DOMAIN_VIOLATION,
            Self::ReferentialViolation => codes::violation::REFERENTIAL_VIOLATION,
            Self::MissingRequired => codes::violation::MISSING_REQUIRED,
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::TypeMismatch => "type mismatch",
            Self::RangeViolation => "range violation",
            Self::ShapeViolation => "shape violation",
            Self::DomainViolation => "domain violation",
            Self::ReferentialViolation => "referential violation",
            Self::MissingRequired => "missing required parameter",
        };
        f.write_str(label)
    }
}

/// A single failed rule for one parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub parameter: String,
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    pub fn new<P: Into<String>, M: Into<String>>(
        parameter: P,
        kind: ViolationKind,
        message: M,
    ) -> Self {
        Self {
            parameter: parameter.into(),
            kind,
            message: message.into(),
        }
    }

    pub fn type_mismatch<P: Into<String>, M: Into<String>>(parameter: P, message: M) -> Self {
        Self::new(parameter, ViolationKind::TypeMismatch, message)
    }

    pub fn range<P: Into<String>, M: Into<String>>(parameter: P, message: M) -> Self {
        Self::new(parameter, ViolationKind::RangeViolation, message)
    }

    pub fn shape<P: Into<String>, M: Into<String>>(parameter: P, message: M) -> Self {
        Self::new(parameter, ViolationKind::ShapeViolation, message)
    }

    pub fn domain<P: Into<String>, M: Into<String>>(parameter: P, message: M) -> Self {
        Self::new(parameter, ViolationKind::DomainViolation, message)
    }

    pub fn referential<P: Into<String>, M: Into<String>>(parameter: P, message: M) -> Self {
        Self::new(parameter, ViolationKind::ReferentialViolation, message)
    }

    pub fn missing<P: Into<String>>(parameter: P) -> Self {
        Self::new(
            parameter,
            ViolationKind::MissingRequired,
            "is required and has no default value",
        )
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{ERROR_TOKEN}: parameter '{}' {} ({})",
            neutralize(&self.parameter),
            neutralize(&self.message),
            self.kind
        )
    }
}

/// One rendered violation is one line holding one token: control characters
/// become spaces and embedded tokens are lowercased.
fn neutralize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .replace(ERROR_TOKEN, &ERROR_TOKEN.to_lowercase())
}
