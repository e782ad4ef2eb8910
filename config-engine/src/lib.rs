//! Parameter validation engine for the Lindblad spin-chain solver
//!
//! This crate checks a simulation parameter set against a fixed catalogue of
//! rules before anything is handed to the solver:
//! - Loading parameter sets from JSON or YAML sources
//! - Type, range, shape and cross-field checks for every recognised name
//! - A complete, ordered report of every violation in one pass
//! - Rendering a valid set, completed with defaults, into solver input
//!
//! # Example
//!
//! ```rust
//! use config_engine::{verify, ParameterSet};
//! use serde_json::json;
//!
//! let params = ParameterSet::new()
//!     .with("N", 5)
//!     .with("t_final", 20)
//!     .with("tau", 0.1)
//!     .with("h_x", json!([1.0, 1.0, 1.0, 1.0, 1.0]));
//! assert_eq!(verify(&params), "");
//!
//! let broken = params.with("b_periodic_x", 0);
//! assert!(verify(&broken).starts_with("Error"));
//! ```

pub mod config;
pub mod defaults;
pub mod error;
pub mod parameters;
pub mod providers;
pub mod report;
pub mod rules;
pub mod shape;
pub mod solver_input;
pub mod validation;

pub use config::{PairOrdering, ValidatorConfig};
pub use defaults::defaults;
pub use error::{ConfigError, Result};
pub use parameters::ParameterSet;
pub use providers::{ConfigProvider, SourceFormat, TextSource};
pub use report::ValidationReport;
pub use solver_input::SolverInput;
pub use validation::{verify, ConfigValidator, ParameterValidator};

// Violation taxonomy lives in error-common; re-exported for convenience
pub use error_common::{Violation, ViolationKind};
