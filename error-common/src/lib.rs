//! Common error handling utilities for the Lindblad parameter engine
//!
//! This crate provides the vocabulary shared by every component that checks
//! or consumes a simulation parameter set: the violation taxonomy, stable
//! violation codes, and the error raised when an invalid parameter set is
//! escalated into a hard failure.
//!
//! # Violation Categories
//!
//! - **TypeMismatch**: the runtime type matches none of the accepted types
//! - **RangeViolation**: a numeric value outside its allowed domain
//! - **ShapeViolation**: wrong length, ragged rows, non-square matrices
//! - **DomainViolation**: a categorical value outside its alphabet
//! - **ReferentialViolation**: inconsistent with another parameter (usually `N`)
//! - **MissingRequired**: a parameter without a default was not supplied
//!
//! # Example
//!
//! ```rust
//! use error_common::{Violation, ViolationKind};
//!
//! let v = Violation::referential("2q_indices", "pair (3, 3) refers to the same site twice");
//! assert_eq!(v.kind, ViolationKind::ReferentialViolation);
//! assert!(v.to_string().starts_with("Error"));
//! ```

pub mod codes;
pub mod types;
pub mod violation;

pub use types::*;
pub use violation::*;
