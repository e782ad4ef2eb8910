//! Structural classification of raw parameter values.
//!
//! Every rule dispatches on a [`Shape`] rather than poking at the JSON value
//! directly, so "scalar vs. sequence vs. matrix" decisions are made in one
//! place and the accept/reject behaviour stays exact: a boolean is never a
//! number, `5.0` is never an integer, and a sequence is a matrix only when
//! every entry is itself a sequence.

use serde_json::Value;

/// The structural class of a single parameter value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape<'a> {
    Null,
    Bool(bool),
    /// A number with an integral representation (`5`, `-3`)
    Integer(i128),
    /// Any other number (`5.0`, `1e-10`)
    Real(f64),
    Text(&'a str),
    /// A sequence none of whose entries is a sequence (includes `[]`)
    Vector(&'a [Value]),
    /// A non-empty sequence whose entries are all sequences
    Matrix(&'a [Value]),
    /// A sequence mixing sequences and non-sequences
    Mixed(&'a [Value]),
    Object,
}

impl<'a> Shape<'a> {
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Null => Shape::Null,
            Value::Bool(b) => Shape::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Shape::Integer(i128::from(i))
                } else if let Some(u) = n.as_u64() {
                    Shape::Integer(i128::from(u))
                } else {
                    Shape::Real(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Shape::Text(s),
            Value::Array(items) => {
                let nested = items.iter().filter(|v| v.is_array()).count();
                if nested == 0 {
                    Shape::Vector(items)
                } else if nested == items.len() {
                    Shape::Matrix(items)
                } else {
                    Shape::Mixed(items)
                }
            }
            Value::Object(_) => Shape::Object,
        }
    }

    /// The value as a real number, if it is numeric.
    pub fn as_real(&self) -> Option<f64> {
        match *self {
            #[allow(clippy::cast_precision_loss)]
            Shape::Integer(i) => Some(i as f64),
            Shape::Real(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i128> {
        match *self {
            Shape::Integer(i) => Some(i),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.as_real().is_some()
    }

    /// Short noun phrase used in violation messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Shape::Null => "null",
            Shape::Bool(_) => "a boolean",
            Shape::Integer(_) => "an integer",
            Shape::Real(_) => "a real number",
            Shape::Text(_) => "a string",
            Shape::Vector(_) => "a one-dimensional sequence",
            Shape::Matrix(_) => "a nested sequence",
            Shape::Mixed(_) => "a sequence mixing scalars and sequences",
            Shape::Object => "a mapping",
        }
    }
}
