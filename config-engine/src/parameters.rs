//! The parameter mapping handed to the validator.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::btree_map::{self, BTreeMap};

use crate::error::{ConfigError, Result};
use crate::providers::{ConfigProvider, TextSource};

/// A mapping from parameter name to a raw, heterogeneously typed value.
///
/// Key order carries no meaning; the map is ordered only so that debug
/// output and serialized documents are stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    values: BTreeMap<String, Value>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with<K: Into<String>, V: Into<Value>>(mut self, name: K, value: V) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, name: K, value: V) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.values.iter()
    }

    /// Build from a JSON object value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SchemaMismatch`] when the value is not an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(ConfigError::SchemaMismatch(format!(
                "parameters must be a mapping of names to values, got {}",
                crate::shape::Shape::of(&other).describe()
            ))),
        }
    }

    /// Load from any provider.
    ///
    /// # Errors
    ///
    /// Propagates provider parse errors and rejects non-mapping documents.
    pub fn load(provider: &dyn ConfigProvider) -> Result<Self> {
        Self::from_value(provider.load()?)
    }

    /// # Errors
    ///
    /// Fails when the text is not a JSON object.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::load(&TextSource::json(text))
    }

    /// # Errors
    ///
    /// Fails when the text is not a YAML mapping.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Self::load(&TextSource::yaml(text))
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone().into_iter().collect())
    }
}

impl FromIterator<(String, Value)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl Extend<(String, Value)> for ParameterSet {
    fn extend<I: IntoIterator<Item = (String, Value)>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl From<BTreeMap<String, Value>> for ParameterSet {
    fn from(values: BTreeMap<String, Value>) -> Self {
        Self { values }
    }
}
