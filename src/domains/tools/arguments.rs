//! Arguments that have passed schema validation.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::HandlerFault;

/// Argument map whose values satisfy the owning tool's schema.
///
/// Only [`ToolSchema::validate`](super::schema::ToolSchema::validate) builds
/// these, so handlers can rely on declared types, bounds and defaults. Keys
/// not declared by the schema are dropped during validation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidatedArguments {
    values: Map<String, Value>,
}

impl ValidatedArguments {
    pub(crate) fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Raw JSON value of a parameter.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }

    pub fn f64(&self, name: &str) -> Option<f64> {
        self.values.get(name).and_then(Value::as_f64)
    }

    pub fn i64(&self, name: &str) -> Option<i64> {
        self.values.get(name).and_then(Value::as_i64)
    }

    /// Deserialize into a typed parameter struct.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, HandlerFault> {
        serde_json::from_value(Value::Object(self.values.clone()))
            .map_err(|e| HandlerFault::invalid_input(format!("Invalid arguments: {}", e)))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Compact JSON rendering, used as the default fault subject.
impl fmt::Display for ValidatedArguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.values) {
            Ok(s) => f.write_str(&s),
            Err(_) => f.write_str("{}"),
        }
    }
}
