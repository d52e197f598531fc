use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::embedding::Embedding;

/// Reserved part id for virtual parts built from free text. Never persisted.
pub const VIRTUAL_PART_ID: &str = "NEW_PART";

/// A single spec attribute: an untyped value plus its unit.
///
/// Values are stored untyped; whether a value is numeric is decided at
/// comparison time by attempting a numeric read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpecValue {
    pub value: Value,
    #[serde(default)]
    pub unit: String,
}

impl SpecValue {
    #[must_use]
    pub fn new(value: impl Into<Value>, unit: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            unit: unit.into(),
        }
    }

    /// Read the value as a number, if it is one.
    ///
    /// Accepts JSON numbers and strings that parse as `f64`; everything else
    /// is treated as categorical.
    pub fn as_number(&self) -> Option<f64> {
        match &self.value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Render the raw value for explanation strings.
    pub fn display_value(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// A catalog part with its specs, assembly memberships, and optional embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub part_id: String,
    pub name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub assemblies: Vec<String>,
    #[serde(default)]
    pub specs: AHashMap<String, SpecValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Embedding>,
}

impl Part {
    #[must_use]
    pub fn new(
        part_id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            part_id: part_id.into(),
            name: name.into(),
            category: category.into(),
            description: None,
            assemblies: Vec::new(),
            specs: AHashMap::new(),
            embedding: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_assembly(mut self, assembly: impl Into<String>) -> Self {
        self.assemblies.push(assembly.into());
        self
    }

    #[must_use]
    pub fn with_spec(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
        unit: impl Into<String>,
    ) -> Self {
        self.specs.insert(key.into(), SpecValue::new(value, unit));
        self
    }

    #[must_use]
    pub fn with_embedding(mut self, embedding: Embedding) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Whether this is a transient virtual part rather than a stored one.
    #[inline]
    pub fn is_virtual(&self) -> bool {
        self.part_id == VIRTUAL_PART_ID
    }
}
