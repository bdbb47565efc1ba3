//! The grape record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// A grape as stored and served.
///
/// Only `id` is interpreted here; every other field is carried through
/// untouched, flattened next to it on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Grape {
    /// Identifier. `0` asks the store to assign one.
    #[serde(default)]
    pub id: i32,
    /// Remaining attributes, in the order received.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Grape {
    /// Create a grape with no extra attributes.
    pub fn new(id: i32) -> Self {
        Self {
            id,
            attributes: Map::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Look up an attribute by name.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}
