//! Top-level schema document

use error_stack::Report;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use crate::error::{Error, Result};
use crate::json_schema::DEFAULT_SCHEMA;
use crate::property::Property;

const INDENT: &[u8] = b"    ";

/// A generated schema: the dialect URI plus the root node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Dialect URI written as `$schema`
    #[serde(rename = "$schema", default, skip_serializing_if = "String::is_empty")]
    pub schema: String,
    /// Root node, flattened into the document object
    #[serde(flatten)]
    pub root:   Property,
}

impl Document {
    /// Empty document with the given dialect URI
    pub fn with_schema(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            root:   Property::default(),
        }
    }

    /// Set the dialect URI unless one is already present
    pub fn set_default_schema(&mut self, schema: &str) {
        if self.schema.is_empty() {
            self.schema = schema.to_string();
        }
    }

    /// Set the standard dialect URI unless one is already present
    pub fn ensure_schema(&mut self) { self.set_default_schema(DEFAULT_SCHEMA); }

    /// Pretty-printed JSON with 4-space indentation
    pub fn to_json(&self) -> Result<String> {
        let mut buffer = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
        self.serialize(&mut serializer)
            .map_err(|e| Report::new(Error::serialization_failed("schema document", e)))?;

        String::from_utf8(buffer)
            .map_err(|e| Report::new(Error::serialization_failed("schema document", e)))
    }

    /// Compact JSON value of the document
    pub fn to_value(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self)
            .map_err(|e| Report::new(Error::serialization_failed("schema document", e)))
    }

    /// Read a document back from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| Report::new(Error::deserialization_failed("schema document", e)))
    }
}
