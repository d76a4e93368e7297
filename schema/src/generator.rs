//! Generation entry points and configuration

use crate::builder::{DEFAULT_MAX_DEPTH, SchemaBuilder};
use crate::classify::{Classifier, FormatRule};
use crate::document::Document;
use crate::error::Result;
use crate::json_schema::{DEFAULT_SCHEMA, JsonSchemaType};
use crate::shape::{SchemaType, TypeShape};

/// Generation settings
///
/// Each call builds its own private tree, so one `Generator` can serve many
/// types, including from several threads.
#[derive(Debug, Clone)]
pub struct Generator {
    schema_uri: String,
    max_depth:  usize,
    classifier: Classifier,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            schema_uri: DEFAULT_SCHEMA.to_string(),
            max_depth:  DEFAULT_MAX_DEPTH,
            classifier: Classifier::default(),
        }
    }
}

impl Generator {
    /// Generator with default settings
    pub fn new() -> Self { Self::default() }

    /// Dialect URI for documents created by this generator
    #[must_use]
    pub fn with_schema_uri(mut self, schema_uri: impl Into<String>) -> Self {
        self.schema_uri = schema_uri.into();
        self
    }

    /// Nesting limit for one generation call
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Map a type identity to a token and format, ahead of structural rules
    #[must_use]
    pub fn with_format(
        mut self,
        type_name: &'static str,
        token: JsonSchemaType,
        format: impl Into<String>,
    ) -> Self {
        self.classifier = self
            .classifier
            .with_format(type_name, FormatRule::new(token, format));
        self
    }

    /// The classifier used by this generator
    pub const fn classifier(&self) -> &Classifier { &self.classifier }

    /// Fill a caller-owned document from a shape
    ///
    /// The document's `$schema` is only set when it is empty.
    pub fn read_into(&self, document: &mut Document, shape: &TypeShape) -> Result<()> {
        document.set_default_schema(&self.schema_uri);

        tracing::debug!("Generating schema for {}", shape.type_name);
        SchemaBuilder::new(&self.classifier, self.max_depth).read(&mut document.root, shape)
    }

    /// Build the schema document for `T`
    pub fn document<T: SchemaType + ?Sized>(&self) -> Result<Document> {
        let mut document = Document::default();
        self.read_into(&mut document, &T::shape())?;
        Ok(document)
    }

    /// Build the schema for `T` as pretty-printed JSON text
    pub fn generate<T: SchemaType + ?Sized>(&self) -> Result<String> {
        self.document::<T>()?.to_json()
    }
}

/// Build the schema for `T` as pretty-printed JSON text with default settings
pub fn generate<T: SchemaType + ?Sized>() -> Result<String> { Generator::default().generate::<T>() }

/// Build the schema document for `T` with default settings
pub fn document<T: SchemaType + ?Sized>() -> Result<Document> { Generator::default().document::<T>() }

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests")]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::Error;

    #[test]
    fn test_generate_scalar() {
        let expected = "{\n".to_string()
            + "    \"$schema\": \"http://json-schema.org/schema#\",\n"
            + "    \"type\": [\n"
            + "        \"integer\",\n"
            + "        \"null\"\n"
            + "    ]\n"
            + "}";
        assert_eq!(generate::<i32>().unwrap(), expected);
    }

    #[test]
    fn test_generate_top_level_sequence() {
        let document = document::<Vec<String>>().unwrap();
        assert_eq!(
            document.to_value().unwrap(),
            json!({
                "$schema": "http://json-schema.org/schema#",
                "type": ["array", "null"],
                "items": {"type": ["string", "null"]}
            })
        );
    }

    #[test]
    fn test_custom_schema_uri_and_format() {
        let generator = Generator::new()
            .with_schema_uri("https://json-schema.org/draft/2020-12/schema")
            .with_format("alloc::string::String", JsonSchemaType::String, "email");

        let document = generator.document::<String>().unwrap();
        assert_eq!(document.schema, "https://json-schema.org/draft/2020-12/schema");
        assert_eq!(document.root.format.as_deref(), Some("email"));
    }

    #[test]
    fn test_existing_schema_is_kept() {
        let mut document = Document::with_schema("urn:custom");
        Generator::new()
            .read_into(&mut document, &bool::shape())
            .unwrap();
        assert_eq!(document.schema, "urn:custom");
    }

    #[test]
    fn test_depth_limit_is_configurable() {
        let report = Generator::new()
            .with_max_depth(1)
            .document::<Vec<Vec<u32>>>()
            .unwrap_err();
        assert!(matches!(
            report.current_context(),
            Error::DepthExceeded { max_depth: 1, .. }
        ));
    }
}
