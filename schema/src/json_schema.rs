//! JSON schema vocabulary
//!
//! This module provides the fixed JSON schema type names emitted in the `type`
//! keyword, and the annotation keys read from a field's annotation table.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString};

/// Dialect URI written to `$schema` when a document has none
pub const DEFAULT_SCHEMA: &str = "http://json-schema.org/schema#";

/// Synthetic property key meaning "every key of this map"
pub const WILDCARD_KEY: &str = ".*";

/// Naming annotation value that excludes a field from the schema
pub const SKIP_MARKER: &str = "-";

/// Delimiter between the allowed values of an `enum` annotation
pub const ENUM_DELIMITER: char = '|';

/// JSON schema type names for type schema generation
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    AsRefStr,
    Serialize,
    Deserialize,
    EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum JsonSchemaType {
    /// `object`
    Object,
    /// `array`
    Array,
    /// `string`
    String,
    /// `number`
    Number,
    /// `integer`
    Integer,
    /// `boolean`
    Boolean,
    /// `null`
    Null,
}

impl JsonSchemaType {
    /// Scalar tokens eligible for the nullable-reference `anyOf` rewrite
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            Self::Boolean | Self::Integer | Self::Number | Self::String
        )
    }

    /// Tokens that accept the numeric validators
    pub const fn is_numeric(self) -> bool { matches!(self, Self::Integer | Self::Number) }
}

impl From<JsonSchemaType> for Value {
    fn from(schema_type: JsonSchemaType) -> Self { Self::String(schema_type.as_ref().to_string()) }
}

/// Per-field annotation keys
///
/// These are the keys looked up in a field's [`Annotations`](crate::Annotations)
/// table. The derive macro writes exactly these strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumString)]
pub enum Annotation {
    /// Externally visible field name, or [`SKIP_MARKER`]
    #[strum(serialize = "name")]
    Name,
    /// Serializer omits the field when empty
    #[strum(serialize = "omitempty")]
    OmitEmpty,
    /// Field must be present
    #[strum(serialize = "required")]
    Required,
    /// Human readable description
    #[strum(serialize = "description")]
    Description,
    /// `minLength` string validator
    #[strum(serialize = "minLength")]
    MinLength,
    /// `maxLength` string validator
    #[strum(serialize = "maxLength")]
    MaxLength,
    /// `pattern` string validator
    #[strum(serialize = "pattern")]
    Pattern,
    /// `enum` string validator, values separated by [`ENUM_DELIMITER`]
    #[strum(serialize = "enum")]
    Enum,
    /// `const` validator, typed by the field's type token
    #[strum(serialize = "const")]
    Const,
    /// `multipleOf` numeric validator
    #[strum(serialize = "multipleOf")]
    MultipleOf,
    /// `minimum` numeric validator
    #[strum(serialize = "min")]
    Minimum,
    /// `maximum` numeric validator
    #[strum(serialize = "max")]
    Maximum,
    /// `exclusiveMinimum` numeric validator
    #[strum(serialize = "exclusiveMin")]
    ExclusiveMinimum,
    /// `exclusiveMaximum` numeric validator
    #[strum(serialize = "exclusiveMax")]
    ExclusiveMaximum,
}
