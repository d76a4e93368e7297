//! Type classifier
//!
//! Maps a [`TypeShape`] to its JSON schema vocabulary token, an optional format
//! hint, and the refined structural kind used for dispatch. The format table is
//! consulted first, by exact type identity; structural classification is the
//! fallback.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::json_schema::JsonSchemaType;
use crate::shape::{ShapeKind, StructuralKind, TypeShape};

/// Identity of the designated temporal instant type
pub const DATE_TIME: &str = "chrono::DateTime";
/// Identity of a calendar date without time
pub const DATE: &str = "chrono::NaiveDate";
/// Identity of a wall clock time without date
pub const TIME: &str = "chrono::NaiveTime";
/// Identity of a UUID
pub const UUID: &str = "uuid::Uuid";

/// Token and format assigned to a type identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatRule {
    /// Vocabulary token emitted for the type
    pub token:  JsonSchemaType,
    /// Value of the `format` keyword
    pub format: String,
}

impl FormatRule {
    /// Create a format rule
    pub fn new(token: JsonSchemaType, format: impl Into<String>) -> Self {
        Self {
            token,
            format: format.into(),
        }
    }

    /// Refined kind for a type matched by this rule
    const fn kind(&self) -> StructuralKind {
        match self.token {
            JsonSchemaType::Boolean => StructuralKind::Boolean,
            JsonSchemaType::Integer => StructuralKind::Integer,
            JsonSchemaType::Number => StructuralKind::Number,
            JsonSchemaType::String => StructuralKind::Text,
            JsonSchemaType::Array => StructuralKind::Sequence,
            JsonSchemaType::Object => StructuralKind::Record,
            JsonSchemaType::Null => StructuralKind::Unknown,
        }
    }
}

/// Built-in identity table
static DEFAULT_FORMATS: LazyLock<HashMap<&'static str, FormatRule>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    map.insert(
        DATE_TIME,
        FormatRule::new(JsonSchemaType::String, "date-time"),
    );
    map.insert(DATE, FormatRule::new(JsonSchemaType::String, "date"));
    map.insert(TIME, FormatRule::new(JsonSchemaType::String, "time"));
    map.insert(UUID, FormatRule::new(JsonSchemaType::String, "uuid"));
    map
});

/// Result of classifying one type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<'a> {
    /// Vocabulary token, `None` for untyped values and nullable references
    pub token:  Option<JsonSchemaType>,
    /// Format hint from the identity table
    pub format: Option<&'a str>,
    /// Refined structural kind
    pub kind:   StructuralKind,
}

impl Classification<'_> {
    /// Whether this is a scalar eligible for the nullable-reference rewrite
    pub fn is_primitive(&self) -> bool {
        self.kind.is_primitive() && self.token.is_some_and(JsonSchemaType::is_primitive)
    }
}

/// Classifier over an immutable identity table
#[derive(Debug, Clone)]
pub struct Classifier {
    formats: HashMap<&'static str, FormatRule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            formats: DEFAULT_FORMATS.clone(),
        }
    }
}

impl Classifier {
    /// Classifier with the built-in identity table
    pub fn new() -> Self { Self::default() }

    /// Add or replace the rule for a type identity
    #[must_use]
    pub fn with_format(mut self, type_name: &'static str, rule: FormatRule) -> Self {
        self.formats.insert(type_name, rule);
        self
    }

    /// Rule registered for a type identity
    pub fn format_rule(&self, type_name: &str) -> Option<&FormatRule> { self.formats.get(type_name) }

    /// Classify a shape
    pub fn classify(&self, shape: &TypeShape) -> Classification<'_> {
        if let Some(rule) = self.formats.get(shape.type_name) {
            return Classification {
                token:  Some(rule.token),
                format: Some(rule.format.as_str()),
                kind:   rule.kind(),
            };
        }

        let token = match shape.kind {
            ShapeKind::Boolean => Some(JsonSchemaType::Boolean),
            ShapeKind::Integer | ShapeKind::Byte => Some(JsonSchemaType::Integer),
            ShapeKind::Number => Some(JsonSchemaType::Number),
            ShapeKind::Text => Some(JsonSchemaType::String),
            ShapeKind::Sequence(_) => Some(JsonSchemaType::Array),
            ShapeKind::Map(_) | ShapeKind::Record(_) => Some(JsonSchemaType::Object),
            ShapeKind::Nullable(_) | ShapeKind::Opaque => None,
        };

        Classification {
            token,
            format: None,
            kind: shape.structural_kind(),
        }
    }
}
