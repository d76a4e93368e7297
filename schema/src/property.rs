//! Schema node model
//!
//! A [`Property`] is one node of the output tree: the document root, a record
//! field, an array's items, or a map's wildcard entry. Field order here is the
//! key order of the serialized JSON.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::json_schema::JsonSchemaType;

/// Ordered set of vocabulary tokens
///
/// `null` is kept last so a nullable node always reads `[concrete, "null"]`.
/// A single token serializes as a bare string, several as an array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeSet(Vec<JsonSchemaType>);

impl TypeSet {
    /// Set holding exactly the given tokens, deduplicated
    pub fn of(tokens: impl IntoIterator<Item = JsonSchemaType>) -> Self {
        let mut set = Self::default();
        for token in tokens {
            set.insert(token);
        }
        set
    }

    /// Insert a token, keeping `null` last and ignoring duplicates
    pub fn insert(&mut self, token: JsonSchemaType) {
        if self.contains(token) {
            return;
        }
        match self.0.iter().position(|t| *t == JsonSchemaType::Null) {
            Some(null_at) if token != JsonSchemaType::Null => self.0.insert(null_at, token),
            _ => self.0.push(token),
        }
    }

    /// Whether the token is present
    pub fn contains(&self, token: JsonSchemaType) -> bool { self.0.contains(&token) }

    /// Whether no token is present
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Tokens in order
    pub fn iter(&self) -> impl Iterator<Item = JsonSchemaType> + '_ { self.0.iter().copied() }

    /// The set without its `null` token
    pub fn without_null(&self) -> Self {
        Self(
            self.iter()
                .filter(|token| *token != JsonSchemaType::Null)
                .collect(),
        )
    }
}

impl Serialize for TypeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.as_slice() {
            [single] => single.serialize(serializer),
            tokens => tokens.serialize(serializer),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TypeSetRepr {
    One(JsonSchemaType),
    Many(Vec<JsonSchemaType>),
}

impl<'de> Deserialize<'de> for TypeSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match TypeSetRepr::deserialize(deserializer)? {
            TypeSetRepr::One(token) => Self(vec![token]),
            TypeSetRepr::Many(tokens) => Self(tokens),
        })
    }
}

/// Literal value of the `const` keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstValue {
    /// Integer literal
    Integer(i64),
    /// Floating point literal
    Number(f64),
    /// String literal
    String(String),
}

/// One node of the schema tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Vocabulary tokens accepted at this node
    #[serde(rename = "type", default, skip_serializing_if = "TypeSet::is_empty")]
    pub types:                 TypeSet,
    /// Refinement of the type, e.g. `date-time`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format:                Option<String>,
    /// Element schema of an array
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items:                 Option<Box<Property>>,
    /// Named children of a record, or the wildcard entry of a map
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties:            IndexMap<String, Property>,
    /// Names of fields that must be present, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required:              Vec<String>,
    /// Whether keys beyond `properties` are accepted; set on object nodes only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<bool>,
    /// Human readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description:           Option<String>,
    /// Alternatives; used for nullable references to scalars
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub any_of:                Vec<Property>,

    /// `multipleOf` numeric validator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_of:       Option<f64>,
    /// `maximum` numeric validator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum:           Option<f64>,
    /// `minimum` numeric validator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum:           Option<f64>,
    /// `exclusiveMaximum` numeric validator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<f64>,
    /// `exclusiveMinimum` numeric validator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<f64>,

    /// `maxLength` string validator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    /// `minLength` string validator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// `pattern` string validator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern:    Option<String>,
    /// Allowed string values
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,

    /// Single allowed value, typed to match the node's type
    #[serde(rename = "const", default, skip_serializing_if = "Option::is_none")]
    pub const_value: Option<ConstValue>,
}

impl Property {
    /// Node accepting exactly the given tokens
    pub fn of(tokens: impl IntoIterator<Item = JsonSchemaType>) -> Self {
        Self {
            types: TypeSet::of(tokens),
            ..Self::default()
        }
    }

    /// Node accepting only `null`
    pub fn null() -> Self { Self::of([JsonSchemaType::Null]) }
}
