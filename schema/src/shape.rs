//! Type descriptors
//!
//! A [`TypeShape`] is the static description of a Rust type that the schema
//! builder walks. Types expose it through [`SchemaType`], usually via
//! `#[derive(SchemaType)]`. Record fields carry a thunk instead of a nested
//! shape, so describing a self-referential type never recurses.

use crate::json_schema::Annotation;

/// Capability every schema-describable type exposes
pub trait SchemaType {
    /// Describe this type's shape
    fn shape() -> TypeShape;
}

/// Static description of one type
#[derive(Debug, Clone)]
pub struct TypeShape {
    /// Exact type identity, consulted by the format table and cycle detection
    pub type_name: &'static str,
    /// Structural kind driving dispatch
    pub kind:      ShapeKind,
}

/// Structural kind of a [`TypeShape`]
#[derive(Debug, Clone)]
pub enum ShapeKind {
    /// `bool`
    Boolean,
    /// Any integer width other than a byte
    Integer,
    /// `u8`, distinguished so byte sequences render as strings
    Byte,
    /// Any floating point width
    Number,
    /// Text
    Text,
    /// Homogeneous sequence of the element shape
    Sequence(Box<TypeShape>),
    /// Associative map with string keys and the given value shape
    Map(Box<TypeShape>),
    /// Composite record with named fields in declaration order
    Record(Vec<FieldShape>),
    /// Explicit optional wrapper around the referent shape
    Nullable(Box<TypeShape>),
    /// Untyped value, or a type known only by its identity
    Opaque,
}

/// Fieldless mirror of [`ShapeKind`] returned by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralKind {
    /// `bool`
    Boolean,
    /// Integer other than a byte
    Integer,
    /// `u8`
    Byte,
    /// Floating point
    Number,
    /// Text
    Text,
    /// Sequence
    Sequence,
    /// Associative map
    Map,
    /// Composite record
    Record,
    /// Nullable reference
    Nullable,
    /// Untyped / unknown
    Unknown,
}

impl StructuralKind {
    /// Scalar kinds eligible for the nullable-reference `anyOf` rewrite
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            Self::Boolean | Self::Integer | Self::Byte | Self::Number | Self::Text
        )
    }
}

impl TypeShape {
    /// Create a shape for the given identity and kind
    pub const fn new(type_name: &'static str, kind: ShapeKind) -> Self { Self { type_name, kind } }

    /// Shape of a sequence of `T`
    pub fn sequence<T: SchemaType + ?Sized>(type_name: &'static str) -> Self {
        Self::new(type_name, ShapeKind::Sequence(Box::new(T::shape())))
    }

    /// Shape of a map whose values are `V`
    pub fn map<V: SchemaType + ?Sized>(type_name: &'static str) -> Self {
        Self::new(type_name, ShapeKind::Map(Box::new(V::shape())))
    }

    /// Shape of an optional `T`
    pub fn nullable<T: SchemaType + ?Sized>(type_name: &'static str) -> Self {
        Self::new(type_name, ShapeKind::Nullable(Box::new(T::shape())))
    }

    /// Shape of a record with the given fields
    pub const fn record(type_name: &'static str, fields: Vec<FieldShape>) -> Self {
        Self::new(type_name, ShapeKind::Record(fields))
    }

    /// Shape known only by its identity
    pub const fn opaque(type_name: &'static str) -> Self { Self::new(type_name, ShapeKind::Opaque) }

    /// The fieldless kind of this shape
    pub const fn structural_kind(&self) -> StructuralKind {
        match self.kind {
            ShapeKind::Boolean => StructuralKind::Boolean,
            ShapeKind::Integer => StructuralKind::Integer,
            ShapeKind::Byte => StructuralKind::Byte,
            ShapeKind::Number => StructuralKind::Number,
            ShapeKind::Text => StructuralKind::Text,
            ShapeKind::Sequence(_) => StructuralKind::Sequence,
            ShapeKind::Map(_) => StructuralKind::Map,
            ShapeKind::Record(_) => StructuralKind::Record,
            ShapeKind::Nullable(_) => StructuralKind::Nullable,
            ShapeKind::Opaque => StructuralKind::Unknown,
        }
    }
}

/// One named field of a record
#[derive(Debug, Clone)]
pub struct FieldShape {
    /// Declared identifier
    pub ident:       &'static str,
    /// Deferred shape of the field's type
    pub shape:       fn() -> TypeShape,
    /// Annotation lookup for this field
    pub annotations: Annotations,
}

impl FieldShape {
    /// Create a field description
    pub const fn new(
        ident: &'static str,
        shape: fn() -> TypeShape,
        annotations: Annotations,
    ) -> Self {
        Self {
            ident,
            shape,
            annotations,
        }
    }
}

/// Key/value annotation table attached to a field
///
/// Values are kept verbatim; interpretation happens during generation so a
/// malformed value only disables the validator it belongs to.
#[derive(Debug, Clone, Copy, Default)]
pub struct Annotations {
    entries: &'static [(&'static str, &'static str)],
}

impl Annotations {
    /// Table with no annotations
    pub const EMPTY: Self = Self { entries: &[] };

    /// Wrap a static key/value table
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self { Self { entries } }

    /// Look up an annotation value by key
    pub fn get(&self, key: Annotation) -> Option<&'static str> {
        let key = key.as_ref();
        self.entries
            .iter()
            .find_map(|(k, v)| (*k == key).then_some(*v))
    }

    /// Whether the annotation is present at all
    pub fn contains(&self, key: Annotation) -> bool { self.get(key).is_some() }

    /// Look up a non-empty annotation value
    pub fn get_non_empty(&self, key: Annotation) -> Option<&'static str> {
        self.get(key).filter(|value| !value.is_empty())
    }
}
