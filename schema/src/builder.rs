//! Schema builder
//!
//! Recursively turns a [`TypeShape`] into a [`Property`] tree. Each node is
//! classified, made nullable, then dispatched on its structural kind. Records
//! are expanded inline; the walk tracks the records currently being expanded so
//! a self-referential type fails with [`Error::CyclicType`] instead of
//! recursing forever.

use error_stack::Report;

use crate::classify::{Classification, Classifier};
use crate::error::{Error, Result};
use crate::json_schema::{Annotation, JsonSchemaType, SKIP_MARKER, WILDCARD_KEY};
use crate::property::{Property, TypeSet};
use crate::shape::{FieldShape, ShapeKind, StructuralKind, TypeShape};
use crate::validators;

/// Default nesting limit for one generation call
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Builds property trees from type shapes
pub struct SchemaBuilder<'a> {
    classifier: &'a Classifier,
    max_depth:  usize,
    depth:      usize,
    expanding:  Vec<&'static str>,
}

impl<'a> SchemaBuilder<'a> {
    /// Create a builder over a classifier
    pub const fn new(classifier: &'a Classifier, max_depth: usize) -> Self {
        Self {
            classifier,
            max_depth,
            depth: 0,
            expanding: Vec::new(),
        }
    }

    /// Build a fresh node for a shape
    pub fn build(&mut self, shape: &TypeShape) -> Result<Property> {
        let mut property = Property::default();
        self.read(&mut property, shape)?;
        Ok(property)
    }

    /// Populate `property` in place for the given shape
    pub fn read(&mut self, property: &mut Property, shape: &TypeShape) -> Result<()> {
        if self.depth >= self.max_depth {
            tracing::warn!(
                "Schema depth limit {} reached at {}",
                self.max_depth,
                shape.type_name
            );
            return Err(Report::new(Error::DepthExceeded {
                type_name: shape.type_name.to_string(),
                max_depth: self.max_depth,
            }));
        }

        self.depth += 1;
        let result = self.read_classified(property, shape);
        self.depth -= 1;
        result
    }

    fn read_classified(&mut self, property: &mut Property, shape: &TypeShape) -> Result<()> {
        let classification = self.classifier.classify(shape);
        tracing::trace!(
            "Reading {} as {:?} ({:?})",
            shape.type_name,
            classification.kind,
            classification.token
        );

        if let Some(token) = classification.token {
            property.types.insert(token);
        }
        if let Some(format) = classification.format {
            property.format = Some(format.to_string());
        }
        property.types.insert(JsonSchemaType::Null);

        // Identity-table hits are leaves whatever their underlying shape
        if classification.format.is_some() {
            return Ok(());
        }

        match &shape.kind {
            ShapeKind::Sequence(element) => self.read_sequence(property, element)?,
            ShapeKind::Map(value) => self.read_map(property, value),
            ShapeKind::Record(fields) => self.read_record(property, shape.type_name, fields)?,
            ShapeKind::Nullable(referent) => {
                self.read(property, referent)?;
                let referent_class = self.classifier.classify(referent);
                if referent_class.is_primitive() {
                    rewrite_nullable_primitive(property, &referent_class);
                }
            }
            _ => {}
        }

        Ok(())
    }

    fn read_sequence(&mut self, property: &mut Property, element: &TypeShape) -> Result<()> {
        let element_class = self.classifier.classify(element);

        if element_class.kind == StructuralKind::Byte {
            property.types = TypeSet::of([JsonSchemaType::String, JsonSchemaType::Null]);
        } else if element_class.token.is_some() || element_class.kind == StructuralKind::Nullable {
            property.items = Some(Box::new(self.build(element)?));
        }

        Ok(())
    }

    fn read_map(&self, property: &mut Property, value: &TypeShape) {
        // Nullable values contribute their referent's token plus `null`
        let (value_class, nullable) = match &value.kind {
            ShapeKind::Nullable(referent) => (self.classify_referent(referent), true),
            _ => (self.classifier.classify(value), false),
        };

        property.additional_properties = Some(value_class.token.is_none());

        if let Some(token) = value_class.token {
            let mut entry = Property::of([token]);
            if nullable {
                entry.types.insert(JsonSchemaType::Null);
            }
            entry.format = value_class.format.map(str::to_string);
            property.properties.insert(WILDCARD_KEY.to_string(), entry);
        }
    }

    /// Classify through any further nullable wrappers
    fn classify_referent(&self, shape: &TypeShape) -> Classification<'a> {
        match &shape.kind {
            ShapeKind::Nullable(inner) => self.classify_referent(inner),
            _ => self.classifier.classify(shape),
        }
    }

    fn read_record(
        &mut self,
        property: &mut Property,
        type_name: &'static str,
        fields: &[FieldShape],
    ) -> Result<()> {
        if self.expanding.contains(&type_name) {
            tracing::warn!("Refusing to inline cyclic type {type_name}");
            return Err(Report::new(Error::CyclicType {
                type_name: type_name.to_string(),
            }));
        }

        property.types = TypeSet::of([JsonSchemaType::Object, JsonSchemaType::Null]);
        property.properties.clear();
        property.additional_properties = Some(false);

        self.expanding.push(type_name);
        let result = self.read_fields(property, fields);
        self.expanding.pop();
        result
    }

    fn read_fields(&mut self, property: &mut Property, fields: &[FieldShape]) -> Result<()> {
        for field in fields {
            let annotations = &field.annotations;

            let name = match annotations.get_non_empty(Annotation::Name) {
                Some(SKIP_MARKER) => {
                    tracing::debug!("Skipping field {}", field.ident);
                    continue;
                }
                Some(name) => name,
                None => field.ident,
            };

            let mut child = self.build(&(field.shape)())?;
            child.description = annotations
                .get_non_empty(Annotation::Description)
                .map(str::to_string);

            // A nullable scalar keeps its constraints on the non-null branch
            match child.any_of.first_mut() {
                Some(branch) => validators::apply(branch, annotations),
                None => validators::apply(&mut child, annotations),
            }

            property.properties.insert(name.to_string(), child);

            if annotations.contains(Annotation::Required)
                && !annotations.contains(Annotation::OmitEmpty)
            {
                property.required.push(name.to_string());
            }
        }

        Ok(())
    }
}

/// Replace `T | null` on a nullable scalar with `anyOf: [T, null]`
fn rewrite_nullable_primitive(property: &mut Property, referent: &Classification<'_>) {
    let mut branch = Property {
        types: property.types.without_null(),
        format: property.format.take(),
        ..Property::default()
    };
    if branch.types.is_empty() {
        branch.types = TypeSet::of(referent.token);
    }

    property.types = TypeSet::of([JsonSchemaType::Null]);
    property.any_of = vec![branch, Property::null()];
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests")]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use super::*;
    use crate::shape::{Annotations, SchemaType};

    fn build(shape: &TypeShape) -> Property {
        let classifier = Classifier::new();
        SchemaBuilder::new(&classifier, DEFAULT_MAX_DEPTH)
            .build(shape)
            .unwrap()
    }

    fn string_and_null() -> TypeSet { TypeSet::of([JsonSchemaType::String, JsonSchemaType::Null]) }

    #[test]
    fn test_primitives_are_nullable() {
        let cases = [
            (bool::shape(), JsonSchemaType::Boolean),
            (i8::shape(), JsonSchemaType::Integer),
            (u64::shape(), JsonSchemaType::Integer),
            (u8::shape(), JsonSchemaType::Integer),
            (f32::shape(), JsonSchemaType::Number),
            (String::shape(), JsonSchemaType::String),
        ];

        for (shape, token) in cases {
            assert_eq!(
                build(&shape),
                Property::of([token, JsonSchemaType::Null]),
                "{}",
                shape.type_name
            );
        }
    }

    #[test]
    fn test_untyped_is_only_null() {
        assert_eq!(build(&serde_json::Value::shape()), Property::null());
    }

    #[test]
    fn test_date_time_format() {
        let property = build(&chrono::DateTime::<chrono::Utc>::shape());
        assert_eq!(property.types, string_and_null());
        assert_eq!(property.format.as_deref(), Some("date-time"));
    }

    #[test]
    fn test_byte_sequence_is_string() {
        let property = build(&Vec::<u8>::shape());
        assert_eq!(property.types, string_and_null());
        assert_eq!(property.items, None);
    }

    #[test]
    fn test_sequence_items() {
        let property = build(&Vec::<String>::shape());
        assert_eq!(
            property.types,
            TypeSet::of([JsonSchemaType::Array, JsonSchemaType::Null])
        );
        assert_eq!(
            property.items.as_deref(),
            Some(&Property::of([JsonSchemaType::String, JsonSchemaType::Null]))
        );

        let untyped = build(&Vec::<serde_json::Value>::shape());
        assert_eq!(untyped.items, None);

        let nullable = build(&Vec::<Option<i32>>::shape());
        let items = nullable.items.unwrap();
        assert_eq!(items.types, TypeSet::of([JsonSchemaType::Null]));
        assert_eq!(items.any_of.len(), 2);
    }

    #[test]
    fn test_map_with_typed_values() {
        let property = build(&HashMap::<String, String>::shape());
        assert_eq!(
            property.types,
            TypeSet::of([JsonSchemaType::Object, JsonSchemaType::Null])
        );
        assert_eq!(property.additional_properties, Some(false));
        assert_eq!(
            property.properties.get(WILDCARD_KEY),
            Some(&Property::of([JsonSchemaType::String]))
        );
    }

    #[test]
    fn test_map_with_untyped_values() {
        let property = build(&BTreeMap::<String, serde_json::Value>::shape());
        assert_eq!(property.additional_properties, Some(true));
        assert!(property.properties.is_empty());
    }

    #[test]
    fn test_map_with_nullable_values() {
        let property = build(&HashMap::<String, Option<i64>>::shape());
        assert_eq!(property.additional_properties, Some(false));
        assert_eq!(
            property.properties.get(WILDCARD_KEY),
            Some(&Property::of([JsonSchemaType::Integer, JsonSchemaType::Null]))
        );
    }

    #[test]
    fn test_nullable_primitive_rewrite() {
        let property = build(&Option::<String>::shape());
        assert_eq!(property.types, TypeSet::of([JsonSchemaType::Null]));
        assert_eq!(
            property.any_of,
            vec![Property::of([JsonSchemaType::String]), Property::null()]
        );

        let timestamp = build(&Option::<chrono::DateTime<chrono::Utc>>::shape());
        assert_eq!(timestamp.format, None);
        assert_eq!(timestamp.any_of[0].format.as_deref(), Some("date-time"));
    }

    #[test]
    fn test_nullable_sequence_is_not_rewritten() {
        let property = build(&Option::<Vec<String>>::shape());
        assert_eq!(
            property.types,
            TypeSet::of([JsonSchemaType::Array, JsonSchemaType::Null])
        );
        assert!(property.any_of.is_empty());
        assert!(property.items.is_some());
    }

    fn item_record() -> TypeShape {
        TypeShape::record(
            "tests::Item",
            vec![FieldShape::new(
                "Foo",
                String::shape,
                Annotations::new(&[("required", "")]),
            )],
        )
    }

    fn tagged_record() -> TypeShape {
        TypeShape::record(
            "tests::Tagged",
            vec![
                FieldShape::new(
                    "Omitted",
                    String::shape,
                    Annotations::new(&[("name", "-"), ("required", "")]),
                ),
                FieldShape::new(
                    "Name",
                    String::shape,
                    Annotations::new(&[
                        ("name", "name"),
                        ("required", ""),
                        ("description", "Display name"),
                        ("minLength", "3"),
                    ]),
                ),
                FieldShape::new(
                    "Count",
                    i64::shape,
                    Annotations::new(&[("required", ""), ("omitempty", ""), ("min", "0")]),
                ),
                FieldShape::new("Item", item_record, Annotations::EMPTY),
                FieldShape::new(
                    "Nickname",
                    Option::<String>::shape,
                    Annotations::new(&[("maxLength", "8")]),
                ),
            ],
        )
    }

    #[test]
    fn test_record_fields() {
        let property = build(&tagged_record());

        assert_eq!(
            property.types,
            TypeSet::of([JsonSchemaType::Object, JsonSchemaType::Null])
        );
        assert_eq!(property.additional_properties, Some(false));
        assert_eq!(
            property.properties.keys().collect::<Vec<_>>(),
            vec!["name", "Count", "Item", "Nickname"]
        );
        assert_eq!(property.required, vec!["name"]);

        let name = &property.properties["name"];
        assert_eq!(name.description.as_deref(), Some("Display name"));
        assert_eq!(name.min_length, Some(3));

        let count = &property.properties["Count"];
        assert_eq!(count.minimum, Some(0.0));

        let item = &property.properties["Item"];
        assert_eq!(item.required, vec!["Foo"]);
        assert_eq!(item.additional_properties, Some(false));

        let nickname = &property.properties["Nickname"];
        assert_eq!(nickname.max_length, None);
        assert_eq!(nickname.any_of[0].max_length, Some(8));
    }

    fn node_record() -> TypeShape {
        TypeShape::record(
            "tests::Node",
            vec![FieldShape::new(
                "next",
                Option::<Box<Node>>::shape,
                Annotations::EMPTY,
            )],
        )
    }

    struct Node;

    impl SchemaType for Node {
        fn shape() -> TypeShape { node_record() }
    }

    #[test]
    fn test_cyclic_record_fails() {
        let classifier = Classifier::new();
        let report = SchemaBuilder::new(&classifier, DEFAULT_MAX_DEPTH)
            .build(&Node::shape())
            .unwrap_err();

        assert!(matches!(
            report.current_context(),
            Error::CyclicType { type_name } if type_name == "tests::Node"
        ));
    }

    #[test]
    fn test_repeated_sibling_records_are_inlined() {
        let shape = TypeShape::record(
            "tests::Pair",
            vec![
                FieldShape::new("left", item_record, Annotations::EMPTY),
                FieldShape::new("right", item_record, Annotations::EMPTY),
            ],
        );

        let property = build(&shape);
        assert_eq!(property.properties["left"], property.properties["right"]);
    }

    #[test]
    fn test_depth_limit() {
        let classifier = Classifier::new();
        let report = SchemaBuilder::new(&classifier, 2)
            .build(&Vec::<Vec<Vec<i32>>>::shape())
            .unwrap_err();

        assert!(matches!(
            report.current_context(),
            Error::DepthExceeded { max_depth: 2, .. }
        ));
    }
}
