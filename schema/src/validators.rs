//! Validator extraction from field annotations
//!
//! Every validator is optional. A missing or malformed annotation leaves the
//! validator unset; it never fails generation.

use std::str::FromStr;

use crate::json_schema::{Annotation, ENUM_DELIMITER, JsonSchemaType};
use crate::property::{ConstValue, Property};
use crate::shape::Annotations;

/// Apply the validators gated by the node's type tokens
///
/// String validators apply when the node accepts `string`; numeric validators
/// when it accepts `number` or `integer`.
pub fn apply(property: &mut Property, annotations: &Annotations) {
    let tokens: Vec<JsonSchemaType> = property.types.iter().collect();
    for token in tokens {
        match token {
            JsonSchemaType::String => apply_string(property, annotations),
            JsonSchemaType::Number | JsonSchemaType::Integer => {
                apply_numeric(property, annotations, token);
            }
            _ => {}
        }
    }
}

fn apply_string(property: &mut Property, annotations: &Annotations) {
    if let Some(min_length) = parse(annotations, Annotation::MinLength) {
        property.min_length = Some(min_length);
    }
    if let Some(max_length) = parse(annotations, Annotation::MaxLength) {
        property.max_length = Some(max_length);
    }
    if let Some(pattern) = annotations.get_non_empty(Annotation::Pattern) {
        property.pattern = Some(pattern.to_string());
    }
    if let Some(values) = annotations.get_non_empty(Annotation::Enum) {
        property.enum_values = values.split(ENUM_DELIMITER).map(str::to_string).collect();
    }
    if let Some(value) = annotations.get_non_empty(Annotation::Const) {
        property.const_value = Some(ConstValue::String(value.to_string()));
    }
}

fn apply_numeric(property: &mut Property, annotations: &Annotations, token: JsonSchemaType) {
    if let Some(value) = parse_finite(annotations, Annotation::MultipleOf) {
        property.multiple_of = Some(value);
    }
    if let Some(value) = parse_finite(annotations, Annotation::Minimum) {
        property.minimum = Some(value);
    }
    if let Some(value) = parse_finite(annotations, Annotation::Maximum) {
        property.maximum = Some(value);
    }
    if let Some(value) = parse_finite(annotations, Annotation::ExclusiveMinimum) {
        property.exclusive_minimum = Some(value);
    }
    if let Some(value) = parse_finite(annotations, Annotation::ExclusiveMaximum) {
        property.exclusive_maximum = Some(value);
    }

    let const_value = if token == JsonSchemaType::Number {
        parse_finite(annotations, Annotation::Const).map(ConstValue::Number)
    } else {
        parse(annotations, Annotation::Const).map(ConstValue::Integer)
    };
    if const_value.is_some() {
        property.const_value = const_value;
    }
}

/// Parse an annotation value, treating absence and malformed text alike
fn parse<T: FromStr>(annotations: &Annotations, key: Annotation) -> Option<T> {
    let raw = annotations.get(key)?;
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        tracing::debug!("Ignoring malformed {key} annotation: {raw:?}");
    }
    parsed
}

/// Parse a float annotation; `NaN` and infinities have no JSON form
fn parse_finite(annotations: &Annotations, key: Annotation) -> Option<f64> {
    let value: f64 = parse(annotations, key)?;
    if !value.is_finite() {
        tracing::debug!("Ignoring non-finite {key} annotation: {value}");
        return None;
    }
    Some(value)
}
