//! `SchemaType` implementations for std, chrono, uuid and `serde_json` types

use std::any::type_name;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use crate::classify::{DATE, DATE_TIME, TIME, UUID};
use crate::shape::{SchemaType, ShapeKind, TypeShape};

macro_rules! impl_scalar {
    ($kind:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl SchemaType for $ty {
                fn shape() -> TypeShape { TypeShape::new(type_name::<Self>(), ShapeKind::$kind) }
            }
        )+
    };
}

impl_scalar!(Boolean => bool);
impl_scalar!(Integer => i8, i16, i32, i64, i128, isize, u16, u32, u64, u128, usize);
impl_scalar!(Byte => u8);
impl_scalar!(Number => f32, f64);
impl_scalar!(Text => String, str, char);

impl SchemaType for Cow<'_, str> {
    fn shape() -> TypeShape { str::shape() }
}

macro_rules! impl_sequence {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl<T: SchemaType> SchemaType for $ty<T> {
                fn shape() -> TypeShape { TypeShape::sequence::<T>(type_name::<Self>()) }
            }
        )+
    };
}

impl_sequence!(Vec, VecDeque, BTreeSet);

impl<T: SchemaType, S> SchemaType for HashSet<T, S> {
    fn shape() -> TypeShape { TypeShape::sequence::<T>(type_name::<Self>()) }
}

impl<T: SchemaType> SchemaType for [T] {
    fn shape() -> TypeShape { TypeShape::sequence::<T>(type_name::<Self>()) }
}

impl<T: SchemaType, const N: usize> SchemaType for [T; N] {
    fn shape() -> TypeShape { TypeShape::sequence::<T>(type_name::<Self>()) }
}

impl<K, V: SchemaType, S> SchemaType for HashMap<K, V, S> {
    fn shape() -> TypeShape { TypeShape::map::<V>(type_name::<Self>()) }
}

impl<K, V: SchemaType> SchemaType for BTreeMap<K, V> {
    fn shape() -> TypeShape { TypeShape::map::<V>(type_name::<Self>()) }
}

impl<T: SchemaType> SchemaType for Option<T> {
    fn shape() -> TypeShape { TypeShape::nullable::<T>(type_name::<Self>()) }
}

// Smart pointers and references serialize as their referent
macro_rules! impl_transparent {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl<T: SchemaType + ?Sized> SchemaType for $ty<T> {
                fn shape() -> TypeShape { T::shape() }
            }
        )+
    };
}

impl_transparent!(Box, Rc, Arc);

impl<T: SchemaType + ?Sized> SchemaType for &T {
    fn shape() -> TypeShape { T::shape() }
}

impl SchemaType for serde_json::Value {
    fn shape() -> TypeShape { TypeShape::opaque(type_name::<Self>()) }
}

impl<Tz: chrono::TimeZone> SchemaType for chrono::DateTime<Tz> {
    fn shape() -> TypeShape { TypeShape::opaque(DATE_TIME) }
}

impl SchemaType for chrono::NaiveDate {
    fn shape() -> TypeShape { TypeShape::opaque(DATE) }
}

impl SchemaType for chrono::NaiveTime {
    fn shape() -> TypeShape { TypeShape::opaque(TIME) }
}

impl SchemaType for uuid::Uuid {
    fn shape() -> TypeShape { TypeShape::opaque(UUID) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::StructuralKind;

    #[test]
    fn test_scalar_kinds() {
        assert_eq!(bool::shape().structural_kind(), StructuralKind::Boolean);
        assert_eq!(i64::shape().structural_kind(), StructuralKind::Integer);
        assert_eq!(usize::shape().structural_kind(), StructuralKind::Integer);
        assert_eq!(u8::shape().structural_kind(), StructuralKind::Byte);
        assert_eq!(f32::shape().structural_kind(), StructuralKind::Number);
        assert_eq!(str::shape().structural_kind(), StructuralKind::Text);
        assert_eq!(
            Cow::<'static, str>::shape().structural_kind(),
            StructuralKind::Text
        );
    }

    #[test]
    fn test_collection_kinds() {
        assert_eq!(
            Vec::<String>::shape().structural_kind(),
            StructuralKind::Sequence
        );
        assert_eq!(
            <[u8; 4]>::shape().structural_kind(),
            StructuralKind::Sequence
        );
        assert_eq!(
            HashSet::<i32>::shape().structural_kind(),
            StructuralKind::Sequence
        );
        assert_eq!(
            BTreeMap::<String, f64>::shape().structural_kind(),
            StructuralKind::Map
        );
        assert_eq!(
            Option::<bool>::shape().structural_kind(),
            StructuralKind::Nullable
        );
    }

    #[test]
    fn test_wrappers_are_transparent() {
        let boxed = Box::<String>::shape();
        assert_eq!(boxed.type_name, String::shape().type_name);
        assert_eq!(Arc::<str>::shape().structural_kind(), StructuralKind::Text);
        assert_eq!(<&u32>::shape().structural_kind(), StructuralKind::Integer);
    }

    #[test]
    fn test_identity_types() {
        assert_eq!(
            chrono::DateTime::<chrono::Utc>::shape().type_name,
            DATE_TIME
        );
        assert_eq!(chrono::NaiveDate::shape().type_name, DATE);
        assert_eq!(uuid::Uuid::shape().type_name, UUID);
        assert_eq!(
            serde_json::Value::shape().structural_kind(),
            StructuralKind::Unknown
        );
    }
}
