//! Procedural macros for `struct_schema`

mod attr;
mod schema_type;

use proc_macro::TokenStream;

/// Derives `struct_schema::SchemaType` for a struct with named fields.
///
/// # Example
///
/// ```ignore
/// #[derive(SchemaType)]
/// #[serde(rename_all = "camelCase")]
/// struct Domain {
///     /// Some nested value
///     #[schema(required, min_length = 3, max_length = 10)]
///     data: String,
///
///     #[serde(skip_serializing_if = "Option::is_none")]
///     nullable_data: Option<String>,
///
///     #[schema(minimum = 0, exclusive_maximum = 100.5)]
///     ratio: f64,
///
///     #[serde(skip)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// Field keys accepted in `#[schema(...)]`:
/// - `rename = "..."`, `skip`, `omit_empty`, `required`, `description = "..."`
/// - validators: `min_length`, `max_length`, `pattern`, `enum_values = "a|b"`, `const_value`,
///   `multiple_of`, `minimum`, `maximum`, `exclusive_minimum`, `exclusive_maximum`
///
/// From `#[serde(...)]` the derive honors `rename`, `rename_all`, `skip`,
/// `skip_serializing` and `skip_serializing_if`. Doc comments become the
/// description when none is given.
#[proc_macro_derive(SchemaType, attributes(schema, serde))]
pub fn derive_schema_type(input: TokenStream) -> TokenStream {
    schema_type::derive_schema_type_impl(input)
}
