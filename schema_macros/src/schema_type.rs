//! Implementation of the `SchemaType` derive

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Field, Fields, GenericParam, Generics, parse_macro_input, parse_quote};

use crate::attr::{ContainerAttrs, FieldAttrs, RenameRule};

pub fn derive_schema_type_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(error) => error.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "SchemaType can only be derived for structs with named fields",
                ));
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "SchemaType can only be derived for structs",
            ));
        }
    };

    let container = ContainerAttrs::from_attrs(&input.attrs)?;
    let field_shapes = fields
        .iter()
        .map(|field| field_shape(field, container.rename_all))
        .collect::<syn::Result<Vec<_>>>()?;

    let generics = add_trait_bounds(input.generics.clone());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::struct_schema::SchemaType for #name #ty_generics #where_clause {
            fn shape() -> ::struct_schema::TypeShape {
                ::struct_schema::TypeShape::record(
                    ::std::any::type_name::<Self>(),
                    ::std::vec![#(#field_shapes),*],
                )
            }
        }
    })
}

fn add_trait_bounds(mut generics: Generics) -> Generics {
    for param in &mut generics.params {
        if let GenericParam::Type(type_param) = param {
            type_param
                .bounds
                .push(parse_quote!(::struct_schema::SchemaType));
        }
    }
    generics
}

/// Generate one `FieldShape` expression
fn field_shape(field: &Field, rename_all: Option<RenameRule>) -> syn::Result<TokenStream2> {
    let Some(ident) = &field.ident else {
        return Err(syn::Error::new_spanned(field, "expected a named field"));
    };
    let ident_str = ident.unraw().to_string();
    let ty = &field.ty;
    let attrs = FieldAttrs::from_attrs(&field.attrs)?;

    // Skipped fields never have their type inspected, so they need no impl
    if attrs.skip {
        return Ok(quote! {
            ::struct_schema::FieldShape::new(
                #ident_str,
                || ::struct_schema::TypeShape::opaque(::std::stringify!(#ty)),
                ::struct_schema::Annotations::new(&[("name", "-")]),
            )
        });
    }

    let entries = annotation_entries(&ident_str, &attrs, rename_all);
    let entries = entries.iter().map(|(key, value)| quote! { (#key, #value) });

    Ok(quote! {
        ::struct_schema::FieldShape::new(
            #ident_str,
            <#ty as ::struct_schema::SchemaType>::shape,
            ::struct_schema::Annotations::new(&[#(#entries),*]),
        )
    })
}

/// Annotation table for a non-skipped field
fn annotation_entries(
    ident: &str,
    attrs: &FieldAttrs,
    rename_all: Option<RenameRule>,
) -> Vec<(String, String)> {
    let mut entries = Vec::new();

    let name = attrs
        .rename
        .clone()
        .or_else(|| rename_all.map(|rule| rule.apply(ident)));
    if let Some(name) = name {
        entries.push(("name".to_string(), name));
    }
    if attrs.omit_empty {
        entries.push(("omitempty".to_string(), String::new()));
    }
    if attrs.required {
        entries.push(("required".to_string(), String::new()));
    }
    if let Some(description) = &attrs.description {
        entries.push(("description".to_string(), description.clone()));
    }
    entries.extend(
        attrs
            .validators
            .iter()
            .map(|(key, value)| ((*key).to_string(), value.clone())),
    );

    entries
}
