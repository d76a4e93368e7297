//! Attribute parsing for the `SchemaType` derive
//!
//! Reads `#[schema(...)]`, the naming subset of `#[serde(...)]`, and doc
//! comments into plain values; codegen turns them into an annotation table.

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase,
    ToUpperCamelCase,
};
use syn::meta::ParseNestedMeta;
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, ExprLit, ExprUnary, Lit, LitBool, LitStr, Meta, Token, UnOp};

/// Attribute key to annotation key for the validators
const VALIDATOR_KEYS: &[(&str, &str)] = &[
    ("min_length", "minLength"),
    ("max_length", "maxLength"),
    ("pattern", "pattern"),
    ("enum_values", "enum"),
    ("const_value", "const"),
    ("multiple_of", "multipleOf"),
    ("minimum", "min"),
    ("maximum", "max"),
    ("exclusive_minimum", "exclusiveMin"),
    ("exclusive_maximum", "exclusiveMax"),
];

/// Case conversion applied to field names without an explicit rename
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    LowerCase,
    UpperCase,
    PascalCase,
    CamelCase,
    SnakeCase,
    ScreamingSnakeCase,
    KebabCase,
    ScreamingKebabCase,
}

impl RenameRule {
    fn parse(s: &LitStr) -> syn::Result<Self> {
        match s.value().as_str() {
            "lowercase" => Ok(Self::LowerCase),
            "UPPERCASE" => Ok(Self::UpperCase),
            "PascalCase" => Ok(Self::PascalCase),
            "camelCase" => Ok(Self::CamelCase),
            "snake_case" => Ok(Self::SnakeCase),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnakeCase),
            "kebab-case" => Ok(Self::KebabCase),
            "SCREAMING-KEBAB-CASE" => Ok(Self::ScreamingKebabCase),
            other => Err(syn::Error::new_spanned(
                s,
                format!("unknown rename rule `{other}`"),
            )),
        }
    }

    pub fn apply(self, name: &str) -> String {
        match self {
            Self::LowerCase => name.to_lowercase(),
            Self::UpperCase => name.to_uppercase(),
            Self::PascalCase => name.to_upper_camel_case(),
            Self::CamelCase => name.to_lower_camel_case(),
            Self::SnakeCase => name.to_snake_case(),
            Self::ScreamingSnakeCase => name.to_shouty_snake_case(),
            Self::KebabCase => name.to_kebab_case(),
            Self::ScreamingKebabCase => name.to_shouty_kebab_case(),
        }
    }
}

/// Container-level attributes
#[derive(Debug, Default)]
pub struct ContainerAttrs {
    pub rename_all: Option<RenameRule>,
}

impl ContainerAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if attr.path().is_ident("schema") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename_all") {
                        result.rename_all = Some(RenameRule::parse(&meta.value()?.parse()?)?);
                        Ok(())
                    } else {
                        Err(meta.error("unsupported schema container attribute"))
                    }
                })?;
            } else if attr.path().is_ident("serde") {
                for meta in serde_metas(attr)? {
                    if let Meta::NameValue(nv) = &meta
                        && nv.path.is_ident("rename_all")
                    {
                        result.rename_all = Some(RenameRule::parse(&expr_lit_str(&nv.value)?)?);
                    }
                }
            }
        }

        Ok(result)
    }
}

/// Field-level attributes
#[derive(Debug, Default)]
pub struct FieldAttrs {
    pub rename:      Option<String>,
    pub skip:        bool,
    pub omit_empty:  bool,
    pub required:    bool,
    pub description: Option<String>,
    /// Annotation key and verbatim value, in attribute order
    pub validators:  Vec<(&'static str, String)>,
}

impl FieldAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();
        let mut doc_lines = Vec::new();

        for attr in attrs {
            if attr.path().is_ident("schema") {
                attr.parse_nested_meta(|meta| result.parse_schema_meta(&meta))?;
            } else if attr.path().is_ident("serde") {
                for meta in serde_metas(attr)? {
                    result.apply_serde_meta(&meta)?;
                }
            } else if attr.path().is_ident("doc")
                && let Meta::NameValue(nv) = &attr.meta
                && let Ok(line) = expr_lit_str(&nv.value)
            {
                doc_lines.push(line.value());
            }
        }

        if result.description.is_none() {
            result.description = join_doc_lines(&doc_lines);
        }

        Ok(result)
    }

    fn parse_schema_meta(&mut self, meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
        if meta.path.is_ident("rename") {
            let s: LitStr = meta.value()?.parse()?;
            self.rename = Some(s.value());
        } else if meta.path.is_ident("skip") {
            self.skip = true;
        } else if meta.path.is_ident("omit_empty") {
            self.omit_empty = true;
        } else if meta.path.is_ident("required") {
            self.required = if meta.input.peek(Token![=]) {
                let b: LitBool = meta.value()?.parse()?;
                b.value
            } else {
                true
            };
        } else if meta.path.is_ident("description") {
            let s: LitStr = meta.value()?.parse()?;
            self.description = Some(s.value());
        } else if let Some(&(_, key)) = VALIDATOR_KEYS
            .iter()
            .find(|(attr_key, _)| meta.path.is_ident(attr_key))
        {
            let value: Expr = meta.value()?.parse()?;
            self.validators.push((key, literal_text(&value)?));
        } else {
            return Err(meta.error("unsupported schema attribute"));
        }
        Ok(())
    }

    fn apply_serde_meta(&mut self, meta: &Meta) -> syn::Result<()> {
        match meta {
            Meta::Path(path) if path.is_ident("skip") || path.is_ident("skip_serializing") => {
                self.skip = true;
            }
            Meta::Path(path) if path.is_ident("flatten") => {
                return Err(syn::Error::new_spanned(
                    path,
                    "SchemaType does not support `serde(flatten)`",
                ));
            }
            Meta::NameValue(nv) if nv.path.is_ident("rename") && self.rename.is_none() => {
                self.rename = Some(expr_lit_str(&nv.value)?.value());
            }
            Meta::NameValue(nv) if nv.path.is_ident("skip_serializing_if") => {
                self.omit_empty = true;
            }
            Meta::List(list) if list.path.is_ident("rename") && self.rename.is_none() => {
                list.parse_nested_meta(|nested| {
                    let value: LitStr = nested.value()?.parse()?;
                    if nested.path.is_ident("serialize") {
                        self.rename = Some(value.value());
                    }
                    Ok(())
                })?;
            }
            _ => {}
        }
        Ok(())
    }
}

/// Parse a `#[serde(...)]` attribute into its comma separated items
fn serde_metas(attr: &Attribute) -> syn::Result<Punctuated<Meta, Token![,]>> {
    attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
}

fn expr_lit_str(expr: &Expr) -> syn::Result<LitStr> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s.clone()),
        _ => Err(syn::Error::new_spanned(expr, "expected a string literal")),
    }
}

/// Verbatim text of a literal, including a leading minus sign
fn literal_text(expr: &Expr) -> syn::Result<String> {
    match expr {
        Expr::Lit(ExprLit { lit, .. }) => match lit {
            Lit::Str(s) => Ok(s.value()),
            Lit::Int(i) => Ok(i.base10_digits().to_string()),
            Lit::Float(f) => Ok(f.base10_digits().to_string()),
            Lit::Bool(b) => Ok(b.value.to_string()),
            _ => Err(syn::Error::new_spanned(expr, "unsupported literal")),
        },
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr: inner,
            ..
        }) => Ok(format!("-{}", literal_text(inner)?)),
        _ => Err(syn::Error::new_spanned(expr, "expected a literal")),
    }
}

/// Doc comment lines joined into one description, blank edges removed
fn join_doc_lines(lines: &[String]) -> Option<String> {
    let text = lines
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join("\n");
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
