//! Field helpers shared by both derives.

use syn::punctuated::Punctuated;
use syn::token::Comma;
use syn::{Attribute, Data, DeriveInput, Field, Fields};

/// Returns the named fields of a struct, or a spanned error naming the derive.
pub fn named_fields<'a>(
    input: &'a DeriveInput,
    derive: &str,
) -> syn::Result<&'a Punctuated<Field, Comma>> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(&fields.named),
            _ => Err(syn::Error::new_spanned(
                input,
                format!("{derive} can only be derived for structs with named fields"),
            )),
        },
        _ => Err(syn::Error::new_spanned(
            input,
            format!("{derive} can only be derived for structs"),
        )),
    }
}

/// Checks for a bare flag inside `#[namespace(...)]`, e.g. `#[context(skip)]`.
pub fn has_flag(attrs: &[Attribute], namespace: &str, flag: &str) -> syn::Result<bool> {
    let mut found = false;
    for attr in attrs.iter().filter(|a| a.path().is_ident(namespace)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(flag) {
                found = true;
                Ok(())
            } else if meta.input.peek(syn::Token![=]) {
                // Key/value entries belong to other parsers; consume and move on.
                let _: syn::Expr = meta.value()?.parse()?;
                Ok(())
            } else {
                Err(meta.error(format!("unknown {namespace} attribute")))
            }
        })?;
    }
    Ok(found)
}
