//! `#[derive(FromContext)]`.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

use crate::fields::{has_flag, named_fields};

pub fn derive_from_context_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let root = root_type(input)?;

    let mut inits = Vec::new();
    for field in named_fields(input, "FromContext")? {
        let field_name = &field.ident;
        let field_type = &field.ty;
        if has_flag(&field.attrs, "from_context", "default")? {
            inits.push(quote! {
                #field_name: ::core::default::Default::default()
            });
        } else {
            inits.push(quote! {
                #field_name: <#field_type as crate::FromRef<#root>>::from_ref(ctx)
            });
        }
    }

    Ok(quote! {
        impl #impl_generics crate::FromRef<#root> for #name #ty_generics #where_clause {
            fn from_ref(ctx: &#root) -> Self {
                Self {
                    #(#inits),*
                }
            }
        }
    })
}

/// Reads `#[from_context(Context = "path::To::Root")]`, defaulting to `Context`.
fn root_type(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let mut root: Option<syn::Type> = None;
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("from_context")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("Context") {
                let value: syn::LitStr = meta.value()?.parse()?;
                root = Some(value.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `Context = \"...\"`"))
            }
        })?;
    }

    Ok(match root {
        Some(ty) => quote! { #ty },
        None => quote! { Context },
    })
}
