//! Derive macro for error enums.
//!
//! Generates `std::fmt::Display` and `std::error::Error` implementations
//! from per-variant `#[error("...")]` messages.
//!
//! # Usage
//!
//! ```ignore
//! use intcode_derive::Error;
//!
//! #[derive(Debug, Error)]
//! pub enum MachineError {
//!     #[error("unknown opcode {opcode} at ip {ip}")]
//!     UnknownOpcode { opcode: i64, ip: usize },
//!
//!     #[error("bad token: {0}")]
//!     BadToken(String),
//!
//!     #[error("machine halted")]
//!     Halted,
//! }
//! ```
//!
//! Only the fields a message actually names are bound, so variants may carry
//! context that is not rendered.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Fields, Lit, Meta, Variant, parse_macro_input};

pub fn derive_error(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Error derive only supports enums",
        ));
    };

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let arms = data
        .variants
        .iter()
        .map(display_arm)
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(quote! {
        impl #impl_generics ::std::fmt::Display for #name #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    #(#arms)*
                }
            }
        }

        impl #impl_generics ::std::error::Error for #name #ty_generics #where_clause {}
    })
}

/// Builds the `match` arm rendering one variant.
fn display_arm(variant: &Variant) -> syn::Result<TokenStream2> {
    let ident = &variant.ident;
    let message = message(&variant.attrs, variant)?;

    let arm = match &variant.fields {
        Fields::Unit => quote! {
            Self::#ident => write!(f, #message),
        },
        Fields::Named(fields) => {
            let used: Vec<_> = fields
                .named
                .iter()
                .filter_map(|field| field.ident.as_ref())
                .filter(|field| mentions(&message, &field.to_string()))
                .collect();
            quote! {
                Self::#ident { #(#used,)* .. } => write!(f, #message, #(#used = #used),*),
            }
        }
        Fields::Unnamed(fields) => {
            let mut format = message.clone();
            let mut bindings = Vec::with_capacity(fields.unnamed.len());
            let mut used = Vec::new();
            for index in 0..fields.unnamed.len() {
                let position = index.to_string();
                if mentions(&message, &position) {
                    let binding = format_ident!("f{}", index);
                    format = format
                        .replace(&format!("{{{position}}}"), &format!("{{{binding}}}"))
                        .replace(&format!("{{{position}:"), &format!("{{{binding}:"));
                    bindings.push(quote!(#binding));
                    used.push(binding);
                } else {
                    bindings.push(quote!(_));
                }
            }
            quote! {
                Self::#ident(#(#bindings),*) => write!(f, #format, #(#used = #used),*),
            }
        }
    };

    Ok(arm)
}

/// Returns true if `message` interpolates the argument `name`.
fn mentions(message: &str, name: &str) -> bool {
    message.contains(&format!("{{{name}}}")) || message.contains(&format!("{{{name}:"))
}

/// Reads the string literal out of the variant's `#[error("...")]` attribute.
fn message(attrs: &[Attribute], variant: &Variant) -> syn::Result<String> {
    let Some(attr) = attrs.iter().find(|attr| attr.path().is_ident("error")) else {
        return Err(syn::Error::new_spanned(
            &variant.ident,
            format!(
                "variant `{}` is missing an #[error(\"...\")] message",
                variant.ident
            ),
        ));
    };

    let Meta::List(list) = &attr.meta else {
        return Err(syn::Error::new_spanned(
            &attr.meta,
            "expected #[error(\"message\")]",
        ));
    };

    match syn::parse2::<Lit>(list.tokens.clone()) {
        Ok(Lit::Str(lit)) => Ok(lit.value()),
        _ => Err(syn::Error::new_spanned(
            &attr.meta,
            "#[error] message must be a string literal",
        )),
    }
}
