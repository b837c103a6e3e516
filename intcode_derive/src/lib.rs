//! Derive macros for the intcode crate.
//!
//! Provides:
//! - `#[derive(Error)]` - `Display` and `std::error::Error` for error enums

mod error;

use proc_macro::TokenStream;

/// Implements `Display` and `Error` for an enum whose variants carry `#[error("...")]`.
#[proc_macro_derive(Error, attributes(error))]
pub fn derive_error(input: TokenStream) -> TokenStream {
    error::derive_error(input)
}
