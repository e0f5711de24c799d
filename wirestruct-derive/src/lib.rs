//! Derive macro for `wirestruct` record types.
//!
//! Refer to the [`wirestruct`](https://docs.rs/wirestruct) crate for examples.
use {
    proc_macro::TokenStream,
    syn::{parse_macro_input, DeriveInput},
};

mod common;
mod record;

/// Implement `Schema` and `Field` for a struct with named fields.
///
/// Struct attributes:
/// - `#[wirestruct(little_endian)]`: byte order for every field.
/// - `#[wirestruct(name = "...")]`: record type name (defaults to the struct name).
/// - `#[wirestruct(crate = path)]`: path to the `wirestruct` crate.
///
/// Field attributes:
/// - `#[wirestruct(offset = N)]`: explicit byte offset (all fields or none).
/// - `#[wirestruct(little_endian)]` / `#[wirestruct(little_endian = false)]`.
/// - `#[wirestruct(rename = "...")]`: field name in the record.
#[proc_macro_derive(Record, attributes(wirestruct))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match record::generate(input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.write_errors().into(),
    }
}
