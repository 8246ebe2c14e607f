//! Procedural macros for mapping query rows onto plain record structs
//!
//! This crate provides the `Record` derive. The generated code refers to
//! `record_mapping::...` and `sqlx::...`, both of which are in scope after
//! `use barerow::prelude::*;`.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod codegen;
mod parsing;

use codegen::{
    generate_decode_record_impl, generate_record_fields_impl, generate_record_impl,
    generate_record_values_impl,
};
use parsing::{parse_record_attributes, parse_record_fields};

/// Derive the record traits for a struct with named fields
///
/// ```rust,ignore
/// use barerow::prelude::*;
///
/// #[derive(Debug, Clone, Record)]
/// #[record(table = "events")]
/// pub struct Event {
///     pub id: String,
///     pub author_id: String,
///     #[column(rename = "event")]
///     pub kind: String,
///     pub created_at: DateTime<Utc>,
/// }
/// ```
///
/// Every field reads the result column with the same name, or the name given
/// by `#[column(rename = "...")]`. `#[record(table = "...")]` is only needed
/// for statement helpers that must know where the record lives.
#[proc_macro_derive(Record, attributes(record, column))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let record_info = match parse_record_attributes(&input) {
        Ok(info) => info,
        Err(e) => return e.to_compile_error().into(),
    };

    let fields = match parse_record_fields(&input.data, &input.ident) {
        Ok(fields) => fields,
        Err(e) => return e.to_compile_error().into(),
    };

    let name = &input.ident;
    let record_impl = generate_record_impl(name);
    let record_fields_impl = generate_record_fields_impl(name, &record_info, &fields);
    let decode_impl = generate_decode_record_impl(name, &fields);
    let values_impl = generate_record_values_impl(name, &fields);

    let expanded = quote::quote! {
        #record_impl
        #record_fields_impl
        #decode_impl
        #values_impl
    };

    TokenStream::from(expanded)
}
