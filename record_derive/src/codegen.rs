//! Code generation for the record traits

use crate::parsing::{RecordField, RecordInfo};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Ident, Type};

pub fn generate_record_impl(name: &Ident) -> TokenStream {
    quote! {
        impl record_mapping::Record for #name {
            fn width() -> usize {
                <Self as record_mapping::RecordFields>::FIELDS.len()
            }

            fn resolve(
                window: &[&str],
                base: usize,
                plan: &mut ::std::vec::Vec<usize>,
            ) -> ::std::result::Result<(), record_mapping::MappingError> {
                record_mapping::resolve_by_name(
                    <Self as record_mapping::RecordFields>::NAME,
                    <Self as record_mapping::RecordFields>::FIELDS,
                    window,
                    base,
                    plan,
                )
            }
        }
    }
}

pub fn generate_record_fields_impl(
    name: &Ident,
    info: &RecordInfo,
    fields: &[RecordField],
) -> TokenStream {
    let record_name = name.to_string();
    let columns = fields.iter().map(|field| &field.column);
    let source = match &info.table {
        Some(table) => quote! { ::std::option::Option::Some(#table) },
        None => quote! { ::std::option::Option::None },
    };

    quote! {
        impl record_mapping::RecordFields for #name {
            const NAME: &'static str = #record_name;
            const SOURCE: ::std::option::Option<&'static str> = #source;
            const FIELDS: &'static [&'static str] = &[#(#columns),*];
        }
    }
}

pub fn generate_decode_record_impl(name: &Ident, fields: &[RecordField]) -> TokenStream {
    let record_name = name.to_string();
    let bounds = fields.iter().map(|field| {
        let ty = &field.ty;
        quote! {
            #ty: sqlx::Decode<'r, <R as sqlx::Row>::Database> + sqlx::Type<<R as sqlx::Row>::Database>
        }
    });
    let assignments = fields.iter().map(|field| {
        let ident = &field.ident;
        let field_name = ident.to_string();
        // NULL is only a value for Option fields
        let decode = if is_option(&field.ty) {
            quote! { record_mapping::decode_field }
        } else {
            quote! { record_mapping::decode_required_field }
        };
        quote! {
            #ident: #decode(row, ordinals, #record_name, #field_name)?
        }
    });

    quote! {
        impl<'r, R> record_mapping::DecodeRecord<'r, R> for #name
        where
            R: sqlx::Row,
            usize: sqlx::ColumnIndex<R>,
            #(#bounds,)*
        {
            fn decode(
                row: &'r R,
                ordinals: &mut record_mapping::Ordinals<'_>,
            ) -> ::std::result::Result<Self, record_mapping::MappingError> {
                ::std::result::Result::Ok(Self {
                    #(#assignments,)*
                })
            }
        }
    }
}

pub fn generate_record_values_impl(name: &Ident, fields: &[RecordField]) -> TokenStream {
    let bounds = fields.iter().map(|field| {
        let ty = &field.ty;
        quote! { #ty: 'q + sqlx::Encode<'q, DB> + sqlx::Type<DB> }
    });
    let pushes = fields.iter().map(|field| {
        let ident = &field.ident;
        quote! { values.push_bind(self.#ident); }
    });

    quote! {
        impl<'q, DB> record_mapping::RecordValues<'q, DB> for #name
        where
            DB: sqlx::Database,
            #(#bounds,)*
        {
            fn push_values(
                self,
                values: &mut sqlx::query_builder::Separated<'_, 'q, DB, &'static str>,
            ) {
                #(#pushes)*
            }
        }
    }
}

/// Whether `ty` is written as `Option<...>`, with or without a path prefix
fn is_option(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option"),
        Type::Group(group) => is_option(&group.elem),
        Type::Paren(paren) => is_option(&paren.elem),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_is_option_detects_option_paths() {
        assert!(is_option(&parse_quote!(Option<String>)));
        assert!(is_option(&parse_quote!(std::option::Option<i64>)));
        assert!(is_option(&parse_quote!(::core::option::Option<DateTime<Utc>>)));
    }

    #[test]
    fn test_is_option_rejects_other_types() {
        assert!(!is_option(&parse_quote!(String)));
        assert!(!is_option(&parse_quote!(Vec<Option<i64>>)));
        assert!(!is_option(&parse_quote!(sqlx::types::Json<Option<String>>)));
    }
}
