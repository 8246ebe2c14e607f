//! Parsing utilities for record and column attributes
//!
//! This module handles `#[record(...)]` on the struct and `#[column(...)]` on
//! its fields, and validates the resulting names at compile time.

use std::collections::HashSet;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Error, Fields, Ident, LitStr, Result, Type};

#[derive(Debug)]
pub struct RecordInfo {
    pub table: Option<String>,
}

#[derive(Debug)]
pub struct RecordField {
    pub ident: Ident,
    pub ty: Type,
    pub column: String,
}

/// Validate a table or column name and return syn::Error for better proc macro error handling
fn validate_name(kind: &str, name: &str, span: proc_macro2::Span) -> Result<()> {
    if name.is_empty() {
        return Err(Error::new(span, format!("{} name cannot be empty", kind)));
    }
    if name.contains('\0') {
        return Err(Error::new(
            span,
            format!("{} name '{}' contains a NUL character", kind, name.escape_default()),
        ));
    }
    Ok(())
}

pub fn parse_record_attributes(input: &DeriveInput) -> Result<RecordInfo> {
    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "Record cannot be derived for generic structs",
        ));
    }

    let mut table = None;

    for attr in &input.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                let value: LitStr = meta.value()?.parse()?;
                validate_name("Table", &value.value(), value.span())?;
                table = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported record attribute, expected `table = \"...\"`"))
            }
        })?;
    }

    Ok(RecordInfo { table })
}

pub fn parse_record_fields(data: &Data, name: &Ident) -> Result<Vec<RecordField>> {
    let fields = match data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(Error::new_spanned(
                    name,
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new_spanned(
                name,
                "Record can only be derived for structs",
            ))
        }
    };

    if fields.is_empty() {
        return Err(Error::new_spanned(
            name,
            "Record needs at least one field",
        ));
    }

    let mut seen = HashSet::new();
    let mut parsed = Vec::with_capacity(fields.len());

    for field in fields {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| Error::new_spanned(field, "expected a named field"))?;
        let mut column = ident.unraw().to_string();

        for attr in &field.attrs {
            if !attr.path().is_ident("column") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    validate_name("Column", &value.value(), value.span())?;
                    column = value.value();
                    Ok(())
                } else {
                    Err(meta.error("unsupported column attribute, expected `rename = \"...\"`"))
                }
            })?;
        }

        if !seen.insert(column.clone()) {
            return Err(Error::new_spanned(
                &ident,
                format!("column '{}' is mapped by more than one field", column),
            ));
        }

        parsed.push(RecordField {
            ident,
            ty: field.ty.clone(),
            column,
        });
    }

    Ok(parsed)
}
