//! SQL identifier and literal quoting
//!
//! Statements generated by barerow (inserts, view DDL) quote every name, so
//! mixed-case and keyword names such as `"EventPeriods"` or `"order"` are
//! accepted as-is. Quoting follows the SQL standard double-quote form used by
//! PostgreSQL and SQLite.

use crate::errors::MappingError;

/// Quote an identifier, doubling embedded double quotes
pub fn quote_ident(name: &str) -> Result<String, MappingError> {
    if name.is_empty() {
        return Err(MappingError::InvalidIdentifier(
            "Name cannot be empty".to_string(),
        ));
    }
    if name.contains('\0') {
        return Err(MappingError::InvalidIdentifier(format!(
            "Name '{}' contains a NUL character",
            name.replace('\0', "\\0")
        )));
    }

    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}

/// Quote a string literal, doubling embedded single quotes
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
