//! Record Mapping - row to record marshaling for barerow
//!
//! This crate turns rows returned by `sqlx` into plain record values. It
//! defines the record traits implemented by `#[derive(Record)]`, the column
//! plan that binds record fields to result columns, and the tuple/`Option`
//! impls used for multi-entity rows.
//!
//! Nothing here talks to a database: every function takes rows that were
//! already fetched and is free of side effects.

// Generated code refers to `record_mapping::...`; make that path resolve here too.
extern crate self as record_mapping;

pub mod errors;
pub mod ident;
pub mod plan;
pub mod prelude;
pub mod traits;
mod tuple;

pub use errors::MappingError;
pub use ident::{quote_ident, quote_literal};
pub use plan::{decode_field, decode_required_field, map_row, map_rows, resolve_by_name, ColumnPlan};
pub use traits::{DecodeRecord, Ordinals, Record, RecordFields, RecordValues};
