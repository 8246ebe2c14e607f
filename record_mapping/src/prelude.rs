//! Convenience re-exports for common record-mapping usage

pub use crate::errors::MappingError;
pub use crate::plan::{map_row, map_rows, ColumnPlan};
pub use crate::traits::{DecodeRecord, Record, RecordFields, RecordValues};
