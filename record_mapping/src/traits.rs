//! Record traits
//!
//! These traits are normally implemented by `#[derive(Record)]`. They are
//! split so that the shape of a record (which columns it consumes) stays
//! independent of the database it is decoded from.

use crate::errors::MappingError;
use sqlx::query_builder::Separated;
use sqlx::{Database, Row};

/// Iterator over the planned column ordinals of a row
pub type Ordinals<'a> = std::slice::Iter<'a, usize>;

/// Shape of a value that consumes columns from a result row
///
/// Implemented for derived records, for tuples of records (multi-entity
/// rows) and for `Option<T>` (entities on the nullable side of an outer join).
pub trait Record: Sized {
    /// Number of columns consumed when this value is one member of a tuple
    fn width() -> usize;

    /// Append the absolute ordinal of every field, in declaration order
    ///
    /// `window` holds the column names visible to this value and `base` is
    /// the ordinal of `window[0]` in the full row.
    fn resolve(window: &[&str], base: usize, plan: &mut Vec<usize>)
        -> Result<(), MappingError>;
}

/// Static metadata of a single derived record
///
/// ```
/// use record_derive::Record;
///
/// #[derive(Debug, Record)]
/// #[record(table = "books")]
/// pub struct Book {
///     pub id: i64,
///     #[column(rename = "book_title")]
///     pub title: String,
/// }
/// ```
pub trait RecordFields: Record {
    /// Rust type name, used in error messages
    const NAME: &'static str;

    /// Table or view the record is read from, if declared
    const SOURCE: Option<&'static str>;

    /// Column names in field declaration order
    const FIELDS: &'static [&'static str];
}

/// Decode a record from a row following a resolved plan
pub trait DecodeRecord<'r, R: Row>: Record {
    /// Consume exactly `Self::width()` ordinals and decode the fields they point at
    fn decode(row: &'r R, ordinals: &mut Ordinals<'_>) -> Result<Self, MappingError>;
}

/// Push the record's field values as bind parameters, in `FIELDS` order
pub trait RecordValues<'q, DB: Database>: RecordFields {
    fn push_values(self, values: &mut Separated<'_, 'q, DB, &'static str>);
}
