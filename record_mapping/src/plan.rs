//! Column planning and row mapping
//!
//! A [`ColumnPlan`] is resolved once per result set from the column names of
//! the first row and then reused for every row of that result.

use crate::errors::MappingError;
use crate::traits::{DecodeRecord, Ordinals, Record};
use sqlx::{Column, ColumnIndex, Decode, Row, Type, ValueRef};

/// Absolute column ordinals for every field of a record, in decode order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPlan {
    ordinals: Vec<usize>,
}

impl ColumnPlan {
    /// Resolve a plan for `T` against a list of result column names
    pub fn for_record<T: Record>(names: &[&str]) -> Result<Self, MappingError> {
        let mut ordinals = Vec::with_capacity(T::width());
        T::resolve(names, 0, &mut ordinals)?;
        Ok(Self { ordinals })
    }

    /// Resolve a plan for `T` from the columns of a row
    pub fn from_row<T: Record, R: Row>(row: &R) -> Result<Self, MappingError> {
        let names: Vec<&str> = row.columns().iter().map(|column| column.name()).collect();
        Self::for_record::<T>(&names)
    }

    pub fn ordinals(&self) -> &[usize] {
        &self.ordinals
    }

    /// Decode one row with this plan
    pub fn decode<'r, T, R>(&self, row: &'r R) -> Result<T, MappingError>
    where
        R: Row,
        T: DecodeRecord<'r, R>,
    {
        let mut ordinals = self.ordinals.iter();
        T::decode(row, &mut ordinals)
    }
}

/// Map a single row onto `T`
pub fn map_row<'r, T, R>(row: &'r R) -> Result<T, MappingError>
where
    R: Row,
    T: DecodeRecord<'r, R>,
{
    ColumnPlan::from_row::<T, R>(row)?.decode(row)
}

/// Map every row onto `T`, resolving the plan from the first row only
pub fn map_rows<'r, T, R>(rows: &'r [R]) -> Result<Vec<T>, MappingError>
where
    R: Row,
    T: DecodeRecord<'r, R>,
{
    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };

    let plan = ColumnPlan::from_row::<T, R>(first)?;
    rows.iter().map(|row| plan.decode(row)).collect()
}

/// Find every field among `window` by exact name; the first match wins
pub fn resolve_by_name(
    record: &'static str,
    fields: &[&'static str],
    window: &[&str],
    base: usize,
    plan: &mut Vec<usize>,
) -> Result<(), MappingError> {
    for &field in fields {
        let offset = window
            .iter()
            .position(|name| *name == field)
            .ok_or(MappingError::MissingColumn {
                record,
                column: field,
            })?;
        plan.push(base + offset);
    }
    Ok(())
}

/// Decode the next planned column of `row` into a field value
pub fn decode_field<'r, R, T>(
    row: &'r R,
    ordinals: &mut Ordinals<'_>,
    record: &'static str,
    field: &'static str,
) -> Result<T, MappingError>
where
    R: Row,
    usize: ColumnIndex<R>,
    T: Decode<'r, R::Database> + Type<R::Database>,
{
    let ordinal = *ordinals
        .next()
        .ok_or(MappingError::PlanExhausted { record })?;

    row.try_get(ordinal)
        .map_err(|source| MappingError::Decode {
            record,
            field,
            source,
        })
}

/// Like [`decode_field`], but a NULL column is an error instead of a value
///
/// Some drivers decode NULL into the default of a non-nullable type, so
/// fields that are not `Option` must check for NULL before decoding.
pub fn decode_required_field<'r, R, T>(
    row: &'r R,
    ordinals: &mut Ordinals<'_>,
    record: &'static str,
    field: &'static str,
) -> Result<T, MappingError>
where
    R: Row,
    usize: ColumnIndex<R>,
    T: Decode<'r, R::Database> + Type<R::Database>,
{
    let ordinal = *ordinals
        .as_slice()
        .first()
        .ok_or(MappingError::PlanExhausted { record })?;

    let value = row
        .try_get_raw(ordinal)
        .map_err(|source| MappingError::RawValue { ordinal, source })?;
    if value.is_null() {
        return Err(MappingError::UnexpectedNull { record, field });
    }

    decode_field(row, ordinals, record, field)
}
