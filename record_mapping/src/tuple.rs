//! Multi-entity rows
//!
//! A tuple of records splits the row into consecutive windows, one per
//! member, and each member resolves its fields by name inside its own
//! window. `Option<T>` decodes to `None` when every column of `T` is NULL.

use crate::errors::MappingError;
use crate::traits::{DecodeRecord, Ordinals, Record};
use sqlx::{ColumnIndex, Row, ValueRef};

macro_rules! impl_record_tuple {
    ($($T:ident),+) => {
        impl<$($T: Record),+> Record for ($($T,)+) {
            fn width() -> usize {
                0 $(+ $T::width())+
            }

            #[allow(unused_assignments)]
            fn resolve(
                window: &[&str],
                base: usize,
                plan: &mut Vec<usize>,
            ) -> Result<(), MappingError> {
                let expected = Self::width();
                if window.len() != expected {
                    return Err(MappingError::ColumnCount {
                        expected,
                        actual: window.len(),
                    });
                }

                let mut offset = 0;
                $(
                    let width = $T::width();
                    $T::resolve(&window[offset..offset + width], base + offset, plan)?;
                    offset += width;
                )+
                Ok(())
            }
        }

        impl<'r, R: Row, $($T: DecodeRecord<'r, R>),+> DecodeRecord<'r, R> for ($($T,)+) {
            fn decode(row: &'r R, ordinals: &mut Ordinals<'_>) -> Result<Self, MappingError> {
                Ok(($($T::decode(row, ordinals)?,)+))
            }
        }
    };
}

impl_record_tuple!(A, B);
impl_record_tuple!(A, B, C);
impl_record_tuple!(A, B, C, D);
impl_record_tuple!(A, B, C, D, E);
impl_record_tuple!(A, B, C, D, E, F);

impl<T: Record> Record for Option<T> {
    fn width() -> usize {
        T::width()
    }

    fn resolve(window: &[&str], base: usize, plan: &mut Vec<usize>) -> Result<(), MappingError> {
        T::resolve(window, base, plan)
    }
}

impl<'r, R, T> DecodeRecord<'r, R> for Option<T>
where
    R: Row,
    usize: ColumnIndex<R>,
    T: DecodeRecord<'r, R>,
{
    fn decode(row: &'r R, ordinals: &mut Ordinals<'_>) -> Result<Self, MappingError> {
        let width = T::width();
        let planned = ordinals
            .as_slice()
            .get(..width)
            .ok_or(MappingError::PlanExhausted {
                record: std::any::type_name::<T>(),
            })?;

        let mut all_null = true;
        for &ordinal in planned {
            let value = row
                .try_get_raw(ordinal)
                .map_err(|source| MappingError::RawValue { ordinal, source })?;
            if !value.is_null() {
                all_null = false;
                break;
            }
        }

        if all_null {
            ordinals.nth(width.saturating_sub(1));
            return Ok(None);
        }

        T::decode(row, ordinals).map(Some)
    }
}
