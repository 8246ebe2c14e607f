//! Statement helpers built on `sqlx::QueryBuilder`
//!
//! The returned builders are ordinary `sqlx` values: call `.build()` and
//! hand the query to a session like any other statement.

use crate::errors::SessionError;
use record_mapping::{quote_ident, RecordValues};
use sqlx::{Database, QueryBuilder};

/// `INSERT INTO "source" (...) VALUES (...), ... RETURNING ...` for a batch of records
///
/// Every field is inserted, in declaration order, and every field is
/// returned so the inserted rows map straight back onto `T`.
pub fn insert_records<'q, DB, T, I>(records: I) -> Result<QueryBuilder<'q, DB>, SessionError>
where
    DB: Database,
    DB::Arguments<'q>: Default,
    T: RecordValues<'q, DB>,
    I: IntoIterator<Item = T>,
{
    let source = T::SOURCE.ok_or(SessionError::MissingSource(T::NAME))?;

    let mut records = records.into_iter().peekable();
    if records.peek().is_none() {
        return Err(SessionError::EmptyInsert);
    }

    let columns = T::FIELDS
        .iter()
        .map(|field| quote_ident(field))
        .collect::<Result<Vec<_>, _>>()?
        .join(", ");

    let mut builder = QueryBuilder::new(format!(
        "INSERT INTO {} ({}) ",
        quote_ident(source)?,
        columns
    ));
    builder.push_values(records, |mut values, record| record.push_values(&mut values));
    builder.push(format!(" RETURNING {}", columns));

    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use record_derive::Record;
    use sqlx::Sqlite;

    #[derive(Debug, Clone, PartialEq, Record)]
    #[record(table = "Events")]
    struct Event {
        id: String,
        #[column(rename = "event")]
        kind: String,
    }

    #[derive(Debug, Clone, PartialEq, Record)]
    struct Unsourced {
        id: String,
    }

    #[test]
    fn test_insert_sql_shape() {
        let events = vec![
            Event {
                id: "e1".to_string(),
                kind: "1".to_string(),
            },
            Event {
                id: "e2".to_string(),
                kind: "2".to_string(),
            },
        ];

        let builder = insert_records::<Sqlite, _, _>(events).unwrap();
        let sql = builder.sql();
        assert!(sql.starts_with("INSERT INTO \"Events\" (\"id\", \"event\") VALUES ("));
        assert!(sql.ends_with(" RETURNING \"id\", \"event\""));
        assert_eq!(sql.matches("?").count(), 4);
    }

    #[test]
    fn test_insert_rejects_empty_batch() {
        assert!(matches!(
            insert_records::<Sqlite, Event, _>(Vec::new()),
            Err(SessionError::EmptyInsert)
        ));
    }

    #[test]
    fn test_insert_requires_source() {
        let result = insert_records::<Sqlite, _, _>(vec![Unsourced {
            id: "x".to_string(),
        }]);
        assert!(matches!(result, Err(SessionError::MissingSource("Unsourced"))));
    }
}
