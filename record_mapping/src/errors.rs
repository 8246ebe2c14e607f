use thiserror::Error;

/// Errors raised while binding result columns to record fields
#[derive(Error, Debug)]
pub enum MappingError {
    #[error("record `{record}` expects column `{column}` but the result set has none")]
    MissingColumn {
        record: &'static str,
        column: &'static str,
    },

    #[error("result set has {actual} columns but the selected records consume {expected}")]
    ColumnCount { expected: usize, actual: usize },

    #[error("column plan exhausted while decoding `{record}`")]
    PlanExhausted { record: &'static str },

    #[error("failed to decode `{record}.{field}`: {source}")]
    Decode {
        record: &'static str,
        field: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("column for `{record}.{field}` is NULL but the field is not an Option")]
    UnexpectedNull {
        record: &'static str,
        field: &'static str,
    },

    #[error("failed to read column {ordinal}: {source}")]
    RawValue {
        ordinal: usize,
        #[source]
        source: sqlx::Error,
    },

    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
}
