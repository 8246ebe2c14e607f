use crate::session::SessionState;
use record_mapping::MappingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    /// Raised by the database driver, passed through untouched
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("Row mapping error: {0}")]
    Mapping(#[from] MappingError),

    #[error("Invalid transaction state: {state}. Expected: {expected}")]
    InvalidState {
        state: SessionState,
        expected: SessionState,
    },

    #[error("Query returned no rows")]
    NoRows,

    #[error("Query returned {0} rows, expected exactly one")]
    MultipleRows(usize),

    #[error("Insert needs at least one record")]
    EmptyInsert,

    #[error("Record `{0}` does not declare a source table")]
    MissingSource(&'static str),
}

impl SessionError {
    pub(crate) fn closed() -> Self {
        SessionError::InvalidState {
            state: SessionState::Closed,
            expected: SessionState::Open,
        }
    }
}
