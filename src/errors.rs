//! Error types for the barerow crate
//!
//! This module contains all error types that can be returned by barerow operations.

use config::ConfigError;
use record_mapping::MappingError;
use sql_session::SessionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BareRowError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Row mapping error: {0}")]
    Mapping(#[from] MappingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("View already registered: {0}")]
    ViewAlreadyRegistered(String),

    #[error("Record `{0}` does not declare a source view")]
    MissingViewName(&'static str),
}
