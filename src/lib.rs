//! # barerow
//!
//! Plain records from SQL rows. barerow executes statements built with
//! `sqlx` and maps every returned row onto a user-defined record struct. It
//! wraps transactions in stateless sessions and leaves pooling, statement
//! compilation and dialect handling to `sqlx`.
//!
//! There is no identity map, no change tracking and no relationship loading:
//! a record is a value decoded from one row of one response, nothing more.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use barerow::prelude::*;
//!
//! #[derive(Debug, Clone, Record)]
//! #[record(table = "books")]
//! pub struct Book {
//!     pub id: String,
//!     pub title: String,
//!     pub author_name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_url("sqlite::memory:").with_pool_size(1, 1);
//!     let db = BareRow::<sqlx::Sqlite>::connect(&config, SessionConfig::default()).await?;
//!
//!     let books = db
//!         .sessions()
//!         .scope(|session| Box::pin(async move {
//!             session
//!                 .execute(sqlx::query(
//!                     "CREATE TABLE books (id TEXT PRIMARY KEY, title TEXT, author_name TEXT)",
//!                 ))
//!                 .await?;
//!
//!             let book = Book {
//!                 id: "b1".to_string(),
//!                 title: "Dune".to_string(),
//!                 author_name: "Herbert".to_string(),
//!             };
//!             let mut insert = insert_records::<sqlx::Sqlite, _, _>(vec![book])?;
//!             session.records::<Book, _>(insert.build()).await
//!         }))
//!         .await?;
//!
//!     println!("Inserted: {:?}", books);
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;
pub mod view;

// Re-export the main public types for convenience
pub use core::BareRow;
pub use errors::BareRowError;
pub use view::{CreateView, Dialect, DropView, ViewSet, ViewTable};

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, SessionConfig};

// Re-export internal crates used by the derive macro and public API
// These MUST be public for the generated derive code to resolve
pub use record_derive;
pub use record_mapping;
pub use sql_session;

// Re-export external dependencies used in public API
pub use futures;
pub use sqlx;
