//! Convenience re-exports for common barerow usage
//!
//! This prelude module re-exports the most commonly used items from the barerow crates,
//! making it easier to import everything you need with a single use statement.
//!
//! # Example
//!
//! ```rust
//! use barerow::prelude::*;
//!
//! // Now you have access to the derive, sessions, views and common sqlx types
//! ```

// Core barerow components
pub use crate::core::BareRow;
pub use crate::errors::BareRowError;
pub use crate::view::{view_exists, CreateView, Dialect, DropView, ViewSet, ViewTable};

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, SessionConfig};

// Record mapping and the derive; the modules are needed by generated code
pub use record_derive::Record;
pub use record_mapping;
pub use record_mapping::prelude::*;

// Sessions
pub use sql_session::prelude::*;

// Common external dependencies
pub use anyhow;
pub use chrono::{DateTime, Utc};
pub use futures::future::BoxFuture;
pub use serde::{Deserialize, Serialize};
pub use serde_json;
pub use sqlx;
pub use tokio;
pub use uuid::Uuid;

// Commonly used sqlx types
pub use sqlx::{Decode, Encode, Executor, FromRow, PgPool, Postgres, Row, Transaction, Type};

#[cfg(feature = "sqlite")]
pub use sqlx::{Sqlite, SqlitePool};
