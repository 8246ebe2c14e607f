//! SQL Session - stateless transaction wrapper for barerow
//!
//! A [`Session`] is one open transaction that maps query results onto
//! records. A [`SessionFactory`] hands out sessions from a pool and can run a
//! closure inside one, settling the transaction when the closure returns.
//!
//! Pooling, isolation and statement execution are left to `sqlx`.

pub mod errors;
pub mod factory;
pub mod prelude;
pub mod session;
pub mod statement;

pub use errors::SessionError;
pub use factory::SessionFactory;
pub use session::{Session, SessionState};
pub use statement::insert_records;
