//! Convenience re-exports for common session usage

pub use crate::errors::SessionError;
pub use crate::factory::SessionFactory;
pub use crate::session::{Session, SessionState};
pub use crate::statement::insert_records;
