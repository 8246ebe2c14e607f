//! Session: one transaction on one pooled connection
//!
//! A session executes statements through `sqlx` and maps the returned rows
//! onto records. It keeps no identity map and tracks no changes: every call
//! returns freshly decoded values, and the transaction is the only state.
//!
//! # Example
//! ```ignore
//! let mut session = factory.begin().await?;
//!
//! let books: Vec<Book> = session
//!     .records(sqlx::query("SELECT id, title FROM books WHERE author_id = ?").bind(author))
//!     .await?;
//!
//! session.commit().await?;
//! ```

use crate::errors::SessionError;
use record_mapping::{map_row, map_rows, DecodeRecord, Record};
use sqlx::{ColumnIndex, Database, Decode, Execute, Executor, FromRow, Row, Transaction, Type};
use std::fmt;

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Closed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Open => write!(f, "open"),
            SessionState::Closed => write!(f, "closed"),
        }
    }
}

/// A single transactional context
///
/// Dropping an open session rolls its transaction back.
pub struct Session<DB: Database> {
    tx: Option<Transaction<'static, DB>>,
}

impl<DB: Database> fmt::Debug for Session<DB> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("database", &DB::NAME)
            .field("state", &self.state())
            .finish()
    }
}

impl<DB: Database> Session<DB> {
    pub(crate) fn new(tx: Transaction<'static, DB>) -> Self {
        Self { tx: Some(tx) }
    }

    pub fn state(&self) -> SessionState {
        if self.tx.is_some() {
            SessionState::Open
        } else {
            SessionState::Closed
        }
    }

    pub fn is_open(&self) -> bool {
        self.tx.is_some()
    }

    /// Commit the transaction
    ///
    /// The session is closed afterwards, even when the commit itself fails.
    pub async fn commit(&mut self) -> Result<(), SessionError> {
        let tx = self.tx.take().ok_or_else(SessionError::closed)?;
        tx.commit().await?;
        tracing::debug!(database = DB::NAME, "session committed");
        Ok(())
    }

    /// Rollback the transaction
    pub async fn rollback(&mut self) -> Result<(), SessionError> {
        let tx = self.tx.take().ok_or_else(SessionError::closed)?;
        tx.rollback().await?;
        tracing::debug!(database = DB::NAME, "session rolled back");
        Ok(())
    }

    /// The connection behind the open transaction, for direct `sqlx` use
    pub fn connection(&mut self) -> Result<&mut DB::Connection, SessionError> {
        match self.tx.as_mut() {
            Some(tx) => Ok(&mut **tx),
            None => Err(SessionError::closed()),
        }
    }
}

impl<DB> Session<DB>
where
    DB: Database,
    for<'c> &'c mut DB::Connection: Executor<'c, Database = DB>,
{
    /// Execute a statement and return the driver's result summary
    pub async fn execute<'q, E>(&mut self, query: E) -> Result<DB::QueryResult, SessionError>
    where
        E: 'q + Execute<'q, DB>,
    {
        tracing::trace!(sql = query.sql(), "execute");
        let conn = self.connection()?;
        Ok(conn.execute(query).await?)
    }

    /// Fetch the raw rows of a query
    pub async fn rows<'q, E>(&mut self, query: E) -> Result<Vec<DB::Row>, SessionError>
    where
        E: 'q + Execute<'q, DB>,
    {
        tracing::trace!(sql = query.sql(), "fetch rows");
        let conn = self.connection()?;
        Ok(conn.fetch_all(query).await?)
    }

    /// Fetch every row and map it onto `T`
    ///
    /// `T` is a derived record, an `Option` of one, or a tuple of them for
    /// multi-entity rows. Statements with `RETURNING` map the same way.
    pub async fn records<'q, T, E>(&mut self, query: E) -> Result<Vec<T>, SessionError>
    where
        T: Record + for<'r> DecodeRecord<'r, DB::Row>,
        E: 'q + Execute<'q, DB>,
    {
        let rows = self.rows(query).await?;
        Ok(map_rows(&rows)?)
    }

    /// Map the first row onto `T`, if there is one
    pub async fn first<'q, T, E>(&mut self, query: E) -> Result<Option<T>, SessionError>
    where
        T: Record + for<'r> DecodeRecord<'r, DB::Row>,
        E: 'q + Execute<'q, DB>,
    {
        tracing::trace!(sql = query.sql(), "fetch first");
        let conn = self.connection()?;
        match conn.fetch_optional(query).await? {
            Some(row) => Ok(Some(map_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Map exactly one row onto `T`
    pub async fn one<'q, T, E>(&mut self, query: E) -> Result<T, SessionError>
    where
        T: Record + for<'r> DecodeRecord<'r, DB::Row>,
        E: 'q + Execute<'q, DB>,
    {
        let mut records = self.records(query).await?;
        match records.len() {
            0 => Err(SessionError::NoRows),
            1 => records.pop().ok_or(SessionError::NoRows),
            n => Err(SessionError::MultipleRows(n)),
        }
    }

    /// Decode the first column of every row
    pub async fn scalars<'q, T, E>(&mut self, query: E) -> Result<Vec<T>, SessionError>
    where
        T: for<'r> Decode<'r, DB> + Type<DB>,
        usize: ColumnIndex<DB::Row>,
        E: 'q + Execute<'q, DB>,
    {
        let rows = self.rows(query).await?;
        rows.iter()
            .map(|row| row.try_get(0usize))
            .collect::<Result<Vec<T>, sqlx::Error>>()
            .map_err(SessionError::from)
    }

    /// Decode every row with the driver's own `FromRow`, e.g. tuples of scalars
    pub async fn tuples<'q, T, E>(&mut self, query: E) -> Result<Vec<T>, SessionError>
    where
        T: for<'r> FromRow<'r, DB::Row>,
        E: 'q + Execute<'q, DB>,
    {
        let rows = self.rows(query).await?;
        rows.iter()
            .map(|row| T::from_row(row))
            .collect::<Result<Vec<T>, sqlx::Error>>()
            .map_err(SessionError::from)
    }
}
