//! Session factory
//!
//! The factory is the single entry point for starting transactions. Keep one
//! per pool and call [`SessionFactory::begin`] or [`SessionFactory::scope`]
//! every time a unit of work starts.

use crate::errors::SessionError;
use crate::session::Session;
use config::SessionConfig;
use futures::future::BoxFuture;
use sqlx::{Database, Pool};

/// Creates sessions on a shared pool
pub struct SessionFactory<DB: Database> {
    pool: Pool<DB>,
    auto_commit: bool,
}

impl<DB: Database> Clone for SessionFactory<DB> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            auto_commit: self.auto_commit,
        }
    }
}

impl<DB: Database> std::fmt::Debug for SessionFactory<DB> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionFactory")
            .field("database", &DB::NAME)
            .field("auto_commit", &self.auto_commit)
            .finish()
    }
}

impl<DB: Database> SessionFactory<DB> {
    /// Factory with auto-commit enabled
    pub fn new(pool: Pool<DB>) -> Self {
        Self {
            pool,
            auto_commit: true,
        }
    }

    pub fn from_config(pool: Pool<DB>, config: &SessionConfig) -> Self {
        Self::new(pool).with_auto_commit(config.auto_commit)
    }

    pub fn with_auto_commit(mut self, auto_commit: bool) -> Self {
        self.auto_commit = auto_commit;
        self
    }

    pub fn auto_commit(&self) -> bool {
        self.auto_commit
    }

    pub fn pool(&self) -> &Pool<DB> {
        &self.pool
    }

    /// Acquire a connection and open a transaction on it
    ///
    /// The caller owns the outcome: commit or roll back explicitly, or drop
    /// the session to roll back.
    pub async fn begin(&self) -> Result<Session<DB>, SessionError> {
        let tx = self.pool.begin().await?;
        tracing::debug!(database = DB::NAME, "session opened");
        Ok(Session::new(tx))
    }

    /// Run `callback` inside a fresh session and settle the transaction
    ///
    /// With auto-commit the transaction is committed when the callback
    /// succeeds and rolled back when it fails. Without auto-commit an open
    /// transaction is rolled back either way. A callback that already
    /// committed or rolled back leaves nothing to settle.
    ///
    /// ```ignore
    /// let books = factory
    ///     .scope(|session| Box::pin(async move {
    ///         session.records::<Book, _>(sqlx::query("SELECT * FROM books")).await
    ///     }))
    ///     .await?;
    /// ```
    pub async fn scope<F, R, E>(&self, callback: F) -> Result<R, E>
    where
        F: for<'s> FnOnce(&'s mut Session<DB>) -> BoxFuture<'s, Result<R, E>>,
        E: From<SessionError>,
    {
        let mut session = self.begin().await?;

        match callback(&mut session).await {
            Ok(value) => {
                if session.is_open() {
                    if self.auto_commit {
                        session.commit().await?;
                    } else {
                        session.rollback().await?;
                    }
                }
                Ok(value)
            }
            Err(err) => {
                if session.is_open() {
                    if let Err(rollback_err) = session.rollback().await {
                        tracing::warn!(
                            database = DB::NAME,
                            error = %rollback_err,
                            "rollback after failed session scope did not complete"
                        );
                    }
                }
                Err(err)
            }
        }
    }
}
