//! Core barerow functionality
//!
//! This module contains the main BareRow struct and its implementation,
//! tying the connection pool, session settings and registered views together.

use sqlx::pool::PoolOptions;
use sqlx::{Database, Executor, Pool};
use std::time::Duration;

use crate::errors::BareRowError;
use crate::view::{ViewSet, ViewTable};
use config::{AppConfig, DatabaseConfig, SessionConfig};
use sql_session::SessionFactory;

/// Main coordinator that owns the pool and hands out sessions
pub struct BareRow<DB: Database> {
    pool: Pool<DB>,
    session_config: SessionConfig,
    views: ViewSet,
}

impl<DB: Database> BareRow<DB> {
    /// Connect a new pool using the database configuration
    pub async fn connect(
        config: &DatabaseConfig,
        session_config: SessionConfig,
    ) -> Result<Self, BareRowError> {
        config.validate()?;

        let mut pool_options = PoolOptions::<DB>::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        // Set max lifetime if specified
        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        let pool = pool_options.connect(&config.connection_string()).await?;
        debug_log!(
            "connected {} pool (min {}, max {})",
            DB::NAME,
            config.min_connections,
            config.max_connections
        );

        Ok(Self::from_pool(pool, session_config))
    }

    /// Connect using a complete application configuration
    pub async fn from_app_config(config: &AppConfig) -> Result<Self, BareRowError> {
        Self::connect(&config.database, config.session.clone()).await
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: Pool<DB>, session_config: SessionConfig) -> Self {
        Self {
            pool,
            session_config,
            views: ViewSet::new(),
        }
    }

    /// Get database pool reference
    pub fn pool(&self) -> &Pool<DB> {
        &self.pool
    }

    /// Session factory sharing this pool, with the configured auto-commit mode
    pub fn sessions(&self) -> SessionFactory<DB> {
        SessionFactory::from_config(self.pool.clone(), &self.session_config)
    }

    /// Register a view to be managed by `create_views` / `drop_views`
    pub fn register_view(&mut self, view: ViewTable) -> Result<(), BareRowError> {
        self.views.register(view)
    }

    pub fn views(&self) -> &ViewSet {
        &self.views
    }
}

impl<DB> BareRow<DB>
where
    DB: Database,
    for<'c> &'c mut DB::Connection: Executor<'c, Database = DB>,
{
    /// Create all registered views that are missing, in one transaction
    pub async fn create_views(&self) -> Result<Vec<String>, BareRowError> {
        let mut session = self.sessions().begin().await?;
        let created = self.views.create_all(&mut session).await?;
        session.commit().await?;
        Ok(created)
    }

    /// Drop all registered views that exist, in one transaction
    pub async fn drop_views(&self) -> Result<Vec<String>, BareRowError> {
        let mut session = self.sessions().begin().await?;
        let dropped = self.views.drop_all(&mut session).await?;
        session.commit().await?;
        Ok(dropped)
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), BareRowError> {
        sqlx::raw_sql("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
