//! SQL views
//!
//! A view is a stored `SELECT` that records can be read from exactly like a
//! table. This module renders `CREATE VIEW` / `DROP VIEW` statements and keeps
//! an ordered set of views that can be created and dropped together, skipping
//! views that already exist (or are already gone).
//!
//! The select statement of a view is stored as SQL text: views cannot carry
//! bind parameters, so any values must be written as literals.

use crate::errors::BareRowError;
use record_mapping::{quote_ident, quote_literal, RecordFields};
use sql_session::Session;
use sqlx::{Database, Executor};

/// SQL dialect of a `sqlx` database driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    Sqlite,
    MySql,
    Other,
}

impl Dialect {
    pub fn of<DB: Database>() -> Self {
        Self::from_name(DB::NAME)
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "PostgreSQL" => Dialect::Postgres,
            "SQLite" => Dialect::Sqlite,
            "MySQL" => Dialect::MySql,
            _ => Dialect::Other,
        }
    }

    /// Catalog query returning a row when the view exists
    fn view_exists_sql(&self, name: &str) -> Option<String> {
        let name = quote_literal(name);
        match self {
            Dialect::Postgres => Some(format!(
                "SELECT 1 FROM information_schema.views \
                 WHERE table_schema = current_schema() AND table_name = {}",
                name
            )),
            Dialect::Sqlite => Some(format!(
                "SELECT 1 FROM sqlite_master WHERE type = 'view' AND name = {}",
                name
            )),
            Dialect::MySql => Some(format!(
                "SELECT 1 FROM information_schema.views \
                 WHERE table_schema = DATABASE() AND table_name = {}",
                name
            )),
            Dialect::Other => None,
        }
    }
}

/// A `CREATE VIEW` statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateView {
    pub name: String,
    pub select_sql: String,
}

impl CreateView {
    pub fn new(name: impl Into<String>, select_sql: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            select_sql: select_sql.into(),
        }
    }

    pub fn to_sql(&self) -> Result<String, BareRowError> {
        Ok(format!(
            "CREATE VIEW {} AS {}",
            quote_ident(&self.name)?,
            self.select_sql.trim()
        ))
    }
}

/// A `DROP VIEW` statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropView {
    pub name: String,
    pub cascade: bool,
    pub if_exists: bool,
}

impl DropView {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cascade: false,
            if_exists: false,
        }
    }

    pub fn cascade(mut self, cascade: bool) -> Self {
        self.cascade = cascade;
        self
    }

    pub fn if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = if_exists;
        self
    }

    /// Render for `dialect`; SQLite has no `CASCADE` clause so it is left out there
    pub fn to_sql(&self, dialect: Dialect) -> Result<String, BareRowError> {
        let mut sql = String::from("DROP VIEW ");
        if self.if_exists {
            sql.push_str("IF EXISTS ");
        }
        sql.push_str(&quote_ident(&self.name)?);
        if self.cascade && dialect != Dialect::Sqlite {
            sql.push_str(" CASCADE");
        }
        Ok(sql)
    }
}

/// A view definition managed by a [`ViewSet`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewTable {
    name: String,
    select_sql: String,
    cascade: bool,
    exclude_in_sqlite: bool,
}

impl ViewTable {
    /// Views drop with `CASCADE` unless told otherwise
    pub fn new(name: impl Into<String>, select_sql: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            select_sql: select_sql.into(),
            cascade: true,
            exclude_in_sqlite: false,
        }
    }

    /// View named after the `#[record(table = "...")]` source of `T`
    pub fn for_record<T: RecordFields>(select_sql: impl Into<String>) -> Result<Self, BareRowError> {
        let name = T::SOURCE.ok_or(BareRowError::MissingViewName(T::NAME))?;
        Ok(Self::new(name, select_sql))
    }

    pub fn with_cascade(mut self, cascade: bool) -> Self {
        self.cascade = cascade;
        self
    }

    /// Skip this view entirely on SQLite, e.g. when it relies on Postgres-only SQL
    pub fn exclude_in_sqlite(mut self) -> Self {
        self.exclude_in_sqlite = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn select_sql(&self) -> &str {
        &self.select_sql
    }

    pub fn create_statement(&self) -> CreateView {
        CreateView::new(self.name.clone(), self.select_sql.clone())
    }

    pub fn drop_statement(&self) -> DropView {
        DropView::new(self.name.clone()).cascade(self.cascade)
    }

    fn applies_to(&self, dialect: Dialect) -> bool {
        !(self.exclude_in_sqlite && dialect == Dialect::Sqlite)
    }
}

/// Ordered registry of views
///
/// Views are created in registration order and dropped in reverse, so a view
/// may select from views registered before it.
#[derive(Debug, Clone, Default)]
pub struct ViewSet {
    views: Vec<ViewTable>,
}

impl ViewSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, view: ViewTable) -> Result<(), BareRowError> {
        if self.views.iter().any(|existing| existing.name == view.name) {
            return Err(BareRowError::ViewAlreadyRegistered(view.name));
        }
        self.views.push(view);
        Ok(())
    }

    pub fn views(&self) -> &[ViewTable] {
        &self.views
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Create every view that does not exist yet; returns the names created
    pub async fn create_all<DB>(&self, session: &mut Session<DB>) -> Result<Vec<String>, BareRowError>
    where
        DB: Database,
        for<'c> &'c mut DB::Connection: Executor<'c, Database = DB>,
    {
        let dialect = Dialect::of::<DB>();
        let mut created = Vec::new();

        for view in self.views.iter().filter(|view| view.applies_to(dialect)) {
            if view_exists(session, &view.name).await? {
                debug_log!("view {} already exists, skipping create", view.name);
                continue;
            }

            let sql = view.create_statement().to_sql()?;
            debug_log!("Creating view with SQL: {}", sql);
            session.execute(sqlx::raw_sql(&sql)).await?;
            created.push(view.name.clone());
        }

        Ok(created)
    }

    /// Drop every existing view in reverse registration order; returns the names dropped
    pub async fn drop_all<DB>(&self, session: &mut Session<DB>) -> Result<Vec<String>, BareRowError>
    where
        DB: Database,
        for<'c> &'c mut DB::Connection: Executor<'c, Database = DB>,
    {
        let dialect = Dialect::of::<DB>();
        let mut dropped = Vec::new();

        for view in self.views.iter().rev().filter(|view| view.applies_to(dialect)) {
            if !view_exists(session, &view.name).await? {
                debug_log!("view {} does not exist, skipping drop", view.name);
                continue;
            }

            let sql = view.drop_statement().to_sql(dialect)?;
            debug_log!("Dropping view with SQL: {}", sql);
            session.execute(sqlx::raw_sql(&sql)).await?;
            dropped.push(view.name.clone());
        }

        Ok(dropped)
    }
}

/// Whether a view with this exact name exists
///
/// Dialects without a known catalog query report `false`.
pub async fn view_exists<DB>(session: &mut Session<DB>, name: &str) -> Result<bool, BareRowError>
where
    DB: Database,
    for<'c> &'c mut DB::Connection: Executor<'c, Database = DB>,
{
    let Some(sql) = Dialect::of::<DB>().view_exists_sql(name) else {
        return Ok(false);
    };
    trace_log!("checking view {} with SQL: {}", name, sql);

    let rows = session.rows(sqlx::raw_sql(&sql)).await?;
    Ok(!rows.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_view_sql() {
        let sql = CreateView::new("EventPeriods", "  SELECT id FROM events  ")
            .to_sql()
            .unwrap();
        assert_eq!(sql, "CREATE VIEW \"EventPeriods\" AS SELECT id FROM events");
    }

    #[test]
    fn test_drop_view_sql() {
        let drop = DropView::new("active_blogs");
        assert_eq!(
            drop.to_sql(Dialect::Postgres).unwrap(),
            "DROP VIEW \"active_blogs\""
        );

        let drop = drop.if_exists(true).cascade(true);
        assert_eq!(
            drop.to_sql(Dialect::Postgres).unwrap(),
            "DROP VIEW IF EXISTS \"active_blogs\" CASCADE"
        );
        assert_eq!(
            drop.to_sql(Dialect::Sqlite).unwrap(),
            "DROP VIEW IF EXISTS \"active_blogs\""
        );
    }

    #[test]
    fn test_dialect_from_driver_name() {
        assert_eq!(Dialect::from_name("PostgreSQL"), Dialect::Postgres);
        assert_eq!(Dialect::from_name("SQLite"), Dialect::Sqlite);
        assert_eq!(Dialect::from_name("MySQL"), Dialect::MySql);
        assert_eq!(Dialect::from_name("Mystery"), Dialect::Other);
        assert!(Dialect::Other.view_exists_sql("v").is_none());
    }

    #[test]
    fn test_view_exists_sql_escapes_name() {
        let sql = Dialect::Sqlite.view_exists_sql("o'neil").unwrap();
        assert!(sql.ends_with("name = 'o''neil'"));
    }

    #[test]
    fn test_view_set_rejects_duplicates() {
        let mut views = ViewSet::new();
        views
            .register(ViewTable::new("active", "SELECT 1 AS one"))
            .unwrap();
        let err = views
            .register(ViewTable::new("active", "SELECT 2 AS two"))
            .unwrap_err();
        assert!(matches!(err, BareRowError::ViewAlreadyRegistered(name) if name == "active"));
    }

    #[test]
    fn test_view_table_defaults() {
        let view = ViewTable::new("v", "SELECT 1 AS one");
        assert!(view.drop_statement().cascade);
        assert!(view.applies_to(Dialect::Sqlite));

        let view = view.with_cascade(false).exclude_in_sqlite();
        assert!(!view.drop_statement().cascade);
        assert!(!view.applies_to(Dialect::Sqlite));
        assert!(view.applies_to(Dialect::Postgres));
    }
}
