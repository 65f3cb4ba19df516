use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use std::sync::Arc;
use time::Duration;
use tower_sessions::{Expiry, Session};
use tower_sessions_sqlx_store::SqliteStore;

use crate::error::TestError;

/// Test context containing database connection, session store, and session.
///
/// Provides an in-memory SQLite database connection and a session store sharing the
/// same pool, so a router under test and the test itself observe the same sessions.
/// Everything is created lazily on first access.
pub struct TestContext {
    /// Connection to the in-memory SQLite instance, created by `database()`.
    pub db: Option<DatabaseConnection>,

    /// Session store backed by `db`, created and migrated by `session_store()`.
    pub store: Option<SqliteStore>,

    /// Session created by `session()` using `store`.
    pub session: Option<Session>,
}

impl TestContext {
    /// Creates a new empty test context.
    pub fn new() -> Self {
        Self {
            db: None,
            store: None,
            session: None,
        }
    }

    /// Gets or creates the in-memory SQLite database connection.
    ///
    /// # Returns
    /// - `Ok(&DatabaseConnection)` - Reference to the database connection
    /// - `Err(TestError::Database)` - Failed to connect to in-memory SQLite database
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        match self.db {
            Some(ref db) => Ok(db),
            None => {
                let db = Database::connect("sqlite::memory:").await?;

                let db_ref = self.db.insert(db);

                Ok(&*db_ref)
            }
        }
    }

    /// Creates database tables from the provided CREATE TABLE statements.
    ///
    /// Typically called internally by `TestBuilder::build()` rather than directly.
    pub async fn with_tables(&mut self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        let db = self.database().await?;

        for stmt in stmts {
            db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Gets or creates the SQLite session store sharing the test database pool.
    ///
    /// On first call the session table is migrated. The returned store can be handed to
    /// a `SessionManagerLayer` so requests resolve sessions written by the test.
    pub async fn session_store(&mut self) -> Result<SqliteStore, TestError> {
        if let Some(ref store) = self.store {
            return Ok(store.clone());
        }

        let db = self.database().await?;
        let pool = db.get_sqlite_connection_pool();
        let session_store = SqliteStore::new(pool.clone());

        session_store
            .migrate()
            .await
            .map_err(|e| sea_orm::DbErr::Custom(e.to_string()))?;

        Ok(self.store.insert(session_store).clone())
    }

    /// Gets or creates the test session instance.
    ///
    /// Subsequent calls return the same session instance.
    ///
    /// # Example
    /// ```rust,ignore
    /// let mut test = TestContext::new();
    /// let session = test.session().await?;
    ///
    /// session.insert("auth:user", user).await?;
    /// ```
    pub async fn session(&mut self) -> Result<&Session, TestError> {
        if self.session.is_none() {
            let store = self.session_store().await?;
            let session = Session::new(
                None,
                Arc::new(store),
                Some(Expiry::OnInactivity(Duration::days(7))),
            );
            self.session = Some(session);
        }

        match self.session {
            Some(ref session) => Ok(session),
            None => unreachable!("session initialised above"),
        }
    }

    /// Saves the given session into the store and returns the matching `Cookie` header.
    ///
    /// The cookie uses tower-sessions' default cookie name (`id`), so it is accepted by a
    /// `SessionManagerLayer` built over the same store with default settings.
    pub async fn session_cookie(session: &Session) -> Result<String, TestError> {
        session.save().await?;
        let id = session
            .id()
            .ok_or_else(|| sea_orm::DbErr::Custom("session was not assigned an id".to_string()))?;

        Ok(format!("id={}", id))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
