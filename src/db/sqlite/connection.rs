//! SQLite database connection pool and schema management.

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use super::{SqliteGroupRepository, SqliteSongRepository};
use crate::db::{Database, DbError, DbResult};

const CREATE_GROUPS: &str = "CREATE TABLE IF NOT EXISTS groups (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    group_name TEXT NOT NULL CHECK (group_name <> ''),
    CONSTRAINT unique_group UNIQUE (group_name)
)";

// release_date holds an ISO-8601 calendar date (YYYY-MM-DD).
const CREATE_SONGS: &str = "CREATE TABLE IF NOT EXISTS songs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    song_name TEXT NOT NULL,
    release_date TEXT NOT NULL,
    text TEXT NOT NULL,
    link TEXT NOT NULL,
    group_id INTEGER NOT NULL REFERENCES groups (id) ON DELETE CASCADE,
    CONSTRAINT unique_group_song UNIQUE (group_id, song_name)
)";

/// Connection pool limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub max_lifetime: Duration,
    pub idle_timeout: Duration,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            max_lifetime: Duration::from_secs(60 * 60),
            idle_timeout: Duration::from_secs(30 * 60),
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// SQLite database implementation.
///
/// Provides access to repositories via associated types, avoiding dynamic dispatch.
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open a database from a connection URL such as `sqlite://songs.db`.
    ///
    /// The file is created when missing and the pool is pinged once.
    pub async fn open(url: &str, settings: &PoolSettings) -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| DbError::Connection {
                message: format!("Invalid database URL '{}': {}", url, e),
            })?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .max_lifetime(settings.max_lifetime)
            .idle_timeout(settings.idle_timeout)
            .acquire_timeout(settings.acquire_timeout)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .map_err(|e| DbError::Connection {
                message: format!("Could not ping database: {}", e),
            })?;

        info!(url, max_connections = settings.max_connections, "Opened database pool");
        Ok(Self { pool })
    }

    /// Create an in-memory database (useful for testing).
    ///
    /// Uses a single connection that never expires, since every SQLite
    /// in-memory connection is its own database.
    pub async fn in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .max_lifetime(None)
            .idle_timeout(None)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Direct access to the pool, for tests and ad-hoc queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl Database for SqliteDatabase {
    type Groups<'a> = SqliteGroupRepository<'a>;
    type Songs<'a> = SqliteSongRepository<'a>;

    async fn ensure_schema(&self) -> DbResult<()> {
        for statement in [CREATE_GROUPS, CREATE_SONGS] {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Database schema ready");
        Ok(())
    }

    fn groups(&self) -> Self::Groups<'_> {
        SqliteGroupRepository { pool: &self.pool }
    }

    fn songs(&self) -> Self::Songs<'_> {
        SqliteSongRepository { pool: &self.pool }
    }
}
