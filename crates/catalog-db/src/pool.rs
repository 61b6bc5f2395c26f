//! # Database Pool Management
//!
//! Connection pool creation and configuration for PostgreSQL.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  catalog-cli startup                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(url) ← Configure pool settings                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::connect(config).await ← Parse URL + open first connection   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │              PgPool                      │                           │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐               │                           │
//! │  │  │Conn1│ │Conn2│ │ ... │               │  (max_connections)        │
//! │  │  └─────┘ └─────┘ └─────┘               │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.albums() ──► AlbumRepository ──► queries                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.close().await ← Release every connection before exit               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::album::AlbumRepository;
use crate::schema;

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust
/// use catalog_db::DbConfig;
///
/// let config = DbConfig::new("postgres://localhost/recordings")
///     .max_connections(2);
/// assert_eq!(config.max_connections, 2);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 0 (the program runs once and exits)
    pub min_connections: u32,

    /// How long to wait for a connection.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to create the `album` table if it is missing.
    /// Default: false (the schema is expected to exist)
    pub ensure_schema: bool,
}

impl DbConfig {
    /// Creates a new database configuration for the given URL.
    pub fn new(database_url: impl Into<String>) -> Self {
        DbConfig {
            database_url: database_url.into(),
            max_connections: 5,
            min_connections: 0,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            ensure_schema: false,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to create the `album` table on connect.
    pub fn ensure_schema(mut self, ensure: bool) -> Self {
        self.ensure_schema = ensure;
        self
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cloning is cheap: every clone shares the same [`PgPool`].
#[derive(Debug, Clone)]
pub struct Database {
    /// The PostgreSQL connection pool.
    pool: PgPool,
}

impl Database {
    /// Creates a new connection pool and opens the first connection.
    ///
    /// ## What This Does
    /// 1. Parses the connection URL
    /// 2. Creates the pool and connects eagerly, so a bad URL or an
    ///    unreachable server is reported here rather than on first query
    /// 3. Creates the `album` table if `ensure_schema` is set
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use database handle
    /// * `Err(DbError::ConnectionFailed)` - URL or connection failure
    pub async fn connect(config: DbConfig) -> DbResult<Self> {
        let connect_options = PgConnectOptions::from_str(&config.database_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        // Log the target without credentials
        info!(
            host = %connect_options.get_host(),
            port = connect_options.get_port(),
            database = connect_options.get_database().unwrap_or("<default>"),
            "Initializing database connection"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        Database { pool }.prepare(config.ensure_schema).await
    }

    /// Runs post-connect setup, closing the pool if any step fails.
    async fn prepare(self, ensure_schema: bool) -> DbResult<Self> {
        if ensure_schema {
            if let Err(e) = self.ensure_schema().await {
                self.close().await;
                return Err(e);
            }
        }

        Ok(self)
    }

    /// Creates the `album` table if it does not exist.
    ///
    /// Idempotent; intended for development databases and live tests.
    pub async fn ensure_schema(&self) -> DbResult<()> {
        debug!("Ensuring album table exists");
        schema::ensure_album_table(&self.pool).await
    }

    /// Returns the album repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let listing = db.albums().fetch_all().await?;
    /// ```
    pub fn albums(&self) -> AlbumRepository {
        AlbumRepository::new(self.pool.clone())
    }

    /// Closes the database connection pool.
    ///
    /// Waits for checked-out connections to be returned, then closes them.
    /// After calling close, all repository operations will fail.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// True once [`Database::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
