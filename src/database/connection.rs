/*!
 * Database connection management.
 *
 * This module owns the single SQLite handle used by the store. The handle is
 * opened once, shared by cloning, and closed explicitly when the last clone
 * is handed back.
 */

use log::{debug, info};
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::{DatabaseConfig, JournalMode};
use crate::errors::{QueryError, StoreResult};

/// Default database filename
pub const DEFAULT_DB_FILENAME: &str = "dictionary.db";

/// Default database directory name under user's data directory
pub const DEFAULT_DB_DIRNAME: &str = "vocab-store";

/// Database connection wrapper with thread-safe access
#[derive(Clone)]
pub struct DatabaseConnection {
    /// Path to the database file
    db_path: PathBuf,
    /// Thread-safe connection wrapped in Arc<Mutex>
    connection: Arc<Mutex<Connection>>,
}

impl std::fmt::Debug for DatabaseConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConnection")
            .field("db_path", &self.db_path)
            .finish_non_exhaustive()
    }
}

impl DatabaseConnection {
    /// Open the database at the default location
    pub fn open_default() -> StoreResult<Self> {
        let db_path = Self::default_database_path()?;
        Self::open(&db_path)
    }

    /// Open the database at the specified path with default settings
    pub fn open<P: AsRef<Path>>(db_path: P) -> StoreResult<Self> {
        Self::open_with(db_path, &DatabaseConfig::default())
    }

    /// Open the database at the specified path using the given settings
    pub fn open_with<P: AsRef<Path>>(db_path: P, config: &DatabaseConfig) -> StoreResult<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        info!("Opening database at: {:?}", db_path);

        let conn = Connection::open(&db_path).map_err(|e| QueryError::engine("open", e))?;
        Self::configure(&conn, config)?;

        Ok(Self {
            db_path,
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create an in-memory database (for testing)
    pub fn open_in_memory() -> StoreResult<Self> {
        debug!("Creating in-memory database");

        let conn = Connection::open_in_memory().map_err(|e| QueryError::engine("open", e))?;

        // WAL is meaningless for a memory database
        let config = DatabaseConfig {
            journal_mode: JournalMode::Memory,
            ..DatabaseConfig::default()
        };
        Self::configure(&conn, &config)?;

        Ok(Self {
            db_path: PathBuf::from(":memory:"),
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    fn configure(conn: &Connection, config: &DatabaseConfig) -> Result<(), QueryError> {
        let pragma = format!("PRAGMA journal_mode={}", config.journal_mode.as_pragma());
        let mode: String = conn
            .query_row(&pragma, [], |row| row.get(0))
            .map_err(|e| QueryError::engine(&pragma, e))?;
        debug!("Journal mode: {}", mode);

        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))
            .map_err(|e| QueryError::engine("PRAGMA busy_timeout", e))?;

        Ok(())
    }

    /// Get the default database path
    pub fn default_database_path() -> StoreResult<PathBuf> {
        let base_dir = dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Could not determine data directory",
                )
            })?;

        Ok(base_dir.join(DEFAULT_DB_DIRNAME).join(DEFAULT_DB_FILENAME))
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Run a closure against the connection on the blocking pool
    ///
    /// The mutex is held for the whole closure, so concurrent callers queue
    /// up behind each other in arrival order.
    pub(crate) async fn with_connection<F, T>(&self, f: F) -> Result<T, QueryError>
    where
        F: FnOnce(&mut Connection) -> Result<T, QueryError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.connection.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = conn.lock();
            f(&mut conn)
        })
        .await
        .map_err(|e| QueryError::TaskFailed(e.to_string()))?
    }

    /// Close the handle
    ///
    /// Fails with `QueryError::Closed` while other clones are still alive;
    /// the handle stays usable through those clones in that case.
    pub fn close(self) -> StoreResult<()> {
        let path = self.db_path;
        let mutex = Arc::try_unwrap(self.connection).map_err(|_| QueryError::Closed)?;

        mutex
            .into_inner()
            .close()
            .map_err(|(_, e)| QueryError::engine("close", e))?;

        info!("Closed database at: {:?}", path);
        Ok(())
    }
}
