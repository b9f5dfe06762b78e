/*!
 * Common test utilities for the vocab-store test suite
 */

use anyhow::Result;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use vocab_store::database::{
    DatabaseConnection, PreferenceStore, QueryExecutor, SchemaManager, WordEntry, WordRepository,
};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Route library logs to the test harness; safe to call repeatedly
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Path of a store file inside the given directory
pub fn store_path(dir: &TempDir) -> PathBuf {
    dir.path().join("dictionary.db")
}

/// Repositories sharing one executor over a store
pub struct TestStore {
    pub db: DatabaseConnection,
    pub exec: QueryExecutor,
    pub schema: SchemaManager,
    pub words: WordRepository,
    pub preferences: PreferenceStore,
}

impl TestStore {
    pub fn over(db: DatabaseConnection) -> Self {
        let exec = QueryExecutor::new(db.clone());
        Self {
            db,
            schema: SchemaManager::new(exec.clone()),
            words: WordRepository::new(exec.clone()),
            preferences: PreferenceStore::new(exec.clone()),
            exec,
        }
    }

    /// In-memory store with the schema already ensured
    pub async fn in_memory() -> Self {
        init_logging();
        let store = Self::over(DatabaseConnection::open_in_memory().expect("Failed to open in-memory DB"));
        store.schema.ensure().await.expect("Failed to ensure schema");
        store
    }

    /// Open a store file without touching its schema
    pub fn open(path: &Path) -> Self {
        init_logging();
        Self::over(DatabaseConnection::open(path).expect("Failed to open DB"))
    }

    /// Number of rows in a table
    pub async fn row_count(&self, table: &str) -> i64 {
        let rows = self
            .exec
            .execute(&format!("SELECT COUNT(*) AS n FROM {}", table), vec![])
            .await
            .expect("count failed");
        rows.item(0).unwrap().get("n").unwrap()
    }
}

/// Creates a store file with the first released schema: no phonetics,
/// partOfSpeech or meaning columns, and one word already stored
pub fn create_legacy_store(path: &Path) -> Result<()> {
    let conn = Connection::open(path)?;
    conn.execute_batch(
        r#"
        CREATE TABLE words (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            word TEXT UNIQUE NOT NULL,
            translation TEXT,
            image TEXT,
            dateForgets INTEGER,
            dateTotallyForgets INTEGER,
            forgettingSpan INTEGER,
            status INTEGER
        );
        CREATE TABLE theme (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            isDark INTEGER DEFAULT 0
        );
        INSERT INTO words (word, translation, image, dateForgets, dateTotallyForgets, forgettingSpan, status)
        VALUES ('house', 'casa', 'file:///img/house.png', 100, 200, 3600, 2);
        INSERT INTO theme (id, isDark) VALUES (1, 1);
        "#,
    )?;
    conn.close().map_err(|(_, e)| e)?;
    Ok(())
}

/// The word used by the reference scenario
pub fn dog_entry() -> WordEntry {
    WordEntry::new("dog")
        .with_translation("perro")
        .with_schedule(0, 0, 86400)
        .with_status(0)
}
