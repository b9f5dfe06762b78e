/*!
 * Database schema definitions and migrations.
 *
 * The expected shape of the `words` table is a declarative column list.
 * Every column records the schema version that introduced it, so adding a
 * field in a later release is one new entry in `WORD_COLUMNS` plus a bump
 * of `SCHEMA_VERSION`.
 *
 * Migration is driven by introspection rather than by the stored version:
 * `ensure` compares the live column set with the list and adds whatever is
 * missing. Columns are never dropped or renamed.
 */

use log::{debug, info};
use rusqlite::types::Value;

use super::executor::QueryExecutor;
use crate::errors::{QueryError, SchemaError};

/// Current schema version, written to `PRAGMA user_version`
pub const SCHEMA_VERSION: u32 = 2;

pub const WORDS_TABLE: &str = "words";
pub const THEME_TABLE: &str = "theme";

/// Fixed id of the single theme row
pub const THEME_ROW_ID: i64 = 1;

/// A nullable column of the `words` table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub sql_type: &'static str,
    /// Schema version that introduced the column
    pub since: u32,
}

impl ColumnSpec {
    const fn new(name: &'static str, sql_type: &'static str, since: u32) -> Self {
        Self { name, sql_type, since }
    }

    fn definition(&self) -> String {
        format!("{} {}", self.name, self.sql_type)
    }
}

/// Columns of `words` besides the `id`/`word` keys, in declaration order
///
/// Keys are not listed here: SQLite cannot add a UNIQUE or PRIMARY KEY
/// column with ALTER TABLE, so they only ever come from CREATE TABLE.
pub const WORD_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("translation", "TEXT", 1),
    ColumnSpec::new("image", "TEXT", 1),
    ColumnSpec::new("dateForgets", "INTEGER", 1),
    ColumnSpec::new("dateTotallyForgets", "INTEGER", 1),
    ColumnSpec::new("forgettingSpan", "INTEGER", 1),
    ColumnSpec::new("status", "INTEGER", 1),
    ColumnSpec::new("phonetics", "TEXT", 2),
    ColumnSpec::new("partOfSpeech", "TEXT", 2),
    ColumnSpec::new("meaning", "TEXT", 2),
];

/// CREATE TABLE statement for `words` with the full current column set
pub fn create_words_table_sql() -> String {
    let mut columns = vec![
        "id INTEGER PRIMARY KEY AUTOINCREMENT".to_string(),
        "word TEXT UNIQUE NOT NULL".to_string(),
    ];
    columns.extend(WORD_COLUMNS.iter().map(ColumnSpec::definition));

    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
        WORDS_TABLE,
        columns.join(",\n    ")
    )
}

const CREATE_THEME_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS theme (
    id INTEGER PRIMARY KEY,
    isDark INTEGER DEFAULT 0
)
"#;

/// One idempotent step of `SchemaManager::ensure`, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationStep {
    CreateWordsTable,
    AddMissingWordColumns,
    CreateThemeTable,
    SeedDefaultTheme,
    RecordVersion,
}

impl MigrationStep {
    pub const ALL: [MigrationStep; 5] = [
        MigrationStep::CreateWordsTable,
        MigrationStep::AddMissingWordColumns,
        MigrationStep::CreateThemeTable,
        MigrationStep::SeedDefaultTheme,
        MigrationStep::RecordVersion,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::CreateWordsTable => "create_words_table",
            Self::AddMissingWordColumns => "add_missing_word_columns",
            Self::CreateThemeTable => "create_theme_table",
            Self::SeedDefaultTheme => "seed_default_theme",
            Self::RecordVersion => "record_version",
        }
    }

    /// Apply this step; running it again is a no-op
    pub async fn apply(self, exec: &QueryExecutor) -> Result<(), SchemaError> {
        debug!("Applying schema step {}", self.name());

        self.run(exec).await.map_err(|source| SchemaError {
            step: self.name(),
            source,
        })
    }

    async fn run(self, exec: &QueryExecutor) -> Result<(), QueryError> {
        match self {
            Self::CreateWordsTable => {
                exec.execute(&create_words_table_sql(), vec![]).await?;
            }
            Self::AddMissingWordColumns => {
                for column in missing_columns(&table_columns(exec, WORDS_TABLE).await?) {
                    info!("Adding column {}.{} (schema v{})", WORDS_TABLE, column.name, column.since);
                    let statement = format!("ALTER TABLE {} ADD COLUMN {}", WORDS_TABLE, column.definition());
                    exec.execute(&statement, vec![]).await?;
                }
            }
            Self::CreateThemeTable => {
                exec.execute(CREATE_THEME_TABLE, vec![]).await?;
            }
            Self::SeedDefaultTheme => {
                exec.execute(
                    "INSERT OR IGNORE INTO theme (id, isDark) VALUES (?1, 0)",
                    vec![Value::from(THEME_ROW_ID)],
                )
                .await?;
            }
            Self::RecordVersion => {
                let current = stored_version(exec).await?;
                if current < SCHEMA_VERSION {
                    exec.execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), vec![])
                        .await?;
                }
            }
        }

        Ok(())
    }
}

/// Expected columns absent from `actual`, in declaration order
pub fn missing_columns(actual: &[String]) -> Vec<&'static ColumnSpec> {
    WORD_COLUMNS
        .iter()
        .filter(|spec| !actual.iter().any(|name| name.eq_ignore_ascii_case(spec.name)))
        .collect()
}

async fn table_columns(exec: &QueryExecutor, table: &str) -> Result<Vec<String>, QueryError> {
    let result = exec
        .execute(&format!("PRAGMA table_info({})", table), vec![])
        .await?;

    result.iter().map(|row| row.get::<String>("name")).collect()
}

async fn stored_version(exec: &QueryExecutor) -> Result<u32, QueryError> {
    let result = exec.execute("PRAGMA user_version", vec![]).await?;

    match result.item(0) {
        Some(row) => Ok(row.get::<i64>("user_version")?.max(0) as u32),
        None => Ok(0),
    }
}

/// Brings the store up to the current schema
#[derive(Clone, Debug)]
pub struct SchemaManager {
    exec: QueryExecutor,
}

impl SchemaManager {
    pub fn new(exec: QueryExecutor) -> Self {
        Self { exec }
    }

    /// Create missing tables and columns and seed the theme row
    ///
    /// Safe to call on every startup. The first failing step aborts the
    /// rest and is reported by name.
    pub async fn ensure(&self) -> Result<(), SchemaError> {
        let before = stored_version(&self.exec).await.unwrap_or(0);

        for step in MigrationStep::ALL {
            step.apply(&self.exec).await?;
        }

        if before < SCHEMA_VERSION {
            info!("Database schema migrated from v{} to v{}", before, SCHEMA_VERSION);
        } else {
            debug!("Database schema is up to date (v{})", SCHEMA_VERSION);
        }

        Ok(())
    }

    /// Actual column names of the `words` table
    pub async fn columns(&self) -> Result<Vec<String>, QueryError> {
        table_columns(&self.exec, WORDS_TABLE).await
    }

    /// Schema version recorded in the store (0 for an untouched file)
    pub async fn version(&self) -> Result<u32, QueryError> {
        stored_version(&self.exec).await
    }
}
