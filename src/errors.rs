/*!
 * Error types for the vocab-store persistence layer.
 *
 * Each layer surfaces its own typed error, using the thiserror crate for
 * ergonomic definitions:
 * - `QueryError` for engine-level statement failures
 * - `ConstraintError` for unique-key violations on insert
 * - `SchemaError` for failed migration steps
 *
 * `StoreError` wraps all of them for callers that don't care which layer failed.
 */

use rusqlite::ErrorCode;
use thiserror::Error;

/// Errors raised while executing a single statement
#[derive(Error, Debug)]
pub enum QueryError {
    /// The engine rejected or failed the statement
    #[error("Statement failed ({statement}): {source}")]
    Engine {
        /// The SQL text that failed
        statement: String,
        /// Underlying engine error
        #[source]
        source: rusqlite::Error,
    },

    /// A row accessor could not find or convert a column
    #[error("Cannot read column '{column}': {reason}")]
    Column {
        /// Requested column name
        column: String,
        /// Why the value could not be produced
        reason: String,
    },

    /// The blocking worker running the statement did not complete
    #[error("Database task failed: {0}")]
    TaskFailed(String),

    /// The handle is still shared and cannot be closed
    #[error("Database handle is still in use and cannot be closed")]
    Closed,
}

impl QueryError {
    pub(crate) fn engine(statement: &str, source: rusqlite::Error) -> Self {
        Self::Engine {
            statement: statement.trim().to_string(),
            source,
        }
    }

    /// Whether this failure is a UNIQUE constraint violation
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Engine {
                source: rusqlite::Error::SqliteFailure(err, _),
                ..
            } => {
                err.code == ErrorCode::ConstraintViolation
                    && err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
            }
            _ => false,
        }
    }
}

/// Errors raised when a write would break a uniqueness rule
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConstraintError {
    /// A word entry with the same natural key already exists
    #[error("Word '{word}' already exists")]
    DuplicateWord {
        /// The conflicting word
        word: String,
    },
}

/// A migration step that could not be applied
#[derive(Error, Debug)]
#[error("Schema step '{step}' failed: {source}")]
pub struct SchemaError {
    /// Name of the failing step
    pub step: &'static str,
    /// The statement failure behind it
    #[source]
    pub source: QueryError,
}

/// Main error type for the store, wrapping all layer errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error from statement execution
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// Error from a uniqueness rule
    #[error("Constraint error: {0}")]
    Constraint(#[from] ConstraintError),

    /// Error from schema migration
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// The initial state was read before it was seeded
    #[error("Store not initialized. Hydrate and seed the state first")]
    NotSeeded,

    /// The initial state was seeded twice
    #[error("Initial state has already been seeded")]
    AlreadySeeded,

    /// Error from a filesystem operation
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
