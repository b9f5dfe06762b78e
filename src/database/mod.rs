/*!
 * Database module for on-device persistence of vocabulary data.
 *
 * This module provides SQLite-based persistence for:
 * - Word entries with their spaced-repetition fields
 * - The theme preference
 * - Additive schema migration across app versions
 */

pub mod connection;
pub mod executor;
pub mod models;
pub mod preferences;
pub mod schema;
pub mod words;

// Re-export main types
pub use connection::DatabaseConnection;
pub use executor::{QueryExecutor, RowSet, SqlRow};
pub use models::{InsertedWord, ThemePreference, WordEntry};
pub use preferences::PreferenceStore;
pub use schema::{MigrationStep, SchemaManager, SCHEMA_VERSION};
pub use words::WordRepository;
