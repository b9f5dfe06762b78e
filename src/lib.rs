/*!
 * # vocab-store
 *
 * On-device persistence for a vocabulary-learning app.
 *
 * ## Features
 *
 * - Word entries with spaced-repetition fields stored in SQLite
 * - A single theme preference (dark/light)
 * - Additive, idempotent schema migration across app versions
 * - Startup hydration of the in-memory state, falling back to defaults
 *   when the store is unusable
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `database`: SQLite persistence:
 *   - `database::connection`: The owned store handle
 *   - `database::executor`: One-transaction-per-statement execution
 *   - `database::schema`: Declarative columns and migration steps
 *   - `database::words`: Word entry repository
 *   - `database::preferences`: Theme preference store
 * - `state`: Preloaded state, palettes and the startup hydrator
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod database;
pub mod errors;
pub mod state;

// Re-export main types for easier usage
pub use app_config::Config;
pub use database::{
    DatabaseConnection, PreferenceStore, QueryExecutor, SchemaManager, ThemePreference, WordEntry,
    WordRepository,
};
pub use errors::{ConstraintError, QueryError, SchemaError, StoreError, StoreResult};
pub use state::{SnapshotCell, StateSnapshot, StoreHydrator};
