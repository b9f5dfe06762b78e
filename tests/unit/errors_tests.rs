/*!
 * Tests for error types and conversions
 */

use vocab_store::errors::{ConstraintError, QueryError, SchemaError, StoreError};

#[test]
fn test_constraintError_shouldDisplayWord() {
    let error = ConstraintError::DuplicateWord { word: "dog".to_string() };
    let display = format!("{}", error);
    assert!(display.contains("dog"));
    assert!(display.contains("already exists"));
}

#[test]
fn test_storeError_fromSchemaError_shouldKeepStep() {
    let error: StoreError = SchemaError {
        step: "seed_default_theme",
        source: QueryError::TaskFailed("worker gone".to_string()),
    }
    .into();

    let display = format!("{}", error);
    assert!(display.contains("Schema error"));
    assert!(display.contains("seed_default_theme"));
}

#[test]
fn test_queryError_taskFailed_shouldNotBeUniqueViolation() {
    assert!(!QueryError::TaskFailed("x".to_string()).is_unique_violation());
}

#[test]
fn test_storeError_notSeeded_shouldExplainFix() {
    let display = format!("{}", StoreError::NotSeeded);
    assert!(display.contains("not initialized"));
}
