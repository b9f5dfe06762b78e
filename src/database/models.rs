/*!
 * Database entity models.
 *
 * These structures map directly to the `words` and `theme` tables. Their
 * serialized form uses the persisted column names so that the state
 * snapshot handed to the UI keeps the same field spelling.
 */

use log::warn;
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

use super::executor::SqlRow;
use crate::errors::QueryError;

/// A vocabulary entry together with its spaced-repetition fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    /// Row id, assigned by the store on insert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// The word itself; unique natural key
    pub word: String,
    #[serde(default)]
    pub translation: Option<String>,
    /// Path or URI of an illustration
    #[serde(default)]
    pub image: Option<String>,
    /// Soft-forget threshold timestamp
    #[serde(default)]
    pub date_forgets: Option<i64>,
    /// Hard-forget threshold timestamp
    #[serde(default)]
    pub date_totally_forgets: Option<i64>,
    /// Interval driving the two thresholds
    #[serde(default)]
    pub forgetting_span: Option<i64>,
    /// Learning stage, owned by the scheduler
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub phonetics: String,
    #[serde(default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub meaning: String,
}

impl WordEntry {
    /// Create an entry for the given word with every other field empty
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..Self::default()
        }
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = Some(translation.into());
        self
    }

    /// Set the three scheduling fields at once
    pub fn with_schedule(mut self, date_forgets: i64, date_totally_forgets: i64, forgetting_span: i64) -> Self {
        self.date_forgets = Some(date_forgets);
        self.date_totally_forgets = Some(date_totally_forgets);
        self.forgetting_span = Some(forgetting_span);
        self
    }

    pub fn with_status(mut self, status: i64) -> Self {
        self.status = Some(status);
        self
    }

    /// Build an entry from a `SELECT * FROM words` row
    ///
    /// Text columns added by later migrations are NULL on older rows and
    /// come back as empty strings. Scheduling columns tolerate whatever an
    /// older store left in them, see `read_integer`.
    pub(crate) fn from_row(row: &SqlRow) -> Result<Self, QueryError> {
        let word: String = row.get("word")?;

        Ok(Self {
            id: Some(row.get("id")?),
            translation: row.get("translation")?,
            image: row.get("image")?,
            date_forgets: read_integer(row, "dateForgets", &word)?,
            date_totally_forgets: read_integer(row, "dateTotallyForgets", &word)?,
            forgetting_span: read_integer(row, "forgettingSpan", &word)?,
            status: read_integer(row, "status", &word)?,
            phonetics: row.get::<Option<String>>("phonetics")?.unwrap_or_default(),
            part_of_speech: row.get::<Option<String>>("partOfSpeech")?.unwrap_or_default(),
            meaning: row.get::<Option<String>>("meaning")?.unwrap_or_default(),
            word,
        })
    }
}

// SQLite keeps non-integral REAL and TEXT values in INTEGER columns as is.
// Reals are truncated, anything else unusable reads as NULL.
fn read_integer(row: &SqlRow, column: &str, word: &str) -> Result<Option<i64>, QueryError> {
    match row.get::<Value>(column)? {
        Value::Null => Ok(None),
        Value::Integer(n) => Ok(Some(n)),
        Value::Real(f) => {
            warn!("Truncating {}={} of word '{}' to an integer", column, f, word);
            Ok(Some(f as i64))
        }
        other => {
            warn!("Ignoring non-numeric {} of word '{}': {:?}", column, word, other);
            Ok(None)
        }
    }
}

/// Id assigned to a freshly inserted word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertedWord {
    pub id: i64,
}

/// The single theme preference record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ThemePreference {
    pub is_dark: bool,
}

impl ThemePreference {
    pub fn new(is_dark: bool) -> Self {
        Self { is_dark }
    }
}
