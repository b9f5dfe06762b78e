/*!
 * Repository for word entries.
 *
 * Entries are addressed by their `word` text, never by row id. Every
 * operation is a single statement through `QueryExecutor`.
 */

use log::{debug, error, warn};
use rusqlite::types::Value;

use super::executor::QueryExecutor;
use super::models::{InsertedWord, WordEntry};
use crate::errors::{ConstraintError, QueryError, StoreError, StoreResult};

const INSERT_WORD: &str = r#"
INSERT INTO words (
    word, translation, image, dateForgets, dateTotallyForgets,
    forgettingSpan, status, phonetics, partOfSpeech, meaning
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
"#;

const UPDATE_WORD: &str = r#"
UPDATE words SET
    translation = ?1,
    image = ?2,
    dateForgets = ?3,
    dateTotallyForgets = ?4,
    forgettingSpan = ?5,
    status = ?6,
    phonetics = ?7,
    partOfSpeech = ?8,
    meaning = ?9
WHERE word = ?10
"#;

/// CRUD over the `words` table
#[derive(Clone, Debug)]
pub struct WordRepository {
    exec: QueryExecutor,
}

impl WordRepository {
    pub fn new(exec: QueryExecutor) -> Self {
        Self { exec }
    }

    /// Insert a new entry and return its row id
    ///
    /// Fails with `ConstraintError::DuplicateWord` if the word is already
    /// stored; the existing row is left untouched.
    pub async fn add(&self, entry: &WordEntry) -> StoreResult<InsertedWord> {
        let mut params = vec![Value::from(entry.word.clone())];
        params.extend(mutable_fields(entry));

        let result = self.exec.execute(INSERT_WORD, params).await.map_err(|e| {
            if e.is_unique_violation() {
                warn!("Error adding word '{}': already stored", entry.word);
                StoreError::from(ConstraintError::DuplicateWord {
                    word: entry.word.clone(),
                })
            } else {
                error!("Error adding word '{}': {}", entry.word, e);
                StoreError::from(e)
            }
        })?;

        let id = result.insert_id.ok_or_else(|| QueryError::Column {
            column: "id".to_string(),
            reason: "insert did not report a row id".to_string(),
        })?;

        debug!("Added word '{}' with id {}", entry.word, id);
        Ok(InsertedWord { id })
    }

    /// Overwrite every mutable column of the row whose `word` matches
    ///
    /// Returns the number of rows changed. A word that isn't stored is not
    /// an error: nothing changes and 0 is returned.
    pub async fn update(&self, entry: &WordEntry) -> StoreResult<usize> {
        let mut params = mutable_fields(entry);
        params.push(Value::from(entry.word.clone()));

        let result = self.exec.execute(UPDATE_WORD, params).await.map_err(|e| {
            error!("Error updating word '{}': {}", entry.word, e);
            e
        })?;

        if result.rows_affected == 0 {
            debug!("Update matched no row for word '{}'", entry.word);
        }
        Ok(result.rows_affected)
    }

    /// Delete the row for `word`; returns the number of rows removed
    pub async fn delete(&self, word: &str) -> StoreResult<usize> {
        let result = self
            .exec
            .execute("DELETE FROM words WHERE word = ?1", vec![Value::from(word.to_string())])
            .await
            .map_err(|e| {
                error!("Error deleting word '{}': {}", word, e);
                e
            })?;

        Ok(result.rows_affected)
    }

    /// Every stored entry, in no guaranteed order
    pub async fn get_all(&self) -> StoreResult<Vec<WordEntry>> {
        let result = self.exec.execute("SELECT * FROM words", vec![]).await?;

        let words = result
            .iter()
            .map(WordEntry::from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(words)
    }

    /// Like `get_all`, but a failed read is logged and yields no entries
    pub async fn get_all_or_empty(&self) -> Vec<WordEntry> {
        match self.get_all().await {
            Ok(words) => words,
            Err(e) => {
                error!("Error getting words: {}", e);
                Vec::new()
            }
        }
    }

    /// Look up a single entry by its word
    pub async fn find(&self, word: &str) -> StoreResult<Option<WordEntry>> {
        let result = self
            .exec
            .execute("SELECT * FROM words WHERE word = ?1", vec![Value::from(word.to_string())])
            .await?;

        Ok(result.item(0).map(WordEntry::from_row).transpose()?)
    }

    pub async fn count(&self) -> StoreResult<usize> {
        let result = self.exec.execute("SELECT COUNT(*) AS n FROM words", vec![]).await?;

        let n = match result.item(0) {
            Some(row) => row.get::<i64>("n")?,
            None => 0,
        };
        Ok(n.max(0) as usize)
    }
}

/// Bound values for the nine mutable columns, in table order
fn mutable_fields(entry: &WordEntry) -> Vec<Value> {
    vec![
        Value::from(entry.translation.clone()),
        Value::from(entry.image.clone()),
        Value::from(entry.date_forgets),
        Value::from(entry.date_totally_forgets),
        Value::from(entry.forgetting_span),
        Value::from(entry.status),
        Value::from(entry.phonetics.clone()),
        Value::from(entry.part_of_speech.clone()),
        Value::from(entry.meaning.clone()),
    ]
}
