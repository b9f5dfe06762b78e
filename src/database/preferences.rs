/*!
 * Theme preference persistence.
 *
 * The preference lives in a single row of the `theme` table at a fixed id.
 * Writes replace that row, so the table never holds more than one row.
 */

use log::error;
use rusqlite::types::Value;

use super::executor::QueryExecutor;
use super::models::ThemePreference;
use super::schema::THEME_ROW_ID;
use crate::errors::StoreResult;

#[derive(Clone, Debug)]
pub struct PreferenceStore {
    exec: QueryExecutor,
}

impl PreferenceStore {
    pub fn new(exec: QueryExecutor) -> Self {
        Self { exec }
    }

    /// The stored preference, or `None` if the row is missing
    pub async fn get(&self) -> StoreResult<Option<ThemePreference>> {
        let result = self
            .exec
            .execute("SELECT isDark FROM theme WHERE id = ?1", vec![Value::from(THEME_ROW_ID)])
            .await?;

        let preference = match result.item(0) {
            Some(row) => {
                let is_dark: Option<i64> = row.get("isDark")?;
                Some(ThemePreference::new(is_dark.unwrap_or(0) != 0))
            }
            None => None,
        };
        Ok(preference)
    }

    /// Like `get`, but a failed read is logged and treated as no preference
    pub async fn get_or_none(&self) -> Option<ThemePreference> {
        match self.get().await {
            Ok(preference) => preference,
            Err(e) => {
                error!("Error getting theme: {}", e);
                None
            }
        }
    }

    /// Replace the stored preference
    pub async fn set(&self, is_dark: bool) -> StoreResult<()> {
        self.exec
            .execute(
                "INSERT OR REPLACE INTO theme (id, isDark) VALUES (?1, ?2)",
                vec![Value::from(THEME_ROW_ID), Value::from(is_dark)],
            )
            .await
            .map_err(|e| {
                error!("Error setting theme: {}", e);
                e
            })?;

        Ok(())
    }
}
