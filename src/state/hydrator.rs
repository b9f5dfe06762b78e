/*!
 * Startup hydration of the in-memory state from the store.
 *
 * Hydration brings the schema up to date, then loads the words and the
 * theme preference concurrently. Any failure along the way is logged and
 * replaced by an empty default snapshot, so startup always completes.
 */

use log::{error, info};
use std::path::Path;

use super::snapshot::{SnapshotCell, StateSnapshot};
use crate::app_config::DatabaseConfig;
use crate::database::{DatabaseConnection, PreferenceStore, QueryExecutor, SchemaManager, WordRepository};
use crate::errors::StoreResult;

#[derive(Clone, Debug)]
pub struct StoreHydrator {
    schema: SchemaManager,
    words: WordRepository,
    preferences: PreferenceStore,
}

impl StoreHydrator {
    /// Build a hydrator sharing one executor over the given handle
    pub fn new(db: DatabaseConnection) -> Self {
        let exec = QueryExecutor::new(db);

        Self {
            schema: SchemaManager::new(exec.clone()),
            words: WordRepository::new(exec.clone()),
            preferences: PreferenceStore::new(exec),
        }
    }

    pub fn words(&self) -> &WordRepository {
        &self.words
    }

    pub fn preferences(&self) -> &PreferenceStore {
        &self.preferences
    }

    /// Load the initial state; never fails
    pub async fn hydrate(&self) -> StateSnapshot {
        match self.try_hydrate().await {
            Ok(snapshot) => {
                info!("Store hydrated with {} words", snapshot.words().len());
                snapshot
            }
            Err(e) => {
                error!("Failed to initialize store: {}", e);
                StateSnapshot::fallback()
            }
        }
    }

    /// Strict hydration: the first error aborts and is returned
    pub async fn try_hydrate(&self) -> StoreResult<StateSnapshot> {
        self.schema.ensure().await?;

        // Both reads run to completion before either result is inspected
        let (words, preference) = futures::join!(self.words.get_all(), self.preferences.get());

        Ok(StateSnapshot::from_persisted(words?, preference?))
    }

    /// Hydrate and store the result as the initial state
    ///
    /// Fails only if the cell was already seeded.
    pub async fn initialize<'c>(&self, cell: &'c SnapshotCell) -> StoreResult<&'c StateSnapshot> {
        let snapshot = self.hydrate().await;
        cell.seed(snapshot)
    }

    /// Open the store at `path` and hydrate it
    ///
    /// A store that cannot be opened yields the fallback snapshot, the same
    /// as one whose schema cannot be ensured. The handle is returned when
    /// the open succeeded so the caller can keep using it.
    pub async fn hydrate_path<P: AsRef<Path>>(
        path: P,
        config: &DatabaseConfig,
    ) -> (Option<DatabaseConnection>, StateSnapshot) {
        match DatabaseConnection::open_with(path, config) {
            Ok(db) => {
                let snapshot = Self::new(db.clone()).hydrate().await;
                (Some(db), snapshot)
            }
            Err(e) => {
                error!("Failed to open store: {}", e);
                (None, StateSnapshot::fallback())
            }
        }
    }
}
