/*!
 * Initial application state built from persisted data.
 *
 * `StateSnapshot` is the preloaded state handed to the reactive state
 * container. Its serialized shape is
 * `{ theme: { isDark, colors }, wordsLearning: { words } }`.
 */

use once_cell::sync::OnceCell;
use serde::Serialize;

use super::palette::{palette_for, Palette};
use crate::database::models::{ThemePreference, WordEntry};
use crate::errors::{StoreError, StoreResult};

/// Where a snapshot's data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotOrigin {
    /// Loaded from the store
    Persisted,
    /// Built from defaults after a persistence failure
    #[default]
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeState {
    pub is_dark: bool,
    pub colors: Palette,
}

impl ThemeState {
    pub fn new(is_dark: bool) -> Self {
        Self {
            is_dark,
            colors: *palette_for(is_dark),
        }
    }
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::new(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct WordsLearningState {
    pub words: Vec<WordEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    pub theme: ThemeState,
    pub words_learning: WordsLearningState,
    #[serde(skip)]
    pub origin: SnapshotOrigin,
}

impl StateSnapshot {
    /// Assemble a snapshot from what the store returned
    ///
    /// A missing preference row means the light theme.
    pub fn from_persisted(words: Vec<WordEntry>, preference: Option<ThemePreference>) -> Self {
        let is_dark = preference.map(|p| p.is_dark).unwrap_or(false);

        Self {
            theme: ThemeState::new(is_dark),
            words_learning: WordsLearningState { words },
            origin: SnapshotOrigin::Persisted,
        }
    }

    /// Empty state with the light theme, used when the store is unusable
    pub fn fallback() -> Self {
        Self::default()
    }

    pub fn words(&self) -> &[WordEntry] {
        &self.words_learning.words
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == SnapshotOrigin::Fallback
    }
}

/// Holds the initial state, which may be set exactly once
#[derive(Debug, Default)]
pub struct SnapshotCell {
    inner: OnceCell<StateSnapshot>,
}

impl SnapshotCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the initial state; a second call fails and keeps the first
    pub fn seed(&self, snapshot: StateSnapshot) -> StoreResult<&StateSnapshot> {
        self.inner.set(snapshot).map_err(|_| StoreError::AlreadySeeded)?;
        self.get()
    }

    /// The seeded state, or `NotSeeded` before `seed` was called
    pub fn get(&self) -> StoreResult<&StateSnapshot> {
        self.inner.get().ok_or(StoreError::NotSeeded)
    }

    pub fn is_seeded(&self) -> bool {
        self.inner.get().is_some()
    }
}
