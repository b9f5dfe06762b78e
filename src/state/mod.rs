/*!
 * In-memory application state seeded from the store.
 *
 * - `palette`: static light/dark color tables
 * - `snapshot`: the preloaded state shape and its seed-once holder
 * - `hydrator`: startup loading with fallback to defaults
 */

pub mod hydrator;
pub mod palette;
pub mod snapshot;

pub use hydrator::StoreHydrator;
pub use palette::{palette_for, Palette, COLORS_DARK, COLORS_LIGHT};
pub use snapshot::{SnapshotCell, SnapshotOrigin, StateSnapshot, ThemeState, WordsLearningState};
