/*!
 * Schema migration tests against on-disk stores
 */

use vocab_store::app_config::DatabaseConfig;
use vocab_store::database::schema::{WORD_COLUMNS, SCHEMA_VERSION};
use vocab_store::database::{ThemePreference, WordEntry};
use vocab_store::state::StoreHydrator;

use crate::common::{create_legacy_store, create_temp_dir, store_path, TestStore};

/// A first-release store gains the new columns and keeps its rows
#[tokio::test]
async fn test_ensure_withLegacyStore_shouldAddColumnsAndPreserveRows() {
    let dir = create_temp_dir().unwrap();
    let path = store_path(&dir);
    create_legacy_store(&path).unwrap();

    let store = TestStore::open(&path);
    assert_eq!(store.schema.version().await.unwrap(), 0);

    store.schema.ensure().await.expect("Migration failed");

    let columns = store.schema.columns().await.unwrap();
    for expected in WORD_COLUMNS {
        assert!(columns.iter().any(|c| c == expected.name), "missing column {}", expected.name);
    }
    assert_eq!(store.schema.version().await.unwrap(), SCHEMA_VERSION);

    let house = store.words.find("house").await.unwrap().expect("legacy row lost");
    assert_eq!(house.translation.as_deref(), Some("casa"));
    assert_eq!(house.image.as_deref(), Some("file:///img/house.png"));
    assert_eq!(house.date_forgets, Some(100));
    assert_eq!(house.date_totally_forgets, Some(200));
    assert_eq!(house.forgetting_span, Some(3600));
    assert_eq!(house.status, Some(2));
    assert_eq!(house.phonetics, "");
    assert_eq!(house.part_of_speech, "");
    assert_eq!(house.meaning, "");

    // The existing preference row is kept, not reseeded
    assert_eq!(store.preferences.get().await.unwrap(), Some(ThemePreference { is_dark: true }));
    assert_eq!(store.row_count("theme").await, 1);
}

/// Repeated ensure calls converge on the same column set with no data loss
#[tokio::test]
async fn test_ensure_calledManyTimes_shouldBeIdempotent() {
    let dir = create_temp_dir().unwrap();
    let path = store_path(&dir);
    create_legacy_store(&path).unwrap();
    let store = TestStore::open(&path);

    store.schema.ensure().await.unwrap();
    let once = store.schema.columns().await.unwrap();
    store.words.add(&WordEntry::new("tree").with_translation("árbol")).await.unwrap();

    for _ in 0..5 {
        store.schema.ensure().await.unwrap();
    }

    assert_eq!(store.schema.columns().await.unwrap(), once);
    assert_eq!(store.words.count().await.unwrap(), 2);
    assert_eq!(store.row_count("theme").await, 1);
}

/// A store with only some of the newer columns gets just the remaining ones
#[tokio::test]
async fn test_ensure_withPartiallyMigratedStore_shouldAddOnlyMissing() {
    let dir = create_temp_dir().unwrap();
    let path = store_path(&dir);
    create_legacy_store(&path).unwrap();
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch("ALTER TABLE words ADD COLUMN phonetics TEXT;").unwrap();
    }

    let store = TestStore::open(&path);
    store.schema.ensure().await.unwrap();

    let columns = store.schema.columns().await.unwrap();
    assert_eq!(columns.iter().filter(|c| c.as_str() == "phonetics").count(), 1);
    assert!(columns.iter().any(|c| c == "meaning"));
    assert!(columns.iter().any(|c| c == "partOfSpeech"));
}

/// Data written through one handle is visible after reopening the file
#[tokio::test]
async fn test_reopen_afterClose_shouldKeepData() {
    let dir = create_temp_dir().unwrap();
    let path = store_path(&dir);

    {
        let store = TestStore::open(&path);
        store.schema.ensure().await.unwrap();
        store.words.add(&WordEntry::new("moon").with_translation("luna")).await.unwrap();
        store.preferences.set(true).await.unwrap();
        let TestStore { db, exec, schema, words, preferences } = store;
        drop((exec, schema, words, preferences));
        db.close().expect("close should succeed once other handles are dropped");
    }

    let store = TestStore::open(&path);
    store.schema.ensure().await.unwrap();

    let moon = store.words.find("moon").await.unwrap().unwrap();
    assert_eq!(moon.translation.as_deref(), Some("luna"));
    assert_eq!(store.preferences.get().await.unwrap(), Some(ThemePreference { is_dark: true }));
}

/// Legacy rows with fractional scheduling values survive migration and hydration
#[tokio::test]
async fn test_ensure_withFractionalLegacyValue_shouldKeepAllRows() {
    let dir = create_temp_dir().unwrap();
    let path = store_path(&dir);
    create_legacy_store(&path).unwrap();
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "INSERT INTO words (word, translation) VALUES ('a', 'x'), ('b', 'y');
             INSERT INTO words (word, forgettingSpan) VALUES ('d', 1.5);",
        )
        .unwrap();
    }

    let (_, snapshot) = StoreHydrator::hydrate_path(&path, &DatabaseConfig::default()).await;

    assert!(!snapshot.is_fallback());
    assert_eq!(snapshot.words().len(), 4);
    assert!(snapshot.theme.is_dark);
    let d = snapshot.words().iter().find(|w| w.word == "d").unwrap();
    assert_eq!(d.forgetting_span, Some(1));
}
