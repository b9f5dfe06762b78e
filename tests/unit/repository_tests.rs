/*!
 * Tests for the word repository and the preference store
 */

use vocab_store::database::{ThemePreference, WordEntry};
use vocab_store::errors::{ConstraintError, StoreError};

use crate::common::{dog_entry, TestStore};

/// Reference scenario: empty store, one add, defaults on read
#[tokio::test]
async fn test_addDog_onEmptyStore_shouldReturnIdAndEmptyTextDefaults() {
    let store = TestStore::in_memory().await;
    assert!(store.words.get_all().await.unwrap().is_empty());

    let inserted = store.words.add(&dog_entry()).await.expect("Failed to add dog");

    let words = store.words.get_all().await.unwrap();
    assert_eq!(words.len(), 1);
    let dog = &words[0];
    assert_eq!(dog.id, Some(inserted.id));
    assert_eq!(dog.word, "dog");
    assert_eq!(dog.translation.as_deref(), Some("perro"));
    assert_eq!(dog.date_forgets, Some(0));
    assert_eq!(dog.date_totally_forgets, Some(0));
    assert_eq!(dog.forgetting_span, Some(86400));
    assert_eq!(dog.status, Some(0));
    assert_eq!(dog.phonetics, "");
    assert_eq!(dog.part_of_speech, "");
    assert_eq!(dog.meaning, "");
}

/// Every field survives a write and a read
#[tokio::test]
async fn test_add_withAllFields_shouldReadBackIdentically() {
    let store = TestStore::in_memory().await;
    let entry = WordEntry {
        image: Some("file:///img/river.png".to_string()),
        phonetics: "/ˈrɪvər/".to_string(),
        part_of_speech: "noun".to_string(),
        meaning: "a large natural stream of water".to_string(),
        ..WordEntry::new("river").with_translation("río").with_schedule(10, 20, 30).with_status(3)
    };

    let id = store.words.add(&entry).await.unwrap().id;

    let stored = store.words.find("river").await.unwrap().expect("river should exist");
    assert_eq!(stored, WordEntry { id: Some(id), ..entry });
}

#[tokio::test]
async fn test_add_withExistingWord_shouldFailWithoutDuplicating() {
    let store = TestStore::in_memory().await;
    store.words.add(&dog_entry()).await.unwrap();

    let err = store.words.add(&dog_entry()).await.unwrap_err();

    match err {
        StoreError::Constraint(ConstraintError::DuplicateWord { word }) => assert_eq!(word, "dog"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store.row_count("words").await, 1);
}

#[tokio::test]
async fn test_update_byWord_shouldReplaceTranslation() {
    let store = TestStore::in_memory().await;
    store.words.add(&WordEntry::new("cat").with_translation("gato")).await.unwrap();

    store.words.update(&WordEntry::new("cat").with_translation("x")).await.unwrap();

    let words = store.words.get_all().await.unwrap();
    let cat = words.iter().find(|w| w.word == "cat").expect("cat should exist");
    assert_eq!(cat.translation.as_deref(), Some("x"));
}

/// Update overwrites every mutable column, including clearing optional ones
#[tokio::test]
async fn test_update_withFewerFields_shouldClearOmittedColumns() {
    let store = TestStore::in_memory().await;
    let original = WordEntry {
        meaning: "feline".to_string(),
        ..WordEntry::new("cat").with_translation("gato").with_status(1)
    };
    store.words.add(&original).await.unwrap();

    store.words.update(&WordEntry::new("cat")).await.unwrap();

    let cat = store.words.find("cat").await.unwrap().unwrap();
    assert_eq!(cat.translation, None);
    assert_eq!(cat.status, None);
    assert_eq!(cat.meaning, "");
}

#[tokio::test]
async fn test_updateAndDelete_withUnknownWord_shouldBeNoOps() {
    let store = TestStore::in_memory().await;
    store.words.add(&dog_entry()).await.unwrap();

    assert_eq!(store.words.update(&WordEntry::new("ghost")).await.unwrap(), 0);
    assert_eq!(store.words.delete("ghost").await.unwrap(), 0);

    assert_eq!(store.words.get_all().await.unwrap(), vec![store.words.find("dog").await.unwrap().unwrap()]);
}

#[tokio::test]
async fn test_delete_thenAdd_shouldAllowReusingWord() {
    let store = TestStore::in_memory().await;
    let first = store.words.add(&dog_entry()).await.unwrap();

    store.words.delete("dog").await.unwrap();
    let second = store.words.add(&dog_entry()).await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(store.words.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_preference_setTrue_thenGet_shouldBeDark() {
    let store = TestStore::in_memory().await;

    store.preferences.set(true).await.unwrap();

    assert_eq!(store.preferences.get().await.unwrap(), Some(ThemePreference { is_dark: true }));
}

#[tokio::test]
async fn test_preference_manySets_shouldKeepExactlyOneRow() {
    let store = TestStore::in_memory().await;

    for i in 0..10 {
        store.preferences.set(i % 3 == 0).await.unwrap();
    }

    assert_eq!(store.row_count("theme").await, 1);
    assert_eq!(store.preferences.get().await.unwrap(), Some(ThemePreference { is_dark: true }));
}

/// Mutations issued back to back are applied in order
#[tokio::test]
async fn test_sequentialMutations_shouldApplyInOrder() {
    let store = TestStore::in_memory().await;

    store.words.add(&WordEntry::new("sun")).await.unwrap();
    store.words.update(&WordEntry::new("sun").with_translation("sol")).await.unwrap();
    store.words.update(&WordEntry::new("sun").with_translation("soleil")).await.unwrap();

    let sun = store.words.find("sun").await.unwrap().unwrap();
    assert_eq!(sun.translation.as_deref(), Some("soleil"));
}
