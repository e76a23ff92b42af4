//! File Store Unit Tests

use std::path::PathBuf;

use tempfile::TempDir;

use crate::core::power_store::{FilePowerStore, ListFields, PowerStore, StoreError};

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn test_json_list_serves_any_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "powers.json",
        r##"[
            {"Title": "Flight", "Icons": ["Plane"], "Colors": "#F00", "NamePrefixes": "Captain", "NameMains": "Sky"},
            {"Title": "Strength", "Icons": "Fist", "Colors": ["#00F"], "NamePrefixes": ["Iron"], "NameMains": ["Fist"]}
        ]"##,
    );

    let store = FilePowerStore::new(path);
    let records = store.fetch_all("Anything", &ListFields::default()).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "Flight");
    assert_eq!(records[0].colors, vec!["#F00"]);
    assert_eq!(records[1].icons, vec!["Fist"]);
}

#[tokio::test]
async fn test_yaml_map_selects_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "powers.yaml",
        r##"
Heroes:
  - Title: Flight
    Icons: [Plane, Cloud]
    Colors: ["#F00"]
    NamePrefixes: [Captain]
    NameMains: [Sky]
Villains:
  - Title: Poison
    Icons: "Skull"
    Colors: ["green"]
    NamePrefixes: [Doctor]
    NameMains: [Venom]
"##,
    );

    let store = FilePowerStore::new(path);
    let villains = store.fetch_all("Villains", &ListFields::default()).await.unwrap();
    assert_eq!(villains.len(), 1);
    assert_eq!(villains[0].title, "Poison");
    assert_eq!(villains[0].name_mains, vec!["Venom"]);

    let heroes = store.fetch_all("Heroes", &ListFields::default()).await.unwrap();
    assert_eq!(heroes[0].icons, vec!["Plane", "Cloud"]);
}

#[tokio::test]
async fn test_unknown_list_in_map() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "powers.json", r#"{"Heroes": []}"#);

    let err = FilePowerStore::new(path)
        .fetch_all("Sidekicks", &ListFields::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::ListNotFound { ref list } if list == "Sidekicks"));
}

#[tokio::test]
async fn test_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "powers.json", "[{\"Title\": ");

    let err = FilePowerStore::new(path)
        .fetch_all("Powers", &ListFields::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Json(_)));
}

#[tokio::test]
async fn test_scalar_document_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "powers.yml", "just a string");

    let err = FilePowerStore::new(path)
        .fetch_all("Powers", &ListFields::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidRecord { .. }));
}
