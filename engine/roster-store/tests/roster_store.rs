use rank_aggregator::RosterSource;
use roster_store::{default_roster, JsonRosterStore, RosterError};
use std::sync::Arc;
use tempfile::TempDir;

async fn fresh_store() -> (TempDir, JsonRosterStore) {
    let dir = TempDir::new().unwrap();
    let store = JsonRosterStore::open(dir.path().join("data").join("players.json")).await.unwrap();
    (dir, store)
}

#[tokio::test]
async fn test_first_open_seeds_default_roster() {
    let (_dir, store) = fresh_store().await;

    let roster = store.list().await.unwrap();
    assert_eq!(roster.len(), 15);
    assert_eq!(roster.len(), default_roster().len());
    assert!(roster.iter().any(|e| e.name == "Patrick Mahomes" && e.position == "QB"));
    assert!(roster.iter().any(|e| e.name == "Buffalo Bills" && e.position == "DEF"));
    assert!(roster.windows(2).all(|pair| pair[0].name <= pair[1].name));
}

#[tokio::test]
async fn test_reopen_keeps_changes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("players.json");

    let store = JsonRosterStore::open(&path).await.unwrap();
    store.remove("Patrick Mahomes").await.unwrap();
    drop(store);

    let reopened = JsonRosterStore::open(&path).await.unwrap();
    let roster = reopened.list().await.unwrap();
    assert_eq!(roster.len(), 14);
    assert!(!roster.iter().any(|e| e.name == "Patrick Mahomes"));
}

#[tokio::test]
async fn test_add_trims_and_persists() {
    let (_dir, store) = fresh_store().await;

    let entry = store.add("  Josh Allen ", " QB ").await.unwrap();
    assert_eq!(entry.name, "Josh Allen");
    assert_eq!(entry.position, "QB");

    let roster = store.list().await.unwrap();
    assert_eq!(roster.len(), 16);
    assert!(roster.iter().any(|e| e.name == "Josh Allen" && e.position == "QB"));
}

#[tokio::test]
async fn test_add_rejects_case_insensitive_duplicate() {
    let (_dir, store) = fresh_store().await;

    let err = store.add(" patrick MAHOMES", "QB").await.unwrap_err();
    assert!(matches!(err, RosterError::Duplicate(name) if name == "patrick MAHOMES"));
    assert_eq!(store.list().await.unwrap().len(), 15);
}

#[tokio::test]
async fn test_add_rejects_blank_fields() {
    let (_dir, store) = fresh_store().await;

    assert!(matches!(store.add("   ", "QB").await, Err(RosterError::InvalidEntry(_))));
    assert!(matches!(store.add("Josh Allen", "").await, Err(RosterError::InvalidEntry(_))));
}

#[tokio::test]
async fn test_remove_is_case_insensitive() {
    let (_dir, store) = fresh_store().await;

    let removed = store.remove("  trey mcbride ").await.unwrap();
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].name, "Trey McBride");
    assert_eq!(store.list().await.unwrap().len(), 14);
}

#[tokio::test]
async fn test_remove_missing_player() {
    let (_dir, store) = fresh_store().await;

    let err = store.remove("Nobody Special").await.unwrap_err();
    assert!(matches!(err, RosterError::NotFound(_)));
    assert_eq!(store.list().await.unwrap().len(), 15);
}

#[tokio::test]
async fn test_concurrent_adds_all_land() {
    let (_dir, store) = fresh_store().await;
    let store = Arc::new(store);

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move { store.add(&format!("Player {i}"), "WR").await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.list().await.unwrap().len(), 25);
}

#[tokio::test]
async fn test_roster_source_matches_list() {
    let (_dir, store) = fresh_store().await;

    let via_trait = store.load_roster().await.unwrap();
    assert_eq!(via_trait, store.list().await.unwrap());
}
