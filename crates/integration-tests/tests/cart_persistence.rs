//! Cart engine invariants across process restarts.
//!
//! Every test reopens the engine from the same data directory to verify
//! that the durable snapshot reflects the last mutation.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;

use shophub_core::CartSnapshot;
use shophub_integration_tests::product;
use shophub_storefront::cart::CartEngine;
use shophub_storefront::store::{JsonSnapshotStore, STORAGE_KEY, SnapshotStore};

#[test]
fn snapshot_round_trip_is_structurally_equal() {
    let dir = tempfile::tempdir().unwrap();
    let original = {
        let mut engine = CartEngine::load(JsonSnapshotStore::new(dir.path()));
        engine
            .add_to_cart(&product("p-2", Decimal::new(2000, 2), Some(9)))
            .unwrap();
        engine
            .add_to_cart(&product("p-1", Decimal::new(500, 2), Some(3)))
            .unwrap();
        engine
            .add_to_cart(&product("p-1", Decimal::new(500, 2), Some(3)))
            .unwrap();
        engine
            .add_to_wishlist(&product("p-3", Decimal::new(150, 2), None))
            .unwrap();
        engine.snapshot()
    };

    // Same lines, same order, same quantities.
    let engine = CartEngine::load(JsonSnapshotStore::new(dir.path()));
    assert_eq!(engine.snapshot(), original);
    let ids: Vec<&str> = engine
        .lines()
        .iter()
        .map(|line| line.product.id.as_str())
        .collect();
    assert_eq!(ids, vec!["p-2", "p-1"]);
    assert_eq!(engine.lines()[1].quantity, 2);
}

#[test]
fn blob_lives_under_the_storage_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonSnapshotStore::new(dir.path());
    let mut engine = CartEngine::load(store);
    engine
        .add_to_cart(&product("p-1", Decimal::new(100, 2), Some(1)))
        .unwrap();

    let blob_path = dir.path().join(format!("{STORAGE_KEY}.json"));
    assert!(blob_path.exists());

    // The blob is the whole {cart, wishlist} state, decodable on its own.
    let raw = std::fs::read(&blob_path).unwrap();
    let snapshot: CartSnapshot = serde_json::from_slice(&raw).unwrap();
    assert_eq!(snapshot.cart.len(), 1);
}

#[test]
fn stock_bounds_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let capped = product("p-1", Decimal::new(100, 2), Some(2));

    {
        let mut engine = CartEngine::load(JsonSnapshotStore::new(dir.path()));
        engine.add_to_cart(&capped).unwrap();
        engine.add_to_cart(&capped).unwrap();
    }

    // The captured stock bound still applies to the rehydrated line.
    let mut engine = CartEngine::load(JsonSnapshotStore::new(dir.path()));
    assert!(engine.add_to_cart(&capped).is_err());
    assert!(engine.update_quantity(&capped.id, 3).is_err());
    assert_eq!(engine.lines()[0].quantity, 2);
}

#[test]
fn unreadable_blob_degrades_to_an_empty_cart() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonSnapshotStore::new(dir.path());
    std::fs::write(store.path(), b"{ definitely not json").unwrap();

    let engine = CartEngine::load(store);
    assert!(engine.lines().is_empty());
    assert!(engine.wishlist().is_empty());
}

#[test]
fn clear_cart_persists_and_keeps_wishlist() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut engine = CartEngine::load(JsonSnapshotStore::new(dir.path()));
        engine
            .add_to_cart(&product("p-1", Decimal::new(100, 2), Some(5)))
            .unwrap();
        engine
            .add_to_wishlist(&product("p-2", Decimal::new(200, 2), Some(5)))
            .unwrap();
        engine.clear_cart();
    }

    let engine = CartEngine::load(JsonSnapshotStore::new(dir.path()));
    assert!(engine.lines().is_empty());
    assert_eq!(engine.wishlist().len(), 1);
}

#[test]
fn store_load_reports_saved_state_directly() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonSnapshotStore::new(dir.path());
    assert!(store.load().unwrap().is_none());

    let mut engine = CartEngine::load(&store);
    engine
        .add_to_cart(&product("p-1", Decimal::new(100, 2), Some(5)))
        .unwrap();

    let saved = store.load().unwrap().unwrap();
    assert_eq!(saved.items_count(), 1);
}
