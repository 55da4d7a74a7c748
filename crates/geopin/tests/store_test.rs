//! Integration tests for the Store.

use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use tempfile::TempDir;

use geopin::{
    Coordinates, FilePersistence, MemoryPersistence, Persistence, PointPatch, PointRecord, Store,
    StoreConfig,
};

/// Open a store over a fresh in-memory snapshot.
fn open_empty() -> (Store<MemoryPersistence>, MemoryPersistence) {
    let storage = MemoryPersistence::new();
    (Store::open(storage.clone(), StoreConfig::default()), storage)
}

/// Attach a subscriber that records every collection it is shown.
fn watch<P: Persistence>(store: &Store<P>) -> Arc<Mutex<Vec<Vec<PointRecord>>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    store.subscribe(move |records| {
        sink.lock().unwrap().push(records.to_vec());
        Ok(())
    });
    seen
}

fn feature(name: &str, category: &str, lon: f64, lat: f64) -> Value {
    json!({
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [lon, lat]},
        "properties": {"name": name, "category": category}
    })
}

fn collection(features: Vec<Value>) -> Value {
    json!({"type": "FeatureCollection", "features": features})
}

fn seeded_store() -> (Store<MemoryPersistence>, Vec<String>) {
    let (mut store, _) = open_empty();
    let ids = [("Plaza", "landmark"), ("Park", "park"), ("Cafe", "restaurant")]
        .iter()
        .map(|(name, category)| {
            store
                .add(Coordinates::new(-70.6, -33.4), *name, *category)
                .expect("valid point")
                .id
                .expect("assigned id")
        })
        .collect();
    (store, ids)
}

// =============================================================================
// Import Scenarios
// =============================================================================

#[test]
fn test_mixed_import_scenario() {
    let (mut store, storage) = open_empty();
    let text = r#"{"type":"FeatureCollection","features":[{"type":"Feature","geometry":{"type":"Point","coordinates":[-70.6,-33.4]},"properties":{"name":"Plaza","category":"landmark"}},{"type":"Feature","geometry":{"type":"Point","coordinates":[200,-33.4]},"properties":{"name":"","category":"park"}}]}"#;

    let outcome = store.import_text(text);

    assert!(outcome.ok);
    assert_eq!(
        outcome.report,
        "Imported 1 / Discarded 1 (1 with invalid coordinates, 1 without name)"
    );
    let tally = outcome.tally.expect("tally on success");
    assert_eq!(tally.invalid_coordinates, 1);
    assert_eq!(tally.missing_name, 1);
    assert_eq!(outcome.accepted.expect("accepted on success").len(), 1);

    assert_eq!(store.len(), 1);
    assert_eq!(store.records()[0].name, "Plaza");
    assert!(store.records()[0].id().is_some());
    assert!(storage.snapshot().unwrap().contains("Plaza"));
}

#[test]
fn test_clean_import_report() {
    let (mut store, _) = open_empty();
    let outcome = store.replace_all(&collection(vec![
        feature("A", "park", 0.0, 0.0),
        feature("B", "school", 1.0, 1.0),
    ]));
    assert_eq!(outcome.report, "Successfully imported 2 points.");
}

#[test]
fn test_import_replaces_existing_collection() {
    let (mut store, _) = seeded_store();
    let seen = watch(&store);

    store.replace_all(&collection(vec![feature("Only", "other", 5.0, 5.0)]));

    assert_eq!(store.len(), 1);
    assert_eq!(store.records()[0].name, "Only");
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn test_failed_import_leaves_data_untouched() {
    let (mut store, _) = seeded_store();
    let before = store.records().to_vec();

    for bad in [
        json!({"type": "Topology", "features": []}),
        json!({"type": "FeatureCollection", "features": "none"}),
        json!([1, 2, 3]),
    ] {
        let outcome = store.replace_all(&bad);
        assert!(!outcome.ok, "document {bad} should fail");
        assert!(outcome.report.starts_with("Import failed: Invalid GeoJSON"));
    }

    let outcome = store.import_text("<kml/>");
    assert!(!outcome.ok);

    assert_eq!(store.records(), before.as_slice());
}

#[test]
fn test_import_keeps_given_ids_and_fills_missing_ones() {
    let (mut store, _) = open_empty();
    let mut with_id = feature("Kept", "park", 0.0, 0.0);
    with_id["id"] = json!("custom-1");

    let outcome = store.replace_all(&collection(vec![with_id, feature("New", "park", 1.0, 1.0)]));

    let accepted = outcome.accepted.unwrap();
    assert_eq!(accepted[0].id(), Some("custom-1"));
    assert!(accepted[1].id().unwrap().starts_with("poi-"));
}

// =============================================================================
// Mutation Tests
// =============================================================================

#[test]
fn test_update_changes_only_supplied_fields() {
    let (mut store, ids) = seeded_store();
    let before = store.records().to_vec();

    let updated = store
        .update(&ids[1], PointPatch::new().with_category("garden"))
        .unwrap();

    assert!(updated);
    let after = store.records();
    assert_eq!(after[0], before[0]);
    assert_eq!(after[2], before[2]);
    assert_eq!(after[1].id(), Some(ids[1].as_str()));
    assert_eq!(after[1].name, before[1].name);
    assert_eq!(after[1].coordinates, before[1].coordinates);
    assert_eq!(after[1].category, "garden");
}

#[test]
fn test_update_unknown_id_changes_nothing() {
    let (mut store, _) = seeded_store();
    let before = serde_json::to_string(&store.feature_collection()).unwrap();
    let seen = watch(&store);

    assert!(!store.update("poi-missing", PointPatch::new().with_name("X")).unwrap());

    assert_eq!(serde_json::to_string(&store.feature_collection()).unwrap(), before);
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn test_remove_keeps_order_of_the_rest() {
    let (mut store, ids) = seeded_store();

    assert!(store.remove(&ids[1]));

    let names: Vec<&str> = store.records().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Plaza", "Cafe"]);
    assert!(store.get(&ids[1]).is_none());
}

#[test]
fn test_remove_unknown_id_does_not_notify() {
    let (mut store, _) = seeded_store();
    let seen = watch(&store);

    assert!(!store.remove("poi-missing"));
    assert_eq!(store.len(), 3);
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn test_every_mutation_notifies_with_full_collection() {
    let (mut store, _) = open_empty();
    let seen = watch(&store);

    let id = store
        .add(Coordinates::new(0.0, 0.0), "A", "park")
        .unwrap()
        .id
        .unwrap();
    store.update(&id, PointPatch::new().with_name("B")).unwrap();
    store.replace_all(&collection(vec![
        feature("C", "park", 0.0, 0.0),
        feature("D", "park", 0.0, 0.0),
    ]));
    store.clear();

    let sizes: Vec<usize> = seen.lock().unwrap().iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![1, 1, 2, 0]);
}

#[test]
fn test_unsubscribed_handler_stops_receiving() {
    let (mut store, _) = open_empty();
    let seen = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&seen);
    let subscription = store.subscribe(move |_| {
        *sink.lock().unwrap() += 1;
        Ok(())
    });

    store.clear();
    assert!(subscription.unsubscribe());
    store.clear();

    assert_eq!(*seen.lock().unwrap(), 1);
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn test_ids_stay_unique_across_many_adds() {
    let (mut store, _) = open_empty();
    for i in 0..500 {
        store
            .add(Coordinates::new(0.0, 0.0), format!("P{i}"), "other")
            .unwrap();
    }

    let ids: std::collections::HashSet<&str> =
        store.records().iter().filter_map(PointRecord::id).collect();
    assert_eq!(ids.len(), 500);
}

// =============================================================================
// Restore Tests
// =============================================================================

#[test]
fn test_restore_from_previous_session() {
    let storage = MemoryPersistence::new();
    {
        let mut store = Store::open(storage.clone(), StoreConfig::default());
        store.add(Coordinates::new(10.0, 20.0), "Saved", "park").unwrap();
    }

    let store = Store::open(storage, StoreConfig::default());
    assert_eq!(store.len(), 1);
    assert_eq!(store.records()[0].name, "Saved");
}

#[test]
fn test_corrupt_snapshot_is_discarded() {
    let storage = MemoryPersistence::with_snapshot("{definitely not json");

    let store = Store::open(storage.clone(), StoreConfig::default());

    assert!(store.is_empty());
    assert_eq!(storage.snapshot(), None);
}

#[test]
fn test_wrong_shape_snapshot_is_discarded() {
    let storage = MemoryPersistence::with_snapshot(r#"{"type":"Feature"}"#);

    let store = Store::open(storage.clone(), StoreConfig::default());

    assert!(store.is_empty());
    assert_eq!(storage.snapshot(), None);
}

#[test]
fn test_partially_invalid_snapshot_keeps_valid_records() {
    let mut good = feature("Good", "park", 0.0, 0.0);
    good["id"] = json!("poi-good");
    let snapshot = collection(vec![good, feature("", "park", 0.0, 0.0)]).to_string();
    let storage = MemoryPersistence::with_snapshot(snapshot.clone());

    let store = Store::open(storage.clone(), StoreConfig::default());

    assert_eq!(store.len(), 1);
    assert_eq!(store.records()[0].id(), Some("poi-good"));
    // Nothing was repaired, so the snapshot is left as it was.
    assert_eq!(storage.snapshot(), Some(snapshot));
}

#[test]
fn test_snapshot_without_ids_is_repaired() {
    let storage =
        MemoryPersistence::with_snapshot(collection(vec![feature("A", "park", 0.0, 0.0)]).to_string());

    let store = Store::open(storage.clone(), StoreConfig::default());
    let id = store.records()[0].id().unwrap().to_string();

    let reopened = Store::open(storage, StoreConfig::default());
    assert_eq!(reopened.records()[0].id(), Some(id.as_str()));
}

// =============================================================================
// Export Tests
// =============================================================================

#[test]
fn test_export_then_import_round_trip() {
    let (mut store, _) = open_empty();
    let mut rich = feature("Museum", "landmark", 2.35, 48.86);
    rich["properties"]["opening_hours"] = json!("Tu-Su 09:00-18:00");
    rich["properties"]["tags"] = json!({"wheelchair": "yes"});
    rich["bbox"] = json!([2.3, 48.8, 2.4, 48.9]);
    store.replace_all(&collection(vec![rich, feature("Bakery", "shopping", 2.34, 48.85)]));
    let original = store.records().to_vec();

    let exported = store.export_pretty().unwrap();
    let (mut other, _) = open_empty();
    let outcome = other.import_text(&exported);

    assert!(outcome.ok);
    assert_eq!(outcome.report, "Successfully imported 2 points.");
    assert_eq!(other.records(), original.as_slice());
}

#[test]
fn test_file_backed_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let key = "trip";

    {
        let storage = FilePersistence::new(dir.path(), key).unwrap();
        let mut store = Store::open(storage, StoreConfig::new().with_storage_key(key));
        store.add(Coordinates::new(-70.6, -33.4), "Plaza", "landmark").unwrap();
    }

    let storage = FilePersistence::new(dir.path(), key).unwrap();
    assert!(storage.path().exists());
    let store = Store::open(storage, StoreConfig::new().with_storage_key(key));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_corrupt_snapshot_file_is_removed() {
    let dir = TempDir::new().unwrap();
    let mut storage = FilePersistence::new(dir.path(), "pois").unwrap();
    storage.write("]]]").unwrap();

    let store = Store::open(storage.clone(), StoreConfig::default());

    assert!(store.is_empty());
    assert!(!storage.path().exists());
}
