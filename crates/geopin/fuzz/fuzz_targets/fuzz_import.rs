//! Fuzz target for GeoJSON import.
//!
//! This fuzzer tests that importing arbitrary text:
//! 1. Never panics
//! 2. Leaves the collection untouched when the import fails
//! 3. Only ever keeps records that pass validation

#![no_main]

use geopin::{MemoryPersistence, Store, StoreConfig, validate_record};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut store = Store::open(MemoryPersistence::new(), StoreConfig::default());
    let outcome = store.import_text(text);

    if !outcome.ok {
        assert!(store.is_empty());
        return;
    }

    for record in store.records() {
        assert!(validate_record(record).valid);
        assert!(record.id().is_some());
    }

    // An export is always importable.
    if let Ok(exported) = store.export_pretty() {
        let mut other = Store::open(MemoryPersistence::new(), StoreConfig::default());
        assert!(other.import_text(&exported).ok);
    }
});
