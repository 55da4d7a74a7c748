//! The authoritative point collection.

use std::collections::HashSet;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::error::{GeopinError, Result};
use crate::feature::{Coordinates, FeatureCollection, PointPatch, PointRecord};
use crate::persistence::Persistence;
use crate::validation::{RejectionTally, describe, validate_collection, validate_record};

use super::ids::IdGenerator;
use super::observers::{Observers, SubscriberError, Subscription};

/// Result of a bulk import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    /// False if the document was unusable and nothing changed.
    pub ok: bool,
    /// One-line report for the user.
    pub report: String,
    /// Records now held by the store, when `ok`.
    pub accepted: Option<Vec<PointRecord>>,
    /// Rejection counts, when `ok`.
    pub tally: Option<RejectionTally>,
}

impl ImportOutcome {
    fn failed(cause: &GeopinError) -> Self {
        Self {
            ok: false,
            report: format!("Import failed: {}", cause),
            accepted: None,
            tally: None,
        }
    }
}

/// Owner of the current point collection.
///
/// Every mutation runs to completion before returning: the collection is
/// changed, subscribers are notified, then the snapshot is written. A failed
/// write is logged and counted but never undoes the change.
#[derive(Debug)]
pub struct Store<P: Persistence> {
    records: Vec<PointRecord>,
    persistence: P,
    config: StoreConfig,
    observers: Observers,
    ids: IdGenerator,
    persistence_failures: usize,
}

impl<P: Persistence> Store<P> {
    /// Open a store, restoring the last snapshot from `persistence`.
    ///
    /// Never fails: a missing snapshot starts empty, and an unreadable or
    /// structurally invalid one is erased and the store starts empty.
    pub fn open(persistence: P, config: StoreConfig) -> Self {
        let mut store = Self {
            records: Vec::new(),
            persistence,
            config,
            observers: Observers::default(),
            ids: IdGenerator::new(),
            persistence_failures: 0,
        };
        store.restore();
        store
    }

    /// Current records, in insertion order.
    pub fn records(&self) -> &[PointRecord] {
        &self.records
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Option<&PointRecord> {
        self.records.iter().find(|r| r.id() == Some(id))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The persistence backend.
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Number of snapshot writes that have failed since the store opened.
    pub fn persistence_failures(&self) -> usize {
        self.persistence_failures
    }

    /// Add a new point with a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns [`GeopinError::RecordRejected`] if the point would not pass
    /// validation (blank name or category, coordinates out of range).
    pub fn add(
        &mut self,
        coordinates: Coordinates,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<PointRecord> {
        self.add_record(PointRecord::new(coordinates, name, category))
    }

    /// Add a fully built record. Any id on `record` is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`GeopinError::RecordRejected`] if the record is invalid.
    pub fn add_record(&mut self, mut record: PointRecord) -> Result<PointRecord> {
        let id = self.fresh_id(&HashSet::new());
        record.id = Some(id.clone());

        let result = validate_record(&record);
        if !result.valid {
            return Err(GeopinError::RecordRejected {
                id,
                reasons: result.errors,
            });
        }

        self.records.push(record.clone());
        debug!(id = %id, "added point");
        self.commit();
        Ok(record)
    }

    /// Merge `patch` over the record with `id`, keeping its position.
    ///
    /// Returns `Ok(false)` without notifying or persisting if no record has
    /// that id.
    ///
    /// # Errors
    ///
    /// With [`StoreConfig::validate_updates`] on, returns
    /// [`GeopinError::RecordRejected`] if the merged record is invalid; the
    /// collection is left unchanged.
    pub fn update(&mut self, id: &str, patch: PointPatch) -> Result<bool> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };

        let merged = patch.apply_to(&self.records[index]);
        if self.config.validate_updates {
            let result = validate_record(&merged);
            if !result.valid {
                return Err(GeopinError::RecordRejected {
                    id: id.to_string(),
                    reasons: result.errors,
                });
            }
        }

        self.records[index] = merged;
        debug!(id, "updated point");
        self.commit();
        Ok(true)
    }

    /// Remove the record with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };

        self.records.remove(index);
        debug!(id, "removed point");
        self.commit();
        true
    }

    /// Replace the whole collection with the valid features of `document`.
    ///
    /// A document that is not a feature collection leaves the store and its
    /// snapshot untouched.
    pub fn replace_all(&mut self, document: &Value) -> ImportOutcome {
        let validation = match validate_collection(document) {
            Ok(validation) => validation,
            Err(e) => {
                info!(error = %e, "import rejected");
                return ImportOutcome::failed(&e);
            }
        };

        let report = describe(&validation.tally, validation.accepted.len());
        let (records, _) = self.assign_ids(validation.accepted);

        self.records = records;
        info!(
            accepted = self.records.len(),
            rejected = validation.tally.rejected,
            "replaced collection"
        );
        self.commit();

        ImportOutcome {
            ok: true,
            report,
            accepted: Some(self.records.clone()),
            tally: Some(validation.tally),
        }
    }

    /// Parse `text` and import it with [`replace_all`](Self::replace_all).
    ///
    /// Text that is not JSON is reported as a failed import without reaching
    /// the validator.
    pub fn import_text(&mut self, text: &str) -> ImportOutcome {
        match serde_json::from_str::<Value>(text) {
            Ok(document) => self.replace_all(&document),
            Err(e) => {
                let e = GeopinError::from(e);
                info!(error = %e, "import is not valid JSON");
                ImportOutcome::failed(&e)
            }
        }
    }

    /// Remove every record.
    pub fn clear(&mut self) {
        self.records.clear();
        debug!("cleared collection");
        self.commit();
    }

    /// Snapshot of the collection as a feature collection.
    pub fn feature_collection(&self) -> FeatureCollection {
        FeatureCollection::new(self.records.clone())
    }

    /// Pretty-printed feature collection of the current records.
    ///
    /// # Errors
    ///
    /// Returns [`GeopinError::Parse`] if serialization fails.
    pub fn export_pretty(&self) -> Result<String> {
        Ok(self.feature_collection().to_json_pretty()?)
    }

    /// Default export file name for `date`, e.g. `poi-data-2024-05-01.geojson`.
    pub fn export_file_name(date: NaiveDate) -> String {
        format!("poi-data-{}.geojson", date.format("%Y-%m-%d"))
    }

    /// Record counts per category, in order of first appearance.
    pub fn category_counts(&self) -> IndexMap<String, usize> {
        let mut counts = IndexMap::new();
        for record in &self.records {
            *counts.entry(record.category.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Register a handler called with the full collection after each change.
    ///
    /// Handlers run synchronously in subscription order. A handler that
    /// returns an error or panics is logged and skipped; the rest still run.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&[PointRecord]) -> std::result::Result<(), SubscriberError> + Send + Sync + 'static,
    {
        self.observers.subscribe(handler)
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    // Helper methods

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id() == Some(id))
    }

    fn commit(&mut self) {
        self.observers.notify(&self.records);
        self.persist();
    }

    fn persist(&mut self) {
        let written = self
            .feature_collection()
            .to_json()
            .map_err(GeopinError::from)
            .and_then(|snapshot| self.persistence.write(&snapshot));

        if let Err(e) = written {
            self.persistence_failures += 1;
            warn!(
                key = %self.config.storage_key,
                error = %e,
                "failed to persist snapshot; change kept in memory only"
            );
        }
    }

    fn restore(&mut self) {
        let snapshot = match self.persistence.read() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                debug!(key = %self.config.storage_key, "no snapshot; starting empty");
                return;
            }
            Err(e) => {
                warn!(key = %self.config.storage_key, error = %e, "failed to read snapshot; starting empty");
                return;
            }
        };

        let loaded = serde_json::from_str::<Value>(&snapshot)
            .map_err(GeopinError::from)
            .and_then(|document| validate_collection(&document));

        match loaded {
            Ok(validation) => {
                if !validation.tally.is_empty() {
                    warn!(
                        key = %self.config.storage_key,
                        dropped = validation.tally.rejected,
                        "dropped invalid records from snapshot"
                    );
                }
                let (records, repaired) = self.assign_ids(validation.accepted);
                self.records = records;
                debug!(count = self.records.len(), "restored snapshot");
                if repaired {
                    self.persist();
                }
            }
            Err(e) => {
                warn!(key = %self.config.storage_key, error = %e, "discarding corrupt snapshot");
                if let Err(e) = self.persistence.erase() {
                    warn!(key = %self.config.storage_key, error = %e, "failed to erase corrupt snapshot");
                }
            }
        }
    }

    /// Give every record a unique id: records without one, and repeats of an
    /// id already seen earlier in the list, get a fresh id. Returns whether
    /// any id changed.
    fn assign_ids(&mut self, mut records: Vec<PointRecord>) -> (Vec<PointRecord>, bool) {
        let mut taken: HashSet<String> = records.iter().filter_map(|r| r.id.clone()).collect();
        let mut seen = HashSet::new();
        let mut changed = false;

        for record in &mut records {
            match record.id.as_deref() {
                Some(id) if seen.insert(id.to_string()) => continue,
                Some(id) => warn!(id, "duplicate id in document; assigning a new one"),
                None => {}
            }

            let id = self.fresh_id(&taken);
            taken.insert(id.clone());
            seen.insert(id.clone());
            record.id = Some(id);
            changed = true;
        }

        (records, changed)
    }

    fn fresh_id(&mut self, reserved: &HashSet<String>) -> String {
        loop {
            let id = self.ids.next_id();
            if !reserved.contains(&id) && self.position(&id).is_none() {
                return id;
            }
        }
    }
}
