//! In-process snapshot storage.

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::Result;

use super::Persistence;

/// Snapshot held in memory.
///
/// Clones share the same slot, so a test can keep a handle and inspect what
/// the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryPersistence {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage pre-seeded with a snapshot.
    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(snapshot.into()))),
        }
    }

    /// Current snapshot, if any.
    pub fn snapshot(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Persistence for MemoryPersistence {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.snapshot())
    }

    fn write(&mut self, snapshot: &str) -> Result<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot.to_string());
        Ok(())
    }

    fn erase(&mut self) -> Result<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
