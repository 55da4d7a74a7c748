//! Store configuration.

use crate::error::{GeopinError, Result};
use crate::persistence::DEFAULT_STORAGE_KEY;

/// Configuration for a [`Store`](crate::Store).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Storage key the snapshot lives under.
    pub storage_key: String,
    /// Re-validate merged records on `update`.
    ///
    /// When `false`, patches are trusted as-is and may leave a record that
    /// a later import would reject.
    pub validate_updates: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            validate_updates: true,
        }
    }
}

impl StoreConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Enable or disable re-validation on update.
    pub fn with_validate_updates(mut self, enabled: bool) -> Self {
        self.validate_updates = enabled;
        self
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GeopinError::Config`] if the storage key is blank.
    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(GeopinError::Config("storage key must not be empty".to_string()));
        }
        Ok(())
    }
}
