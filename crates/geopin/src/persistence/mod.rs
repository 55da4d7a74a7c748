//! Durable snapshot storage.
//!
//! A [`Persistence`] backend holds one text snapshot under one key. The
//! [`Store`](crate::Store) always reads and writes the whole document.
//!
//! ```text
//! .geopin/
//! └── poi_editor_state.json     # FilePersistence snapshot for the default key
//! ```

mod file;
mod memory;

pub use file::{FilePersistence, snapshot_path};
pub use memory::MemoryPersistence;

use crate::error::Result;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "poi_editor_state";

/// Key-value durable store for a single snapshot.
pub trait Persistence {
    /// Read the stored snapshot, or `None` if nothing was stored.
    fn read(&self) -> Result<Option<String>>;

    /// Replace the stored snapshot.
    fn write(&mut self, snapshot: &str) -> Result<()>;

    /// Remove the stored snapshot. Erasing an absent snapshot succeeds.
    fn erase(&mut self) -> Result<()>;
}

impl<P: Persistence + ?Sized> Persistence for Box<P> {
    fn read(&self) -> Result<Option<String>> {
        (**self).read()
    }

    fn write(&mut self, snapshot: &str) -> Result<()> {
        (**self).write(snapshot)
    }

    fn erase(&mut self) -> Result<()> {
        (**self).erase()
    }
}
