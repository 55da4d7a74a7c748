//! Snapshot storage in a JSON file per key.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{GeopinError, Result};

use super::Persistence;

/// Snapshot stored at `{dir}/{key}.json`.
#[derive(Debug, Clone)]
pub struct FilePersistence {
    path: PathBuf,
}

impl FilePersistence {
    /// Storage for `key` inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`GeopinError::Config`] if the key is empty or contains a path
    /// separator.
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Result<Self> {
        if key.trim().is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
            return Err(GeopinError::Config(format!("Invalid storage key '{}'", key)));
        }
        Ok(Self {
            path: snapshot_path(dir, key),
        })
    }

    /// Storage at an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persistence for FilePersistence {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GeopinError::Persistence(format!(
                "Failed to read snapshot '{}': {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn write(&mut self, snapshot: &str) -> Result<()> {
        // Create parent directory if needed
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    GeopinError::Persistence(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        // Write beside the target, then rename over it
        let staging = self.path.with_extension("json.tmp");
        let mut file = File::create(&staging).map_err(|e| {
            GeopinError::Persistence(format!(
                "Failed to create file '{}': {}",
                staging.display(),
                e
            ))
        })?;
        file.write_all(snapshot.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(|e| {
                GeopinError::Persistence(format!(
                    "Failed to write snapshot '{}': {}",
                    staging.display(),
                    e
                ))
            })?;

        fs::rename(&staging, &self.path).map_err(|e| {
            GeopinError::Persistence(format!(
                "Failed to replace snapshot '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    fn erase(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(GeopinError::Persistence(format!(
                "Failed to erase snapshot '{}': {}",
                self.path.display(),
                e
            ))),
        }
    }
}

/// Snapshot file path for a storage key.
///
/// # Example
///
/// ```
/// use geopin::persistence::snapshot_path;
///
/// let path = snapshot_path(".geopin", "poi_editor_state");
/// assert_eq!(path.to_string_lossy(), ".geopin/poi_editor_state.json");
/// ```
pub fn snapshot_path(dir: impl AsRef<Path>, key: &str) -> PathBuf {
    dir.as_ref().join(format!("{}.json", key))
}
