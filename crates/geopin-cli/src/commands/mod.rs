//! CLI command implementations.

pub mod edit;
pub mod export;
pub mod import;
pub mod list;
pub mod status;
pub mod validate;

use std::path::Path;

use geopin::{FilePersistence, Store, StoreConfig};

use crate::cli::StoreArgs;

/// Open the store described by the global flags.
pub fn open_store(args: &StoreArgs) -> Result<Store<FilePersistence>, Box<dyn std::error::Error>> {
    let config = StoreConfig::new()
        .with_storage_key(args.key.clone())
        .with_validate_updates(!args.trust_updates);
    config.validate()?;

    let persistence = FilePersistence::new(&args.data_dir, &config.storage_key)?;
    let store = Store::open(persistence, config);
    store.subscribe(|records| {
        tracing::debug!(count = records.len(), "collection changed");
        Ok(())
    });
    Ok(store)
}

/// Read a whole input file, naming it in the error.
pub fn read_input(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()).into());
    }
    std::fs::read_to_string(path).map_err(|source| {
        geopin::GeopinError::Io {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

/// Warn when the last change did not reach disk.
pub fn report_persistence(store: &Store<FilePersistence>) {
    use colored::Colorize;

    if store.persistence_failures() > 0 {
        eprintln!(
            "{} change kept in memory only; could not write {}",
            "Warning:".yellow().bold(),
            store.persistence().path().display()
        );
    }
}
