//! Export command - write the collection as GeoJSON.

use std::path::PathBuf;

use chrono::Local;
use colored::Colorize;
use geopin::{FilePersistence, GeopinError, Store};

use super::open_store;
use crate::cli::StoreArgs;

pub fn run(
    args: &StoreArgs,
    output: Option<PathBuf>,
    stdout: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(args)?;
    let document = store.export_pretty()?;

    if stdout {
        println!("{}", document);
        return Ok(());
    }

    let path = output.unwrap_or_else(|| {
        let today = Local::now().date_naive();
        PathBuf::from(Store::<FilePersistence>::export_file_name(today))
    });
    std::fs::write(&path, document).map_err(|source| GeopinError::Io {
        path: path.clone(),
        source,
    })?;

    println!(
        "{} {} points to {}",
        "Exported".green().bold(),
        store.len().to_string().white().bold(),
        path.display().to_string().cyan()
    );

    Ok(())
}
