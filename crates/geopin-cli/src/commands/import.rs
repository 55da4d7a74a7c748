//! Import command - replace the collection with a GeoJSON file.

use std::path::PathBuf;

use colored::Colorize;

use super::{open_store, read_input, report_persistence};
use crate::cli::StoreArgs;

pub fn run(args: &StoreArgs, file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(&file)?;
    let mut store = open_store(args)?;

    println!(
        "{} {}",
        "Importing".cyan().bold(),
        file.display().to_string().white()
    );

    let outcome = store.import_text(&text);
    if !outcome.ok {
        return Err(outcome.report.into());
    }

    let clean = outcome.tally.map(|t| t.is_empty()).unwrap_or(true);
    if clean {
        println!("{}", outcome.report.green());
    } else {
        println!("{}", outcome.report.yellow());
    }
    report_persistence(&store);

    Ok(())
}
