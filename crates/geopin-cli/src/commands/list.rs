//! List command - print the points in the collection.

use colored::Colorize;

use super::open_store;
use crate::cli::StoreArgs;

pub fn run(args: &StoreArgs, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(args)?;

    if json_output {
        println!("{}", store.export_pretty()?);
        return Ok(());
    }

    if store.is_empty() {
        println!("{}", "No points.".dimmed());
        return Ok(());
    }

    for record in store.records() {
        println!(
            "{}  {:>11.6} {:>10.6}  {} {}",
            record.id().unwrap_or("-").white().bold(),
            record.coordinates.longitude,
            record.coordinates.latitude,
            record.name,
            format!("[{}]", record.category).cyan()
        );
    }

    Ok(())
}
