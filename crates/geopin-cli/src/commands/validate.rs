//! Validate command - check a GeoJSON file without touching the store.

use std::path::PathBuf;

use colored::Colorize;
use geopin::{TallyCategory, describe, validate_collection};
use serde_json::Value;

use super::read_input;

pub fn run(file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(&file)?;
    let document: Value = serde_json::from_str(&text)?;
    let validation = validate_collection(&document)?;
    let tally = &validation.tally;

    println!(
        "{} {}",
        "Validated".cyan().bold(),
        file.display().to_string().white()
    );
    println!();
    println!(
        "  Valid:    {}",
        validation.accepted.len().to_string().green()
    );
    println!("  Rejected: {}", tally.rejected.to_string().red());

    for category in TallyCategory::ALL {
        let count = tally.count(category);
        if count > 0 {
            println!("    {} {}", count.to_string().yellow(), category.label());
        }
    }
    println!();

    let report = describe(tally, validation.accepted.len());
    if tally.is_empty() {
        println!("{}", report.green());
    } else {
        println!("{}", report.yellow());
    }

    Ok(())
}
