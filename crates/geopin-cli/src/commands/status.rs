//! Status command - show collection statistics.

use colored::Colorize;

use super::open_store;
use crate::cli::StoreArgs;

pub fn run(args: &StoreArgs, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(args)?;
    let counts = store.category_counts();

    if json_output {
        let status = serde_json::json!({
            "snapshot": store.persistence().path().display().to_string(),
            "storage_key": store.config().storage_key,
            "points": store.len(),
            "categories": counts,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Collection at".cyan().bold(),
        store.persistence().path().display().to_string().white()
    );
    println!();
    println!("Points: {}", store.len().to_string().white().bold());

    if counts.is_empty() {
        return Ok(());
    }

    println!();
    println!("{}", "Categories:".yellow().bold());
    let width = counts.keys().map(|c| c.chars().count()).max().unwrap_or(0);
    for (category, count) in &counts {
        println!("  {:<width$}  {}", category, count.to_string().green());
    }

    Ok(())
}
