//! Add, update, remove and clear commands.

use colored::Colorize;
use geopin::{Coordinates, PointPatch, PointRecord};

use super::{open_store, report_persistence};
use crate::cli::StoreArgs;

pub fn add(
    args: &StoreArgs,
    lon: f64,
    lat: f64,
    name: String,
    category: String,
    properties: Vec<(String, String)>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(args)?;

    let record = properties.into_iter().fold(
        PointRecord::new(Coordinates::new(lon, lat), name, category),
        |record, (key, value)| record.with_property(key, value),
    );
    let record = store.add_record(record)?;

    println!(
        "{} {} {}",
        "Added".green().bold(),
        record.id().unwrap_or_default().white().bold(),
        format!("({}, {})", record.name, record.category).dimmed()
    );
    report_persistence(&store);

    Ok(())
}

pub fn update(
    args: &StoreArgs,
    id: String,
    coordinates: Option<(f64, f64)>,
    name: Option<String>,
    category: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut patch = PointPatch::new();
    if let Some((lon, lat)) = coordinates {
        patch = patch.with_coordinates(Coordinates::new(lon, lat));
    }
    if let Some(name) = name {
        patch = patch.with_name(name);
    }
    if let Some(category) = category {
        patch = patch.with_category(category);
    }

    if patch.is_empty() {
        println!(
            "{} Nothing to change. Pass --name, --category or --lon/--lat.",
            "Warning:".yellow().bold()
        );
        return Ok(());
    }

    let mut store = open_store(args)?;
    if !store.update(&id, patch)? {
        return Err(format!("No point with id '{}'", id).into());
    }

    println!("{} {}", "Updated".green().bold(), id.white().bold());
    report_persistence(&store);

    Ok(())
}

pub fn remove(args: &StoreArgs, id: String) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(args)?;
    if !store.remove(&id) {
        return Err(format!("No point with id '{}'", id).into());
    }

    println!("{} {}", "Removed".green().bold(), id.white().bold());
    report_persistence(&store);

    Ok(())
}

pub fn clear(args: &StoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(args)?;
    let removed = store.len();
    store.clear();

    println!(
        "{} {} points",
        "Cleared".green().bold(),
        removed.to_string().white().bold()
    );
    report_persistence(&store);

    Ok(())
}
