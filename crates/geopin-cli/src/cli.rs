//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// geopin: validated point-of-interest collections in GeoJSON
#[derive(Parser)]
#[command(name = "geopin")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Where and how the collection is stored.
#[derive(Args, Clone, Debug)]
pub struct StoreArgs {
    /// Directory holding the snapshot
    #[arg(long, global = true, env = "GEOPIN_DATA_DIR", default_value = ".geopin")]
    pub data_dir: PathBuf,

    /// Storage key; the snapshot is saved as <DATA_DIR>/<KEY>.json
    #[arg(long, global = true, env = "GEOPIN_STORAGE_KEY", default_value = geopin::DEFAULT_STORAGE_KEY)]
    pub key: String,

    /// Apply updates without re-validating the edited point
    #[arg(long, global = true)]
    pub trust_updates: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replace the collection with the valid points of a GeoJSON file
    Import {
        /// Path to a GeoJSON FeatureCollection
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Write the collection as GeoJSON
    Export {
        /// Output path (default: poi-data-<today>.geojson)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Print to standard output instead of a file
        #[arg(long)]
        stdout: bool,
    },

    /// Add a point
    Add {
        /// Longitude in degrees (-180 to 180)
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Latitude in degrees (-90 to 90)
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Display name
        #[arg(long)]
        name: String,

        /// Category label (e.g. "park", "restaurant")
        #[arg(long)]
        category: String,

        /// Extra property as key=value; repeatable
        #[arg(long = "prop", value_name = "KEY=VALUE", value_parser = parse_property)]
        properties: Vec<(String, String)>,
    },

    /// Edit an existing point
    Update {
        /// Point id
        #[arg(value_name = "ID")]
        id: String,

        /// New longitude (requires --lat)
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// New latitude (requires --lon)
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New category
        #[arg(long)]
        category: Option<String>,
    },

    /// Remove a point
    Remove {
        /// Point id
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Remove every point
    Clear,

    /// List points
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show collection statistics
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a GeoJSON file without importing it
    Validate {
        /// Path to a GeoJSON FeatureCollection
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// Parse a `key=value` pair.
fn parse_property(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("Invalid property '{}'. Use KEY=VALUE.", s)),
    }
}
