//! geopin CLI - manage a point-of-interest collection from the shell.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let store = &cli.store;
    let result = match cli.command {
        Commands::Import { file } => commands::import::run(store, file),

        Commands::Export { output, stdout } => commands::export::run(store, output, stdout),

        Commands::Add {
            lon,
            lat,
            name,
            category,
            properties,
        } => commands::edit::add(store, lon, lat, name, category, properties),

        Commands::Update {
            id,
            lon,
            lat,
            name,
            category,
        } => commands::edit::update(store, id, lon.zip(lat), name, category),

        Commands::Remove { id } => commands::edit::remove(store, id),

        Commands::Clear => commands::edit::clear(store),

        Commands::List { json } => commands::list::run(store, json),

        Commands::Status { json } => commands::status::run(store, json),

        Commands::Validate { file } => commands::validate::run(file),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "geopin=debug" } else { "geopin=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
