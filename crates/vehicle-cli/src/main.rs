//! Vehicle CLI - Command-line tool for the vehicle directory service
//!
//! Lists, filters and edits vehicles on a remote inventory service and
//! answers distance and nearest-vehicle queries.

mod commands;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vehicle_client::VehicleClient;

use crate::commands::VehicleArgs;
use crate::config::Config;
use crate::output::{OutputContext, OutputFormat};

#[derive(Parser)]
#[command(name = "vehicle-cli")]
#[command(author, version, about = "Vehicle directory CLI")]
#[command(propagate_version = true)]
struct Cli {
    /// Base URL of the vehicle service
    #[arg(short, long, env = "VEHICLES_SERVER")]
    server: Option<String>,

    /// Configuration file path
    #[arg(short, long, env = "VEHICLES_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Minimal output (for scripting)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all vehicles
    List,

    /// List vehicles whose fields equal the given values
    Filter {
        /// Terms like name=Toyota or year=2021
        #[arg(value_name = "FIELD=VALUE")]
        terms: Vec<String>,
    },

    /// Show a single vehicle
    Get {
        /// Vehicle ID
        id: u64,
    },

    /// Create a vehicle
    Create {
        #[command(flatten)]
        vehicle: VehicleArgs,
    },

    /// Update a vehicle; attributes not given are kept
    Update {
        /// Vehicle ID
        id: u64,

        #[command(flatten)]
        vehicle: VehicleArgs,
    },

    /// Delete a vehicle
    Delete {
        /// Vehicle ID
        id: u64,
    },

    /// Great-circle distance between two vehicles in kilometers
    Distance {
        /// First vehicle ID
        first: u64,

        /// Second vehicle ID
        second: u64,
    },

    /// Find the vehicle closest to the given one
    Nearest {
        /// Vehicle ID
        id: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    // Load config file
    let config = if let Some(config_path) = &cli.config {
        Config::load_from(config_path)?
    } else {
        Config::load().unwrap_or_default()
    };

    // Merge CLI args with config
    let merged = config.merge_with_args(
        cli.server.as_deref(),
        cli.output.map(|o| o.as_str()),
        cli.no_color,
    );
    tracing::debug!(server = %merged.server, output = %merged.output, "Resolved configuration");

    let ctx = OutputContext::new(
        OutputFormat::from_name(&merged.output),
        merged.no_color,
        cli.quiet,
    );
    let client = create_client(&merged.server)?;

    match &cli.command {
        Commands::List => commands::list(&client, &ctx).await?,
        Commands::Filter { terms } => commands::filter(&client, terms, &ctx).await?,
        Commands::Get { id } => commands::get(&client, *id, &ctx).await?,
        Commands::Create { vehicle } => commands::create(&client, vehicle, &ctx).await?,
        Commands::Update { id, vehicle } => commands::update(&client, *id, vehicle, &ctx).await?,
        Commands::Delete { id } => commands::delete(&client, *id, &ctx).await?,
        Commands::Distance { first, second } => {
            commands::distance(&client, *first, *second, &ctx).await?
        }
        Commands::Nearest { id } => commands::nearest(&client, *id, &ctx).await?,
    }

    Ok(())
}

/// Create a vehicle client for the given server URL
fn create_client(server: &str) -> Result<VehicleClient> {
    VehicleClient::new(server).context("Failed to create vehicle client")
}
