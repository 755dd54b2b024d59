mod commands;

use std::sync::Arc;

use anyhow::{Result, anyhow};
use clap::{Args, Parser, Subcommand};
use city_explorer_core::{LocationId, LocationRef, env_first};
use city_explorer_providers::ProviderConfig;
use city_explorer_service::{Coordinator, Providers, ResourceQuery};
use city_explorer_storage::StorageBackend;
use tracing_subscriber::EnvFilter;

pub(crate) const DATABASE_URL_VARS: [&str; 2] = ["DATABASE_URL", "HEROKU_POSTGRESQL_PURPLE_URL"];

#[derive(Parser)]
#[command(name = "city-explorer")]
#[command(
    about = "Cached location, weather, restaurant and movie lookups",
    long_about = None,
    version
)]
struct Cli {
    /// Keep records in process memory instead of PostgreSQL
    #[arg(long, global = true)]
    memory: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Listen port [default: $PORT or 3000]
        #[arg(short, long)]
        port: Option<u16>,
        #[arg(short = 'H', long, default_value = "0.0.0.0")]
        host: String,
    },
    /// Geocode a free-text query
    Location { query: String },
    /// Daily forecast for a stored location
    Weather(LocationArgs),
    /// Restaurants near a stored location
    Yelp(LocationArgs),
    /// Movies related to a stored location
    Movies(LocationArgs),
}

#[derive(Args)]
struct LocationArgs {
    #[arg(long)]
    id: LocationId,
    #[arg(long, allow_hyphen_values = true)]
    latitude: f64,
    #[arg(long, allow_hyphen_values = true)]
    longitude: f64,
    #[arg(long)]
    short_name: String,
}

impl From<LocationArgs> for LocationRef {
    fn from(args: LocationArgs) -> Self {
        Self {
            id: args.id,
            latitude: args.latitude,
            longitude: args.longitude,
            short_name: args.short_name,
        }
    }
}

async fn open_storage(memory: bool) -> Result<StorageBackend> {
    if memory {
        tracing::info!("Using in-memory storage; records are lost on exit");
        return Ok(StorageBackend::new_memory());
    }
    let url = env_first(&DATABASE_URL_VARS).ok_or_else(|| {
        anyhow!("DATABASE_URL or HEROKU_POSTGRESQL_PURPLE_URL must be set (or pass --memory)")
    })?;
    Ok(StorageBackend::new_postgres(&url).await?)
}

async fn build_coordinator(memory: bool) -> Result<Coordinator> {
    let providers = Providers::from_config(&ProviderConfig::from_env())?;
    let storage = open_storage(memory).await?;
    tracing::info!(backend = storage.kind(), "Storage ready");
    Ok(Coordinator::new(Arc::new(storage), providers))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let coordinator = build_coordinator(cli.memory).await?;

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(coordinator, port, host).await,
        Commands::Location { query } => {
            commands::lookup::run(&coordinator, ResourceQuery::Location(query)).await
        },
        Commands::Weather(args) => {
            commands::lookup::run(&coordinator, ResourceQuery::Weather(args.into())).await
        },
        Commands::Yelp(args) => {
            commands::lookup::run(&coordinator, ResourceQuery::Yelp(args.into())).await
        },
        Commands::Movies(args) => {
            commands::lookup::run(&coordinator, ResourceQuery::Movies(args.into())).await
        },
    }
}
