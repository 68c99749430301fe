mod commands;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tastebuddy_distributors::{HttpFetcher, Registry, TracingSink};

#[derive(Debug, Parser)]
#[command(name = "tastebuddy-cli")]
#[command(about = "Look up grocery markets and their current discounts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the registered distributor keys
    Distributors,
    /// Search markets in a city
    Markets {
        /// City to search, e.g. "Berlin"
        #[arg(long)]
        city: String,

        /// Restrict the search to one distributor (by key)
        #[arg(long)]
        distributor: Option<String>,
    },
    /// List current discounts for the markets of a city
    Discounts {
        /// City whose markets are queried
        #[arg(long)]
        city: String,

        /// Restrict the lookup to one distributor (by key)
        #[arg(long)]
        distributor: Option<String>,

        /// Only list discounts of the market with this distributor-specific id
        #[arg(long)]
        market_id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = tastebuddy_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let fetcher = HttpFetcher::new(config.http_timeout_secs, &config.http_user_agent)?;
    let registry = Registry::with_default_adapters(&config, Arc::new(fetcher), Arc::new(TracingSink));
    tracing::debug!(env = %config.env, ?registry, "registry composed");

    match cli.command {
        Commands::Distributors => commands::run_distributors(&registry),
        Commands::Markets { city, distributor } => {
            commands::run_markets(&registry, &config, &city, distributor.as_deref()).await
        }
        Commands::Discounts {
            city,
            distributor,
            market_id,
        } => {
            commands::run_discounts(
                &registry,
                &config,
                &city,
                distributor.as_deref(),
                market_id.as_deref(),
            )
            .await
        }
    }
}
