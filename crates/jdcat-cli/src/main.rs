mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jdcat_catalog::{Catalog, CatalogOptions, JdClient};

#[derive(Debug, Parser)]
#[command(name = "jdcat")]
#[command(about = "Normalized JD catalog lookups")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search the catalog by keyword
    Search {
        /// Search keyword; several words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Show display brand, name and store for SKUs
    Info {
        /// SKU ids, space or comma separated
        #[arg(required = true, num_args = 1.., value_delimiter = ',')]
        ids: Vec<String>,
    },
    /// List relative image paths for SKUs
    Photos {
        /// SKU ids, space or comma separated
        #[arg(required = true, num_args = 1.., value_delimiter = ',')]
        ids: Vec<String>,
    },
    /// Show the whole-unit price of one SKU (-1 when unavailable)
    Price {
        /// SKU id
        id: String,
    },
    /// Show the lowest real price across SKUs (-1 when none has one)
    MinPrice {
        /// SKU ids, space or comma separated
        #[arg(required = true, num_args = 1.., value_delimiter = ',')]
        ids: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = jdcat_core::load_app_config_from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, base_url = %config.api_base_url, "configuration loaded");

    let client = JdClient::from_app_config(&config)?;
    let catalog = Catalog::new(client, CatalogOptions::from_app_config(&config));

    let output = commands::run(&catalog, cli.command).await?;
    println!("{output}");

    Ok(())
}
