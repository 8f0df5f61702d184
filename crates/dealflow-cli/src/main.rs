mod contacts;
mod recommend;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "dealflow")]
#[command(about = "Deal-flow buyer recommendations and contact discovery")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rank recommended buyers for a listing
    Recommend {
        /// Listing id
        #[arg(long)]
        listing: Uuid,
        /// Maximum number of buyers (defaults to DEALFLOW_RECOMMENDATION_LIMIT)
        #[arg(long)]
        limit: Option<usize>,
        /// Print the full result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Apply pending database migrations
    Migrate,
    /// Find decision makers for a list of companies
    FindContacts {
        /// CSV file with `Domain` and `Company Name` columns, or a public Google Sheets URL
        input: String,
        /// Output CSV path (defaults to the sheet title, or output.csv)
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = dealflow_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Recommend {
            listing,
            limit,
            json,
        } => {
            let pool = dealflow_db::connect_pool_from_config(&config).await?;
            let limit = limit.unwrap_or(config.recommendation_default_limit);
            recommend::run_recommend(&pool, &config, listing, limit, json).await?;
        }
        Commands::Migrate => {
            let pool = dealflow_db::connect_pool_from_config(&config).await?;
            let applied = dealflow_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
        Commands::FindContacts { input, output } => {
            contacts::run_find_contacts(&config, &input, output).await?;
        }
    }

    Ok(())
}
