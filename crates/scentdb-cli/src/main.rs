mod maintenance;
mod seed;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "scentdb-cli")]
#[command(about = "Perfume catalog maintenance: seed from Fragella, inspect, clear")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch fragrances from the Fragella API and add them to the product store
    Seed {
        /// YAML seed configuration (overrides `SCENTDB_SEED_CONFIG_PATH`)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the planned search terms without calling the API
        #[arg(long)]
        dry_run: bool,
    },
    /// Print product store statistics
    Stats,
    /// Remove every product from the store
    Clear {
        /// Confirm the clear
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = scentdb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Seed {
            config: seed_path,
            dry_run,
        } => {
            let seed_config = seed::resolve_seed_config(
                seed_path.as_deref().or(config.seed_config_path.as_deref()),
            )?;
            if dry_run {
                seed::print_plan(&seed_config);
                return Ok(());
            }
            seed::run_seed_command(&config, &seed_config).await?;
        }
        Commands::Stats => maintenance::run_stats(&config)?,
        Commands::Clear { yes } => maintenance::run_clear(&config, yes)?,
    }

    Ok(())
}
