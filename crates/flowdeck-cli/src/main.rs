mod insights;
mod license;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::insights::InsightsCommands;
use crate::license::LicenseCommands;

#[derive(Debug, Parser)]
#[command(name = "flowdeck-cli")]
#[command(about = "flowdeck license and insights command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// License status, trial requests, and registration
    License {
        #[command(subcommand)]
        command: LicenseCommands,
    },
    /// Dashboard insights (synthetic data)
    Insights {
        #[command(subcommand)]
        command: InsightsCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(flowdeck_core::log_level_from_env()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::License { command } => {
            let config = flowdeck_core::load_app_config()?;
            license::run(&config, command).await?;
        }
        Commands::Insights { command } => insights::run(&command)?,
    }

    Ok(())
}

/// Prints `value` to stdout as pretty JSON.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
