//! Channel catalog CLI
//!
//! Runs the catalog operations against a configured site and prints the
//! JSON responses.

use std::path::PathBuf;

use channel_catalog::{ChannelCatalog, error::Result, models::Config};
use clap::{Parser, Subcommand};
use serde::Serialize;

/// Telegram channel video catalog
#[derive(Parser, Debug)]
#[command(name = "channel-catalog", version, about = "Telegram channel video catalog")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Site (server identity) to use from the configuration
    #[arg(short, long, default_value = "default")]
    site: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the home channels as categories
    Home,

    /// Show one catalog page of a channel
    Category {
        /// Channel id
        channel: String,

        /// Page number; pages must be requested in order
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Resolve play sources for catalog ids
    Detail {
        /// Catalog ids (pipe-joined share links or a message permalink)
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Search the configured search channels
    Search {
        /// Keyword
        query: String,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);

    if let Command::Validate = cli.command {
        if let Err(e) = config.validate() {
            log::error!("Config validation failed: {}", e);
            return Err(e);
        }
        log::info!("✓ Config OK ({} providers, {} sites)", config.providers.len(), config.sites.len());
        return Ok(());
    }

    let catalog = ChannelCatalog::new(&config, &cli.site)?;
    log::debug!("Using site '{}' at {}", cli.site, catalog.site().base_url);

    match cli.command {
        Command::Home => print_json(&catalog.home())?,
        Command::Category { channel, page } => {
            // Later pages continue from the previous page's cursor, so walk up to the target.
            let mut result = catalog.category(&channel, 1).await;
            for current in 2..=page.max(1) {
                result = catalog.category(&channel, current).await;
            }
            print_json(&result)?;
        }
        Command::Detail { ids } => print_json(&catalog.detail(&ids).await)?,
        Command::Search { query } => print_json(&catalog.search(&query).await)?,
        Command::Validate => {}
    }

    Ok(())
}
