//! Stockwatch CLI
//!
//! Local execution entry point. For serverless deployment, use
//! `stockwatch-lambda`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stockwatch::{
    api::{ApiRequest, stock_status},
    config::Config,
    error::{AppError, Result},
    pipeline::run_check,
    services::PageFetcher,
    store::{AirtableStore, LocalStore, ProductStore},
};

/// Stockwatch - Supplier inventory checker
#[derive(Parser, Debug)]
#[command(name = "stockwatch", version, about = "Supplier inventory checker")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "stockwatch.toml")]
    config: PathBuf,

    /// Path to the local JSON store file
    #[arg(short, long, default_value = "store.json")]
    store_file: PathBuf,

    /// Use the remote store (requires AIRTABLE_API_KEY)
    #[arg(long)]
    remote: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one full stock check over all products
    Check,

    /// Print stock status for one product, or all products
    Status {
        /// Public product identifier
        product_id: Option<String>,
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

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);

    let store: Box<dyn ProductStore> = if cli.remote {
        Box::new(AirtableStore::from_env(&config.store)?)
    } else {
        Box::new(LocalStore::new(&cli.store_file))
    };

    match cli.command {
        Command::Check => {
            let fetcher = PageFetcher::new(&config.checker)?;
            let summary = run_check(store.as_ref(), &fetcher, &config.checker).await?;

            println!("{}", summary.message());
            println!(
                "  in stock: {}, out of stock: {}, update failures: {}",
                summary.in_stock, summary.out_of_stock, summary.update_failures
            );
        }

        Command::Status { product_id } => {
            let query: Vec<(&str, &str)> = product_id
                .as_deref()
                .map(|id| vec![("productId", id)])
                .unwrap_or_default();
            let response = stock_status(store.as_ref(), &ApiRequest::get(&query)).await;

            if response.status != 200 {
                return Err(AppError::validation(format!(
                    "status query failed (HTTP {}): {}",
                    response.status, response.body
                )));
            }
            println!("{}", response.body);
        }

        Command::Validate => {
            let config = Config::load(&cli.config)?;
            config.validate()?;
            println!("Configuration OK: {}", cli.config.display());
        }
    }

    Ok(())
}
