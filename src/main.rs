//! Bookcrawl main entry point
//!
//! This is the command-line interface for the bookcrawl catalog scraper.

use bookcrawl::config::{default_config, load_config, Config};
use bookcrawl::crawler::crawl;
use bookcrawl::output::write_records;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Bookcrawl: a polite paginated-catalog scraper
///
/// Bookcrawl walks a book catalog page by page, visits every product's
/// detail page, and writes the assembled records to a CSV file. It runs
/// with built-in defaults; a TOML configuration file can override them.
#[derive(Parser, Debug)]
#[command(name = "bookcrawl")]
#[command(version = "1.0.0")]
#[command(about = "A polite paginated-catalog scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config(path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => default_config()?,
    };

    if cli.dry_run {
        handle_dry_run(&config);
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("bookcrawl=info,warn"),
            1 => EnvFilter::new("bookcrawl=debug,info"),
            2 => EnvFilter::new("bookcrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Bookcrawl Dry Run ===\n");

    println!("Catalog:");
    println!("  Base URL: {}", config.catalog.base_url);
    println!("  Catalog URL: {}", config.catalog.catalog_url);
    println!("  Start page: {}", config.catalog.start_page);
    match config.catalog.max_pages {
        Some(limit) => println!("  Max pages: {}", limit),
        None => println!("  Max pages: unlimited"),
    }

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Timeout: {}s", config.http.timeout_secs);

    println!("\nThrottle:");
    println!("  After each item: {}ms", config.throttle.item_delay_ms);
    println!("  After each page: {}ms", config.throttle.page_delay_ms);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);

    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling from {}", config.catalog.start_url());
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting crawl from {}", config.catalog.start_url());

    let csv_path = PathBuf::from(&config.output.csv_path);

    let records = match crawl(config).await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    write_records(&records, &csv_path)?;
    println!("wrote {} ({} rows)", csv_path.display(), records.len());

    Ok(())
}
