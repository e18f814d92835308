mod config;
mod db;
mod error;
mod models;
mod repositories;
mod services;
mod ui;

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::repositories::{SqliteCustomerRepository, SqliteProjectRepository};
use crate::services::{CustomerService, ProjectService};
use crate::ui::Console;

/// Console tracker for projects and their customers
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Settings file holding DEFAULT_CONNECTION (defaults to ./.env when present)
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    // Load configuration
    let config = config::init(cli.env_file.as_deref())?;

    // Initialize database connection, schema and sample data
    let db = db::init(&config)
        .await
        .context("Failed to prepare the project store")?;
    tracing::info!("Database is ready");

    let projects = ProjectService::new(SqliteProjectRepository::new(db.get_pool().clone()));
    let customers = CustomerService::new(SqliteCustomerRepository::new(db.get_pool().clone()));

    let stdout = io::stdout();
    let styled = stdout.is_terminal();
    let mut console = Console::new(io::stdin().lock(), stdout.lock(), projects, customers)
        .styled(styled);

    // Run the main menu loop
    let result = console.run().await;
    drop(console);

    db.get_pool().close().await;

    result
}

/// Log to stderr so records never mix with the menu on stdout
fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
