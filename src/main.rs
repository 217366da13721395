//! Toolchest Entry Point
//!
//! Initializes logging, loads configuration, and starts the interactive
//! shell over the builtin catalogue.

use std::sync::Arc;

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use toolchest::core::{Config, Session, Shell};
use toolchest::domains::catalog::ToolCatalog;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.site.name, config.site.version);

    let catalog = Arc::new(ToolCatalog::builtin().clone());
    info!(
        "Catalogue loaded: {} tools in {} categories",
        catalog.tools().len(),
        catalog.categories().len()
    );

    let session = Session::new(Arc::new(config), catalog);
    Shell::new(session).run().await?;

    info!("Shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level and format.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
