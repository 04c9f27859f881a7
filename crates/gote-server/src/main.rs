//! gote: memo backend main binary
//!
//! Usage:
//!   gote            - Start the HTTP API server
//!   gote --help     - Show help
//!   gote --version  - Show version

use gote_core::{Config, MemoStore};
use tracing_subscriber::EnvFilter;

/// Exit code used when the database cannot be opened or migrated
const STARTUP_FAILURE_EXIT_CODE: i32 = 2;

/// Run mode
#[derive(Debug, PartialEq, Eq)]
enum RunMode {
    /// Serve the HTTP API
    Server,
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match parse_args(std::env::args().skip(1)) {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("gote {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        RunMode::Server => {}
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!("Backend starting...");
    tracing::info!("Database: {}", config.database.path);

    let store = match MemoStore::open(&config.database.path) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to initialize database: {}", e);
            std::process::exit(STARTUP_FAILURE_EXIT_CODE);
        }
    };

    tracing::info!("Starting server on port {}", config.api.port);
    gote_api::start_server(config.api, store).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Parse command line arguments (program name already skipped)
fn parse_args<I>(args: I) -> RunMode
where
    I: IntoIterator<Item = String>,
{
    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return RunMode::Help,
            "--version" | "-v" => return RunMode::Version,
            _ => {}
        }
    }

    RunMode::Server
}

/// Print help message
fn print_help() {
    println!("gote - memo backend");
    println!();
    println!("Usage:");
    println!("  gote             Start the HTTP API server");
    println!("  gote --help      Show this help message");
    println!("  gote --version   Show version");
    println!();
    println!("Configuration is read from ./gote.toml when present.");
    println!();
    println!("Environment Variables:");
    println!("  API_PORT             HTTP API port (default: 8080)");
    println!("  API_ALLOWED_ORIGINS  Comma-separated CORS origins (default: any)");
    println!("  DB_PATH              SQLite database file (default: gote.db)");
    println!("  RUST_LOG             Log filter (default: info)");
}
