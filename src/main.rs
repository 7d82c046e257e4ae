//! Storefront service binary.
//!
//! Configuration comes from the environment (and `.env` outside
//! production). Flags override individual values.
//!
//! ```sh
//! # Run with the environment as-is
//! storefront-service
//!
//! # Apply migrations and listen on another port
//! storefront-service --migrate --port 3000
//!
//! # Validate configuration without starting
//! storefront-service --check
//! ```

use clap::Parser;
use tracing::{error, info, warn};

use storefront::config::{load_env, AppConfig};
use storefront::server::{init_tracing, ServerHandle};

/// Storefront REST API server.
#[derive(Parser, Debug)]
#[command(
    name = "storefront-service",
    version,
    about = "REST API for the storefront catalog and user sessions"
)]
struct Cli {
    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the listen address.
    #[arg(long)]
    host: Option<String>,

    /// Apply pending database migrations on startup.
    #[arg(long)]
    migrate: bool,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration and exit without starting the server.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let env_file = load_env();
    let mut config = AppConfig::from_env()?;

    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.migrate {
        config.migrate = true;
    }

    init_tracing(&config);
    if env_file {
        info!("Loaded environment from .env");
    }
    for notice in &config.warnings {
        warn!("{}", notice);
    }

    if cli.check {
        info!("Configuration OK");
        info!("  Listen:   {}", config.address());
        info!("  Database: {}", config.database.redacted_url());
        info!("  Migrate:  {}", config.migrate);
        info!("  Log:      {} ({})", config.logging.level, config.logging.format);
        return Ok(());
    }

    let handle = match ServerHandle::start(config).await {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start storefront service: {}", e);
            return Err(e);
        }
    };
    handle.install_signal_handler();

    handle.shutdown_signal().wait().await;
    info!("Shutdown signal received");
    handle.wait().await;

    Ok(())
}
