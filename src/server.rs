//! Storefront server runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: database connection,
//! optional migrations, the REST API listener and graceful shutdown.

use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::infrastructure::{init_database, run_migrations};
use crate::interfaces::http::create_api_router;
use crate::shared::shutdown::{listen_for_shutdown_signals, ShutdownSignal};

/// Handle to a running storefront server.
pub struct ServerHandle {
    /// Address the API listens on.
    pub local_addr: std::net::SocketAddr,

    db: sea_orm::DatabaseConnection,
    shutdown: ShutdownSignal,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Connect to the database, migrate if configured, and start serving.
    pub async fn start(config: AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Starting storefront service...");
        info!("Database: {}", config.database.redacted_url());

        let db = init_database(&config.database).await?;

        if config.migrate {
            run_migrations(&db).await?;
        }

        let jwt_config = config.jwt_config();
        info!(
            "JWT configured with {}h token expiration",
            jwt_config.expiration_hours
        );

        let api_router = create_api_router(db.clone(), jwt_config, config.security.bcrypt_cost);

        let listener = tokio::net::TcpListener::bind(config.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let shutdown = ShutdownSignal::new();
        let api_shutdown = shutdown.clone();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Cloneable signal that stops the server when triggered.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Trigger shutdown on SIGINT / SIGTERM.
    pub fn install_signal_handler(&self) {
        tokio::spawn(listen_for_shutdown_signals(self.shutdown.clone()));
    }

    /// Wait for the API task to finish, then close the pool.
    pub async fn wait(self) {
        match self.api_task.await {
            Ok(()) => info!("REST API server stopped"),
            Err(e) => error!("REST API server task panicked: {}", e),
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("Storefront service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down storefront service...");
        self.shutdown.trigger();
        self.wait().await;
    }
}

/// Initialize tracing based on the logging configuration.
///
/// `RUST_LOG` overrides the configured level. Format "json" emits one JSON
/// object per line; anything else uses the human-readable formatter.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
