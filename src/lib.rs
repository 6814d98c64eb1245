pub mod api; // HTTP transport + error taxonomy
pub mod config;
pub mod dashboards; // Role-specific controllers
pub mod models;
pub mod router; // Route guards and role landing pages
pub mod session;
pub mod token_store;
pub mod workflow; // Status machines and permission gates

use tracing_subscriber::EnvFilter;

/// Set up structured logging for the process. Call once at startup;
/// honors `RUST_LOG` when set, otherwise falls back to the default
/// filter from [`config::default_log_filter`].
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} client starting v{}", config::APP_NAME, config::APP_VERSION);
}
