//! Serve command implementation

use crate::adapters::database::create_record_store;
use crate::api::{bind, serve, AppState};
use crate::config::{load_config, ShiftSyncConfig};
use crate::logging::init_logging;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override `server.host`
    #[arg(long)]
    pub host: Option<String>,

    /// Override `server.port`
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command
    ///
    /// Returns once `shutdown` flips to `true` and in-flight requests finish.
    pub async fn execute(
        &self,
        config_path: &str,
        log_level: Option<&str>,
        shutdown: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load configuration: {e}");
                return Ok(2);
            }
        };
        self.apply_overrides(&mut config);

        let level = log_level.unwrap_or(&config.application.log_level).to_string();
        let _guard = match init_logging(&level, &config.logging) {
            Ok(guard) => guard,
            Err(e) => {
                eprintln!("❌ Failed to initialize logging: {e}");
                return Ok(2);
            }
        };

        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            environment = ?config.environment,
            allowed_origins = ?config.server.cors_allowed_origins,
            "ShiftSync API starting"
        );

        let store = match create_record_store(&config) {
            Ok(store) => store,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create record store");
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        if let Err(e) = store.ensure_schema().await {
            tracing::error!(error = %e, backend = store.backend_name(), "Record store unavailable");
            eprintln!("❌ {e}");
            return Ok(4);
        }

        let listener = bind(&config.server.bind_address()).await?;
        let state = AppState::new(store, &config.auth);
        serve(listener, state, shutdown).await?;

        Ok(0)
    }

    fn apply_overrides(&self, config: &mut ShiftSyncConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}
