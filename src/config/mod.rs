//! Configuration management for ShiftSync.
//!
//! TOML configuration with `${VAR}` substitution, environment overrides and
//! validation on load.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use shiftsync::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("shiftsync.toml")?;
//! println!("API on {}", config.server.bind_address());
//! println!("Store: {:?}", config.database_target);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level
//! - [`ServerConfig`] - listener address and allowed origins
//! - [`PostgreSQLConfig`] - connection pool (when `database_target = "postgresql"`)
//! - [`AuthConfig`] - token signing secret, lifetime, and whether routes require a token
//! - [`ClientConfig`] - base URL and timeout for [`crate::client::ApiClient`]
//! - [`LoggingConfig`] - rolling log files and console format
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "production"
//! database_target = "postgresql"
//!
//! [server]
//! port = 5000
//!
//! [postgresql]
//! connection_string = "postgresql://shiftsync:${SHIFTSYNC_PG_PASSWORD}@db:5432/shiftsync"
//! ssl_mode = "require"
//!
//! [auth]
//! token_secret = "${SHIFTSYNC_TOKEN_SECRET}"
//! ```
//!
//! # Environment Variables
//!
//! `SHIFTSYNC_<SECTION>_<KEY>` overrides any single key. `DATABASE_URL` and `PORT`
//! are also honoured.

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_str};
pub use schema::{
    ApplicationConfig, AuthConfig, ClientConfig, DatabaseTarget, Environment, LoggingConfig,
    PostgreSQLConfig, ServerConfig, ShiftSyncConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
