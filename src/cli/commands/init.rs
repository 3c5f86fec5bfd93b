//! Init command implementation
//!
//! Writes a starter `shiftsync.toml` with a freshly generated token secret.

use clap::Args;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fs;
use std::path::Path;

const GENERATED_SECRET_LENGTH: usize = 48;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "shiftsync.toml")]
    pub output: String,

    /// Configure PostgreSQL instead of the in-memory store
    #[arg(long)]
    pub postgresql: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing ShiftSync configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = Self::generate_config(self.postgresql, &generate_token_secret());

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Review {} (a token secret was generated)", self.output);
                if self.postgresql {
                    println!("  2. Set DATABASE_URL in .env or the environment");
                } else {
                    println!("  2. Switch database_target to 'postgresql' for persistent storage");
                }
                println!("  3. Validate configuration: shiftsync validate-config");
                println!("  4. Start the API: shiftsync serve");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    fn generate_config(postgresql: bool, token_secret: &str) -> String {
        let target = if postgresql { "postgresql" } else { "memory" };
        let mut config = format!(
            r#"# ShiftSync Configuration File
# SBAR shift handoff service

# Record store (postgresql or memory)
database_target = "{target}"
environment = "development"

[application]
log_level = "info"

[server]
host = "0.0.0.0"
port = 5000
cors_allowed_origins = ["http://localhost:3000"]

[auth]
token_secret = "{token_secret}"
token_ttl_minutes = 720
require_auth = true

[client]
api_base_url = "http://localhost:5000"
timeout_seconds = 30

[logging]
local_enabled = true
local_path = "./logs"
local_rotation = "daily"
json_console = false
"#
        );

        if postgresql {
            config.push_str(
                r#"
[postgresql]
connection_string = "${DATABASE_URL}"
max_connections = 10
connection_timeout_seconds = 30
statement_timeout_seconds = 60
ssl_mode = "prefer"
"#,
            );
        }
        config
    }
}

fn generate_token_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_SECRET_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_config_from_str, DatabaseTarget};
    use tempfile::TempDir;

    #[test]
    fn test_generated_secret() {
        let first = generate_token_secret();
        assert_eq!(first.len(), GENERATED_SECRET_LENGTH);
        assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(first, generate_token_secret());
    }

    #[test]
    fn test_generated_config_loads() {
        let contents = InitArgs::generate_config(false, &generate_token_secret());
        let config = load_config_from_str(&contents).unwrap();
        assert_eq!(config.database_target, DatabaseTarget::Memory);
        assert!(config.auth.require_auth);
    }

    #[test]
    fn test_postgresql_config_uses_database_url() {
        let config = InitArgs::generate_config(true, "x");
        assert!(config.contains("[postgresql]"));
        assert!(config.contains("${DATABASE_URL}"));
    }

    #[tokio::test]
    async fn test_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("shiftsync.toml");
        fs::write(&output, "existing").unwrap();

        let mut args = InitArgs {
            output: output.to_string_lossy().into_owned(),
            postgresql: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "existing");

        args.force = true;
        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(fs::read_to_string(&output).unwrap().contains("[auth]"));
    }
}
