//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for ShiftSync using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// ShiftSync - SBAR shift handoff service
#[derive(Parser, Debug)]
#[command(name = "shiftsync")]
#[command(version, about, long_about = None)]
#[command(author = "ShiftSync Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "shiftsync.toml", env = "SHIFTSYNC_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SHIFTSYNC_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the REST API until SIGINT or SIGTERM
    Serve(commands::serve::ServeArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Print an argon2 hash for a password
    HashPassword(commands::hash_password::HashPasswordArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_serve() {
        let cli = Cli::parse_from(["shiftsync", "serve"]);
        assert_eq!(cli.config, "shiftsync.toml");
        assert!(matches!(cli.command, Commands::Serve(_)));
    }

    #[test]
    fn test_cli_parse_with_config_and_port() {
        let cli = Cli::parse_from([
            "shiftsync", "--config", "ward.toml", "serve", "--port", "8080",
        ]);
        assert_eq!(cli.config, "ward.toml");
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.port, Some(8080));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["shiftsync", "--log-level", "debug", "validate-config"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init_force() {
        let cli = Cli::parse_from(["shiftsync", "init", "--force"]);
        let Commands::Init(args) = cli.command else {
            panic!("expected init");
        };
        assert!(args.force);
    }

    #[test]
    fn test_cli_parse_hash_password() {
        let cli = Cli::parse_from(["shiftsync", "hash-password", "--password", "hunter22"]);
        assert!(matches!(cli.command, Commands::HashPassword(_)));
    }
}
