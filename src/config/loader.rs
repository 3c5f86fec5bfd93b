//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{DatabaseTarget, Environment, PostgreSQLConfig, ShiftSyncConfig};
use super::secret::secret_string;
use crate::domain::errors::ShiftSyncError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`ShiftSyncConfig`]
/// 4. Applies environment variable overrides (`SHIFTSYNC_*`, `DATABASE_URL`, `PORT`)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`ShiftSyncError::Configuration`] if any step fails
///
/// # Examples
///
/// ```no_run
/// use shiftsync::config::load_config;
///
/// let config = load_config("shiftsync.toml").expect("Failed to load config");
/// println!("listening on {}", config.server.bind_address());
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ShiftSyncConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ShiftSyncError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ShiftSyncError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Same as [`load_config`] for TOML already in memory
pub fn load_config_from_str(contents: &str) -> Result<ShiftSyncConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: ShiftSyncConfig = toml::from_str(&contents)
        .map_err(|e| ShiftSyncError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        ShiftSyncError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ShiftSyncError::Configuration(format!("Invalid placeholder pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |cap: &regex::Captures<'_>| {
            let var_name = &cap[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                if !missing_vars.iter().any(|v| v == var_name) {
                    missing_vars.push(var_name.to_string());
                }
                String::new()
            })
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ShiftSyncError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_override<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        ShiftSyncError::Configuration(format!("Invalid value '{value}' for {name}"))
    })
}

fn env_override(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Applies environment variable overrides
///
/// `SHIFTSYNC_<SECTION>_<KEY>` overrides a single key, for example
/// `SHIFTSYNC_SERVER_PORT` or `SHIFTSYNC_AUTH_TOKEN_SECRET`. The deployment
/// conventions `DATABASE_URL` and `PORT` are honoured as well; the prefixed
/// variables win when both are set.
fn apply_env_overrides(config: &mut ShiftSyncConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env_override("SHIFTSYNC_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(val) = env_override("SHIFTSYNC_ENVIRONMENT") {
        config.environment = match val.trim() {
            "development" => Environment::Development,
            "staging" => Environment::Staging,
            "production" => Environment::Production,
            other => {
                return Err(ShiftSyncError::Configuration(format!(
                    "Invalid value '{other}' for SHIFTSYNC_ENVIRONMENT"
                )))
            }
        };
    }
    if let Some(val) = env_override("SHIFTSYNC_DATABASE_TARGET") {
        config.database_target = match val.trim() {
            "postgresql" => DatabaseTarget::PostgreSQL,
            "memory" => DatabaseTarget::Memory,
            other => {
                return Err(ShiftSyncError::Configuration(format!(
                    "Invalid value '{other}' for SHIFTSYNC_DATABASE_TARGET"
                )))
            }
        };
    }

    // Server overrides
    if let Some(val) = env_override("SHIFTSYNC_SERVER_HOST") {
        config.server.host = val;
    }
    if let Some(val) = env_override("PORT") {
        config.server.port = parse_override("PORT", &val)?;
    }
    if let Some(val) = env_override("SHIFTSYNC_SERVER_PORT") {
        config.server.port = parse_override("SHIFTSYNC_SERVER_PORT", &val)?;
    }
    if let Some(val) = env_override("SHIFTSYNC_SERVER_CORS_ALLOWED_ORIGINS") {
        config.server.cors_allowed_origins = val
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();
    }

    // PostgreSQL overrides
    for name in ["DATABASE_URL", "SHIFTSYNC_POSTGRESQL_CONNECTION_STRING"] {
        if let Some(val) = env_override(name) {
            match config.postgresql {
                Some(ref mut pg) => pg.connection_string = secret_string(val),
                None => config.postgresql = Some(PostgreSQLConfig::from_connection_string(val)),
            }
        }
    }
    if let Some(ref mut pg) = config.postgresql {
        if let Some(val) = env_override("SHIFTSYNC_POSTGRESQL_MAX_CONNECTIONS") {
            pg.max_connections = parse_override("SHIFTSYNC_POSTGRESQL_MAX_CONNECTIONS", &val)?;
        }
        if let Some(val) = env_override("SHIFTSYNC_POSTGRESQL_CONNECTION_TIMEOUT_SECONDS") {
            pg.connection_timeout_seconds =
                parse_override("SHIFTSYNC_POSTGRESQL_CONNECTION_TIMEOUT_SECONDS", &val)?;
        }
        if let Some(val) = env_override("SHIFTSYNC_POSTGRESQL_STATEMENT_TIMEOUT_SECONDS") {
            pg.statement_timeout_seconds =
                parse_override("SHIFTSYNC_POSTGRESQL_STATEMENT_TIMEOUT_SECONDS", &val)?;
        }
        if let Some(val) = env_override("SHIFTSYNC_POSTGRESQL_SSL_MODE") {
            pg.ssl_mode = val;
        }
    }

    // Auth overrides
    if let Some(val) = env_override("SHIFTSYNC_AUTH_TOKEN_SECRET") {
        config.auth.token_secret = secret_string(val);
    }
    if let Some(val) = env_override("SHIFTSYNC_AUTH_TOKEN_TTL_MINUTES") {
        config.auth.token_ttl_minutes = parse_override("SHIFTSYNC_AUTH_TOKEN_TTL_MINUTES", &val)?;
    }
    if let Some(val) = env_override("SHIFTSYNC_AUTH_REQUIRE_AUTH") {
        config.auth.require_auth = parse_override("SHIFTSYNC_AUTH_REQUIRE_AUTH", &val)?;
    }

    // Client overrides
    if let Some(val) = env_override("SHIFTSYNC_CLIENT_API_BASE_URL") {
        config.client.api_base_url = val;
    }
    if let Some(val) = env_override("SHIFTSYNC_CLIENT_TIMEOUT_SECONDS") {
        config.client.timeout_seconds = parse_override("SHIFTSYNC_CLIENT_TIMEOUT_SECONDS", &val)?;
    }

    // Logging overrides
    if let Some(val) = env_override("SHIFTSYNC_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("SHIFTSYNC_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = env_override("SHIFTSYNC_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = env_override("SHIFTSYNC_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
    if let Some(val) = env_override("SHIFTSYNC_LOGGING_JSON_CONSOLE") {
        config.logging.json_console = parse_override("SHIFTSYNC_LOGGING_JSON_CONSOLE", &val)?;
    }

    Ok(())
}
