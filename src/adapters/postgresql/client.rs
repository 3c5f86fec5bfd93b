//! PostgreSQL client implementation
//!
//! Connection pooling, TLS selection, the startup migration and error
//! classification. Queries specific to ShiftSync records live in the adapter.

use crate::config::schema::PostgreSQLConfig;
use crate::domain::{Result, ShiftSyncError, ValidationErrors};
use deadpool_postgres::{Manager, ManagerConfig, Object, Pool, RecyclingMethod};
use postgres_native_tls::MakeTlsConnector;
use secrecy::ExposeSecret;
use std::time::Duration;
use tokio_postgres::config::SslMode;
use tokio_postgres::error::SqlState;
use tokio_postgres::types::ToSql;
use tokio_postgres::{NoTls, Row};

/// Schema applied by [`PostgreSQLClient::ensure_schema`]
pub const INITIAL_SCHEMA: &str = include_str!("../../../migrations/001_initial_schema.sql");

/// PostgreSQL client for ShiftSync
pub struct PostgreSQLClient {
    pool: Pool,
    config: PostgreSQLConfig,
}

impl PostgreSQLClient {
    /// Create a new PostgreSQL client
    ///
    /// The pool connects lazily; call [`Self::test_connection`] to fail fast.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string cannot be parsed or the TLS
    /// connector cannot be built.
    pub fn new(config: PostgreSQLConfig) -> Result<Self> {
        let mut pg_config: tokio_postgres::Config = config
            .connection_string
            .expose_secret()
            .as_str()
            .parse()
            .map_err(|e| {
                ShiftSyncError::Configuration(format!(
                    "Invalid PostgreSQL connection string: {e}"
                ))
            })?;
        pg_config.connect_timeout(Duration::from_secs(config.connection_timeout_seconds));

        let manager_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };

        let manager = match config.ssl_mode.as_str() {
            "disable" => {
                pg_config.ssl_mode(SslMode::Disable);
                Manager::from_config(pg_config, NoTls, manager_config)
            }
            mode => {
                pg_config.ssl_mode(if matches!(mode, "allow" | "prefer") {
                    SslMode::Prefer
                } else {
                    SslMode::Require
                });
                let connector = tls_connector(mode)?;
                Manager::from_config(pg_config, connector, manager_config)
            }
        };

        let timeout = Some(Duration::from_secs(config.connection_timeout_seconds));
        let pool = Pool::builder(manager)
            .max_size(config.max_connections)
            .wait_timeout(timeout)
            .create_timeout(timeout)
            .recycle_timeout(timeout)
            .runtime(deadpool_postgres::Runtime::Tokio1)
            .build()
            .map_err(|e| {
                ShiftSyncError::Database(format!("Failed to create connection pool: {e}"))
            })?;

        Ok(Self { pool, config })
    }

    /// Attempts to get a connection from the pool and execute a simple query
    pub async fn test_connection(&self) -> Result<()> {
        let client = self.get_connection().await?;

        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| ShiftSyncError::Database(format!("Connection test failed: {e}")))?;

        tracing::debug!("PostgreSQL connection test successful");
        Ok(())
    }

    /// Runs the idempotent schema migration
    pub async fn ensure_schema(&self) -> Result<()> {
        let client = self.get_connection().await?;

        client
            .batch_execute(INITIAL_SCHEMA)
            .await
            .map_err(|e| ShiftSyncError::Database(format!("Failed to execute migration: {e}")))?;

        tracing::info!(
            database = %self.connection_string_safe(),
            "PostgreSQL schema initialized"
        );
        Ok(())
    }

    /// Get a pooled connection with the statement timeout applied
    async fn get_connection(&self) -> Result<Object> {
        let client = self.pool.get().await.map_err(|e| {
            ShiftSyncError::Database(format!("Failed to get connection from pool: {e}"))
        })?;

        let timeout_query = format!(
            "SET statement_timeout = {}",
            self.config.statement_timeout_seconds * 1000
        );
        client.batch_execute(&timeout_query).await.map_err(|e| {
            ShiftSyncError::Database(format!("Failed to set statement timeout: {e}"))
        })?;

        Ok(client)
    }

    /// Execute a query and return rows
    pub async fn query(&self, query: &str, params: &[&(dyn ToSql + Sync)]) -> Result<Vec<Row>> {
        let client = self.get_connection().await?;
        client
            .query(query, params)
            .await
            .map_err(|e| classify_error(e, "Query failed"))
    }

    /// Execute a query expected to return at most one row
    pub async fn query_opt(
        &self,
        query: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Option<Row>> {
        let client = self.get_connection().await?;
        client
            .query_opt(query, params)
            .await
            .map_err(|e| classify_error(e, "Query failed"))
    }

    /// Execute a statement and return the number of affected rows
    ///
    /// Unique-constraint violations come back as validation errors.
    pub async fn execute(&self, statement: &str, params: &[&(dyn ToSql + Sync)]) -> Result<u64> {
        let client = self.get_connection().await?;
        client
            .execute(statement, params)
            .await
            .map_err(|e| classify_error(e, "Statement execution failed"))
    }

    /// Get the connection string (without credentials)
    pub fn connection_string_safe(&self) -> String {
        redact_connection_string(self.config.connection_string.expose_secret().as_str())
    }

    /// Get the pool statistics
    pub fn pool_status(&self) -> deadpool_postgres::Status {
        self.pool.status()
    }
}

fn tls_connector(ssl_mode: &str) -> Result<MakeTlsConnector> {
    let mut builder = native_tls::TlsConnector::builder();
    match ssl_mode {
        // libpq semantics: encryption without certificate checks
        "allow" | "prefer" | "require" => {
            builder.danger_accept_invalid_certs(true);
        }
        "verify-ca" => {
            builder.danger_accept_invalid_hostnames(true);
        }
        _ => {}
    }
    let connector = builder
        .build()
        .map_err(|e| ShiftSyncError::Configuration(format!("Failed to build TLS connector: {e}")))?;
    Ok(MakeTlsConnector::new(connector))
}

/// Maps a driver error; unique violations become field-level validation errors
fn classify_error(err: tokio_postgres::Error, context: &str) -> ShiftSyncError {
    if let Some(db_error) = err.as_db_error() {
        if db_error.code() == &SqlState::UNIQUE_VIOLATION {
            let field = match db_error.constraint() {
                Some("patients_mrn_key") => "mrn",
                Some("users_email_key") => "email",
                _ => "id",
            };
            let value = db_error
                .detail()
                .and_then(duplicate_key_value)
                .unwrap_or("?")
                .to_string();
            return ValidationErrors::duplicate(field, value).into();
        }
    }
    ShiftSyncError::Database(format!("{context}: {err}"))
}

/// Extracts `MRN-1` from `Key (mrn)=(MRN-1) already exists.`
fn duplicate_key_value(detail: &str) -> Option<&str> {
    let (_, rest) = detail.split_once(")=(")?;
    rest.rsplit_once(") already exists").map(|(value, _)| value)
}

fn redact_connection_string(connection_string: &str) -> String {
    match connection_string.rsplit_once('@') {
        Some((_, host)) => format!("postgresql://***@{host}"),
        None => connection_string
            .split('?')
            .next()
            .unwrap_or("postgresql://")
            .to_string(),
    }
}
