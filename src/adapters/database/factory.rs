//! Record store factory
//!
//! Picks the [`RecordStore`] implementation named by `database_target`.

use crate::adapters::database::traits::RecordStore;
use crate::adapters::memory::MemoryStore;
use crate::adapters::postgresql::adapter::PostgreSQLAdapter;
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::config::schema::{DatabaseTarget, ShiftSyncConfig};
use crate::domain::{Result, ShiftSyncError};
use std::sync::Arc;

/// Create a record store based on the configuration
///
/// The PostgreSQL pool connects lazily, so this does not touch the network.
///
/// # Errors
///
/// Returns an error if the `[postgresql]` section is missing or the
/// connection string cannot be parsed
pub fn create_record_store(config: &ShiftSyncConfig) -> Result<Arc<dyn RecordStore>> {
    match config.database_target {
        DatabaseTarget::Memory => {
            tracing::info!("Creating in-memory record store");
            Ok(Arc::new(MemoryStore::new()) as Arc<dyn RecordStore>)
        }
        DatabaseTarget::PostgreSQL => {
            let pg_config = config.postgresql.as_ref().ok_or_else(|| {
                ShiftSyncError::Configuration(
                    "postgresql configuration is required when database_target is 'postgresql'"
                        .to_string(),
                )
            })?;

            tracing::info!("Creating PostgreSQL record store");
            let client = PostgreSQLClient::new(pg_config.clone())?;
            Ok(Arc::new(PostgreSQLAdapter::new(client)) as Arc<dyn RecordStore>)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::PostgreSQLConfig;

    #[test]
    fn test_memory_target() {
        let config = ShiftSyncConfig::default();
        let store = create_record_store(&config).unwrap();
        assert_eq!(store.backend_name(), "memory");
    }

    #[test]
    fn test_postgresql_target_requires_section() {
        let config = ShiftSyncConfig {
            database_target: DatabaseTarget::PostgreSQL,
            ..ShiftSyncConfig::default()
        };
        assert!(matches!(
            create_record_store(&config),
            Err(ShiftSyncError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_postgresql_target() {
        let mut pg = PostgreSQLConfig::from_connection_string(
            "postgresql://nurse@127.0.0.1:1/shiftsync".to_string(),
        );
        pg.ssl_mode = "disable".to_string();
        let config = ShiftSyncConfig {
            database_target: DatabaseTarget::PostgreSQL,
            postgresql: Some(pg),
            ..ShiftSyncConfig::default()
        };
        let store = create_record_store(&config).unwrap();
        assert_eq!(store.backend_name(), "postgresql");
    }
}
