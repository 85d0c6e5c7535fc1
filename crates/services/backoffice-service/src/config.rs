//! Back-office configuration.

use common::{DatabaseConfig, LoggingConfig};

/// Back-office configuration.
#[derive(Debug, Clone, Default)]
pub struct BackofficeConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

impl BackofficeConfig {
    /// Load configuration from environment variables.
    ///
    /// `BACKOFFICE_DATABASE_URL` wins over `DATABASE_URL`.
    pub fn from_env() -> Self {
        Self {
            database: DatabaseConfig::from_env("BACKOFFICE"),
            logging: LoggingConfig::from_env(),
        }
    }
}
