//! Database connection and initialization.

use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr,
    EntityTrait, Schema, Statement,
};

use common::{AppResult, DatabaseConfig};

use crate::repository::entities::{category, company, product, role, user, user_role};
use crate::service::roles;
use crate::unit_of_work::Persistence;

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open a connection pool.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(8))
            .sqlx_logging(config.sql_logging);

        let connection = SeaDatabase::connect(options).await?;
        tracing::info!(
            backend = ?connection.get_database_backend(),
            max_connections = config.max_connections,
            "Database connected"
        );

        Ok(Self { connection })
    }

    /// Get a clone of the database connection.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }

    /// Create every back-office table that does not exist yet.
    ///
    /// Tables are created parents first so foreign keys resolve.
    pub async fn ensure_schema(&self) -> Result<(), DbErr> {
        self.create_table(category::Entity).await?;
        self.create_table(company::Entity).await?;
        self.create_table(product::Entity).await?;
        self.create_table(user::Entity).await?;
        self.create_table(role::Entity).await?;
        self.create_table(user_role::Entity).await?;

        tracing::info!("Database schema ensured");
        Ok(())
    }

    /// Insert any built-in role row that is missing; returns how many were
    /// created.
    pub async fn ensure_builtin_roles(&self) -> AppResult<usize> {
        let uow = Persistence::new(self.get_connection());
        roles::ensure_builtin_roles(&uow).await
    }

    async fn create_table<E: EntityTrait>(&self, entity: E) -> Result<(), DbErr> {
        let backend = self.connection.get_database_backend();
        let mut statement = Schema::new(backend).create_table_from_entity(entity);
        statement.if_not_exists();

        self.connection.execute(backend.build(&statement)).await?;
        tracing::debug!(table = entity.table_name(), "Table ensured");
        Ok(())
    }
}
