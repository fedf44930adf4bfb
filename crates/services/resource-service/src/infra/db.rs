//! Connection pool and schema management for the resource store.

use std::collections::HashSet;
use std::sync::Arc;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr,
    EntityTrait, Statement,
};
use sea_orm_migration::{seaql_migrations, MigratorTrait};

use common::DatabaseConfig;

use super::migrations::Migrator;

/// One known migration and whether the store has applied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationState {
    pub name: String,
    pub applied: bool,
}

/// Pooled connection to the organizations/projects/users store.
#[derive(Clone)]
pub struct Database {
    pool: Arc<DatabaseConnection>,
}

impl Database {
    /// Open the pool and bring the schema up to date.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let db = Self::open(config).await?;
        db.migrate_up().await?;

        tracing::info!(
            max_connections = config.max_connections,
            "Store connected, schema up to date"
        );
        Ok(db)
    }

    /// Open the pool without touching the schema.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .max_lifetime(config.max_lifetime())
            .sqlx_logging(false);

        Ok(Self {
            pool: Arc::new(SeaDatabase::connect(options).await?),
        })
    }

    #[cfg(test)]
    pub(crate) fn from_connection(connection: DatabaseConnection) -> Self {
        Self {
            pool: Arc::new(connection),
        }
    }

    /// Handle for repositories; clones share the pool.
    pub fn pool(&self) -> Arc<DatabaseConnection> {
        Arc::clone(&self.pool)
    }

    pub async fn migrate_up(&self) -> Result<(), DbErr> {
        Migrator::up(self.pool.as_ref(), None).await
    }

    /// Revert the most recent migration.
    pub async fn migrate_down(&self) -> Result<(), DbErr> {
        Migrator::down(self.pool.as_ref(), Some(1)).await
    }

    /// Drop every table, then reapply all migrations.
    pub async fn migrate_fresh(&self) -> Result<(), DbErr> {
        Migrator::fresh(self.pool.as_ref()).await
    }

    /// Every migration in declaration order, flagged when applied.
    pub async fn migration_states(&self) -> Result<Vec<MigrationState>, DbErr> {
        let applied: HashSet<String> = seaql_migrations::Entity::find()
            .all(self.pool.as_ref())
            .await?
            .into_iter()
            .map(|row| row.version)
            .collect();

        Ok(Migrator::migrations()
            .iter()
            .map(|migration| {
                let name = migration.name().to_string();
                MigrationState {
                    applied: applied.contains(&name),
                    name,
                }
            })
            .collect())
    }

    /// Round-trip a trivial query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        let backend = self.pool.get_database_backend();
        self.pool
            .execute(Statement::from_string(backend, "SELECT 1"))
            .await
            .map(|_| ())
    }
}
