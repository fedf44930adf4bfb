//! Resource Service Library
//!
//! The mapping layer between the external organization/project/user
//! vocabulary and relational rows: entities, repositories, services and
//! schema migrations. The HTTP surface lives in the gateway crate.

pub mod infra;
pub mod repository;
pub mod service;

use clap::Subcommand;
use tracing::info;

use common::DatabaseConfig;

use crate::infra::Database;

/// Schema operation requested from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum MigrateAction {
    /// Apply pending migrations
    Up,
    /// Revert the most recent migration
    Down,
    /// List migrations and whether each is applied
    Status,
    /// Drop every table and reapply all migrations
    Fresh,
}

/// Run one schema operation against the store described by `config`.
pub async fn run_migrations(
    config: &DatabaseConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open(config).await?;
    apply_migration(&db, action).await
}

/// Run one schema operation over an open store.
pub async fn apply_migration(
    db: &Database,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        MigrateAction::Up => {
            db.migrate_up().await?;
            info!("Migrations applied");
        }
        MigrateAction::Down => {
            db.migrate_down().await?;
            info!("Last migration reverted");
        }
        MigrateAction::Status => {
            for state in db.migration_states().await? {
                println!("[{}] {}", if state.applied { "x" } else { " " }, state.name);
            }
        }
        MigrateAction::Fresh => {
            db.migrate_fresh().await?;
            info!("Schema rebuilt from scratch");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};

    use super::*;

    #[tokio::test]
    async fn test_fresh_drops_listed_tables_before_reapplying() {
        let connection = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .append_query_results([
                vec![BTreeMap::from([(
                    "table_name",
                    Value::from("organizations"),
                )])],
                vec![],
            ])
            .into_connection();
        let db = Database::from_connection(connection);

        // The reapply step runs past the scripted results and fails cleanly.
        let err = apply_migration(&db, MigrateAction::Fresh)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("exec_results"));

        let pool = db.pool();
        drop(db);
        let log = Arc::try_unwrap(pool)
            .ok()
            .expect("connection still shared")
            .into_transaction_log();
        let sql: Vec<&str> = log[0]
            .statements()
            .iter()
            .map(|statement| statement.sql.as_str())
            .collect();

        assert!(sql.iter().any(|s| s.contains("information_schema")));
        assert!(sql
            .iter()
            .any(|s| s.contains("DROP TABLE") && s.contains("\"organizations\"")));
        assert!(sql.iter().any(|s| s.contains("typname")));
    }

    #[test]
    fn test_fresh_is_a_cli_action() {
        use clap::Parser;

        #[derive(Parser)]
        struct Cli {
            #[command(subcommand)]
            action: MigrateAction,
        }

        let cli = Cli::try_parse_from(["migrate", "fresh"]).unwrap();
        assert_eq!(cli.action, MigrateAction::Fresh);
    }
}
