//! Code-defined migrations with a database-backed ledger.
//!
//! Each migration is a type implementing [`Migration`]: a sortable name
//! (conventionally `<timestamp>_<snake_name>`) plus `up`/`down` steps that
//! operate against the [`Schema`] façade. Migrations are registered on a
//! [`Migrator`], which applies the unapplied ones in name order and records
//! each applied name in a `migrations` ledger table.
//!
//! Application is sequential and non-transactional: each migration is a
//! discrete step, and a failure stops the run with prior steps applied and
//! recorded and the failing one unrecorded. Rollback reverses only the
//! single most-recently-applied migration.

use crate::conn::Connection;
use crate::error::{DbError, DbResult};
use crate::row::RowExt;
use crate::schema::Schema;
use async_trait::async_trait;
use mysql_async::Value;
use std::collections::HashSet;

/// Name of the ledger table recording applied migrations.
pub const LEDGER_TABLE: &str = "migrations";

/// One reversible schema change.
#[async_trait]
pub trait Migration: Send + Sync {
    /// Unique name. Names sort in application order, so prefix them with a
    /// timestamp: `2025_12_10_163919_create_users_table`.
    fn name(&self) -> &str;

    /// Apply the change.
    async fn up(&self, schema: &Schema<'_>) -> DbResult<()>;

    /// Reverse the change.
    async fn down(&self, schema: &Schema<'_>) -> DbResult<()>;
}

/// Ledger row for an applied migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMigration {
    pub id: u64,
    pub name: String,
    pub applied_at: Option<String>,
}

/// Registered/applied/pending breakdown for a migrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub registered: Vec<String>,
    pub applied: Vec<AppliedMigration>,
    pub pending: Vec<String>,
}

/// Applies registered migrations against one database.
pub struct Migrator {
    conn: Connection,
    migrations: Vec<Box<dyn Migration>>,
}

impl Migrator {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            migrations: Vec::new(),
        }
    }

    /// Register a migration. Order of registration does not matter;
    /// application order comes from the names.
    pub fn register(&mut self, migration: Box<dyn Migration>) -> &mut Self {
        self.migrations.push(migration);
        self
    }

    /// Registered migrations sorted by name. Duplicate names are rejected.
    fn ordered(&self) -> DbResult<Vec<&dyn Migration>> {
        let mut seen = HashSet::new();
        for m in &self.migrations {
            if !seen.insert(m.name()) {
                return Err(DbError::Migration(format!(
                    "duplicate migration name: {}",
                    m.name()
                )));
            }
        }

        let mut ordered: Vec<&dyn Migration> =
            self.migrations.iter().map(|m| m.as_ref()).collect();
        ordered.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(ordered)
    }

    async fn ensure_ledger(&self) -> DbResult<()> {
        self.conn
            .batch_execute(&format!(
                "CREATE TABLE IF NOT EXISTS {LEDGER_TABLE} (\
                 id INT AUTO_INCREMENT PRIMARY KEY, \
                 migration VARCHAR(255), \
                 created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP)"
            ))
            .await
            .map(|_| ())
    }

    async fn applied(&self) -> DbResult<Vec<AppliedMigration>> {
        let rows = self
            .conn
            .query(
                &format!(
                    "SELECT id, migration, \
                     DATE_FORMAT(created_at, '%Y-%m-%d %H:%i:%s') AS applied_at \
                     FROM {LEDGER_TABLE} ORDER BY id ASC"
                ),
                Vec::new(),
            )
            .await?;

        rows.iter()
            .map(|row| {
                Ok(AppliedMigration {
                    id: row.try_get_column("id")?,
                    name: row.try_get_column("migration")?,
                    applied_at: row.try_get_column("applied_at")?,
                })
            })
            .collect()
    }

    /// Compute the registered/applied/pending breakdown.
    pub async fn status(&self) -> DbResult<MigrationStatus> {
        self.ensure_ledger().await?;
        let ordered = self.ordered()?;
        let applied = self.applied().await?;

        let applied_names: HashSet<&str> = applied.iter().map(|m| m.name.as_str()).collect();
        let registered: Vec<String> = ordered.iter().map(|m| m.name().to_string()).collect();
        let pending = registered
            .iter()
            .filter(|name| !applied_names.contains(name.as_str()))
            .cloned()
            .collect();

        Ok(MigrationStatus {
            registered,
            applied,
            pending,
        })
    }

    /// Apply all pending migrations in name order, recording each in the
    /// ledger. Fail-fast: the first error stops the run.
    ///
    /// Returns the names applied by this run. Running again immediately
    /// applies nothing.
    pub async fn up(&self) -> DbResult<Vec<String>> {
        self.ensure_ledger().await?;
        let ordered = self.ordered()?;
        let applied: HashSet<String> =
            self.applied().await?.into_iter().map(|m| m.name).collect();

        let schema = Schema::new(&self.conn);
        let mut done = Vec::new();

        for migration in ordered {
            if applied.contains(migration.name()) {
                continue;
            }

            tracing::info!(name = migration.name(), "applying migration");
            migration.up(&schema).await?;

            self.conn
                .exec(
                    &format!("INSERT INTO {LEDGER_TABLE} (migration) VALUES (?)"),
                    vec![Value::from(migration.name())],
                )
                .await?;
            done.push(migration.name().to_string());
        }

        Ok(done)
    }

    /// Roll back the single most-recently-applied migration, if any.
    ///
    /// Returns the rolled-back name. The recorded name must have a
    /// registered counterpart, otherwise the rollback fails.
    pub async fn rollback(&self) -> DbResult<Option<String>> {
        self.ensure_ledger().await?;

        let rows = self
            .conn
            .query(
                &format!("SELECT id, migration FROM {LEDGER_TABLE} ORDER BY id DESC LIMIT 1"),
                Vec::new(),
            )
            .await?;
        let Some(row) = rows.first() else {
            return Ok(None);
        };

        let id: u64 = row.try_get_column("id")?;
        let name: String = row.try_get_column("migration")?;

        let ordered = self.ordered()?;
        let Some(migration) = ordered.iter().find(|m| m.name() == name) else {
            return Err(DbError::Migration(format!(
                "cannot rollback {name}: migration is not registered"
            )));
        };

        tracing::info!(name = %name, "rolling back migration");
        let schema = Schema::new(&self.conn);
        migration.down(&schema).await?;

        self.conn
            .exec(
                &format!("DELETE FROM {LEDGER_TABLE} WHERE id = ?"),
                vec![Value::from(id)],
            )
            .await?;

        Ok(Some(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DbConfig;

    struct Noop(&'static str);

    #[async_trait]
    impl Migration for Noop {
        fn name(&self) -> &str {
            self.0
        }

        async fn up(&self, _schema: &Schema<'_>) -> DbResult<()> {
            Ok(())
        }

        async fn down(&self, _schema: &Schema<'_>) -> DbResult<()> {
            Ok(())
        }
    }

    fn migrator() -> Migrator {
        Migrator::new(Connection::connect(&DbConfig::default()))
    }

    #[test]
    fn ordered_sorts_by_name() {
        let mut m = migrator();
        m.register(Box::new(Noop("2025_12_11_134932_create_rbac_tables")));
        m.register(Box::new(Noop("2025_12_10_163919_create_users_table")));

        let names: Vec<&str> = m.ordered().unwrap().iter().map(|m| m.name()).collect();
        assert_eq!(
            names,
            vec![
                "2025_12_10_163919_create_users_table",
                "2025_12_11_134932_create_rbac_tables",
            ]
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut m = migrator();
        m.register(Box::new(Noop("2025_12_10_163919_create_users_table")));
        m.register(Box::new(Noop("2025_12_10_163919_create_users_table")));

        let err = m.ordered().err().unwrap();
        assert!(matches!(err, DbError::Migration(_)));
    }
}
