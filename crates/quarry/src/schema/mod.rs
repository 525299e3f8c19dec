//! Schema façade: declarative table creation and alteration.
//!
//! ```ignore
//! use quarry::schema::Schema;
//!
//! let schema = Schema::new(&conn);
//! schema
//!     .create("users", |table| {
//!         table.id();
//!         table.string("email").unique();
//!         table.boolean("active").default(true);
//!         table.timestamps();
//!     })
//!     .await?;
//! ```

mod blueprint;

pub use blueprint::{
    Blueprint, Column, ColumnType, DEFAULT_CHARSET, DEFAULT_ENGINE, DefaultValue, Mode,
};

use crate::conn::Connection;
use crate::error::DbResult;

/// Stateless entry point for schema operations. Each call builds a fresh
/// [`Blueprint`], hands it to the caller's description callback, and
/// executes the compiled statement.
pub struct Schema<'a> {
    conn: &'a Connection,
}

impl<'a> Schema<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// The underlying connection, for migrations that also move data.
    pub fn conn(&self) -> &Connection {
        self.conn
    }

    /// Create a new table.
    pub async fn create(
        &self,
        table: &str,
        describe: impl FnOnce(&mut Blueprint),
    ) -> DbResult<()> {
        let mut blueprint = Blueprint::new(table, Mode::Create);
        describe(&mut blueprint);
        self.execute(&blueprint).await
    }

    /// Modify an existing table.
    pub async fn alter(
        &self,
        table: &str,
        describe: impl FnOnce(&mut Blueprint),
    ) -> DbResult<()> {
        let mut blueprint = Blueprint::new(table, Mode::Alter);
        describe(&mut blueprint);
        self.execute(&blueprint).await
    }

    /// Rename a table.
    pub async fn rename(&self, from: &str, to: &str) -> DbResult<()> {
        self.conn
            .batch_execute(&format!("RENAME TABLE `{from}` TO `{to}`"))
            .await
            .map(|_| ())
    }

    /// Drop a table.
    pub async fn drop(&self, table: &str) -> DbResult<()> {
        self.conn
            .batch_execute(&format!("DROP TABLE `{table}`"))
            .await
            .map(|_| ())
    }

    /// Drop a table if it exists.
    pub async fn drop_if_exists(&self, table: &str) -> DbResult<()> {
        self.conn
            .batch_execute(&format!("DROP TABLE IF EXISTS `{table}`"))
            .await
            .map(|_| ())
    }

    /// Execute the compiled blueprint, skipping no-op alters.
    async fn execute(&self, blueprint: &Blueprint) -> DbResult<()> {
        if let Some(sql) = blueprint.build() {
            self.conn.batch_execute(&sql).await?;
        }
        Ok(())
    }
}
