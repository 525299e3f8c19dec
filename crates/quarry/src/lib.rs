//! # quarry
//!
//! A lightweight MySQL-only data-access toolkit.
//!
//! ## Features
//!
//! - **SQL explicit**: every builder compiles to one visible statement plus
//!   an ordered `?`-placeholder parameter list
//! - **Fresh builders**: table-bound calls hand out a new value per query;
//!   nothing is rebound or reset between queries
//! - **Safe defaults**: UPDATE/DELETE without WHERE compile to a no-op
//!   unless the all-rows flag is set explicitly
//! - **Declarative schema**: blueprints compile to `CREATE TABLE` /
//!   `ALTER TABLE` DDL through the [`schema::Schema`] façade
//! - **Ledger-driven migrations**: registered up/down migrations applied in
//!   name order, recorded in a `migrations` table
//!
//! ## Query builder (qb)
//!
//! ```ignore
//! use quarry::{Connection, DbConfig, qb};
//!
//! let conn = Connection::connect(&DbConfig::from_env()?);
//!
//! let active = qb::table("users")
//!     .eq("status", "active")
//!     .order_by_desc("created_at")
//!     .limit(20)
//!     .get(&conn)
//!     .await?;
//!
//! let id = qb::insert("users")
//!     .set("email", "alice@example.com")
//!     .set("active", 1)
//!     .execute(&conn)
//!     .await?;
//! ```

pub mod config;
pub mod conn;
pub mod error;
pub mod migrate;
pub mod qb;
pub mod row;
pub mod schema;
pub mod seed;

pub use config::{AppEnv, DbConfig};
pub use conn::{Connection, QueryOutcome};
pub use error::{DbError, DbResult};
pub use migrate::{AppliedMigration, Migration, MigrationStatus, Migrator};
pub use row::{FromRow, RowExt};
pub use schema::{Blueprint, Column, ColumnType, DefaultValue, Mode, Schema};
pub use seed::{SeedReport, Seeder, run_seeders};

// Re-export qb module entry points for easy access
pub use qb::{
    DeleteQb, InsertQb, JoinKind, Op, SelectQb, UpdateQb, delete, insert, select, table, update,
};

// Driver types that appear at the API boundary
pub use mysql_async::{Row, Value};
