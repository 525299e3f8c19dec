//! Fluent query builders.
//!
//! Each builder compiles one logical query into a SQL string plus an
//! ordered `?`-placeholder parameter list, then executes it through a
//! [`crate::Connection`]. Builders are plain values: every table-bound call
//! here hands out a *fresh* instance, configuration calls consume and
//! return it, and a terminal call consumes it for good. There is no shared
//! builder to rebind or reset.
//!
//! # Usage
//!
//! ```ignore
//! use quarry::qb;
//!
//! // SELECT
//! let users = qb::table("users")
//!     .eq("status", "active")
//!     .order_by_desc("created_at")
//!     .limit(20)
//!     .get(&conn)
//!     .await?;
//!
//! // INSERT
//! let id = qb::insert("users")
//!     .set("email", "alice@example.com")
//!     .set("active", 1)
//!     .execute(&conn)
//!     .await?;
//!
//! // UPDATE
//! qb::update("users")
//!     .set("status", "inactive")
//!     .eq("id", id)
//!     .execute(&conn)
//!     .await?;
//!
//! // DELETE
//! qb::delete("users").eq("id", id).execute(&conn).await?;
//! ```

mod clause;
mod delete;
mod insert;
mod select;
mod update;

pub use clause::{JoinKind, Op};
pub use delete::DeleteQb;
pub use insert::InsertQb;
pub use select::SelectQb;
pub use update::UpdateQb;

/// Create a SELECT query builder bound to the given table.
pub fn table(name: &str) -> SelectQb {
    SelectQb::new(name)
}

/// Alias for [`table`].
pub fn select(name: &str) -> SelectQb {
    SelectQb::new(name)
}

/// Create an INSERT query builder for the given table.
pub fn insert(table: &str) -> InsertQb {
    InsertQb::new(table)
}

/// Create an UPDATE query builder for the given table.
pub fn update(table: &str) -> UpdateQb {
    UpdateQb::new(table)
}

/// Create a DELETE query builder for the given table.
///
/// # Safety
/// By default, DELETE without WHERE conditions compiles to `WHERE 1=0`
/// (no-op). Use `allow_delete_all(true)` to allow deleting all rows.
pub fn delete(table: &str) -> DeleteQb {
    DeleteQb::new(table)
}

#[cfg(test)]
mod tests;
