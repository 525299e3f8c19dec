//! DELETE query builder.

use crate::conn::Connection;
use crate::error::DbResult;
use crate::qb::clause::{Op, Predicates};
use mysql_async::Value;

/// DELETE query builder.
///
/// Like UPDATE, a predicate-free DELETE compiles to a `WHERE 1=0` no-op
/// unless [`DeleteQb::allow_delete_all`] is set.
#[derive(Clone, Debug)]
pub struct DeleteQb {
    table: String,
    wheres: Predicates,
    allow_delete_all: bool,
}

impl DeleteQb {
    /// Create a new DELETE query builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            wheres: Predicates::default(),
            allow_delete_all: false,
        }
    }

    /// Allow DELETE without WHERE conditions (removes every row).
    pub fn allow_delete_all(mut self, allow: bool) -> Self {
        self.allow_delete_all = allow;
        self
    }

    /// Add WHERE: column <op> value
    pub fn cmp(mut self, column: &str, op: Op, value: impl Into<Value>) -> Self {
        self.wheres.cmp(column, op, value.into());
        self
    }

    /// Add WHERE: column = value
    pub fn eq(self, column: &str, value: impl Into<Value>) -> Self {
        self.cmp(column, Op::Eq, value)
    }

    /// Add WHERE: column != value
    pub fn ne(self, column: &str, value: impl Into<Value>) -> Self {
        self.cmp(column, Op::Ne, value)
    }

    /// Add WHERE: column < value
    pub fn lt(self, column: &str, value: impl Into<Value>) -> Self {
        self.cmp(column, Op::Lt, value)
    }

    /// Add WHERE: column > value
    pub fn gt(self, column: &str, value: impl Into<Value>) -> Self {
        self.cmp(column, Op::Gt, value)
    }

    /// Add a raw WHERE condition.
    pub fn raw(mut self, sql: &str) -> Self {
        self.wheres.raw(sql);
        self
    }

    /// Add a raw WHERE fragment with `?` placeholders and its params.
    pub fn where_raw(mut self, sql: &str, params: Vec<Value>) -> Self {
        self.wheres.raw_with(sql, params);
        self
    }

    /// Build the DELETE SQL and parameters.
    fn build_delete(&self) -> (String, Vec<Value>) {
        let mut sql = format!("DELETE FROM {}", self.table);
        let mut params = Vec::new();

        if self.wheres.is_empty() {
            if !self.allow_delete_all {
                tracing::warn!(
                    table = %self.table,
                    "delete without WHERE compiled to a no-op; \
                     call allow_delete_all(true) to delete every row"
                );
                sql.push_str(" WHERE 1=0");
            }
        } else {
            sql.push_str(" WHERE ");
            sql.push_str(&self.wheres.sql());
            self.wheres.append_params(&mut params);
        }

        (sql, params)
    }

    /// Get the built SQL string (for debugging).
    pub fn to_sql(&self) -> String {
        self.build_delete().0
    }

    /// Execute and return the affected-row count.
    pub async fn execute(self, conn: &Connection) -> DbResult<u64> {
        let (sql, params) = self.build_delete();
        conn.exec(&sql, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_delete() {
        let qb = DeleteQb::new("users").eq("id", 1);
        assert_eq!(qb.to_sql(), "DELETE FROM users WHERE id = ?");
    }

    #[test]
    fn delete_without_where_is_noop_by_default() {
        let qb = DeleteQb::new("users");
        assert_eq!(qb.to_sql(), "DELETE FROM users WHERE 1=0");
    }

    #[test]
    fn delete_all_rows_with_flag() {
        let qb = DeleteQb::new("users").allow_delete_all(true);
        assert_eq!(qb.to_sql(), "DELETE FROM users");
    }

    #[test]
    fn delete_with_multiple_conditions() {
        let qb = DeleteQb::new("sessions")
            .eq("user_id", 7)
            .lt("expires_at", 1_700_000_000);
        assert_eq!(
            qb.to_sql(),
            "DELETE FROM sessions WHERE user_id = ? AND expires_at < ?"
        );
    }
}
