//! UPDATE query builder.

use crate::conn::Connection;
use crate::error::{DbError, DbResult};
use crate::qb::clause::{Op, Predicates};
use mysql_async::Value;

/// SET field value type.
#[derive(Clone, Debug)]
enum SetField {
    /// Parameterized value
    Value(Value),
    /// Raw SQL expression
    Raw(String),
}

/// UPDATE query builder.
///
/// Without any WHERE predicate an UPDATE would touch every row in the
/// table. That is guarded: unless [`UpdateQb::allow_update_all`] is set,
/// a predicate-free update compiles to a `WHERE 1=0` no-op.
#[derive(Clone, Debug)]
pub struct UpdateQb {
    table: String,
    set_fields: Vec<(String, SetField)>,
    wheres: Predicates,
    allow_update_all: bool,
}

impl UpdateQb {
    /// Create a new UPDATE query builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            set_fields: Vec::new(),
            wheres: Predicates::default(),
            allow_update_all: false,
        }
    }

    /// Allow UPDATE without WHERE conditions (affects every row).
    pub fn allow_update_all(mut self, allow: bool) -> Self {
        self.allow_update_all = allow;
        self
    }

    /// Set a column value.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.set_fields
            .push((column.to_string(), SetField::Value(value.into())));
        self
    }

    /// Set an optional column value (None => skip).
    pub fn set_opt(self, column: &str, value: Option<impl Into<Value>>) -> Self {
        if let Some(v) = value {
            self.set(column, v)
        } else {
            self
        }
    }

    /// Set a raw SQL expression.
    pub fn set_raw(mut self, column: &str, expr: &str) -> Self {
        self.set_fields
            .push((column.to_string(), SetField::Raw(expr.to_string())));
        self
    }

    /// Serialize a value to JSON text and set it.
    pub fn set_json<T: serde::Serialize>(self, column: &str, value: &T) -> serde_json::Result<Self> {
        let json = serde_json::to_string(value)?;
        Ok(self.set(column, json))
    }

    // ==================== WHERE ====================

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

    /// Add WHERE: column > value
    pub fn gt(self, column: &str, value: impl Into<Value>) -> Self {
        self.cmp(column, Op::Gt, value)
    }

    /// Add WHERE: column < value
    pub fn lt(self, column: &str, value: impl Into<Value>) -> Self {
        self.cmp(column, Op::Lt, value)
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

    // ==================== Build ====================

    fn validate(&self) -> DbResult<()> {
        if self.set_fields.is_empty() {
            return Err(DbError::validation("update requires a SET clause"));
        }
        Ok(())
    }

    /// Build the UPDATE SQL and parameters. SET params precede WHERE params.
    fn build_update(&self) -> (String, Vec<Value>) {
        let mut params = Vec::new();
        let mut set_parts = Vec::with_capacity(self.set_fields.len());

        for (col, field) in &self.set_fields {
            match field {
                SetField::Value(value) => {
                    set_parts.push(format!("{col} = ?"));
                    params.push(value.clone());
                }
                SetField::Raw(expr) => {
                    set_parts.push(format!("{col} = {expr}"));
                }
            }
        }

        let mut sql = format!("UPDATE {} SET {}", self.table, set_parts.join(", "));

        if self.wheres.is_empty() {
            if !self.allow_update_all {
                tracing::warn!(
                    table = %self.table,
                    "update without WHERE compiled to a no-op; \
                     call allow_update_all(true) to update every row"
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
        self.build_update().0
    }

    #[cfg(test)]
    pub(crate) fn param_count(&self) -> usize {
        self.build_update().1.len()
    }

    /// Execute and return the affected-row count.
    pub async fn execute(self, conn: &Connection) -> DbResult<u64> {
        self.validate()?;
        let (sql, params) = self.build_update();
        conn.exec(&sql, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_update() {
        let qb = UpdateQb::new("users").set("status", "inactive").eq("id", 1);
        assert_eq!(qb.to_sql(), "UPDATE users SET status = ? WHERE id = ?");
        assert_eq!(qb.param_count(), 2);
    }

    #[test]
    fn update_multiple_set() {
        let qb = UpdateQb::new("users")
            .set("name", "Alice")
            .set("email", "alice@example.com")
            .eq("id", 1);
        assert_eq!(
            qb.to_sql(),
            "UPDATE users SET name = ?, email = ? WHERE id = ?"
        );
        assert_eq!(qb.param_count(), 3);
    }

    #[test]
    fn update_set_params_precede_where_params() {
        let qb = UpdateQb::new("users")
            .set("a", 1)
            .eq("id", 2)
            .set("b", 3);
        // SET params are emitted first even when calls interleave.
        assert_eq!(qb.to_sql(), "UPDATE users SET a = ?, b = ? WHERE id = ?");
        let (_, params) = qb.build_update();
        assert_eq!(params, vec![Value::from(1), Value::from(3), Value::from(2)]);
    }

    #[test]
    fn update_with_raw_expr() {
        let qb = UpdateQb::new("users")
            .set_raw("updated_at", "UNIX_TIMESTAMP()")
            .eq("id", 1);
        assert_eq!(
            qb.to_sql(),
            "UPDATE users SET updated_at = UNIX_TIMESTAMP() WHERE id = ?"
        );
        assert_eq!(qb.param_count(), 1);
    }

    #[test]
    fn update_without_where_is_noop_by_default() {
        let qb = UpdateQb::new("users").set("status", "x");
        assert_eq!(qb.to_sql(), "UPDATE users SET status = ? WHERE 1=0");
    }

    #[test]
    fn update_all_rows_with_flag() {
        let qb = UpdateQb::new("users")
            .set("status", "x")
            .allow_update_all(true);
        assert_eq!(qb.to_sql(), "UPDATE users SET status = ?");
    }

    #[test]
    fn empty_set_is_rejected() {
        let qb = UpdateQb::new("users").eq("id", 1);
        let err = qb.validate().unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }
}
