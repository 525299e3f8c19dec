//! INSERT query builder.

use crate::conn::Connection;
use crate::error::{DbError, DbResult};
use mysql_async::Value;

/// INSERT query builder.
///
/// Columns and values are kept in call order; compilation emits one `?`
/// placeholder per column.
#[derive(Clone, Debug)]
pub struct InsertQb {
    table: String,
    columns: Vec<String>,
    values: Vec<Value>,
}

impl InsertQb {
    /// Create a new INSERT query builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Set a column value.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.columns.push(column.to_string());
        self.values.push(value.into());
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

    /// Serialize a value to JSON text and set it.
    pub fn set_json<T: serde::Serialize>(self, column: &str, value: &T) -> serde_json::Result<Self> {
        let json = serde_json::to_string(value)?;
        Ok(self.set(column, json))
    }

    fn validate(&self) -> DbResult<()> {
        if self.columns.is_empty() {
            return Err(DbError::validation(
                "insert requires at least one column".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the INSERT SQL and parameters.
    fn build_insert(&self) -> (String, Vec<Value>) {
        let placeholders = vec!["?"; self.columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            self.columns.join(", "),
            placeholders
        );
        (sql, self.values.clone())
    }

    /// Get the built SQL string (for debugging).
    pub fn to_sql(&self) -> String {
        self.build_insert().0
    }

    /// Execute and return the engine-assigned auto-increment id.
    ///
    /// An insert with no columns is rejected before it reaches the engine.
    pub async fn execute(self, conn: &Connection) -> DbResult<u64> {
        self.validate()?;
        let (sql, params) = self.build_insert();
        conn.exec_insert(&sql, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_basic() {
        let qb = InsertQb::new("users")
            .set("email", "alice@example.com")
            .set("active", 1);
        assert_eq!(
            qb.to_sql(),
            "INSERT INTO users (email, active) VALUES (?, ?)"
        );
    }

    #[test]
    fn insert_keeps_call_order() {
        let qb = InsertQb::new("users")
            .set("b", 2)
            .set("a", 1)
            .set("c", 3);
        assert_eq!(qb.to_sql(), "INSERT INTO users (b, a, c) VALUES (?, ?, ?)");
    }

    #[test]
    fn insert_opt_skips_none() {
        let qb = InsertQb::new("users")
            .set("email", "a@b.c")
            .set_opt("nickname", None::<&str>)
            .set_opt("age", Some(30));
        assert_eq!(qb.to_sql(), "INSERT INTO users (email, age) VALUES (?, ?)");
    }

    #[test]
    fn empty_insert_is_rejected() {
        let qb = InsertQb::new("users");
        let err = qb.validate().unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }

    #[test]
    fn insert_json_serializes() {
        #[derive(serde::Serialize)]
        struct Prefs {
            theme: &'static str,
        }

        let qb = InsertQb::new("users")
            .set_json("prefs", &Prefs { theme: "dark" })
            .unwrap();
        assert_eq!(qb.to_sql(), "INSERT INTO users (prefs) VALUES (?)");
    }
}
