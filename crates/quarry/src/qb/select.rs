//! SELECT query builder.

use crate::conn::Connection;
use crate::error::{DbError, DbResult};
use crate::qb::clause::{JoinKind, Op, Predicates};
use crate::row::FromRow;
use mysql_async::{Row, Value};

/// SELECT query builder.
///
/// One instance describes one logical query: configuration calls consume
/// and return the builder, a terminal call consumes it for good. Obtain a
/// fresh builder per query via [`crate::qb::table`].
#[derive(Clone, Debug)]
pub struct SelectQb {
    /// Target table
    table: String,
    /// SELECT columns (default ["*"])
    select_cols: Vec<String>,
    /// JOIN clauses in declaration order
    joins: Vec<String>,
    /// WHERE predicates, AND-joined
    wheres: Predicates,
    /// Single active ORDER BY clause, last write wins
    order_by: Option<String>,
    /// LIMIT, last write wins
    limit: Option<u64>,
    /// OFFSET, last write wins
    offset: Option<u64>,
}

impl SelectQb {
    /// Create a new SELECT query builder for a table.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            select_cols: vec!["*".to_string()],
            joins: Vec::new(),
            wheres: Predicates::default(),
            order_by: None,
            limit: None,
            offset: None,
        }
    }

    // ==================== SELECT columns ====================

    /// Replace the select list (string form, supports expressions).
    pub fn select(mut self, cols: &str) -> Self {
        self.select_cols = vec![cols.to_string()];
        self
    }

    /// Replace the select list (array form).
    pub fn select_cols(mut self, cols: &[&str]) -> Self {
        self.select_cols = cols.iter().map(|s| s.to_string()).collect();
        self
    }

    // ==================== JOIN ====================

    /// Add a join of the given kind. The ON condition is raw SQL supplied
    /// by the caller and is not inspected.
    pub fn join(mut self, table: &str, on: &str, kind: JoinKind) -> Self {
        self.joins.push(format!("{} {} ON {}", kind.as_sql(), table, on));
        self
    }

    /// Add INNER JOIN.
    pub fn inner_join(self, table: &str, on: &str) -> Self {
        self.join(table, on, JoinKind::Inner)
    }

    /// Add LEFT JOIN.
    pub fn left_join(self, table: &str, on: &str) -> Self {
        self.join(table, on, JoinKind::Left)
    }

    /// Add RIGHT JOIN.
    pub fn right_join(self, table: &str, on: &str) -> Self {
        self.join(table, on, JoinKind::Right)
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

    /// Add WHERE: column >= value
    pub fn gte(self, column: &str, value: impl Into<Value>) -> Self {
        self.cmp(column, Op::Gte, value)
    }

    /// Add WHERE: column < value
    pub fn lt(self, column: &str, value: impl Into<Value>) -> Self {
        self.cmp(column, Op::Lt, value)
    }

    /// Add WHERE: column <= value
    pub fn lte(self, column: &str, value: impl Into<Value>) -> Self {
        self.cmp(column, Op::Lte, value)
    }

    /// Add WHERE: column LIKE pattern
    pub fn like(self, column: &str, pattern: impl Into<Value>) -> Self {
        self.cmp(column, Op::Like, pattern)
    }

    /// Add a raw WHERE condition without params.
    pub fn raw(mut self, sql: &str) -> Self {
        self.wheres.raw(sql);
        self
    }

    /// Add a raw WHERE fragment with `?` placeholders and its params.
    /// Use this where the structured shapes fall short (e.g. OR logic
    /// inside one clause).
    pub fn where_raw(mut self, sql: &str, params: Vec<Value>) -> Self {
        self.wheres.raw_with(sql, params);
        self
    }

    // ==================== Ordering & Pagination ====================

    /// Set ORDER BY column ASC, replacing any previous ordering.
    pub fn order_by(mut self, column: &str) -> Self {
        self.order_by = Some(format!("{column} ASC"));
        self
    }

    /// Set ORDER BY column DESC, replacing any previous ordering.
    pub fn order_by_desc(mut self, column: &str) -> Self {
        self.order_by = Some(format!("{column} DESC"));
        self
    }

    /// Set LIMIT.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set OFFSET.
    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    // ==================== Build ====================

    /// Build the SELECT SQL and parameters.
    fn build_select(&self) -> (String, Vec<Value>) {
        let mut sql = format!(
            "SELECT {} FROM {}",
            self.select_cols.join(", "),
            self.table
        );

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }

        if !self.wheres.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.wheres.sql());
        }

        if let Some(order) = &self.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        let mut params = Vec::new();
        self.wheres.append_params(&mut params);
        (sql, params)
    }

    /// Build the COUNT(*) projection of this query. Ordering and pagination
    /// do not apply to a count.
    fn build_count(&self, limit_one: bool) -> (String, Vec<Value>) {
        let mut sql = format!("SELECT COUNT(*) FROM {}", self.table);

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }

        if !self.wheres.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.wheres.sql());
        }

        if limit_one {
            sql.push_str(" LIMIT 1");
        }

        let mut params = Vec::new();
        self.wheres.append_params(&mut params);
        (sql, params)
    }

    /// Get the built SQL string (for debugging).
    pub fn to_sql(&self) -> String {
        self.build_select().0
    }

    /// Get the COUNT SQL string (for debugging).
    pub fn to_count_sql(&self) -> String {
        self.build_count(false).0
    }

    #[cfg(test)]
    pub(crate) fn param_count(&self) -> usize {
        self.build_select().1.len()
    }

    // ==================== Execution ====================

    /// Execute and return all matching rows (possibly empty).
    pub async fn get(self, conn: &Connection) -> DbResult<Vec<Row>> {
        let (sql, params) = self.build_select();
        conn.query(&sql, params).await
    }

    /// Execute with LIMIT 1 and return the first row, if any. Zero matches
    /// is `Ok(None)`, never an error.
    pub async fn first(mut self, conn: &Connection) -> DbResult<Option<Row>> {
        self.limit = Some(1);
        let (sql, params) = self.build_select();
        let rows = conn.query(&sql, params).await?;
        Ok(rows.into_iter().next())
    }

    /// Whether any row matches.
    pub async fn exists(self, conn: &Connection) -> DbResult<bool> {
        let (sql, params) = self.build_count(true);
        let rows = conn.query(&sql, params).await?;
        let count: i64 = rows
            .first()
            .and_then(|row| row.get(0))
            .ok_or_else(|| DbError::decode("COUNT(*)", "missing count column"))?;
        Ok(count > 0)
    }

    /// Count matching rows.
    pub async fn count(self, conn: &Connection) -> DbResult<u64> {
        let (sql, params) = self.build_count(false);
        let rows = conn.query(&sql, params).await?;
        let count: i64 = rows
            .first()
            .and_then(|row| row.get(0))
            .ok_or_else(|| DbError::decode("COUNT(*)", "missing count column"))?;
        Ok(count as u64)
    }

    /// Execute and map all rows to `T`.
    pub async fn fetch_all<T: FromRow>(self, conn: &Connection) -> DbResult<Vec<T>> {
        let rows = self.get(conn).await?;
        rows.iter().map(T::from_row).collect()
    }

    /// Execute and map the first row to `T`, if any.
    pub async fn fetch_first<T: FromRow>(self, conn: &Connection) -> DbResult<Option<T>> {
        let row = self.first(conn).await?;
        row.as_ref().map(T::from_row).transpose()
    }
}
