//! Predicate accumulation shared by the query builders.

use mysql_async::Value;

/// Comparison operator for structured predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
}

impl Op {
    pub fn as_sql(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Ne => "!=",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Lt => "<",
            Op::Lte => "<=",
            Op::Like => "LIKE",
        }
    }
}

/// JOIN flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
}

impl JoinKind {
    pub fn as_sql(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
        }
    }
}

/// AND-joined predicate list.
///
/// Invariant: every clause appended with a `?` placeholder appends exactly
/// one matching parameter in the same call, so placeholder order and
/// parameter order always agree.
#[derive(Debug, Clone, Default)]
pub(crate) struct Predicates {
    clauses: Vec<String>,
    params: Vec<Value>,
}

impl Predicates {
    pub fn cmp(&mut self, column: &str, op: Op, value: Value) {
        self.clauses.push(format!("{column} {} ?", op.as_sql()));
        self.params.push(value);
    }

    /// Append a complete raw boolean expression. No parameter is added.
    pub fn raw(&mut self, sql: &str) {
        self.clauses.push(sql.to_string());
    }

    /// Append a raw fragment carrying its own `?` placeholders and the
    /// parameters for them, in order.
    pub fn raw_with(&mut self, sql: &str, params: Vec<Value>) {
        self.clauses.push(sql.to_string());
        self.params.extend(params);
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn sql(&self) -> String {
        self.clauses.join(" AND ")
    }

    pub fn append_params(&self, out: &mut Vec<Value>) {
        out.extend(self.params.iter().cloned());
    }

    #[cfg(test)]
    pub fn param_count(&self) -> usize {
        self.params.len()
    }
}
