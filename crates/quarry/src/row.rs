//! Row mapping traits and utilities

use crate::error::{DbError, DbResult};
use mysql_async::Row;
use mysql_async::prelude::FromValue;

/// Trait for converting a database row into a Rust struct.
///
/// # Example
///
/// ```ignore
/// use quarry::{DbResult, FromRow, Row, RowExt};
///
/// struct User {
///     id: u64,
///     email: String,
/// }
///
/// impl FromRow for User {
///     fn from_row(row: &Row) -> DbResult<Self> {
///         Ok(Self {
///             id: row.try_get_column("id")?,
///             email: row.try_get_column("email")?,
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    /// Convert a database row into Self
    fn from_row(row: &Row) -> DbResult<Self>;
}

/// Extension trait for [`Row`] to provide typed access
pub trait RowExt {
    /// Try to get a column value, returning [`DbError::Decode`] on failure
    fn try_get_column<T: FromValue>(&self, column: &str) -> DbResult<T>;
}

impl RowExt for Row {
    fn try_get_column<T: FromValue>(&self, column: &str) -> DbResult<T> {
        match self.get_opt::<T, &str>(column) {
            Some(Ok(value)) => Ok(value),
            Some(Err(e)) => Err(DbError::decode(column, e.to_string())),
            None => Err(DbError::decode(column, "column missing from row")),
        }
    }
}
