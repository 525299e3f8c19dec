//! Cross-builder tests for the qb module.

use crate::qb::{Op, delete, insert, select, table, update};
use mysql_async::Value;

/// Count `?` placeholders in a compiled statement.
fn placeholders(sql: &str) -> usize {
    sql.matches('?').count()
}

#[test]
fn table_and_select_are_equivalent() {
    assert_eq!(table("users").to_sql(), select("users").to_sql());
}

#[test]
fn placeholder_count_matches_param_count() {
    let qb = table("users")
        .eq("status", "active")
        .cmp("age", Op::Gte, 18)
        .where_raw("(role = ? OR role = ?)", vec![
            Value::from("admin"),
            Value::from("owner"),
        ])
        .raw("deleted_at = 0");

    let sql = qb.to_sql();
    assert_eq!(placeholders(&sql), 4);
    assert_eq!(qb.param_count(), 4);
}

#[test]
fn update_placeholder_count_matches_param_count() {
    let qb = update("users")
        .set("status", "x")
        .set("updated_at", 1_700_000_000)
        .eq("id", 9)
        .where_raw("active = ?", vec![Value::from(1)]);

    let sql = qb.to_sql();
    assert_eq!(placeholders(&sql), 4);
    assert_eq!(qb.param_count(), 4);
}

#[test]
fn full_select_clause_order() {
    let qb = table("users")
        .select("users.id, users.email")
        .left_join("orders", "users.id = orders.user_id")
        .eq("users.active", 1)
        .gt("orders.total", 100)
        .order_by("users.id")
        .limit(25)
        .offset(50);

    assert_eq!(
        qb.to_sql(),
        "SELECT users.id, users.email FROM users \
         LEFT JOIN orders ON users.id = orders.user_id \
         WHERE users.active = ? AND orders.total > ? \
         ORDER BY users.id ASC LIMIT 25 OFFSET 50"
    );
}

#[test]
fn insert_basic() {
    let qb = insert("users").set("email", "a@b.c").set("active", 1);
    assert_eq!(qb.to_sql(), "INSERT INTO users (email, active) VALUES (?, ?)");
}

#[test]
fn delete_guard_round_trip() {
    assert_eq!(delete("users").to_sql(), "DELETE FROM users WHERE 1=0");
    assert_eq!(
        delete("users").allow_delete_all(true).to_sql(),
        "DELETE FROM users"
    );
    assert_eq!(
        delete("users").eq("id", 1).to_sql(),
        "DELETE FROM users WHERE id = ?"
    );
}
