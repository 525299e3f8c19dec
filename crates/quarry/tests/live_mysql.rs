//! Live-database round-trip tests.
//!
//! These run only when `QUARRY_TEST_DATABASE_URL` points at a disposable
//! MySQL database (e.g. `mysql://root@127.0.0.1:3306/quarry_test`).
//! Without it, every test returns early and reports nothing.

use quarry::{
    Connection, DbResult, Migration, Migrator, QueryOutcome, RowExt, Schema, qb,
};

fn test_conn() -> Option<Connection> {
    let url = std::env::var("QUARRY_TEST_DATABASE_URL").ok()?;
    Connection::from_url(&url).ok()
}

#[tokio::test]
async fn insert_then_first_round_trip() -> DbResult<()> {
    let Some(conn) = test_conn() else {
        return Ok(());
    };
    let schema = Schema::new(&conn);

    schema.drop_if_exists("qt_users").await?;
    schema
        .create("qt_users", |table| {
            table.id();
            table.string("email").unique();
            table.integer("score").default(0);
        })
        .await?;

    let id = qb::insert("qt_users")
        .set("email", "alice@example.com")
        .set("score", 2)
        .execute(&conn)
        .await?;
    assert!(id > 0);

    let row = qb::table("qt_users")
        .eq("email", "alice@example.com")
        .first(&conn)
        .await?
        .expect("inserted row should be found");
    let score: i64 = row.try_get_column("score")?;
    assert_eq!(score, 2);

    assert!(qb::table("qt_users").eq("id", id).exists(&conn).await?);
    assert!(
        !qb::table("qt_users")
            .eq("email", "nobody@example.com")
            .exists(&conn)
            .await?
    );

    // first() on zero matches is None, not an error.
    let missing = qb::table("qt_users")
        .eq("email", "nobody@example.com")
        .first(&conn)
        .await?;
    assert!(missing.is_none());

    schema.drop("qt_users").await?;
    Ok(())
}

#[tokio::test]
async fn update_all_rows_requires_flag() -> DbResult<()> {
    let Some(conn) = test_conn() else {
        return Ok(());
    };
    let schema = Schema::new(&conn);

    schema.drop_if_exists("qt_flags").await?;
    schema
        .create("qt_flags", |table| {
            table.id();
            table.string("status");
        })
        .await?;

    for _ in 0..3 {
        qb::insert("qt_flags")
            .set("status", "new")
            .execute(&conn)
            .await?;
    }

    // Without the flag a predicate-free update is a no-op.
    let touched = qb::update("qt_flags")
        .set("status", "seen")
        .execute(&conn)
        .await?;
    assert_eq!(touched, 0);

    // With the flag it reaches every row.
    let touched = qb::update("qt_flags")
        .set("status", "seen")
        .allow_update_all(true)
        .execute(&conn)
        .await?;
    assert_eq!(touched, 3);
    assert_eq!(qb::table("qt_flags").eq("status", "seen").count(&conn).await?, 3);

    let removed = qb::delete("qt_flags")
        .allow_delete_all(true)
        .execute(&conn)
        .await?;
    assert_eq!(removed, 3);

    schema.drop("qt_flags").await?;
    Ok(())
}

#[tokio::test]
async fn raw_classifies_select_vs_exec() -> DbResult<()> {
    let Some(conn) = test_conn() else {
        return Ok(());
    };
    let schema = Schema::new(&conn);

    schema.drop_if_exists("qt_raw").await?;
    schema
        .create("qt_raw", |table| {
            table.id();
            table.integer("n");
        })
        .await?;

    let outcome = conn
        .raw("INSERT INTO qt_raw (n) VALUES (?)", vec![7.into()])
        .await?;
    assert!(matches!(outcome, QueryOutcome::Affected(1)));

    let outcome = conn
        .raw("select n from qt_raw where n = ?", vec![7.into()])
        .await?;
    match outcome {
        QueryOutcome::Rows(rows) => assert_eq!(rows.len(), 1),
        QueryOutcome::Affected(_) => panic!("SELECT misclassified"),
    }

    schema.drop("qt_raw").await?;
    Ok(())
}

struct CreateWidgets;

#[async_trait::async_trait]
impl Migration for CreateWidgets {
    fn name(&self) -> &str {
        "2026_01_01_000000_create_qt_widgets"
    }

    async fn up(&self, schema: &Schema<'_>) -> DbResult<()> {
        schema
            .create("qt_widgets", |table| {
                table.id();
                table.string("name");
            })
            .await
    }

    async fn down(&self, schema: &Schema<'_>) -> DbResult<()> {
        schema.drop_if_exists("qt_widgets").await
    }
}

#[tokio::test]
async fn migrator_applies_once_and_rolls_back() -> DbResult<()> {
    let Some(conn) = test_conn() else {
        return Ok(());
    };

    let mut migrator = Migrator::new(conn.clone());
    migrator.register(Box::new(CreateWidgets));

    // Clean slate from any earlier aborted run.
    migrator.status().await?;
    conn.exec(
        "DELETE FROM migrations WHERE migration = ?",
        vec!["2026_01_01_000000_create_qt_widgets".into()],
    )
    .await?;
    Schema::new(&conn).drop_if_exists("qt_widgets").await?;

    let first = migrator.up().await?;
    assert_eq!(first, vec!["2026_01_01_000000_create_qt_widgets".to_string()]);

    // Ledger-driven idempotence: a second run applies nothing.
    let second = migrator.up().await?;
    assert!(second.is_empty());

    let status = migrator.status().await?;
    assert!(status.pending.is_empty());

    let rolled = migrator.rollback().await?;
    assert_eq!(
        rolled.as_deref(),
        Some("2026_01_01_000000_create_qt_widgets")
    );

    let status = migrator.status().await?;
    assert_eq!(
        status.pending,
        vec!["2026_01_01_000000_create_qt_widgets".to_string()]
    );

    Ok(())
}
