//! Database seeders.
//!
//! A seeder populates reference or bootstrap data. Seeders are expected to
//! be idempotent by convention (check for existence before inserting);
//! nothing here enforces that.

use crate::conn::Connection;
use crate::error::DbResult;
use async_trait::async_trait;

/// One named seeding step.
#[async_trait]
pub trait Seeder: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self, conn: &Connection) -> DbResult<()>;
}

/// Outcome of a seeding run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
}

/// Run seeders in order. With `target` set, only the seeder of that name
/// runs. A failing seeder is logged and skipped; the rest still run.
pub async fn run_seeders(
    conn: &Connection,
    seeders: &[Box<dyn Seeder>],
    target: Option<&str>,
) -> SeedReport {
    let mut report = SeedReport::default();

    for seeder in seeders {
        if let Some(target) = target {
            if seeder.name() != target {
                continue;
            }
        }

        tracing::info!(name = seeder.name(), "seeding");
        match seeder.run(conn).await {
            Ok(()) => report.succeeded.push(seeder.name().to_string()),
            Err(e) => {
                tracing::error!(name = seeder.name(), error = %e, "seeder failed");
                report.failed.push(seeder.name().to_string());
            }
        }
    }

    report
}
