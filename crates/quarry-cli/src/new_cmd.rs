use crate::cli::NewArgs;
use anyhow::Context;
use chrono::Local;
use heck::{ToSnakeCase, ToUpperCamelCase};

pub fn run(args: NewArgs) -> anyhow::Result<()> {
    let snake = normalize_name(&args.name)?;
    let struct_name = snake.to_upper_camel_case();
    let version = Local::now().format("%Y_%m_%d_%H%M%S").to_string();
    let migration_name = format!("{version}_{snake}");

    std::fs::create_dir_all(&args.dir)
        .with_context(|| format!("failed to create {}", args.dir.display()))?;

    let path = args.dir.join(format!("{migration_name}.rs"));
    if path.exists() {
        anyhow::bail!("migration file already exists: {}", path.display());
    }

    std::fs::write(&path, template(&struct_name, &migration_name))
        .with_context(|| format!("failed to write {}", path.display()))?;

    println!("created migration: {}", path.display());
    Ok(())
}

fn normalize_name(name: &str) -> anyhow::Result<String> {
    let mut s = name.to_snake_case();
    s = s
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>();
    while s.contains("__") {
        s = s.replace("__", "_");
    }
    let s = s.trim_matches('_').to_string();
    if s.is_empty() {
        anyhow::bail!("migration name becomes empty after normalization");
    }
    Ok(s)
}

fn template(struct_name: &str, migration_name: &str) -> String {
    format!(
        r#"use quarry::{{DbResult, Migration, Schema}};

pub struct {struct_name};

#[async_trait::async_trait]
impl Migration for {struct_name} {{
    fn name(&self) -> &str {{
        "{migration_name}"
    }}

    async fn up(&self, schema: &Schema<'_>) -> DbResult<()> {{
        schema
            .create("table_name", |table| {{
                table.id();

                // table.string("name");

                // Default utilities
                table.boolean("active").default(true);
                table.timestamps(); // created_at, created_by, updated_at, updated_by
                table.soft_delete(); // deleted_at, deleted_by
            }})
            .await
    }}

    async fn down(&self, schema: &Schema<'_>) -> DbResult<()> {{
        schema.drop_if_exists("table_name").await
    }}
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_handles_camel_case() {
        assert_eq!(
            normalize_name("CreateUsersTable").unwrap(),
            "create_users_table"
        );
        assert_eq!(normalize_name("add-email index").unwrap(), "add_email_index");
    }

    #[test]
    fn normalize_rejects_empty() {
        assert!(normalize_name("--").is_err());
    }

    #[test]
    fn template_names_the_struct_and_migration() {
        let out = template("CreateUsersTable", "2026_01_01_000000_create_users_table");
        assert!(out.contains("pub struct CreateUsersTable;"));
        assert!(out.contains("\"2026_01_01_000000_create_users_table\""));
        assert!(out.contains("impl Migration for CreateUsersTable"));
    }
}
