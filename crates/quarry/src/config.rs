//! Environment-driven database configuration.
//!
//! Settings come from the process environment (optionally seeded from a
//! `.env` file): `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER`, `DB_PASS`,
//! `APP_ENV`, `APP_TIMEZONE`.

use crate::error::{DbError, DbResult};
use mysql_async::{Opts, OptsBuilder};

/// Deployment mode. Controls how much of an engine error may be shown to
/// the outside world (see [`DbError::external_message`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    /// Read `APP_ENV`. Anything other than `development`/`dev` is treated
    /// as production.
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV").as_deref() {
            Ok("development") | Ok("dev") => Self::Development,
            _ => Self::Production,
        }
    }
}

/// Connection settings for a single MySQL database.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    /// Offset applied with `SET time_zone` on every new connection,
    /// e.g. `"+08:00"`. `None` keeps the server default.
    pub timezone: Option<String>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3306,
            database: "test".to_string(),
            user: "root".to_string(),
            password: String::new(),
            timezone: None,
        }
    }
}

impl DbConfig {
    /// Load configuration from the environment, falling back to defaults
    /// for anything unset. A `.env` file in the working directory is read
    /// first if present.
    pub fn from_env() -> DbResult<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let port = match std::env::var("DB_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| DbError::validation(format!("invalid DB_PORT: {raw}")))?,
            Err(_) => defaults.port,
        };

        Ok(Self {
            host: std::env::var("DB_HOST").unwrap_or(defaults.host),
            port,
            database: std::env::var("DB_NAME").unwrap_or(defaults.database),
            user: std::env::var("DB_USER").unwrap_or(defaults.user),
            password: std::env::var("DB_PASS").unwrap_or(defaults.password),
            timezone: std::env::var("APP_TIMEZONE").ok(),
        })
    }

    /// Build driver options. The timezone offset, when set, is applied as a
    /// per-connection init statement so every pooled connection agrees with
    /// the application clock.
    pub fn to_opts(&self) -> Opts {
        let mut builder = OptsBuilder::default()
            .ip_or_hostname(self.host.clone())
            .tcp_port(self.port)
            .user(Some(self.user.clone()))
            .pass(Some(self.password.clone()))
            .db_name(Some(self.database.clone()));

        if let Some(tz) = &self.timezone {
            builder = builder.init(vec![format!("SET time_zone = '{tz}'")]);
        }

        builder.into()
    }
}
