//! Database primitives shared by the server binary and the test harnesses.

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use thiserror::Error;
use tracing::info;

/// Shared connection pool. Every repository call checks a connection out of it
/// for the duration of a single statement.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database url missing (expected env {0})")]
    MissingUrl(String),
    #[error("invalid {key}: {value}")]
    InvalidSetting { key: &'static str, value: String },
    #[error(transparent)]
    Connect(#[from] DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

/// Environment-driven pool settings.
#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    env_key: String,
    max_connections: Option<u32>,
    sql_logging: bool,
}

fn default_url_key() -> String {
    "DATABASE_URL".to_string()
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self::new(default_url_key())
    }
}

impl DatabaseSettings {
    pub fn new(env_key: impl Into<String>) -> Self {
        Self {
            env_key: env_key.into(),
            max_connections: None,
            sql_logging: false,
        }
    }

    /// Reads `DATABASE_MAX_CONNECTIONS` and `DATABASE_SQL_LOG` on top of the defaults.
    pub fn from_env() -> DbResult<Self> {
        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS").ok();
        let sql_log = std::env::var("DATABASE_SQL_LOG").ok();
        Self::default().with_overrides(max_connections.as_deref(), sql_log.as_deref())
    }

    fn with_overrides(
        mut self,
        max_connections: Option<&str>,
        sql_log: Option<&str>,
    ) -> DbResult<Self> {
        if let Some(raw) = max_connections {
            let parsed = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or_else(|| DbError::InvalidSetting {
                    key: "DATABASE_MAX_CONNECTIONS",
                    value: raw.to_string(),
                })?;
            self.max_connections = Some(parsed);
        }
        self.sql_logging = sql_log
            .map(|val| matches!(val.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Ok(self)
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = Some(max);
        self
    }

    pub fn database_url(&self) -> DbResult<String> {
        std::env::var(&self.env_key).map_err(|_| DbError::MissingUrl(self.env_key.clone()))
    }
}

/// Open the pool described by `settings`.
pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let url = settings.database_url()?;
    connect_url(&url, settings).await
}

/// Open a pool for an explicit url, applying the remaining settings.
pub async fn connect_url(url: &str, settings: &DatabaseSettings) -> DbResult<DbPool> {
    let mut options = ConnectOptions::new(url.to_owned());
    options
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(settings.sql_logging);
    if let Some(max) = settings.max_connections {
        options.max_connections(max);
    }
    let pool = Database::connect(options).await?;
    info!(backend = ?pool.get_database_backend(), "database pool ready");
    Ok(pool)
}

/// Cheap liveness probe used by the health endpoint.
pub async fn ping(pool: &DbPool) -> bool {
    let backend = pool.get_database_backend();
    pool.execute(Statement::from_string(backend, "SELECT 1".to_string()))
        .await
        .is_ok()
}
