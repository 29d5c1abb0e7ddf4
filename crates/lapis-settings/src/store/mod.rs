//! SQLite-backed settings pool.

use async_trait::async_trait;
use lapis_core::{
    config::SettingsConfig, error::LapisError, shellexpand, traits::SettingsStore,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;


/// Persistent per-destination settings backed by SQLite.
#[derive(Clone)]
pub struct SettingsPool {
    pool: SqlitePool,
}

impl SettingsPool {
    /// Open the pool, running migrations on first use.
    pub async fn new(config: &SettingsConfig) -> Result<Self, LapisError> {
        let db_path = shellexpand(&config.db_path);

        // Ensure parent directory exists.
        if let Some(parent) = std::path::Path::new(&db_path).parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| LapisError::Settings(format!("failed to create data dir: {e}")))?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| LapisError::Settings(format!("invalid db path: {e}")))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(opts)
            .await
            .map_err(|e| LapisError::Settings(format!("failed to connect to sqlite: {e}")))?;

        Self::run_migrations(&pool).await?;

        info!("Settings store initialized at {db_path}");

        Ok(Self { pool })
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Read a stored value, `None` when unset.
    pub async fn get_stored(
        &self,
        key: &str,
        destination_id: i64,
    ) -> Result<Option<bool>, LapisError> {
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT value FROM settings WHERE key = ? AND destination_id = ?")
                .bind(key)
                .bind(destination_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| LapisError::Settings(format!("query failed: {e}")))?;

        Ok(row.map(|(v,)| v != 0))
    }

    /// Drop a stored override. Returns `true` if a row was deleted.
    pub async fn remove(&self, key: &str, destination_id: i64) -> Result<bool, LapisError> {
        let result = sqlx::query("DELETE FROM settings WHERE key = ? AND destination_id = ?")
            .bind(key)
            .bind(destination_id)
            .execute(&self.pool)
            .await
            .map_err(|e| LapisError::Settings(format!("delete failed: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// All stored overrides for a destination, ordered by key.
    pub async fn list(&self, destination_id: i64) -> Result<Vec<(String, bool)>, LapisError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT key, value FROM settings WHERE destination_id = ? ORDER BY key",
        )
        .bind(destination_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LapisError::Settings(format!("query failed: {e}")))?;

        Ok(rows.into_iter().map(|(k, v)| (k, v != 0)).collect())
    }

    /// Run SQL migrations, tracking which have already been applied.
    async fn run_migrations(pool: &SqlitePool) -> Result<(), LapisError> {
        sqlx::raw_sql(
            "CREATE TABLE IF NOT EXISTS _migrations (
                name TEXT PRIMARY KEY,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            );",
        )
        .execute(pool)
        .await
        .map_err(|e| LapisError::Settings(format!("failed to create migrations table: {e}")))?;

        let migrations: &[(&str, &str)] = &[(
            "001_settings",
            include_str!("../../migrations/001_settings.sql"),
        )];

        for (name, sql) in migrations {
            let applied: Option<(String,)> =
                sqlx::query_as("SELECT name FROM _migrations WHERE name = ?")
                    .bind(name)
                    .fetch_optional(pool)
                    .await
                    .map_err(|e| {
                        LapisError::Settings(format!("failed to check migration {name}: {e}"))
                    })?;

            if applied.is_some() {
                continue;
            }

            sqlx::raw_sql(sql)
                .execute(pool)
                .await
                .map_err(|e| LapisError::Settings(format!("migration {name} failed: {e}")))?;

            sqlx::query("INSERT INTO _migrations (name) VALUES (?)")
                .bind(name)
                .execute(pool)
                .await
                .map_err(|e| {
                    LapisError::Settings(format!("failed to record migration {name}: {e}"))
                })?;
        }
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for SettingsPool {
    async fn get(
        &self,
        key: &str,
        destination_id: i64,
        default: bool,
    ) -> Result<bool, LapisError> {
        Ok(self.get_stored(key, destination_id).await?.unwrap_or(default))
    }

    async fn set(&self, key: &str, destination_id: i64, value: bool) -> Result<(), LapisError> {
        sqlx::query(
            "INSERT INTO settings (key, destination_id, value) VALUES (?, ?, ?) \
             ON CONFLICT(key, destination_id) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
        )
        .bind(key)
        .bind(destination_id)
        .bind(i64::from(value))
        .execute(&self.pool)
        .await
        .map_err(|e| LapisError::Settings(format!("upsert setting failed: {e}")))?;

        Ok(())
    }
}
