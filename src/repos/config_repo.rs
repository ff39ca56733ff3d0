/*
 * Responsibility
 * - configs テーブルの CRUD (config_type + config_id で一意)
 * - content は JSONB。型チェックは handler 側 (configs モジュール) で済ませてから渡す
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;

use super::error::RepoError;

#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Ids stored under `config_type`, sorted.
    async fn list(&self, config_type: &str) -> Result<Vec<String>, RepoError>;

    async fn get(&self, config_type: &str, config_id: &str) -> Result<Option<Value>, RepoError>;

    /// Insert or replace.
    async fn put(&self, config_type: &str, config_id: &str, content: &Value)
    -> Result<(), RepoError>;

    /// `false` when nothing was stored under that key.
    async fn delete(&self, config_type: &str, config_id: &str) -> Result<bool, RepoError>;

    async fn ping(&self) -> Result<(), RepoError>;
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ConfigRow {
    pub config_type: String,
    pub config_id: String,
    pub content: Value,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PgConfigStore {
    pool: PgPool,
}

impl PgConfigStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects and applies the embedded migrations.
    pub async fn connect(database_url: &str) -> Result<Self, RepoError> {
        let pool = PgPool::connect(database_url).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl ConfigStore for PgConfigStore {
    async fn list(&self, config_type: &str) -> Result<Vec<String>, RepoError> {
        let ids = sqlx::query_scalar::<_, String>(
            r#"
            SELECT config_id
            FROM configs
            WHERE config_type = $1
            ORDER BY config_id
            "#,
        )
        .bind(config_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn get(&self, config_type: &str, config_id: &str) -> Result<Option<Value>, RepoError> {
        let row = sqlx::query_as::<_, ConfigRow>(
            r#"
            SELECT config_type, config_id, content, updated_at
            FROM configs
            WHERE config_type = $1 AND config_id = $2
            "#,
        )
        .bind(config_type)
        .bind(config_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.content))
    }

    async fn put(
        &self,
        config_type: &str,
        config_id: &str,
        content: &Value,
    ) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO configs (config_type, config_id, content)
            VALUES ($1, $2, $3)
            ON CONFLICT (config_type, config_id)
            DO UPDATE SET content = EXCLUDED.content, updated_at = now()
            "#,
        )
        .bind(config_type)
        .bind(config_id)
        .bind(content)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, config_type: &str, config_id: &str) -> Result<bool, RepoError> {
        let result = sqlx::query(
            r#"
            DELETE FROM configs
            WHERE config_type = $1 AND config_id = $2
            "#,
        )
        .bind(config_type)
        .bind(config_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), RepoError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
