use crate::ports::key_value_store::{KeyValueStore as KeyValueStoreTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row};

/// KeyValueStoreのPostgreSQL実装
///
/// `library_storage`テーブルにキーごとに1行を保持する。
/// スキーマは`migrations/`で管理する。
pub struct KeyValueStore {
    pool: PgPool,
}

impl KeyValueStore {
    /// PostgreSQLコネクションプールから新しいKeyValueStoreを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStoreTrait for KeyValueStore {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query(
            r#"
            SELECT value
            FROM library_storage
            WHERE key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| row.get("value")))
    }

    /// INSERT ... ON CONFLICT UPDATEで値を置き換える
    async fn save(&self, key: &str, value: String) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO library_storage (key, value, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (key)
            DO UPDATE SET
                value = EXCLUDED.value,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
