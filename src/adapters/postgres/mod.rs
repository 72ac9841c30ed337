pub mod key_value_store;

pub use key_value_store::KeyValueStore as PostgresKeyValueStore;

/// マイグレーションを実行する
pub async fn run_migrations(pool: &sqlx::PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
