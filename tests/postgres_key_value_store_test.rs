use cozy_library::adapters::postgres::PostgresKeyValueStore;
use cozy_library::application::library::{LibraryController, add_book};
use cozy_library::domain::AddBook;
use cozy_library::ports::KeyValueStore;
use sqlx::PgPool;
use std::sync::Arc;

mod common;

/// テストの独立性を保つため、各テスト前にすべてのデータを削除します。
async fn cleanup_database(pool: &PgPool) {
    sqlx::query("TRUNCATE TABLE library_storage")
        .execute(pool)
        .await
        .expect("Failed to truncate library_storage");
}

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn test_save_and_load() {
    let pool = common::create_test_pool().await;
    cleanup_database(&pool).await;
    let store = PostgresKeyValueStore::new(pool);

    assert_eq!(store.load("library_books").await.unwrap(), None);

    store
        .save("library_books", "[]".to_string())
        .await
        .unwrap();
    store
        .save("library_books", "[1]".to_string())
        .await
        .unwrap();

    assert_eq!(
        store.load("library_books").await.unwrap(),
        Some("[1]".to_string())
    );
}

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn test_library_state_persists_across_reopen() {
    let pool = common::create_test_pool().await;
    cleanup_database(&pool).await;
    let store = Arc::new(PostgresKeyValueStore::new(pool));

    let mut controller = LibraryController::open(store.clone()).await.unwrap();
    let book = add_book(
        &mut controller,
        AddBook {
            book_name: "Dune".to_string(),
            author: "Herbert".to_string(),
            price: 499.0,
        },
    )
    .await
    .unwrap();

    let reopened = LibraryController::open(store).await.unwrap();

    assert_eq!(reopened.books().len(), 1);
    assert_eq!(reopened.books()[0].id, book.id);
}
