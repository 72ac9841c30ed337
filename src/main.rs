use cozy_library::{
    adapters::{
        file::FileKeyValueStore,
        memory::MemoryKeyValueStore,
        postgres::{PostgresKeyValueStore, run_migrations},
    },
    api::{handlers::AppState, router::create_router},
    application::library::LibraryController,
    config::{Config, StorageBackend},
    ports::KeyValueStore,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cozy_library=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Invalid configuration");
    tracing::info!("Storage backend: {:?}", config.storage);

    // Initialize storage adapter
    let store: Arc<dyn KeyValueStore> = match config.storage {
        StorageBackend::File => {
            tracing::info!("Data directory: {}", config.data_dir.display());
            Arc::new(
                FileKeyValueStore::open(&config.data_dir)
                    .await
                    .expect("Failed to open data directory"),
            )
        }
        StorageBackend::Postgres => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .connect(&config.database_url)
                .await
                .expect("Failed to connect to database");
            run_migrations(&pool)
                .await
                .expect("Failed to run migrations");
            Arc::new(PostgresKeyValueStore::new(pool))
        }
        StorageBackend::Memory => Arc::new(MemoryKeyValueStore::new()),
    };

    // A corrupt stored value aborts startup
    let library = LibraryController::open(store)
        .await
        .expect("Failed to load library state");

    let app = create_router(Arc::new(AppState::new(library)));

    // Server configuration
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
