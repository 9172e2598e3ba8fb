use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use worship_core::tracing::init_tracing;
use worship_ministry::config::{MinistryConfig, StorageBackend};
use worship_ministry::infra::db::DbStorage;
use worship_ministry::infra::memory::MemoryStorage;
use worship_ministry::router::build_router;
use worship_ministry::state::AppState;
use worship_ministry_migration::Migrator;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = MinistryConfig::from_env();

    let state = match config.storage_backend {
        StorageBackend::Postgres => {
            let url = config.database_url.as_deref().expect("DATABASE_URL");
            let db = Database::connect(url)
                .await
                .expect("failed to connect to database");
            if config.run_migrations {
                Migrator::up(&db, None)
                    .await
                    .expect("failed to run migrations");
                info!("migrations applied");
            }
            info!("using postgres storage");
            AppState::new(DbStorage { db })
        }
        StorageBackend::Memory => {
            let storage = if config.seed_demo_data {
                MemoryStorage::with_demo_data()
                    .await
                    .expect("failed to seed demo data")
            } else {
                MemoryStorage::new()
            };
            info!(seeded = config.seed_demo_data, "using in-memory storage");
            AppState::new(storage)
        }
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.ministry_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("ministry service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
