#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Test support utilities for core-seed integration tests.

#![allow(dead_code)] // Support module provides utilities that may not all be used

use std::sync::Arc;

use core_seed::domain::initial_data::InitialData;
use core_seed::infra::nodb::NoDbCoreStore;
use core_seed::infra::storage::SeaOrmCoreStore;
use core_seed::infra::storage::migrations::Migrator;
use core_seed::infra::tenant::FirstSiteTenantResolver;
use core_seed::{CoreStore, SeedRunner, SeedStores, TenantResolver};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tempfile::TempDir;

/// Create a fresh in-memory `SQLite` database with migrations applied.
///
/// # Panics
/// Panics if the database connection or migrations fail.
pub async fn inmem_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// `SeaORM` store over a fresh in-memory database.
pub async fn inmem_store() -> Arc<SeaOrmCoreStore> {
    Arc::new(SeaOrmCoreStore::new(inmem_db().await))
}

/// File store rooted in a new temporary directory.
///
/// Keep the returned `TempDir` alive for as long as the store is used.
pub async fn temp_store() -> (TempDir, Arc<NoDbCoreStore>) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = NoDbCoreStore::open(dir.path().join("nodb"))
        .await
        .expect("Failed to open file store");
    (dir, Arc::new(store))
}

/// Runner with default initial data and the first-site tenant resolver.
pub fn runner<S>(store: &Arc<S>) -> SeedRunner
where
    S: CoreStore + 'static,
{
    let resolver: Arc<dyn TenantResolver> = Arc::new(FirstSiteTenantResolver::new(store.clone()));
    SeedRunner::new(
        SeedStores::from_store(store, resolver),
        InitialData::default(),
    )
}
