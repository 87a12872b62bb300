//! Startup entry points.

use std::sync::Arc;

use anyhow::Context;
use core_seed_sdk::{CoreStore, SiteQueries, TenantResolver};
use tracing::{info, warn};

use crate::config::{CoreSeedConfig, StorageConfig, TenantConfig, TenantMode};
use crate::domain::error::SeedError;
use crate::domain::initial_data::InitialData;
use crate::domain::seeder::{SeedReport, SeedRunner, SeedStores};
use crate::infra::nodb::NoDbCoreStore;
use crate::infra::storage::SeaOrmCoreStore;
use crate::infra::tenant::{FirstSiteTenantResolver, StaticTenantResolver};

/// Open the configured backend, seed it and release it.
///
/// The backend is closed whether or not seeding succeeds; a failure to close
/// is logged and does not replace the seeding result.
///
/// # Errors
/// Returns an error if the configuration is invalid, the backend cannot be
/// opened, or any seeding step fails.
pub async fn initialize_data(config: &CoreSeedConfig) -> anyhow::Result<SeedReport> {
    config.validate()?;
    let data = InitialData::from_config(config);

    match &config.storage {
        StorageConfig::SeaOrm { dsn } => {
            let store = Arc::new(
                SeaOrmCoreStore::connect(dsn)
                    .await
                    .context("failed to open core database")?,
            );
            info!("Seeding relational store");

            let result: anyhow::Result<SeedReport> = async {
                let resolver = tenant_resolver(&config.tenant, &store)?;
                Ok(seed_store(&store, resolver, data).await?)
            }
            .await;

            if let Err(e) = store.close().await {
                warn!(error = %e, "Failed to close core database");
            }
            result
        }
        StorageConfig::NoDb { root_dir } => {
            let store = Arc::new(
                NoDbCoreStore::open(root_dir)
                    .await
                    .with_context(|| {
                        format!("failed to open file store at {}", root_dir.display())
                    })?,
            );
            info!(root = %root_dir.display(), "Seeding file store");

            let resolver = tenant_resolver(&config.tenant, &store)?;
            Ok(seed_store(&store, resolver, data).await?)
        }
    }
}

/// Seed an already opened store.
///
/// # Errors
/// Returns the first [`SeedError`] raised by a seeding step.
pub async fn seed_store<S>(
    store: &Arc<S>,
    tenant_resolver: Arc<dyn TenantResolver>,
    data: InitialData,
) -> Result<SeedReport, SeedError>
where
    S: CoreStore + 'static,
{
    SeedRunner::new(SeedStores::from_store(store, tenant_resolver), data)
        .run()
        .await
}

fn tenant_resolver<S>(
    config: &TenantConfig,
    sites: &Arc<S>,
) -> anyhow::Result<Arc<dyn TenantResolver>>
where
    S: SiteQueries + 'static,
{
    match config.mode {
        TenantMode::FirstSite => Ok(Arc::new(FirstSiteTenantResolver::new(sites.clone()))),
        TenantMode::Static => {
            let tenant_id = config
                .tenant_id
                .context("tenant.tenant_id is required when tenant.mode is static")?;
            Ok(Arc::new(StaticTenantResolver::new(tenant_id)))
        }
    }
}
