//! Tenant resolvers.
//!
//! Roles and users are scoped by the id of the site that owns them, so the
//! tenant of a single-site installation is its first site.

use std::sync::Arc;

use async_trait::async_trait;
use core_seed_sdk::{SiteQueries, StoreError, TenantId, TenantResolver};
use uuid::Uuid;

/// Resolves to the id of the earliest created site.
///
/// With no site in the store it resolves to the nil id, which owns nothing.
pub struct FirstSiteTenantResolver {
    sites: Arc<dyn SiteQueries>,
}

impl FirstSiteTenantResolver {
    #[must_use]
    pub fn new(sites: Arc<dyn SiteQueries>) -> Self {
        Self { sites }
    }
}

#[async_trait]
impl TenantResolver for FirstSiteTenantResolver {
    async fn resolve_current_tenant_id(&self) -> Result<TenantId, StoreError> {
        Ok(self
            .sites
            .fetch_first()
            .await?
            .map_or_else(Uuid::nil, |site| site.id))
    }
}

/// Always resolves to the configured tenant.
pub struct StaticTenantResolver {
    tenant_id: TenantId,
}

impl StaticTenantResolver {
    #[must_use]
    pub fn new(tenant_id: TenantId) -> Self {
        Self { tenant_id }
    }
}

#[async_trait]
impl TenantResolver for StaticTenantResolver {
    async fn resolve_current_tenant_id(&self) -> Result<TenantId, StoreError> {
        Ok(self.tenant_id)
    }
}

#[cfg(test)]
mod tests {
    use core_seed_sdk::SiteSettings;
    use parking_lot::Mutex;
    use time::OffsetDateTime;

    use super::*;

    struct FixedSites {
        first: Mutex<Option<SiteSettings>>,
    }

    #[async_trait]
    impl SiteQueries for FixedSites {
        async fn count(&self) -> Result<u64, StoreError> {
            Ok(u64::from(self.first.lock().is_some()))
        }

        async fn fetch_first(&self) -> Result<Option<SiteSettings>, StoreError> {
            Ok(self.first.lock().clone())
        }
    }

    #[tokio::test]
    async fn first_site_resolver_follows_store() {
        let sites = Arc::new(FixedSites {
            first: Mutex::new(None),
        });
        let resolver = FirstSiteTenantResolver::new(sites.clone());

        assert_eq!(resolver.resolve_current_tenant_id().await.unwrap(), Uuid::nil());

        let site_id = Uuid::new_v4();
        *sites.first.lock() = Some(SiteSettings {
            id: site_id,
            alias_id: "s1".to_owned(),
            site_name: "Sample Site".to_owned(),
            theme: String::new(),
            is_server_admin_site: true,
            created_utc: OffsetDateTime::now_utc(),
        });

        assert_eq!(resolver.resolve_current_tenant_id().await.unwrap(), site_id);
    }

    #[tokio::test]
    async fn static_resolver_returns_configured_id() {
        let tenant_id = Uuid::new_v4();
        let resolver = StaticTenantResolver::new(tenant_id);
        assert_eq!(resolver.resolve_current_tenant_id().await.unwrap(), tenant_id);
    }
}
