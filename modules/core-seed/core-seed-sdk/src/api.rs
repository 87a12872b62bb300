//! Store traits consumed by the seeding workflow.
//!
//! Each trait covers one narrow capability (reads or writes for one concern) so
//! consumers only depend on what they call. Storage backends implement all of
//! them; [`CoreStore`] names that combination.
//!
//! All traits are object-safe via `async_trait` and are normally used as
//! `Arc<dyn Trait>`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{
    Currency, GeoCountry, GeoZone, Language, SiteId, SiteRole, SiteSettings, SiteUser, TenantId,
};

/// Read access to geography reference data.
#[async_trait]
pub trait GeoQueries: Send + Sync {
    async fn country_count(&self) -> Result<u64, StoreError>;

    async fn language_count(&self) -> Result<u64, StoreError>;

    /// Load every currency.
    async fn all_currencies(&self) -> Result<Vec<Currency>, StoreError>;
}

/// Write access to geography reference data. One call inserts one record.
#[async_trait]
pub trait GeoCommands: Send + Sync {
    async fn add_country(&self, country: &GeoCountry) -> Result<(), StoreError>;

    async fn add_zone(&self, zone: &GeoZone) -> Result<(), StoreError>;

    async fn add_language(&self, language: &Language) -> Result<(), StoreError>;

    async fn add_currency(&self, currency: &Currency) -> Result<(), StoreError>;
}

#[async_trait]
pub trait SiteQueries: Send + Sync {
    /// Number of sites in the store.
    async fn count(&self) -> Result<u64, StoreError>;

    /// The first site ever created (earliest `created_utc`), if any.
    async fn fetch_first(&self) -> Result<Option<SiteSettings>, StoreError>;
}

#[async_trait]
pub trait SiteCommands: Send + Sync {
    /// Persist a new site and return the stored record.
    async fn create(&self, site: &SiteSettings) -> Result<SiteSettings, StoreError>;
}

#[async_trait]
pub trait UserQueries: Send + Sync {
    /// Find a role of `site_id` by its name or normalized name.
    async fn fetch_role(
        &self,
        site_id: SiteId,
        role_name: &str,
    ) -> Result<Option<SiteRole>, StoreError>;

    /// Roles the user is a member of.
    async fn roles_for_user(
        &self,
        site_id: SiteId,
        user_id: Uuid,
    ) -> Result<Vec<SiteRole>, StoreError>;
}

#[async_trait]
pub trait UserCommands: Send + Sync {
    async fn create_role(&self, role: &SiteRole) -> Result<SiteRole, StoreError>;

    async fn create_user(&self, user: &SiteUser) -> Result<SiteUser, StoreError>;

    /// Record membership of `user_id` in `role_id`.
    ///
    /// # Errors
    ///
    /// Backends that validate references return [`StoreError::NotFound`] when the
    /// role or user is unknown.
    async fn add_user_to_role(
        &self,
        site_id: SiteId,
        role_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), StoreError>;
}

/// Tenant-scoped queries, generic over the record kind (`SiteRole`, `SiteUser`).
#[async_trait]
pub trait BasicQueries<T>: Send + Sync {
    /// Number of `T` records owned by `tenant_id`.
    async fn count_by_tenant(&self, tenant_id: TenantId) -> Result<u64, StoreError>;
}

/// Maps the current execution context to a tenant id.
#[async_trait]
pub trait TenantResolver: Send + Sync {
    async fn resolve_current_tenant_id(&self) -> Result<TenantId, StoreError>;
}

/// Every store capability a complete backend provides.
///
/// Implemented automatically for any type implementing all store traits.
pub trait CoreStore:
    GeoQueries
    + GeoCommands
    + SiteQueries
    + SiteCommands
    + UserQueries
    + UserCommands
    + BasicQueries<SiteRole>
    + BasicQueries<SiteUser>
{
}

impl<T> CoreStore for T where
    T: GeoQueries
        + GeoCommands
        + SiteQueries
        + SiteCommands
        + UserQueries
        + UserCommands
        + BasicQueries<SiteRole>
        + BasicQueries<SiteUser>
{
}
