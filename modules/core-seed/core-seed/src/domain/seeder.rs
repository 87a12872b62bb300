//! Seeding workflow.
//!
//! ## Steps
//!
//! 1. Countries, then zones, when no country exists
//! 2. Languages when none exist
//! 3. Currencies when the currency collection is empty
//! 4. The first site when no site exists
//! 5. Default roles when the current tenant has none
//! 6. The first administrator when the current tenant has no user
//!
//! Steps run strictly in order because roles need the site id and the
//! administrator needs the roles. Every guard is a count (or, for currencies,
//! a full fetch), so a second run inserts nothing.
//!
//! The site owning roles and users is the one created in step 4. When step 4
//! was skipped it is re-read from the store; if none can be found the run fails
//! with [`SeedError::NoActiveSite`] before any role or user is written. The
//! guards count by tenant, so the tenant must be that site; otherwise the run
//! fails with [`SeedError::TenantMismatch`] instead of writing into a site the
//! guards never see.

use std::sync::Arc;

use core_seed_sdk::{
    BasicQueries, CoreStore, GeoCommands, GeoQueries, SiteCommands, SiteId, SiteQueries,
    SiteRole, SiteUser, TenantResolver, UserCommands, UserQueries,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::error::SeedError;
use crate::domain::initial_data::{ADMINISTRATORS_ROLE, AUTHENTICATED_USERS_ROLE, InitialData};

/// Store collaborators of a seeding run, passed explicitly.
#[derive(Clone)]
pub struct SeedStores {
    pub geo_queries: Arc<dyn GeoQueries>,
    pub geo_commands: Arc<dyn GeoCommands>,
    pub site_queries: Arc<dyn SiteQueries>,
    pub site_commands: Arc<dyn SiteCommands>,
    pub user_queries: Arc<dyn UserQueries>,
    pub user_commands: Arc<dyn UserCommands>,
    pub role_counts: Arc<dyn BasicQueries<SiteRole>>,
    pub user_counts: Arc<dyn BasicQueries<SiteUser>>,
    pub tenant_resolver: Arc<dyn TenantResolver>,
}

impl SeedStores {
    /// Fan a single backend out into every store role.
    #[must_use]
    pub fn from_store<S>(store: &Arc<S>, tenant_resolver: Arc<dyn TenantResolver>) -> Self
    where
        S: CoreStore + 'static,
    {
        Self {
            geo_queries: store.clone(),
            geo_commands: store.clone(),
            site_queries: store.clone(),
            site_commands: store.clone(),
            user_queries: store.clone(),
            user_commands: store.clone(),
            role_counts: store.clone(),
            user_counts: store.clone(),
            tenant_resolver,
        }
    }
}

/// What a run inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub countries_added: usize,
    pub zones_added: usize,
    pub languages_added: usize,
    pub currencies_added: usize,
    pub site_created: Option<SiteId>,
    pub roles_created: usize,
    pub admin_created: Option<Uuid>,
    pub memberships_added: usize,
}

impl SeedReport {
    /// True when the store was already fully seeded.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

pub struct SeedRunner {
    stores: SeedStores,
    data: InitialData,
}

impl SeedRunner {
    #[must_use]
    pub fn new(stores: SeedStores, data: InitialData) -> Self {
        Self { stores, data }
    }

    /// Run every seeding step once.
    ///
    /// # Errors
    /// Any store failure aborts the remaining steps and is returned as-is.
    /// [`SeedError::NoActiveSite`] is returned when roles or the administrator
    /// must be created but no site exists, and [`SeedError::TenantMismatch`]
    /// when the current tenant is not that site.
    pub async fn run(&self) -> Result<SeedReport, SeedError> {
        info!("Ensuring core data");
        let mut report = SeedReport::default();

        self.ensure_countries(&mut report).await?;
        self.ensure_languages(&mut report).await?;
        self.ensure_currencies(&mut report).await?;

        let mut active_site = self.ensure_site(&mut report).await?;

        let tenant_id = self
            .stores
            .tenant_resolver
            .resolve_current_tenant_id()
            .await?;
        debug!(%tenant_id, "Resolved current tenant");

        self.ensure_roles(tenant_id, &mut active_site, &mut report)
            .await?;
        self.ensure_admin(tenant_id, &mut active_site, &mut report)
            .await?;

        info!(?report, "Core data ensured");
        Ok(report)
    }

    async fn ensure_countries(&self, report: &mut SeedReport) -> Result<(), SeedError> {
        let count = self.stores.geo_queries.country_count().await?;
        if count > 0 {
            debug!(count, "Countries present, skipping countries and zones");
            return Ok(());
        }

        for country in self.data.countries() {
            self.stores.geo_commands.add_country(&country).await?;
            report.countries_added += 1;
        }
        for zone in self.data.zones() {
            self.stores.geo_commands.add_zone(&zone).await?;
            report.zones_added += 1;
        }
        info!(
            countries = report.countries_added,
            zones = report.zones_added,
            "Seeded countries and zones"
        );
        Ok(())
    }

    async fn ensure_languages(&self, report: &mut SeedReport) -> Result<(), SeedError> {
        let count = self.stores.geo_queries.language_count().await?;
        if count > 0 {
            debug!(count, "Languages present, skipping");
            return Ok(());
        }

        for language in self.data.languages() {
            self.stores.geo_commands.add_language(&language).await?;
            report.languages_added += 1;
        }
        info!(languages = report.languages_added, "Seeded languages");
        Ok(())
    }

    async fn ensure_currencies(&self, report: &mut SeedReport) -> Result<(), SeedError> {
        let existing = self.stores.geo_queries.all_currencies().await?;
        if !existing.is_empty() {
            debug!(count = existing.len(), "Currencies present, skipping");
            return Ok(());
        }

        for currency in self.data.currencies() {
            self.stores.geo_commands.add_currency(&currency).await?;
            report.currencies_added += 1;
        }
        info!(currencies = report.currencies_added, "Seeded currencies");
        Ok(())
    }

    /// Returns the id of the site created by this run, if any.
    async fn ensure_site(&self, report: &mut SeedReport) -> Result<Option<SiteId>, SeedError> {
        let count = self.stores.site_queries.count().await?;
        if count > 0 {
            debug!(count, "Sites present, skipping site creation");
            return Ok(None);
        }

        let site = self
            .stores
            .site_commands
            .create(&self.data.initial_site())
            .await?;
        info!(site_id = %site.id, site_name = %site.site_name, "Created first site");
        report.site_created = Some(site.id);
        Ok(Some(site.id))
    }

    /// The site roles and users are assigned to, re-read from the store when
    /// this run did not create one. It must be the tenant the guards count.
    async fn active_site_id(
        &self,
        tenant_id: Uuid,
        active_site: &mut Option<SiteId>,
    ) -> Result<SiteId, SeedError> {
        let site_id = match *active_site {
            Some(site_id) => site_id,
            None => {
                let site = self
                    .stores
                    .site_queries
                    .fetch_first()
                    .await?
                    .ok_or(SeedError::NoActiveSite)?;
                debug!(site_id = %site.id, "Using existing site");
                *active_site = Some(site.id);
                site.id
            }
        };

        if site_id != tenant_id {
            return Err(SeedError::TenantMismatch { tenant_id, site_id });
        }
        Ok(site_id)
    }

    async fn ensure_roles(
        &self,
        tenant_id: Uuid,
        active_site: &mut Option<SiteId>,
        report: &mut SeedReport,
    ) -> Result<(), SeedError> {
        let count = self.stores.role_counts.count_by_tenant(tenant_id).await?;
        if count > 0 {
            debug!(count, "Roles present, skipping");
            return Ok(());
        }

        let site_id = self.active_site_id(tenant_id, active_site).await?;
        for role in self.data.default_roles(site_id) {
            self.stores.user_commands.create_role(&role).await?;
            report.roles_created += 1;
        }
        info!(%site_id, roles = report.roles_created, "Created default roles");
        Ok(())
    }

    async fn ensure_admin(
        &self,
        tenant_id: Uuid,
        active_site: &mut Option<SiteId>,
        report: &mut SeedReport,
    ) -> Result<(), SeedError> {
        let count = self.stores.user_counts.count_by_tenant(tenant_id).await?;
        if count > 0 {
            debug!(count, "Users present, skipping administrator");
            return Ok(());
        }

        let site_id = self.active_site_id(tenant_id, active_site).await?;
        let Some(admin_role) = self
            .stores
            .user_queries
            .fetch_role(site_id, ADMINISTRATORS_ROLE)
            .await?
        else {
            warn!(%site_id, role = ADMINISTRATORS_ROLE, "Role not found, administrator not created");
            return Ok(());
        };

        let admin = self
            .stores
            .user_commands
            .create_user(&self.data.initial_admin(site_id)?)
            .await?;
        report.admin_created = Some(admin.id);
        if self.data.admin_config().uses_default_password() {
            warn!(
                user_name = %admin.user_name,
                "Created administrator with the default password; change it after first login"
            );
        } else {
            info!(user_name = %admin.user_name, "Created administrator");
        }

        self.stores
            .user_commands
            .add_user_to_role(site_id, admin_role.id, admin.id)
            .await?;
        report.memberships_added += 1;

        match self
            .stores
            .user_queries
            .fetch_role(site_id, AUTHENTICATED_USERS_ROLE)
            .await?
        {
            Some(role) => {
                self.stores
                    .user_commands
                    .add_user_to_role(site_id, role.id, admin.id)
                    .await?;
                report.memberships_added += 1;
            }
            None => {
                warn!(%site_id, role = AUTHENTICATED_USERS_ROLE, "Role not found, membership skipped");
            }
        }
        Ok(())
    }
}
