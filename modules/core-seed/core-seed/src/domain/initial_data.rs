//! Fixed records written on first startup.

use core_seed_sdk::{
    Currency, GeoCountry, GeoZone, Language, SiteId, SiteRole, SiteSettings, SiteUser,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::config::{CoreSeedConfig, InitialAdminConfig, InitialSiteConfig, TenantMode};
use crate::domain::error::SeedError;
use crate::domain::password::hash_password;
use crate::domain::reference::{COUNTRIES, CURRENCIES, LANGUAGES, ZONES};

pub const ADMINISTRATORS_ROLE: &str = "Administrators";
pub const ROLE_ADMINS_ROLE: &str = "Role Admins";
pub const CONTENT_ADMINISTRATORS_ROLE: &str = "Content Administrators";
pub const AUTHENTICATED_USERS_ROLE: &str = "Authenticated Users";

/// Default role names, in creation order.
pub const DEFAULT_ROLE_NAMES: [&str; 4] = [
    ADMINISTRATORS_ROLE,
    ROLE_ADMINS_ROLE,
    CONTENT_ADMINISTRATORS_ROLE,
    AUTHENTICATED_USERS_ROLE,
];

/// Builds the reference lists and the default site, roles and administrator.
///
/// Every call produces fresh ids.
#[derive(Debug, Clone, Default)]
pub struct InitialData {
    site: InitialSiteConfig,
    admin: InitialAdminConfig,
    site_id: Option<SiteId>,
}

impl InitialData {
    #[must_use]
    pub fn new(site: InitialSiteConfig, admin: InitialAdminConfig) -> Self {
        Self {
            site,
            admin,
            site_id: None,
        }
    }

    /// In static tenant mode the first site takes the configured tenant id.
    #[must_use]
    pub fn from_config(config: &CoreSeedConfig) -> Self {
        let data = Self::new(config.site.clone(), config.admin.clone());
        match (config.tenant.mode, config.tenant.tenant_id) {
            (TenantMode::Static, Some(tenant_id)) => data.with_site_id(tenant_id),
            _ => data,
        }
    }

    /// Create the first site with a fixed id instead of a fresh one.
    #[must_use]
    pub fn with_site_id(mut self, site_id: SiteId) -> Self {
        self.site_id = Some(site_id);
        self
    }

    #[must_use]
    pub fn admin_config(&self) -> &InitialAdminConfig {
        &self.admin
    }

    #[must_use]
    pub fn countries(&self) -> Vec<GeoCountry> {
        COUNTRIES
            .iter()
            .map(|&(iso2, iso3, name)| GeoCountry {
                id: Uuid::now_v7(),
                name: name.to_owned(),
                iso_code2: iso2.to_owned(),
                iso_code3: iso3.to_owned(),
            })
            .collect()
    }

    #[must_use]
    pub fn zones(&self) -> Vec<GeoZone> {
        ZONES
            .iter()
            .map(|&(country, code, name)| GeoZone {
                id: Uuid::now_v7(),
                country_code: country.to_owned(),
                code: code.to_owned(),
                name: name.to_owned(),
            })
            .collect()
    }

    #[must_use]
    pub fn languages(&self) -> Vec<Language> {
        LANGUAGES
            .iter()
            .zip(1..)
            .map(|(&(code, name), rank)| Language {
                id: Uuid::now_v7(),
                code: code.to_owned(),
                name: name.to_owned(),
                sort_rank: rank,
            })
            .collect()
    }

    #[must_use]
    pub fn currencies(&self) -> Vec<Currency> {
        CURRENCIES
            .iter()
            .map(|&(code, name, symbol)| Currency {
                id: Uuid::now_v7(),
                code: code.to_owned(),
                name: name.to_owned(),
                symbol: symbol.to_owned(),
            })
            .collect()
    }

    #[must_use]
    pub fn initial_site(&self) -> SiteSettings {
        SiteSettings {
            id: self.site_id.unwrap_or_else(Uuid::now_v7),
            alias_id: self.site.alias_id.clone(),
            site_name: self.site.site_name.clone(),
            theme: self.site.theme.clone(),
            is_server_admin_site: true,
            created_utc: OffsetDateTime::now_utc(),
        }
    }

    /// The four default roles, owned by `site_id`.
    #[must_use]
    pub fn default_roles(&self, site_id: SiteId) -> Vec<SiteRole> {
        DEFAULT_ROLE_NAMES
            .iter()
            .map(|name| SiteRole {
                id: Uuid::now_v7(),
                site_id,
                role_name: (*name).to_owned(),
                normalized_role_name: name.to_uppercase(),
            })
            .collect()
    }

    /// The first administrator of `site_id`, with its password hashed.
    ///
    /// # Errors
    /// Returns [`SeedError::PasswordHash`] if the password cannot be hashed.
    pub fn initial_admin(&self, site_id: SiteId) -> Result<SiteUser, SeedError> {
        Ok(SiteUser {
            id: Uuid::now_v7(),
            site_id,
            email: self.admin.email.clone(),
            normalized_email: self.admin.email.to_uppercase(),
            user_name: self.admin.user_name.clone(),
            normalized_user_name: self.admin.user_name.to_uppercase(),
            display_name: self.admin.display_name.clone(),
            password_hash: hash_password(&self.admin.password)?,
            must_change_password: true,
            account_approved: true,
            created_utc: OffsetDateTime::now_utc(),
        })
    }
}
