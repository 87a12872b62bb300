//! Configuration for the core-seed module.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Module configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreSeedConfig {
    /// Which backend holds the data.
    pub storage: StorageConfig,
    /// Definition of the first site.
    pub site: InitialSiteConfig,
    /// Credentials and profile of the first administrator.
    pub admin: InitialAdminConfig,
    /// How the current tenant is resolved for role and user counts.
    pub tenant: TenantConfig,
}

/// Storage backend selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageConfig {
    /// Relational database through `SeaORM`.
    SeaOrm { dsn: String },
    /// JSON documents on the local file system.
    NoDb { root_dir: PathBuf },
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::SeaOrm {
            dsn: default_dsn(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InitialSiteConfig {
    pub site_name: String,
    pub alias_id: String,
    pub theme: String,
}

impl Default for InitialSiteConfig {
    fn default() -> Self {
        Self {
            site_name: "Sample Site".to_owned(),
            alias_id: "s1".to_owned(),
            theme: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InitialAdminConfig {
    pub email: String,
    pub user_name: String,
    pub display_name: String,
    /// Plain-text initial password. Hashed before it is stored.
    pub password: String,
}

impl InitialAdminConfig {
    pub const DEFAULT_PASSWORD: &'static str = "admin";

    #[must_use]
    pub fn uses_default_password(&self) -> bool {
        self.password == Self::DEFAULT_PASSWORD
    }
}

impl Default for InitialAdminConfig {
    fn default() -> Self {
        Self {
            email: "admin@admin.com".to_owned(),
            user_name: "admin".to_owned(),
            display_name: "Admin".to_owned(),
            password: Self::DEFAULT_PASSWORD.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantMode {
    /// The tenant is the first site in the store.
    #[default]
    FirstSite,
    /// The tenant is `tenant_id`, which is also the id given to the first site.
    Static,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TenantConfig {
    pub mode: TenantMode,
    /// Required when `mode` is `static`.
    pub tenant_id: Option<Uuid>,
}

impl CoreSeedConfig {
    /// Check constraints serde cannot express.
    ///
    /// # Errors
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> anyhow::Result<()> {
        match &self.storage {
            StorageConfig::SeaOrm { dsn } if dsn.trim().is_empty() => {
                anyhow::bail!("storage.dsn must not be empty")
            }
            StorageConfig::NoDb { root_dir } if root_dir.as_os_str().is_empty() => {
                anyhow::bail!("storage.root_dir must not be empty")
            }
            _ => {}
        }
        if self.admin.email.trim().is_empty() || self.admin.user_name.trim().is_empty() {
            anyhow::bail!("admin.email and admin.user_name must not be empty");
        }
        if self.tenant.mode == TenantMode::Static && self.tenant.tenant_id.is_none() {
            anyhow::bail!("tenant.tenant_id is required when tenant.mode is static");
        }
        Ok(())
    }
}

fn default_dsn() -> String {
    "sqlite://core-seed.db?mode=rwc".to_owned()
}
