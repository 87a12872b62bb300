use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use core_seed_sdk::{
    BasicQueries, Currency, GeoCommands, GeoCountry, GeoQueries, GeoZone, Language,
    SiteCommands, SiteId, SiteQueries, SiteRole, SiteSettings, SiteUser, StoreError, TenantId,
    UserCommands, UserQueries, UserRole,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

/// Project holding reference data and sites.
pub const DEFAULT_PROJECT: &str = "default";

const COUNTRIES: &str = "countries";
const ZONES: &str = "zones";
const LANGUAGES: &str = "languages";
const CURRENCIES: &str = "currencies";
const SITES: &str = "sites";
const ROLES: &str = "roles";
const USERS: &str = "users";
const USER_ROLES: &str = "userroles";

const EXTENSION: &str = "json";
// Unpublished writes; never counted or loaded.
const TEMP_SUFFIX: &str = ".tmp";

/// Document store keeping one JSON file per record under `root`.
#[derive(Debug, Clone)]
pub struct NoDbCoreStore {
    root: PathBuf,
}

impl NoDbCoreStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    /// Returns [`StoreError::Backend`] if the directory cannot be created.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).await.map_err(StoreError::backend)?;
        debug!(root = %root.display(), "Opened file store");
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, project: &str, collection: &str) -> PathBuf {
        self.root.join(project).join(collection)
    }

    fn record_path(&self, project: &str, collection: &str, key: &str) -> PathBuf {
        self.collection_dir(project, collection)
            .join(format!("{key}.{EXTENSION}"))
    }

    /// Write a new document; an existing key is a conflict.
    ///
    /// The document is written to a temp file in the collection directory and
    /// then linked into place, so a crash never leaves a partial `<key>.json`.
    async fn insert<T: Serialize + Sync>(
        &self,
        project: &str,
        collection: &str,
        key: &str,
        record: &T,
    ) -> Result<(), StoreError> {
        let dir = self.collection_dir(project, collection);
        fs::create_dir_all(&dir).await.map_err(StoreError::backend)?;

        let json = serde_json::to_vec_pretty(record).map_err(StoreError::backend)?;
        let path = self.record_path(project, collection, key);
        let prefix = format!(".{key}.");
        let published = tokio::task::spawn_blocking(move || -> io::Result<()> {
            let mut tmp = tempfile::Builder::new()
                .prefix(&prefix)
                .suffix(TEMP_SUFFIX)
                .tempfile_in(&dir)?;
            tmp.write_all(&json)?;
            tmp.as_file().sync_all()?;
            tmp.persist_noclobber(&path).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(StoreError::backend)?;

        match published {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(StoreError::conflict(format!(
                "{project}/{collection}/{key} already exists"
            ))),
            Err(e) => Err(StoreError::backend(e)),
        }
    }

    async fn document_paths(
        &self,
        project: &str,
        collection: &str,
    ) -> Result<Vec<PathBuf>, StoreError> {
        let mut dir = match fs::read_dir(self.collection_dir(project, collection)).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::backend(e)),
        };

        let mut paths = Vec::new();
        while let Some(entry) = dir.next_entry().await.map_err(StoreError::backend)? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == EXTENSION) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    async fn count_documents(&self, project: &str, collection: &str) -> Result<u64, StoreError> {
        let paths = self.document_paths(project, collection).await?;
        Ok(paths.len() as u64)
    }

    async fn load_all<T: DeserializeOwned>(
        &self,
        project: &str,
        collection: &str,
    ) -> Result<Vec<T>, StoreError> {
        let mut records = Vec::new();
        for path in self.document_paths(project, collection).await? {
            let bytes = fs::read(&path).await.map_err(StoreError::backend)?;
            records.push(serde_json::from_slice(&bytes).map_err(StoreError::backend)?);
        }
        Ok(records)
    }

    async fn exists(
        &self,
        project: &str,
        collection: &str,
        key: &str,
    ) -> Result<bool, StoreError> {
        fs::try_exists(self.record_path(project, collection, key))
            .await
            .map_err(StoreError::backend)
    }
}

fn site_project(site_id: SiteId) -> String {
    site_id.to_string()
}

#[async_trait]
impl GeoQueries for NoDbCoreStore {
    async fn country_count(&self) -> Result<u64, StoreError> {
        self.count_documents(DEFAULT_PROJECT, COUNTRIES).await
    }

    async fn language_count(&self) -> Result<u64, StoreError> {
        self.count_documents(DEFAULT_PROJECT, LANGUAGES).await
    }

    async fn all_currencies(&self) -> Result<Vec<Currency>, StoreError> {
        self.load_all(DEFAULT_PROJECT, CURRENCIES).await
    }
}

#[async_trait]
impl GeoCommands for NoDbCoreStore {
    async fn add_country(&self, country: &GeoCountry) -> Result<(), StoreError> {
        self.insert(DEFAULT_PROJECT, COUNTRIES, &country.iso_code2, country)
            .await
    }

    async fn add_zone(&self, zone: &GeoZone) -> Result<(), StoreError> {
        let key = format!("{}-{}", zone.country_code, zone.code);
        self.insert(DEFAULT_PROJECT, ZONES, &key, zone).await
    }

    async fn add_language(&self, language: &Language) -> Result<(), StoreError> {
        self.insert(DEFAULT_PROJECT, LANGUAGES, &language.code, language)
            .await
    }

    async fn add_currency(&self, currency: &Currency) -> Result<(), StoreError> {
        self.insert(DEFAULT_PROJECT, CURRENCIES, &currency.code, currency)
            .await
    }
}

#[async_trait]
impl SiteQueries for NoDbCoreStore {
    async fn count(&self) -> Result<u64, StoreError> {
        self.count_documents(DEFAULT_PROJECT, SITES).await
    }

    async fn fetch_first(&self) -> Result<Option<SiteSettings>, StoreError> {
        let sites: Vec<SiteSettings> = self.load_all(DEFAULT_PROJECT, SITES).await?;
        Ok(sites
            .into_iter()
            .min_by_key(|site| (site.created_utc, site.id)))
    }
}

#[async_trait]
impl SiteCommands for NoDbCoreStore {
    async fn create(&self, site: &SiteSettings) -> Result<SiteSettings, StoreError> {
        self.insert(DEFAULT_PROJECT, SITES, &site.id.to_string(), site)
            .await?;
        Ok(site.clone())
    }
}

#[async_trait]
impl UserQueries for NoDbCoreStore {
    async fn fetch_role(
        &self,
        site_id: SiteId,
        role_name: &str,
    ) -> Result<Option<SiteRole>, StoreError> {
        let roles: Vec<SiteRole> = self.load_all(&site_project(site_id), ROLES).await?;
        Ok(roles
            .into_iter()
            .find(|role| role.site_id == site_id && role.matches_name(role_name)))
    }

    async fn roles_for_user(
        &self,
        site_id: SiteId,
        user_id: Uuid,
    ) -> Result<Vec<SiteRole>, StoreError> {
        let project = site_project(site_id);
        let memberships: Vec<UserRole> = self.load_all(&project, USER_ROLES).await?;
        let roles: Vec<SiteRole> = self.load_all(&project, ROLES).await?;

        let mut assigned: Vec<SiteRole> = roles
            .into_iter()
            .filter(|role| {
                memberships
                    .iter()
                    .any(|m| m.user_id == user_id && m.role_id == role.id)
            })
            .collect();
        assigned.sort_by(|a, b| a.role_name.cmp(&b.role_name));
        Ok(assigned)
    }
}

#[async_trait]
impl UserCommands for NoDbCoreStore {
    async fn create_role(&self, role: &SiteRole) -> Result<SiteRole, StoreError> {
        if self
            .fetch_role(role.site_id, &role.normalized_role_name)
            .await?
            .is_some()
        {
            return Err(StoreError::conflict(format!(
                "role {} already exists in site {}",
                role.role_name, role.site_id
            )));
        }

        self.insert(&site_project(role.site_id), ROLES, &role.id.to_string(), role)
            .await?;
        Ok(role.clone())
    }

    async fn create_user(&self, user: &SiteUser) -> Result<SiteUser, StoreError> {
        let project = site_project(user.site_id);
        let users: Vec<SiteUser> = self.load_all(&project, USERS).await?;
        if users
            .iter()
            .any(|u| u.normalized_email == user.normalized_email)
        {
            return Err(StoreError::conflict(format!(
                "user {} already exists in site {}",
                user.email, user.site_id
            )));
        }

        self.insert(&project, USERS, &user.id.to_string(), user)
            .await?;
        Ok(user.clone())
    }

    async fn add_user_to_role(
        &self,
        site_id: SiteId,
        role_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), StoreError> {
        let project = site_project(site_id);
        if !self.exists(&project, ROLES, &role_id.to_string()).await? {
            return Err(StoreError::not_found("role", role_id));
        }
        if !self.exists(&project, USERS, &user_id.to_string()).await? {
            return Err(StoreError::not_found("user", user_id));
        }

        let membership = UserRole {
            site_id,
            user_id,
            role_id,
        };
        let key = format!("{user_id}_{role_id}");
        self.insert(&project, USER_ROLES, &key, &membership).await
    }
}

#[async_trait]
impl BasicQueries<SiteRole> for NoDbCoreStore {
    async fn count_by_tenant(&self, tenant_id: TenantId) -> Result<u64, StoreError> {
        self.count_documents(&site_project(tenant_id), ROLES).await
    }
}

#[async_trait]
impl BasicQueries<SiteUser> for NoDbCoreStore {
    async fn count_by_tenant(&self, tenant_id: TenantId) -> Result<u64, StoreError> {
        self.count_documents(&site_project(tenant_id), USERS).await
    }
}
