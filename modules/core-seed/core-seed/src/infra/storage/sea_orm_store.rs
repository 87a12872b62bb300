//! `SeaORM` implementation of every core store trait.

use async_trait::async_trait;
use core_seed_sdk::{
    BasicQueries, Currency, GeoCommands, GeoCountry, GeoQueries, GeoZone, Language,
    SiteCommands, SiteId, SiteQueries, SiteRole, SiteSettings, SiteUser, StoreError, TenantId,
    UserCommands, UserQueries, UserRole,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, Database, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use sea_orm_migration::MigratorTrait;
use tracing::debug;
use uuid::Uuid;

use super::db::db_err;
use super::entity::{
    CurrencyEntity, GeoCountryEntity, GeoZoneEntity, LanguageEntity, SiteEntity, SiteRoleEntity,
    SiteUserEntity, UserRoleEntity, currency, geo_country, geo_zone, language, site, site_role,
    site_user, user_role,
};
use super::migrations::Migrator;

/// Relational core store over a `SeaORM` connection.
pub struct SeaOrmCoreStore {
    db: DatabaseConnection,
}

impl SeaOrmCoreStore {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Connect to `dsn` and bring the schema up to date.
    ///
    /// # Errors
    /// Returns [`StoreError::Backend`] if the connection or a migration fails.
    pub async fn connect(dsn: &str) -> Result<Self, StoreError> {
        let db = Database::connect(dsn).await.map_err(db_err)?;
        Migrator::up(&db, None).await.map_err(db_err)?;
        debug!("Core tables migrated");
        Ok(Self::new(db))
    }

    #[must_use]
    pub fn conn(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Close the underlying connection pool.
    ///
    /// # Errors
    /// Returns [`StoreError::Backend`] if the pool fails to shut down.
    pub async fn close(&self) -> Result<(), StoreError> {
        self.db.clone().close().await.map_err(db_err)
    }
}

#[async_trait]
impl GeoQueries for SeaOrmCoreStore {
    async fn country_count(&self) -> Result<u64, StoreError> {
        GeoCountryEntity::find().count(&self.db).await.map_err(db_err)
    }

    async fn language_count(&self) -> Result<u64, StoreError> {
        LanguageEntity::find().count(&self.db).await.map_err(db_err)
    }

    async fn all_currencies(&self) -> Result<Vec<Currency>, StoreError> {
        let rows = CurrencyEntity::find()
            .order_by_asc(currency::Column::Code)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl GeoCommands for SeaOrmCoreStore {
    async fn add_country(&self, country: &GeoCountry) -> Result<(), StoreError> {
        GeoCountryEntity::insert(geo_country::ActiveModel::from(country))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn add_zone(&self, zone: &GeoZone) -> Result<(), StoreError> {
        GeoZoneEntity::insert(geo_zone::ActiveModel::from(zone))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn add_language(&self, language: &Language) -> Result<(), StoreError> {
        LanguageEntity::insert(language::ActiveModel::from(language))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn add_currency(&self, currency: &Currency) -> Result<(), StoreError> {
        CurrencyEntity::insert(currency::ActiveModel::from(currency))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

#[async_trait]
impl SiteQueries for SeaOrmCoreStore {
    async fn count(&self) -> Result<u64, StoreError> {
        SiteEntity::find().count(&self.db).await.map_err(db_err)
    }

    async fn fetch_first(&self) -> Result<Option<SiteSettings>, StoreError> {
        let row = SiteEntity::find()
            .order_by_asc(site::Column::CreatedUtc)
            .order_by_asc(site::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(row.map(Into::into))
    }
}

#[async_trait]
impl SiteCommands for SeaOrmCoreStore {
    async fn create(&self, site: &SiteSettings) -> Result<SiteSettings, StoreError> {
        let model = site::ActiveModel::from(site)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.into())
    }
}

#[async_trait]
impl UserQueries for SeaOrmCoreStore {
    async fn fetch_role(
        &self,
        site_id: SiteId,
        role_name: &str,
    ) -> Result<Option<SiteRole>, StoreError> {
        let row = SiteRoleEntity::find()
            .filter(site_role::Column::SiteId.eq(site_id))
            .filter(
                Condition::any()
                    .add(site_role::Column::RoleName.eq(role_name))
                    .add(site_role::Column::NormalizedRoleName.eq(role_name.to_uppercase())),
            )
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(row.map(Into::into))
    }

    async fn roles_for_user(
        &self,
        site_id: SiteId,
        user_id: Uuid,
    ) -> Result<Vec<SiteRole>, StoreError> {
        let role_ids: Vec<Uuid> = UserRoleEntity::find()
            .filter(user_role::Column::SiteId.eq(site_id))
            .filter(user_role::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|m| m.role_id)
            .collect();
        if role_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = SiteRoleEntity::find()
            .filter(site_role::Column::Id.is_in(role_ids))
            .order_by_asc(site_role::Column::RoleName)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl UserCommands for SeaOrmCoreStore {
    async fn create_role(&self, role: &SiteRole) -> Result<SiteRole, StoreError> {
        let model = site_role::ActiveModel::from(role)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.into())
    }

    async fn create_user(&self, user: &SiteUser) -> Result<SiteUser, StoreError> {
        let model = site_user::ActiveModel::from(user)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.into())
    }

    async fn add_user_to_role(
        &self,
        site_id: SiteId,
        role_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), StoreError> {
        let role = SiteRoleEntity::find_by_id(role_id)
            .filter(site_role::Column::SiteId.eq(site_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if role.is_none() {
            return Err(StoreError::not_found("role", role_id));
        }

        let user = SiteUserEntity::find_by_id(user_id)
            .filter(site_user::Column::SiteId.eq(site_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if user.is_none() {
            return Err(StoreError::not_found("user", user_id));
        }

        let membership = UserRole {
            site_id,
            user_id,
            role_id,
        };
        UserRoleEntity::insert(user_role::ActiveModel::from(membership))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

#[async_trait]
impl BasicQueries<SiteRole> for SeaOrmCoreStore {
    async fn count_by_tenant(&self, tenant_id: TenantId) -> Result<u64, StoreError> {
        SiteRoleEntity::find()
            .filter(site_role::Column::SiteId.eq(tenant_id))
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}

#[async_trait]
impl BasicQueries<SiteUser> for SeaOrmCoreStore {
    async fn count_by_tenant(&self, tenant_id: TenantId) -> Result<u64, StoreError> {
        SiteUserEntity::find()
            .filter(site_user::Column::SiteId.eq(tenant_id))
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}
