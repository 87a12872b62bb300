//! Core tables: geography reference data, sites, roles, users and memberships.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GeoCountries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GeoCountries::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GeoCountries::Name).string().not_null())
                    .col(
                        ColumnDef::new(GeoCountries::IsoCode2)
                            .string_len(2)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(GeoCountries::IsoCode3)
                            .string_len(3)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GeoZones::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GeoZones::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(GeoZones::CountryCode).string_len(2).not_null())
                    .col(ColumnDef::new(GeoZones::Code).string().not_null())
                    .col(ColumnDef::new(GeoZones::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_geo_zones_country_code")
                    .table(GeoZones::Table)
                    .col(GeoZones::CountryCode)
                    .col(GeoZones::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Languages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Languages::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Languages::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Languages::Name).string().not_null())
                    .col(ColumnDef::new(Languages::SortRank).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Currencies::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Currencies::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Currencies::Code)
                            .string_len(3)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Currencies::Name).string().not_null())
                    .col(ColumnDef::new(Currencies::Symbol).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Sites::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Sites::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Sites::AliasId).string().not_null())
                    .col(ColumnDef::new(Sites::SiteName).string().not_null())
                    .col(ColumnDef::new(Sites::Theme).string().not_null())
                    .col(
                        ColumnDef::new(Sites::IsServerAdminSite)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Sites::CreatedUtc)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SiteRoles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SiteRoles::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(SiteRoles::SiteId).uuid().not_null())
                    .col(ColumnDef::new(SiteRoles::RoleName).string().not_null())
                    .col(
                        ColumnDef::new(SiteRoles::NormalizedRoleName)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_site_roles_site")
                            .from(SiteRoles::Table, SiteRoles::SiteId)
                            .to(Sites::Table, Sites::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_site_roles_site_normalized_name")
                    .table(SiteRoles::Table)
                    .col(SiteRoles::SiteId)
                    .col(SiteRoles::NormalizedRoleName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SiteUsers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SiteUsers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(SiteUsers::SiteId).uuid().not_null())
                    .col(ColumnDef::new(SiteUsers::Email).string().not_null())
                    .col(ColumnDef::new(SiteUsers::NormalizedEmail).string().not_null())
                    .col(ColumnDef::new(SiteUsers::UserName).string().not_null())
                    .col(
                        ColumnDef::new(SiteUsers::NormalizedUserName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SiteUsers::DisplayName).string().not_null())
                    .col(ColumnDef::new(SiteUsers::PasswordHash).text().not_null())
                    .col(
                        ColumnDef::new(SiteUsers::MustChangePassword)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SiteUsers::AccountApproved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SiteUsers::CreatedUtc)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_site_users_site")
                            .from(SiteUsers::Table, SiteUsers::SiteId)
                            .to(Sites::Table, Sites::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_site_users_site_normalized_email")
                    .table(SiteUsers::Table)
                    .col(SiteUsers::SiteId)
                    .col(SiteUsers::NormalizedEmail)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserRoles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserRoles::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserRoles::RoleId).uuid().not_null())
                    .col(ColumnDef::new(UserRoles::SiteId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(UserRoles::UserId)
                            .col(UserRoles::RoleId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_roles_user")
                            .from(UserRoles::Table, UserRoles::UserId)
                            .to(SiteUsers::Table, SiteUsers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_roles_role")
                            .from(UserRoles::Table, UserRoles::RoleId)
                            .to(SiteRoles::Table, SiteRoles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_roles_site")
                    .table(UserRoles::Table)
                    .col(UserRoles::SiteId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserRoles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SiteUsers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SiteRoles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sites::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Currencies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Languages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GeoZones::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GeoCountries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GeoCountries {
    Table,
    Id,
    Name,
    #[sea_orm(iden = "iso_code2")]
    IsoCode2,
    #[sea_orm(iden = "iso_code3")]
    IsoCode3,
}

#[derive(DeriveIden)]
enum GeoZones {
    Table,
    Id,
    CountryCode,
    Code,
    Name,
}

#[derive(DeriveIden)]
enum Languages {
    Table,
    Id,
    Code,
    Name,
    SortRank,
}

#[derive(DeriveIden)]
enum Currencies {
    Table,
    Id,
    Code,
    Name,
    Symbol,
}

#[derive(DeriveIden)]
enum Sites {
    Table,
    Id,
    AliasId,
    SiteName,
    Theme,
    IsServerAdminSite,
    CreatedUtc,
}

#[derive(DeriveIden)]
enum SiteRoles {
    Table,
    Id,
    SiteId,
    RoleName,
    NormalizedRoleName,
}

#[derive(DeriveIden)]
enum SiteUsers {
    Table,
    Id,
    SiteId,
    Email,
    NormalizedEmail,
    UserName,
    NormalizedUserName,
    DisplayName,
    PasswordHash,
    MustChangePassword,
    AccountApproved,
    CreatedUtc,
}

#[derive(DeriveIden)]
enum UserRoles {
    Table,
    SiteId,
    UserId,
    RoleId,
}
