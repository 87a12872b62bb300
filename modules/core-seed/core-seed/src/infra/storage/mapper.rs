//! Entity to domain model mappers.

use core_seed_sdk::{
    Currency, GeoCountry, GeoZone, Language, SiteRole, SiteSettings, SiteUser, UserRole,
};
use sea_orm::ActiveValue::Set;

use super::entity::{
    currency, geo_country, geo_zone, language, site, site_role, site_user, user_role,
};

impl From<geo_country::Model> for GeoCountry {
    fn from(model: geo_country::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            iso_code2: model.iso_code2,
            iso_code3: model.iso_code3,
        }
    }
}

impl From<&GeoCountry> for geo_country::ActiveModel {
    fn from(country: &GeoCountry) -> Self {
        Self {
            id: Set(country.id),
            name: Set(country.name.clone()),
            iso_code2: Set(country.iso_code2.clone()),
            iso_code3: Set(country.iso_code3.clone()),
        }
    }
}

impl From<geo_zone::Model> for GeoZone {
    fn from(model: geo_zone::Model) -> Self {
        Self {
            id: model.id,
            country_code: model.country_code,
            code: model.code,
            name: model.name,
        }
    }
}

impl From<&GeoZone> for geo_zone::ActiveModel {
    fn from(zone: &GeoZone) -> Self {
        Self {
            id: Set(zone.id),
            country_code: Set(zone.country_code.clone()),
            code: Set(zone.code.clone()),
            name: Set(zone.name.clone()),
        }
    }
}

impl From<language::Model> for Language {
    fn from(model: language::Model) -> Self {
        Self {
            id: model.id,
            code: model.code,
            name: model.name,
            sort_rank: model.sort_rank,
        }
    }
}

impl From<&Language> for language::ActiveModel {
    fn from(language: &Language) -> Self {
        Self {
            id: Set(language.id),
            code: Set(language.code.clone()),
            name: Set(language.name.clone()),
            sort_rank: Set(language.sort_rank),
        }
    }
}

impl From<currency::Model> for Currency {
    fn from(model: currency::Model) -> Self {
        Self {
            id: model.id,
            code: model.code,
            name: model.name,
            symbol: model.symbol,
        }
    }
}

impl From<&Currency> for currency::ActiveModel {
    fn from(currency: &Currency) -> Self {
        Self {
            id: Set(currency.id),
            code: Set(currency.code.clone()),
            name: Set(currency.name.clone()),
            symbol: Set(currency.symbol.clone()),
        }
    }
}

impl From<site::Model> for SiteSettings {
    fn from(model: site::Model) -> Self {
        Self {
            id: model.id,
            alias_id: model.alias_id,
            site_name: model.site_name,
            theme: model.theme,
            is_server_admin_site: model.is_server_admin_site,
            created_utc: model.created_utc,
        }
    }
}

impl From<&SiteSettings> for site::ActiveModel {
    fn from(site: &SiteSettings) -> Self {
        Self {
            id: Set(site.id),
            alias_id: Set(site.alias_id.clone()),
            site_name: Set(site.site_name.clone()),
            theme: Set(site.theme.clone()),
            is_server_admin_site: Set(site.is_server_admin_site),
            created_utc: Set(site.created_utc),
        }
    }
}

impl From<site_role::Model> for SiteRole {
    fn from(model: site_role::Model) -> Self {
        Self {
            id: model.id,
            site_id: model.site_id,
            role_name: model.role_name,
            normalized_role_name: model.normalized_role_name,
        }
    }
}

impl From<&SiteRole> for site_role::ActiveModel {
    fn from(role: &SiteRole) -> Self {
        Self {
            id: Set(role.id),
            site_id: Set(role.site_id),
            role_name: Set(role.role_name.clone()),
            normalized_role_name: Set(role.normalized_role_name.clone()),
        }
    }
}

impl From<site_user::Model> for SiteUser {
    fn from(model: site_user::Model) -> Self {
        Self {
            id: model.id,
            site_id: model.site_id,
            email: model.email,
            normalized_email: model.normalized_email,
            user_name: model.user_name,
            normalized_user_name: model.normalized_user_name,
            display_name: model.display_name,
            password_hash: model.password_hash,
            must_change_password: model.must_change_password,
            account_approved: model.account_approved,
            created_utc: model.created_utc,
        }
    }
}

impl From<&SiteUser> for site_user::ActiveModel {
    fn from(user: &SiteUser) -> Self {
        Self {
            id: Set(user.id),
            site_id: Set(user.site_id),
            email: Set(user.email.clone()),
            normalized_email: Set(user.normalized_email.clone()),
            user_name: Set(user.user_name.clone()),
            normalized_user_name: Set(user.normalized_user_name.clone()),
            display_name: Set(user.display_name.clone()),
            password_hash: Set(user.password_hash.clone()),
            must_change_password: Set(user.must_change_password),
            account_approved: Set(user.account_approved),
            created_utc: Set(user.created_utc),
        }
    }
}

impl From<user_role::Model> for UserRole {
    fn from(model: user_role::Model) -> Self {
        Self {
            site_id: model.site_id,
            user_id: model.user_id,
            role_id: model.role_id,
        }
    }
}

impl From<UserRole> for user_role::ActiveModel {
    fn from(membership: UserRole) -> Self {
        Self {
            user_id: Set(membership.user_id),
            role_id: Set(membership.role_id),
            site_id: Set(membership.site_id),
        }
    }
}
