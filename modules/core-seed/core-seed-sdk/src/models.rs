//! Public models for the core-seed module.
//!
//! These are transport-agnostic records shared by the seeding workflow and the
//! storage backends. They carry serde derives so document-oriented backends can
//! persist them as-is.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Identifier of a site (the tenant root entity).
pub type SiteId = Uuid;

/// Identifier of the isolation scope a query applies to.
///
/// Roles and users are scoped by the id of the site that owns them.
pub type TenantId = Uuid;

/// Country reference record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoCountry {
    pub id: Uuid,
    pub name: String,
    /// ISO 3166-1 alpha-2 code.
    pub iso_code2: String,
    /// ISO 3166-1 alpha-3 code.
    pub iso_code3: String,
}

/// State, province or territory.
///
/// Linked to its country by ISO alpha-2 code only; no foreign key is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoZone {
    pub id: Uuid,
    pub country_code: String,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub sort_rank: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub id: Uuid,
    /// ISO 4217 code.
    pub code: String,
    pub name: String,
    pub symbol: String,
}

/// Site (tenant root) settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub id: SiteId,
    pub alias_id: String,
    pub site_name: String,
    pub theme: String,
    pub is_server_admin_site: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_utc: OffsetDateTime,
}

/// Role owned by exactly one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRole {
    pub id: Uuid,
    pub site_id: SiteId,
    pub role_name: String,
    pub normalized_role_name: String,
}

impl SiteRole {
    /// Whether `name` refers to this role, either verbatim or by its normalized form.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        self.role_name == name || self.normalized_role_name == name.to_uppercase()
    }
}

/// User owned by exactly one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteUser {
    pub id: Uuid,
    pub site_id: SiteId,
    pub email: String,
    pub normalized_email: String,
    pub user_name: String,
    pub normalized_user_name: String,
    pub display_name: String,
    /// PHC-formatted password hash.
    pub password_hash: String,
    pub must_change_password: bool,
    pub account_approved: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_utc: OffsetDateTime,
}

/// Membership of a user in a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRole {
    pub site_id: SiteId,
    pub user_id: Uuid,
    pub role_id: Uuid,
}
