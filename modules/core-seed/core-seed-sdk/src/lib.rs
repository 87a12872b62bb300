//! Core Seed SDK
//!
//! This crate provides the public contract of the `core-seed` module:
//!
//! - [`models`] - Site, role, user and geography records
//! - [`api`] - Store traits the seeding workflow consumes ([`GeoQueries`], [`SiteCommands`], ...)
//! - [`StoreError`] - Error type shared by every store implementation
//!
//! ## Usage
//!
//! A storage backend implements every store trait once and is then fanned out
//! into the individual trait objects:
//!
//! ```ignore
//! use core_seed_sdk::{CoreStore, GeoQueries};
//!
//! let store: Arc<MyStore> = Arc::new(MyStore::open(path).await?);
//! let geo: Arc<dyn GeoQueries> = store.clone();
//! let countries = geo.country_count().await?;
//! ```

pub mod api;
pub mod error;
pub mod models;

// Re-export main types at crate root
pub use api::{
    BasicQueries, CoreStore, GeoCommands, GeoQueries, SiteCommands, SiteQueries, TenantResolver,
    UserCommands, UserQueries,
};
pub use error::StoreError;
pub use models::{
    Currency, GeoCountry, GeoZone, Language, SiteId, SiteRole, SiteSettings, SiteUser, TenantId,
    UserRole,
};
