//! Core Seed Module
//!
//! Ensures a fresh store contains geography reference data (countries, zones,
//! languages, currencies) plus a first site, its default roles and an
//! administrator. Every step is guarded by an existence check, so running it
//! against an already seeded store is a no-op.
//!
//! ## Public API
//!
//! Store traits and models live in the `core-seed-sdk` crate and are re-exported here.
//! The startup entry point is [`bootstrap::initialize_data`].
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// === PUBLIC API (from SDK) ===
pub use core_seed_sdk::{
    BasicQueries, CoreStore, GeoCommands, GeoQueries, SiteCommands, SiteQueries, StoreError,
    TenantResolver, UserCommands, UserQueries,
};

pub mod bootstrap;
pub mod config;

pub use config::CoreSeedConfig;
pub use domain::error::SeedError;
pub use domain::seeder::{SeedReport, SeedRunner, SeedStores};

// === INTERNAL MODULES ===
// Exposed for integration tests; depend on the re-exports above instead.
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
