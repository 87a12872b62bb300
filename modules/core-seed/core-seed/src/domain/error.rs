use core_seed_sdk::StoreError;
use thiserror::Error;
use uuid::Uuid;

/// Errors that abort a seeding run.
#[derive(Error, Debug)]
pub enum SeedError {
    /// A store call failed; the backend error is passed through untouched.
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("no site is available to own the default roles and administrator")]
    NoActiveSite,

    #[error("tenant {tenant_id} does not own site {site_id}")]
    TenantMismatch { tenant_id: Uuid, site_id: Uuid },

    #[error("failed to hash the initial administrator password: {0}")]
    PasswordHash(String),
}

impl SeedError {
    pub fn password_hash(message: impl Into<String>) -> Self {
        Self::PasswordHash(message.into())
    }
}
