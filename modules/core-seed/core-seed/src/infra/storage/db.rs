//! Database error conversion helpers.

use core_seed_sdk::StoreError;
use sea_orm::{DbErr, SqlErr};

/// Convert a `SeaORM` error into a `StoreError`, keeping it as the source.
///
/// Unique constraint violations become [`StoreError::Conflict`].
pub fn db_err(e: DbErr) -> StoreError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => StoreError::conflict(message),
        _ => StoreError::backend(e),
    }
}
