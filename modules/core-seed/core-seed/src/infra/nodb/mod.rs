//! File-system document backend.
//!
//! Every record is a pretty-printed JSON file at
//! `<root>/<project>/<collection>/<key>.json`. Reference data and sites live in
//! the `default` project; roles, users and memberships live in the project
//! named after the owning site id, so a tenant-scoped count is a directory
//! listing. A missing directory is an empty collection.

mod store;

pub use store::{DEFAULT_PROJECT, NoDbCoreStore};
