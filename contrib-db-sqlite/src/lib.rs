//! SQLite-backed settings authority.
//!
//! Stores one employee profile and the contribution election on file, and
//! enforces the same submission rules as the remote settings service.

mod factory;
mod store;

pub use factory::{DEFAULT_SEED, SEEDS_DIR_ENV, SqliteServiceFactory};
pub use store::SqliteSettingsStore;
