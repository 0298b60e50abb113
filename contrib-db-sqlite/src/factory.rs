use std::path::Path;

use async_trait::async_trait;

use contrib_core::service::{ServiceConfig, ServiceFactory};
use contrib_core::{ServiceError, SettingsService};

use crate::store::SqliteSettingsStore;

/// Demo profile and default election, compiled into the binary.
pub const DEFAULT_SEED: &str = include_str!("../seeds/001_default_plan.sql");

/// Overrides the embedded seed with every `.sql` file in this directory.
pub const SEEDS_DIR_ENV: &str = "CONTRIB_DB_SQLITE_SEEDS_DIR";

/// [`ServiceFactory`] for the `"sqlite"` backend.
///
/// ```rust,no_run
/// use contrib_core::service::ServiceRegistry;
/// use contrib_db_sqlite::SqliteServiceFactory;
///
/// let mut registry = ServiceRegistry::new();
/// registry.register(Box::new(SqliteServiceFactory));
/// ```
pub struct SqliteServiceFactory;

#[async_trait]
impl ServiceFactory for SqliteServiceFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database named by `config.connection_string` (a file path or
    /// `:memory:`), run migrations, then apply [`DEFAULT_SEED`] or the
    /// directory named by [`SEEDS_DIR_ENV`]. Seeds only insert missing rows,
    /// so an existing election survives a restart.
    async fn create(
        &self,
        config: &ServiceConfig,
    ) -> Result<Box<dyn SettingsService>, ServiceError> {
        let store = SqliteSettingsStore::new(&config.connection_string).await?;
        store.run_migrations().await?;
        let seeded = match std::env::var_os(SEEDS_DIR_ENV) {
            Some(dir) => store.run_seeds(Path::new(&dir)).await,
            None => store.run_seed("default plan", DEFAULT_SEED).await,
        };
        seeded.map_err(|e| ServiceError::Storage(format!("{e:#}")))?;
        Ok(Box::new(store))
    }
}
