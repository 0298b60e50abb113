use std::collections::BTreeMap;

use async_trait::async_trait;

use super::settings_service::{ServiceError, SettingsService};

/// Which settings backend to open, and how to reach it.
///
/// `connection_string` is a database path (or `:memory:`) for `sqlite` and a
/// base URL for `http`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub backend: String,
    pub connection_string: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: ":memory:".to_string(),
        }
    }
}

/// Opens a [`SettingsService`] for one named backend.
#[async_trait]
pub trait ServiceFactory: Send + Sync {
    fn backend_name(&self) -> &'static str;

    async fn create(
        &self,
        config: &ServiceConfig,
    ) -> Result<Box<dyn SettingsService>, ServiceError>;
}

/// Settings backends known to the binary, keyed by name.
#[derive(Default)]
pub struct ServiceRegistry {
    factories: BTreeMap<&'static str, Box<dyn ServiceFactory>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `factory`; a later factory with the same name wins.
    pub fn register(
        &mut self,
        factory: Box<dyn ServiceFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    pub fn available_backends(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    /// Opens the backend named by `config.backend`.
    ///
    /// Unknown names fail with [`ServiceError::Configuration`] listing what is
    /// registered; factory failures pass through unchanged.
    pub async fn create(
        &self,
        config: &ServiceConfig,
    ) -> Result<Box<dyn SettingsService>, ServiceError> {
        let Some(factory) = self.factories.get(config.backend.as_str()) else {
            return Err(ServiceError::Configuration(format!(
                "unknown backend '{}'; available: {}",
                config.backend,
                self.available_backends().join(", ")
            )));
        };
        factory.create(config).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{ContributionSettings, EmployeeSummary};

    /// Answers every call with one fixed election.
    struct FixedService(ContributionSettings);

    #[async_trait]
    impl SettingsService for FixedService {
        async fn fetch_summary(&self) -> Result<EmployeeSummary, ServiceError> {
            Err(ServiceError::Storage("no profile".to_string()))
        }

        async fn fetch_settings(&self) -> Result<ContributionSettings, ServiceError> {
            Ok(self.0)
        }

        async fn submit_settings(
            &self,
            _settings: &ContributionSettings,
        ) -> Result<ContributionSettings, ServiceError> {
            Ok(self.0)
        }
    }

    /// Records the connection strings it was opened with.
    struct RecordingFactory {
        name: &'static str,
        opened: Arc<Mutex<Vec<String>>>,
        settings: ContributionSettings,
    }

    #[async_trait]
    impl ServiceFactory for RecordingFactory {
        fn backend_name(&self) -> &'static str {
            self.name
        }

        async fn create(
            &self,
            config: &ServiceConfig,
        ) -> Result<Box<dyn SettingsService>, ServiceError> {
            if config.connection_string.is_empty() {
                return Err(ServiceError::Connection("empty connection string".to_string()));
            }
            self.opened.lock().unwrap().push(config.connection_string.clone());
            Ok(Box::new(FixedService(self.settings)))
        }
    }

    fn registry_with(
        backends: &[(&'static str, ContributionSettings)],
    ) -> (ServiceRegistry, Arc<Mutex<Vec<String>>>) {
        let opened = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ServiceRegistry::new();
        for &(name, settings) in backends {
            registry.register(Box::new(RecordingFactory {
                name,
                opened: opened.clone(),
                settings,
            }));
        }
        (registry, opened)
    }

    fn config(
        backend: &str,
        connection_string: &str,
    ) -> ServiceConfig {
        ServiceConfig {
            backend: backend.to_string(),
            connection_string: connection_string.to_string(),
        }
    }

    #[test]
    fn default_config_opens_in_memory_sqlite() {
        assert_eq!(ServiceConfig::default(), config("sqlite", ":memory:"));
    }

    #[test]
    fn backends_are_listed_by_name() {
        let (registry, _) = registry_with(&[
            ("sqlite", ContributionSettings::percent(dec!(7))),
            ("http", ContributionSettings::percent(dec!(7))),
        ]);

        assert_eq!(registry.available_backends(), vec!["http", "sqlite"]);
    }

    #[tokio::test]
    async fn create_forwards_connection_string_to_named_backend() {
        let (registry, opened) = registry_with(&[
            ("sqlite", ContributionSettings::percent(dec!(7))),
            ("http", ContributionSettings::dollar(dec!(200))),
        ]);

        let service = registry
            .create(&config("http", "http://127.0.0.1:8000"))
            .await
            .unwrap();

        assert_eq!(*opened.lock().unwrap(), vec!["http://127.0.0.1:8000".to_string()]);
        assert_eq!(
            service.fetch_settings().await.unwrap(),
            ContributionSettings::dollar(dec!(200))
        );
    }

    #[tokio::test]
    async fn later_registration_replaces_earlier_one() {
        let (mut registry, opened) =
            registry_with(&[("sqlite", ContributionSettings::percent(dec!(7)))]);
        registry.register(Box::new(RecordingFactory {
            name: "sqlite",
            opened,
            settings: ContributionSettings::percent(dec!(12)),
        }));

        let service = registry.create(&config("sqlite", "plan.db")).await.unwrap();

        assert_eq!(registry.available_backends(), vec!["sqlite"]);
        assert_eq!(
            service.fetch_settings().await.unwrap(),
            ContributionSettings::percent(dec!(12))
        );
    }

    #[tokio::test]
    async fn unknown_backend_lists_registered_ones() {
        let (registry, opened) = registry_with(&[
            ("sqlite", ContributionSettings::percent(dec!(7))),
            ("http", ContributionSettings::percent(dec!(7))),
        ]);

        let error = registry.create(&config("grpc", "x")).await.err().unwrap();

        assert_eq!(
            error,
            ServiceError::Configuration("unknown backend 'grpc'; available: http, sqlite".to_string())
        );
        assert!(opened.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn factory_errors_pass_through() {
        let (registry, _) = registry_with(&[("sqlite", ContributionSettings::percent(dec!(7)))]);

        let error = registry.create(&config("sqlite", "")).await.err().unwrap();

        assert_eq!(
            error,
            ServiceError::Connection("empty connection string".to_string())
        );
    }
}
