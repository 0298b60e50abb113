use async_trait::async_trait;

use contrib_core::service::{ServiceConfig, ServiceFactory};
use contrib_core::{ServiceError, SettingsService};

use crate::HttpSettingsService;

/// [`ServiceFactory`] for the `"http"` backend.
///
/// The connection string is the service base URL, e.g. `http://127.0.0.1:8000`.
pub struct HttpServiceFactory;

#[async_trait]
impl ServiceFactory for HttpServiceFactory {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    async fn create(
        &self,
        config: &ServiceConfig,
    ) -> Result<Box<dyn SettingsService>, ServiceError> {
        let base_url = config.connection_string.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ServiceError::Configuration(format!(
                "http backend needs an http(s) base URL, got '{base_url}'"
            )));
        }
        Ok(Box::new(HttpSettingsService::new(base_url)))
    }
}
