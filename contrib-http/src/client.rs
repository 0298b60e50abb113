use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::debug;

use contrib_core::{ContributionSettings, EmployeeSummary, ServiceError, SettingsService};

const SUMMARY_PATH: &str = "api/summary";
const SETTINGS_PATH: &str = "api/settings";

/// [`SettingsService`] talking to the remote settings service over HTTP.
///
/// * `GET  {base}/api/summary`  → employee summary with the persisted settings
/// * `GET  {base}/api/settings` → persisted settings only
/// * `POST {base}/api/settings` → persisted settings echoed back
pub struct HttpSettingsService {
    client: Client,
    base_url: String,
}

impl HttpSettingsService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(
        &self,
        path: &str,
    ) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Turns a non-2xx response into [`ServiceError::Status`] carrying the body text.
async fn check_status(response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(ServiceError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
    let body = response
        .text()
        .await
        .map_err(|e| ServiceError::Transport(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| ServiceError::Decode(e.to_string()))
}

#[async_trait]
impl SettingsService for HttpSettingsService {
    async fn fetch_summary(&self) -> Result<EmployeeSummary, ServiceError> {
        let url = self.endpoint(SUMMARY_PATH);
        debug!(%url, "fetching employee summary");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        read_json(check_status(response).await?).await
    }

    async fn fetch_settings(&self) -> Result<ContributionSettings, ServiceError> {
        let url = self.endpoint(SETTINGS_PATH);
        debug!(%url, "fetching contribution settings");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        read_json(check_status(response).await?).await
    }

    async fn submit_settings(
        &self,
        settings: &ContributionSettings,
    ) -> Result<ContributionSettings, ServiceError> {
        let url = self.endpoint(SETTINGS_PATH);
        debug!(%url, ?settings, "submitting contribution settings");
        let response = self
            .client
            .post(&url)
            .json(settings)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        read_json(check_status(response).await?).await
    }
}
