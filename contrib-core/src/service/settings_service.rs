use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ContributionSettings, EmployeeSummary, SummaryError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status; `message` is the
    /// response body and may be empty.
    #[error("Service returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The service refused the submitted settings.
    #[error("{0}")]
    Rejected(String),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid employee summary: {0}")]
    InvalidSummary(#[from] SummaryError),
}

/// The authority that stores contribution settings.
///
/// `submit_settings` returns the value actually persisted, which may differ
/// from what was submitted.
#[async_trait]
pub trait SettingsService: Send + Sync {
    async fn fetch_summary(&self) -> Result<EmployeeSummary, ServiceError>;

    /// The election on file, without the rest of the summary.
    async fn fetch_settings(&self) -> Result<ContributionSettings, ServiceError>;

    async fn submit_settings(
        &self,
        settings: &ContributionSettings,
    ) -> Result<ContributionSettings, ServiceError>;
}
