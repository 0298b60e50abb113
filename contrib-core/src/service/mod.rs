pub mod factory;
pub mod settings_service;

pub use factory::{ServiceConfig, ServiceFactory, ServiceRegistry};
pub use settings_service::{ServiceError, SettingsService};
