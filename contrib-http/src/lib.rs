mod client;
mod factory;

pub use client::HttpSettingsService;
pub use factory::HttpServiceFactory;
