pub mod calculations;
pub mod models;
pub mod service;
pub mod settings;
pub mod sync;

pub use calculations::{ImpactCalculator, ImpactError, ImpactResult, Projection};
pub use models::*;
pub use service::{ServiceError, SettingsService};
pub use settings::{SettingsModel, SettingsSnapshot, ValueInput, is_dirty};
pub use sync::{MessageKind, PlanSession, SessionView, StatusMessage, SyncController, SyncError, SyncState};
