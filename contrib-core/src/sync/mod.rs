//! Load and save round trips against the settings service.

mod controller;
mod session;
mod status;

pub use controller::{SyncController, SyncError, SyncState};
pub use session::{PlanSession, SessionView};
pub use status::{MessageKind, StatusMessage};
