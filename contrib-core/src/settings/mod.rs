//! Pending and committed contribution settings.

mod change;
mod model;

pub use change::{DIRTY_TOLERANCE, is_dirty};
pub use model::{SettingsModel, SettingsSnapshot, ValueInput, parse_contribution_value};
