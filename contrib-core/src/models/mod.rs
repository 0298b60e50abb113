mod contribution_settings;
mod contribution_type;
mod employee_summary;

pub use contribution_settings::{
    ContributionSettings, MAX_DOLLAR_CONTRIBUTION, MAX_PERCENT_CONTRIBUTION, SettingsError,
};
pub use contribution_type::ContributionType;
pub use employee_summary::{EmployeeSummary, SummaryError};
