use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ContributionType;

/// Upper bound for a percentage-of-salary contribution.
pub const MAX_PERCENT_CONTRIBUTION: Decimal = dec!(75);

/// Upper bound accepted by the per-paycheck dollar input.
pub const MAX_DOLLAR_CONTRIBUTION: Decimal = dec!(10000);

/// Reasons a settings authority refuses a submitted contribution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Percent contributions must be between 0 and 75.")]
    PercentOutOfRange(Decimal),

    #[error("Dollar contributions must be positive.")]
    NegativeDollar(Decimal),
}

/// A contribution election: the mode plus the amount in that mode's units.
///
/// Serialized with the camelCase field names used by the settings service,
/// with the value as a JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionSettings {
    pub contribution_type: ContributionType,
    #[serde(with = "rust_decimal::serde::float")]
    pub contribution_value: Decimal,
}

impl ContributionSettings {
    pub fn new(
        contribution_type: ContributionType,
        contribution_value: Decimal,
    ) -> Self {
        Self {
            contribution_type,
            contribution_value,
        }
    }

    pub fn percent(value: Decimal) -> Self {
        Self::new(ContributionType::Percent, value)
    }

    pub fn dollar(value: Decimal) -> Self {
        Self::new(ContributionType::Dollar, value)
    }

    /// Checks the value against the rules the settings authority enforces
    /// before persisting.
    ///
    /// Dollar amounts above [`MAX_DOLLAR_CONTRIBUTION`] are an input-surface
    /// bound only and are accepted here.
    pub fn validate(&self) -> Result<(), SettingsError> {
        match self.contribution_type {
            ContributionType::Percent
                if self.contribution_value < Decimal::ZERO
                    || self.contribution_value > MAX_PERCENT_CONTRIBUTION =>
            {
                Err(SettingsError::PercentOutOfRange(self.contribution_value))
            }
            ContributionType::Dollar if self.contribution_value < Decimal::ZERO => {
                Err(SettingsError::NegativeDollar(self.contribution_value))
            }
            _ => Ok(()),
        }
    }
}
