use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::ContributionSettings;

/// Largest value difference still treated as "unchanged".
///
/// Absorbs display rounding only; any meaningful edit exceeds it.
pub const DIRTY_TOLERANCE: Decimal = dec!(0.01);

/// Whether `current` differs from `saved` enough to need saving.
pub fn is_dirty(
    current: &ContributionSettings,
    saved: &ContributionSettings,
) -> bool {
    current.contribution_type != saved.contribution_type
        || (current.contribution_value - saved.contribution_value).abs() > DIRTY_TOLERANCE
}
