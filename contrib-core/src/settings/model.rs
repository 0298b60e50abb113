use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::is_dirty;
use crate::{
    ContributionSettings, ContributionType, EmployeeSummary, ImpactCalculator, ImpactError,
    ImpactResult, MAX_PERCENT_CONTRIBUTION,
};

/// Outcome of parsing a raw contribution value typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueInput {
    Parsed(Decimal),
    /// The input was not a finite number and was discarded.
    Ignored,
}

/// Parses user input into a contribution value.
///
/// Surrounding whitespace, a leading `$`, a trailing `%` and comma thousands
/// separators are accepted. Anything else that is not a plain decimal number
/// (including `NaN` and `inf`) yields [`ValueInput::Ignored`].
pub fn parse_contribution_value(raw: &str) -> ValueInput {
    let normalized = raw
        .trim()
        .trim_start_matches('$')
        .trim_end_matches('%')
        .trim()
        .replace(',', "");
    if normalized.is_empty() {
        return ValueInput::Ignored;
    }
    match normalized.parse::<Decimal>() {
        Ok(value) => ValueInput::Parsed(value),
        Err(_) => ValueInput::Ignored,
    }
}

/// Read-only view of both settings values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsSnapshot {
    pub current: ContributionSettings,
    pub saved: ContributionSettings,
}

impl SettingsSnapshot {
    pub fn is_dirty(&self) -> bool {
        is_dirty(&self.current, &self.saved)
    }

    pub fn impact(
        &self,
        summary: &EmployeeSummary,
    ) -> Result<ImpactResult, ImpactError> {
        ImpactCalculator::new(summary).impact(&self.current, &self.saved)
    }
}

/// Sole owner of the pending (`current`) and committed (`saved`) settings.
///
/// `current` follows user edits; `saved` only changes through [`commit`].
///
/// [`commit`]: SettingsModel::commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsModel {
    current: ContributionSettings,
    saved: ContributionSettings,
}

impl SettingsModel {
    /// Starts clean: both values equal the authoritative `settings`.
    pub fn new(settings: ContributionSettings) -> Self {
        Self {
            current: settings,
            saved: settings,
        }
    }

    /// Switches the pending contribution mode.
    ///
    /// Moving to percent caps the value at [`MAX_PERCENT_CONTRIBUTION`];
    /// moving to dollar keeps the value as is.
    pub fn set_type(
        &mut self,
        contribution_type: ContributionType,
    ) {
        self.current.contribution_type = contribution_type;
        if contribution_type == ContributionType::Percent
            && self.current.contribution_value > MAX_PERCENT_CONTRIBUTION
        {
            debug!(
                from = %self.current.contribution_value,
                to = %MAX_PERCENT_CONTRIBUTION,
                "clamping contribution value on switch to percent"
            );
            self.current.contribution_value = MAX_PERCENT_CONTRIBUTION;
        }
    }

    /// Applies raw user input to the pending value.
    ///
    /// Unparseable input leaves the model untouched and is reported back as
    /// [`ValueInput::Ignored`].
    pub fn set_value(
        &mut self,
        raw: &str,
    ) -> ValueInput {
        let input = parse_contribution_value(raw);
        match input {
            ValueInput::Parsed(value) => self.current.contribution_value = value,
            ValueInput::Ignored => warn!(input = %raw, "ignoring non-numeric contribution value"),
        }
        input
    }

    /// Accepts an authoritative value: both pending and committed become `settings`.
    pub fn commit(
        &mut self,
        settings: ContributionSettings,
    ) {
        self.saved = settings;
        self.current = settings;
    }

    pub fn snapshot(&self) -> SettingsSnapshot {
        SettingsSnapshot {
            current: self.current,
            saved: self.saved,
        }
    }

    pub fn current(&self) -> &ContributionSettings {
        &self.current
    }

    pub fn saved(&self) -> &ContributionSettings {
        &self.saved
    }

    pub fn is_dirty(&self) -> bool {
        is_dirty(&self.current, &self.saved)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // parse_contribution_value tests
    // =========================================================================

    #[test]
    fn parse_accepts_plain_numbers() {
        assert_eq!(parse_contribution_value("12.5"), ValueInput::Parsed(dec!(12.5)));
        assert_eq!(parse_contribution_value("  8 "), ValueInput::Parsed(dec!(8)));
    }

    #[test]
    fn parse_accepts_currency_and_percent_decorations() {
        assert_eq!(parse_contribution_value("$1,250.00"), ValueInput::Parsed(dec!(1250)));
        assert_eq!(parse_contribution_value("10%"), ValueInput::Parsed(dec!(10)));
    }

    #[test]
    fn parse_ignores_non_numeric_input() {
        assert_eq!(parse_contribution_value("abc"), ValueInput::Ignored);
        assert_eq!(parse_contribution_value(""), ValueInput::Ignored);
        assert_eq!(parse_contribution_value("NaN"), ValueInput::Ignored);
        assert_eq!(parse_contribution_value("inf"), ValueInput::Ignored);
        assert_eq!(parse_contribution_value("12abc"), ValueInput::Ignored);
    }

    // =========================================================================
    // set_type tests
    // =========================================================================

    #[test]
    fn set_type_percent_clamps_value_above_limit() {
        let mut model = SettingsModel::new(ContributionSettings::dollar(dec!(90)));

        model.set_type(ContributionType::Percent);

        assert_eq!(model.current(), &ContributionSettings::percent(dec!(75)));
    }

    #[test]
    fn set_type_percent_keeps_value_within_limit() {
        let mut model = SettingsModel::new(ContributionSettings::dollar(dec!(40)));

        model.set_type(ContributionType::Percent);

        assert_eq!(model.current(), &ContributionSettings::percent(dec!(40)));
    }

    #[test]
    fn set_type_dollar_never_reduces_value() {
        let mut model = SettingsModel::new(ContributionSettings::percent(dec!(75)));
        model.set_value("9500");

        model.set_type(ContributionType::Dollar);

        assert_eq!(model.current(), &ContributionSettings::dollar(dec!(9500)));
    }

    #[test]
    fn set_type_leaves_saved_untouched() {
        let mut model = SettingsModel::new(ContributionSettings::dollar(dec!(90)));

        model.set_type(ContributionType::Percent);

        assert_eq!(model.saved(), &ContributionSettings::dollar(dec!(90)));
        assert!(model.is_dirty());
    }

    // =========================================================================
    // set_value tests
    // =========================================================================

    #[test]
    fn set_value_updates_current_only() {
        let mut model = SettingsModel::new(ContributionSettings::percent(dec!(7)));

        let input = model.set_value("10");

        assert_eq!(input, ValueInput::Parsed(dec!(10)));
        assert_eq!(model.current(), &ContributionSettings::percent(dec!(10)));
        assert_eq!(model.saved(), &ContributionSettings::percent(dec!(7)));
    }

    #[test]
    fn set_value_with_invalid_input_is_a_no_op() {
        let mut model = SettingsModel::new(ContributionSettings::percent(dec!(7)));
        model.set_value("9");
        let before = model.clone();

        let input = model.set_value("abc");

        assert_eq!(input, ValueInput::Ignored);
        assert_eq!(model, before);
    }

    // =========================================================================
    // commit tests
    // =========================================================================

    #[test]
    fn commit_overwrites_pending_value_and_clears_dirty() {
        let mut model = SettingsModel::new(ContributionSettings::percent(dec!(7)));
        model.set_value("80");
        let echo = ContributionSettings::percent(dec!(75));

        model.commit(echo);

        assert!(!model.is_dirty());
        assert_eq!(model.current(), &echo);
        assert_eq!(model.saved(), &echo);
    }

    #[test]
    fn snapshot_reflects_both_values() {
        let mut model = SettingsModel::new(ContributionSettings::dollar(dec!(200)));
        model.set_value("250");

        let snapshot = model.snapshot();

        assert_eq!(snapshot.current, ContributionSettings::dollar(dec!(250)));
        assert_eq!(snapshot.saved, ContributionSettings::dollar(dec!(200)));
        assert!(snapshot.is_dirty());
    }
}
