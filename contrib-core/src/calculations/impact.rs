//! Future-value projection for a contribution election.
//!
//! | Quantity       | Definition |
//! |----------------|------------|
//! | per paycheck   | percent: `salary / pay periods × value / 100`; dollar: `value` |
//! | annual         | per paycheck × pay periods |
//! | years          | retirement age − age (never negative) |
//! | future value   | annual × ((1 + g)^years − 1) / g, with g = 6% |
//!
//! Contributions are treated as one deposit per year compounded annually,
//! whatever the pay frequency.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use contrib_core::calculations::common::round_half_up;
//! use contrib_core::{ContributionSettings, ContributionType, EmployeeSummary, ImpactCalculator};
//!
//! let summary = EmployeeSummary {
//!     employee_name: "Sam Lee".to_string(),
//!     plan_type: "Traditional 401(k)".to_string(),
//!     annual_salary: dec!(120000),
//!     pay_frequency: 24,
//!     company_match_percent: dec!(4),
//!     ytd_contribution: dec!(0),
//!     ytd_employer_match: None,
//!     estimated_balance_at_retirement: dec!(0),
//!     age: 30,
//!     retirement_age: 65,
//!     contribution_type: ContributionType::Percent,
//!     contribution_value: dec!(0),
//! };
//!
//! let calculator = ImpactCalculator::new(&summary);
//! let projection = calculator.project(&ContributionSettings::percent(dec!(10))).unwrap();
//!
//! assert_eq!(projection.per_paycheck, dec!(500));
//! assert_eq!(projection.annual, dec!(12000));
//! assert_eq!(round_half_up(projection.future_value), dec!(1337217.36));
//! ```

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ContributionSettings, ContributionType, EmployeeSummary};

/// Fixed nominal annual growth assumption.
pub const ANNUAL_GROWTH_RATE: Decimal = dec!(0.06);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImpactError {
    /// The projection exceeds the representable decimal range.
    #[error("projection over {years} years overflows")]
    Overflow { years: u32 },
}

/// Contribution amounts and projected balance for one settings value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    pub per_paycheck: Decimal,
    pub annual: Decimal,
    pub future_value: Decimal,
}

/// Everything a caller displays for a pending change.
///
/// Derived on demand from the pending and committed settings and never
/// stored alongside them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactResult {
    pub per_paycheck_contribution: Decimal,
    pub annual_contribution: Decimal,
    pub projected_future_value: Decimal,
    /// Pending projection minus committed projection; negative when the
    /// change lowers savings.
    pub incremental_impact: Decimal,
}

/// Projects retirement savings against a single employee summary.
#[derive(Debug, Clone, Copy)]
pub struct ImpactCalculator<'a> {
    summary: &'a EmployeeSummary,
}

impl<'a> ImpactCalculator<'a> {
    pub fn new(summary: &'a EmployeeSummary) -> Self {
        Self { summary }
    }

    /// Projects contributions and the balance at retirement for `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`ImpactError::Overflow`] when the compounded balance cannot be
    /// represented.
    pub fn project(
        &self,
        settings: &ContributionSettings,
    ) -> Result<Projection, ImpactError> {
        let per_paycheck = self.per_paycheck(settings)?;
        let annual = self.annual(per_paycheck)?;
        let future_value = self.future_value(annual)?;

        Ok(Projection {
            per_paycheck,
            annual,
            future_value,
        })
    }

    /// Marginal change in the projected balance from moving `saved` to `current`.
    pub fn incremental_impact(
        &self,
        current: &ContributionSettings,
        saved: &ContributionSettings,
    ) -> Result<Decimal, ImpactError> {
        let pending = self.project(current)?;
        let baseline = self.project(saved)?;
        self.difference(pending.future_value, baseline.future_value)
    }

    /// Full display set for a pending change relative to the committed baseline.
    pub fn impact(
        &self,
        current: &ContributionSettings,
        saved: &ContributionSettings,
    ) -> Result<ImpactResult, ImpactError> {
        let pending = self.project(current)?;
        let baseline = self.project(saved)?;

        Ok(ImpactResult {
            per_paycheck_contribution: pending.per_paycheck,
            annual_contribution: pending.annual,
            projected_future_value: pending.future_value,
            incremental_impact: self.difference(pending.future_value, baseline.future_value)?,
        })
    }

    fn overflow(&self) -> ImpactError {
        ImpactError::Overflow {
            years: self.summary.years_to_retirement(),
        }
    }

    fn per_paycheck(
        &self,
        settings: &ContributionSettings,
    ) -> Result<Decimal, ImpactError> {
        match settings.contribution_type {
            ContributionType::Percent => settings
                .contribution_value
                .checked_div(dec!(100))
                .and_then(|rate| self.summary.salary_per_paycheck().checked_mul(rate))
                .ok_or_else(|| self.overflow()),
            ContributionType::Dollar => Ok(settings.contribution_value),
        }
    }

    fn annual(
        &self,
        per_paycheck: Decimal,
    ) -> Result<Decimal, ImpactError> {
        per_paycheck
            .checked_mul(Decimal::from(self.summary.pay_frequency))
            .ok_or_else(|| self.overflow())
    }

    fn difference(
        &self,
        pending: Decimal,
        baseline: Decimal,
    ) -> Result<Decimal, ImpactError> {
        pending.checked_sub(baseline).ok_or_else(|| self.overflow())
    }

    /// Future value of an ordinary annuity of `annual` deposits.
    fn future_value(
        &self,
        annual: Decimal,
    ) -> Result<Decimal, ImpactError> {
        let years = self.summary.years_to_retirement();

        let growth = (Decimal::ONE + ANNUAL_GROWTH_RATE)
            .checked_powi(i64::from(years))
            .ok_or_else(|| self.overflow())?;
        // growth fits, but dividing by the rate can still leave the decimal range.
        let annuity_factor = (growth - Decimal::ONE)
            .checked_div(ANNUAL_GROWTH_RATE)
            .ok_or_else(|| self.overflow())?;

        annual.checked_mul(annuity_factor).ok_or_else(|| self.overflow())
    }
}
