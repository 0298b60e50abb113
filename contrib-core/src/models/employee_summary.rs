use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ContributionSettings, ContributionType};

/// Violations of the invariants a summary must satisfy before any
/// projection is computed from it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SummaryError {
    #[error("pay frequency must be at least one pay period per year")]
    NoPayPeriods,

    #[error("retirement age {retirement_age} must be greater than current age {age}")]
    RetirementNotAhead { age: u32, retirement_age: u32 },

    #[error("annual salary cannot be negative ({0})")]
    NegativeSalary(Decimal),
}

/// Read-only snapshot of an employee's plan as reported by the settings
/// service, including the contribution election currently on file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    pub employee_name: String,
    pub plan_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub annual_salary: Decimal,
    /// Pay periods per year.
    pub pay_frequency: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub company_match_percent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub ytd_contribution: Decimal,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub ytd_employer_match: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub estimated_balance_at_retirement: Decimal,
    pub age: u32,
    pub retirement_age: u32,
    pub contribution_type: ContributionType,
    #[serde(with = "rust_decimal::serde::float")]
    pub contribution_value: Decimal,
}

impl EmployeeSummary {
    /// The contribution election persisted by the service.
    pub fn settings(&self) -> ContributionSettings {
        ContributionSettings::new(self.contribution_type, self.contribution_value)
    }

    /// Whole years of growth before retirement; zero once retirement age is reached.
    pub fn years_to_retirement(&self) -> u32 {
        self.retirement_age.saturating_sub(self.age)
    }

    /// Gross salary for a single pay period.
    ///
    /// Returns zero when the summary has no pay periods.
    pub fn salary_per_paycheck(&self) -> Decimal {
        if self.pay_frequency == 0 {
            return Decimal::ZERO;
        }
        self.annual_salary / Decimal::from(self.pay_frequency)
    }

    pub fn validate(&self) -> Result<(), SummaryError> {
        if self.pay_frequency == 0 {
            return Err(SummaryError::NoPayPeriods);
        }
        if self.retirement_age <= self.age {
            return Err(SummaryError::RetirementNotAhead {
                age: self.age,
                retirement_age: self.retirement_age,
            });
        }
        if self.annual_salary < Decimal::ZERO {
            return Err(SummaryError::NegativeSalary(self.annual_salary));
        }
        Ok(())
    }
}
