use std::fmt;

use contrib_core::{ContributionSettings, ContributionType, ImpactResult, SessionView};

use crate::utils::{format_currency, format_percent, format_signed_currency, opt_currency_display};

/// Human-readable election, e.g. `7% of salary` or `$200.00 per paycheck`.
pub fn describe_election(settings: &ContributionSettings) -> String {
    match settings.contribution_type {
        ContributionType::Percent => {
            format!("{} of salary", format_percent(settings.contribution_value))
        }
        ContributionType::Dollar => {
            format!("{} per paycheck", format_currency(settings.contribution_value))
        }
    }
}

/// Plan overview plus the projection of the pending election.
pub struct PlanReport<'a> {
    view: &'a SessionView,
    impact: ImpactResult,
}

impl<'a> PlanReport<'a> {
    pub fn new(
        view: &'a SessionView,
        impact: ImpactResult,
    ) -> Self {
        Self { view, impact }
    }
}

impl fmt::Display for PlanReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let summary = &self.view.summary;
        let settings = &self.view.settings;

        writeln!(f, "Employee:             {}", summary.employee_name)?;
        writeln!(f, "Plan:                 {}", summary.plan_type)?;
        writeln!(f, "Annual salary:        {}", format_currency(summary.annual_salary))?;
        writeln!(f, "Pay periods per year: {}", summary.pay_frequency)?;
        writeln!(
            f,
            "Company match:        {}",
            format_percent(summary.company_match_percent)
        )?;
        writeln!(
            f,
            "YTD contribution:     {}",
            format_currency(summary.ytd_contribution)
        )?;
        writeln!(
            f,
            "YTD employer match:   {}",
            opt_currency_display(summary.ytd_employer_match)
        )?;
        writeln!(
            f,
            "Years to retirement:  {} (age {} → {})",
            summary.years_to_retirement(),
            summary.age,
            summary.retirement_age
        )?;
        writeln!(f)?;
        writeln!(f, "Saved election:       {}", describe_election(&settings.saved))?;
        writeln!(f, "Pending election:     {}", describe_election(&settings.current))?;
        writeln!(
            f,
            "Per paycheck:         {}",
            format_currency(self.impact.per_paycheck_contribution)
        )?;
        writeln!(
            f,
            "Annual contribution:  {}",
            format_currency(self.impact.annual_contribution)
        )?;
        writeln!(
            f,
            "Projected at {}:      {}",
            summary.retirement_age,
            format_currency(self.impact.projected_future_value)
        )?;
        writeln!(
            f,
            "Change vs saved:      {}",
            format_signed_currency(self.impact.incremental_impact)
        )?;
        write!(
            f,
            "Unsaved changes:      {}",
            if self.view.is_dirty() { "yes" } else { "no" }
        )
    }
}
