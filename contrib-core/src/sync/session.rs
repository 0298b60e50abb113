use crate::{
    ContributionSettings, EmployeeSummary, ImpactError, ImpactResult, SettingsModel,
    SettingsSnapshot,
};

/// The loaded plan: the summary and the settings model seeded from it.
///
/// Both are absent until a load succeeds, and cleared again when a load
/// fails, so callers treat an empty session as "nothing to compute".
#[derive(Debug, Clone, Default)]
pub struct PlanSession {
    summary: Option<EmployeeSummary>,
    model: Option<SettingsModel>,
}

impl PlanSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the session with a freshly loaded summary; pending edits are discarded.
    pub fn seed(
        &mut self,
        summary: EmployeeSummary,
    ) {
        self.model = Some(SettingsModel::new(summary.settings()));
        self.summary = Some(summary);
    }

    pub fn clear(&mut self) {
        self.summary = None;
        self.model = None;
    }

    pub fn summary(&self) -> Option<&EmployeeSummary> {
        self.summary.as_ref()
    }

    pub fn model(&self) -> Option<&SettingsModel> {
        self.model.as_ref()
    }

    pub fn model_mut(&mut self) -> Option<&mut SettingsModel> {
        self.model.as_mut()
    }

    /// Commits an authoritative echo; returns false when nothing is loaded.
    pub fn commit(
        &mut self,
        settings: ContributionSettings,
    ) -> bool {
        match self.model.as_mut() {
            Some(model) => {
                model.commit(settings);
                true
            }
            None => false,
        }
    }

    pub fn view(&self) -> Option<SessionView> {
        let summary = self.summary.clone()?;
        let settings = self.model.as_ref()?.snapshot();
        Some(SessionView { summary, settings })
    }
}

/// Point-in-time copy of a loaded session.
///
/// Derived values are computed from the copy on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub summary: EmployeeSummary,
    pub settings: SettingsSnapshot,
}

impl SessionView {
    pub fn impact(&self) -> Result<ImpactResult, ImpactError> {
        self.settings.impact(&self.summary)
    }

    pub fn is_dirty(&self) -> bool {
        self.settings.is_dirty()
    }
}
