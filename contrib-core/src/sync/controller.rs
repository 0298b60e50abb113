use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::{PlanSession, SessionView, StatusMessage};
use crate::{ContributionSettings, EmployeeSummary, ServiceError, SettingsModel, SettingsService};

/// Lifecycle of the controller.
///
/// ```text
/// Idle ─▶ Loading ─▶ Ready ─▶ Saving ─▶ Ready
///            │                   (success or failure)
///            └──▶ LoadError ─▶ Loading (retry)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Loading,
    Ready,
    LoadError,
    Saving,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyncError {
    /// Another round trip is in flight; the request was dropped, not queued.
    #[error("request ignored while {0:?}")]
    Busy(SyncState),

    #[error("no plan loaded")]
    NotLoaded,

    #[error("Failed to load summary: {0}")]
    Load(ServiceError),

    #[error("Failed to save settings: {0}")]
    Save(ServiceError),
}

struct Inner {
    state: SyncState,
    session: PlanSession,
    status: Option<StatusMessage>,
}

impl Inner {
    fn transition(
        &mut self,
        next: SyncState,
    ) {
        debug!(from = ?self.state, to = ?next, "sync state transition");
        self.state = next;
    }
}

/// Drives load and save round trips and owns the session they update.
///
/// The session lock is never held across an await, so edits stay possible
/// while a request is in flight. A save that completes overwrites any such
/// edit with the service's echo.
pub struct SyncController {
    service: Box<dyn SettingsService>,
    inner: Mutex<Inner>,
}

impl SyncController {
    pub fn new(service: Box<dyn SettingsService>) -> Self {
        Self {
            service,
            inner: Mutex::new(Inner {
                state: SyncState::Idle,
                session: PlanSession::new(),
                status: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> SyncState {
        self.lock().state
    }

    /// Last user-visible status line, if any round trip has started.
    pub fn status(&self) -> Option<StatusMessage> {
        self.lock().status.clone()
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state(), SyncState::Loading | SyncState::Saving)
    }

    /// Whether a save request would be accepted right now.
    pub fn can_save(&self) -> bool {
        let inner = self.lock();
        inner.state == SyncState::Ready && inner.session.model().is_some()
    }

    /// Snapshot of the loaded plan, or `None` when nothing is loaded.
    pub fn view(&self) -> Option<SessionView> {
        self.lock().session.view()
    }

    /// Runs `edit` against the settings model; `None` when nothing is loaded.
    pub fn edit<R>(
        &self,
        edit: impl FnOnce(&mut SettingsModel) -> R,
    ) -> Option<R> {
        self.lock().session.model_mut().map(edit)
    }

    /// Fetches the summary and seeds the session from the settings it carries.
    ///
    /// A failed load clears the session and leaves the controller in
    /// [`SyncState::LoadError`]; calling `load` again retries.
    pub async fn load(&self) -> Result<EmployeeSummary, SyncError> {
        {
            let mut inner = self.lock();
            if matches!(inner.state, SyncState::Loading | SyncState::Saving) {
                return Err(SyncError::Busy(inner.state));
            }
            inner.transition(SyncState::Loading);
            inner.status = Some(StatusMessage::info("Loading…"));
        }

        let fetched = self
            .service
            .fetch_summary()
            .await
            .and_then(|summary| {
                summary.validate()?;
                Ok(summary)
            });

        let mut inner = self.lock();
        match fetched {
            Ok(summary) => {
                info!(
                    employee = %summary.employee_name,
                    contribution_type = %summary.contribution_type,
                    contribution_value = %summary.contribution_value,
                    "summary loaded"
                );
                inner.session.seed(summary.clone());
                inner.transition(SyncState::Ready);
                inner.status = Some(StatusMessage::success("Settings loaded"));
                Ok(summary)
            }
            Err(error) => {
                let error = SyncError::Load(error);
                warn!(%error, "summary load failed");
                inner.session.clear();
                inner.transition(SyncState::LoadError);
                inner.status = Some(StatusMessage::error(error.to_string()));
                Err(error)
            }
        }
    }

    /// Submits the pending settings and commits the service's echo.
    ///
    /// On failure the pending and committed values are left as they were, so
    /// the change stays dirty and can be retried.
    pub async fn save(&self) -> Result<ContributionSettings, SyncError> {
        let pending = {
            let mut inner = self.lock();
            match inner.state {
                SyncState::Ready => {}
                SyncState::Loading | SyncState::Saving => {
                    return Err(SyncError::Busy(inner.state));
                }
                SyncState::Idle | SyncState::LoadError => return Err(SyncError::NotLoaded),
            }
            let pending = match inner.session.model() {
                Some(model) => *model.current(),
                None => return Err(SyncError::NotLoaded),
            };
            inner.transition(SyncState::Saving);
            inner.status = Some(StatusMessage::info("Saving…"));
            pending
        };

        debug!(?pending, "submitting contribution settings");
        let submitted = self.service.submit_settings(&pending).await;

        let mut inner = self.lock();
        inner.transition(SyncState::Ready);
        match submitted {
            Ok(echo) => {
                if echo != pending {
                    info!(?pending, ?echo, "service adjusted submitted settings");
                }
                inner.session.commit(echo);
                inner.status = Some(StatusMessage::success("Contribution settings saved"));
                info!(?echo, "contribution settings saved");
                Ok(echo)
            }
            Err(error) => {
                let error = SyncError::Save(error);
                warn!(%error, "contribution settings save failed");
                inner.status = Some(StatusMessage::error(error.to_string()));
                Err(error)
            }
        }
    }
}
