//! Drives uploads and exports against the session state.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use super::state::{RejectReason, SessionEvent, SessionState};
use crate::adapters::ReqwestHttpClient;
use crate::error::BackendError;
use crate::export::{ExportOrchestrator, ExportedArtifact};
use crate::models::{DrawingBounds, FrameDocument};
use crate::traits::HttpClient;

/// Outcome of [`SessionController::start_upload`] or
/// [`SessionController::start_export`].
#[derive(Debug)]
pub enum Trigger<T = ()> {
    /// The busy guard refused; nothing changed and nothing was sent
    Rejected(RejectReason),
    Succeeded(T),
    /// The operation ran and failed; the status text already says so
    Failed(BackendError),
}

impl<T> Trigger<T> {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Trigger::Rejected(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Trigger::Succeeded(_))
    }
}

/// Shared handle on one drawing session.
///
/// Clones share state. The lock is only held to read or apply a transition,
/// never across a network call, so `clear` and the setters stay responsive
/// while an operation is in flight.
pub struct SessionController<C = ReqwestHttpClient> {
    state: Arc<Mutex<SessionState>>,
    exporter: Arc<ExportOrchestrator<C>>,
}

impl<C> Clone for SessionController<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            exporter: Arc::clone(&self.exporter),
        }
    }
}

impl<C: HttpClient> SessionController<C> {
    pub fn new(exporter: Arc<ExportOrchestrator<C>>, project_id: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::new(project_id))),
            exporter,
        }
    }

    pub fn exporter(&self) -> &ExportOrchestrator<C> {
        &self.exporter
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    pub fn status_text(&self) -> String {
        self.lock().status_text.clone()
    }

    /// The drawing surface changed.
    pub fn update_bounds(&self, bounds: DrawingBounds) {
        self.dispatch(SessionEvent::BoundsChanged(bounds));
    }

    pub fn set_project_id(&self, project_id: impl Into<String>) {
        self.dispatch(SessionEvent::ProjectIdChanged(project_id.into()));
    }

    /// Reset the drawing, status, and last export. Allowed at any time.
    pub fn clear(&self) {
        self.dispatch(SessionEvent::Clear);
    }

    /// Build the document for the current drawing and submit it.
    pub async fn start_upload(&self) -> Trigger {
        let (project_id, document) = match self.begin(SessionEvent::UploadStarted) {
            Ok(work) => work,
            Err(reason) => return Trigger::Rejected(reason),
        };

        info!(project_id = %project_id, "Upload started");
        let result = self
            .exporter
            .backend()
            .submit_for_generation(&project_id, &document)
            .await;

        match result {
            Ok(()) => {
                self.dispatch(SessionEvent::UploadSucceeded);
                Trigger::Succeeded(())
            }
            Err(err) => {
                warn!(project_id = %project_id, code = err.error_code(), error = %err, "Upload failed");
                self.dispatch(SessionEvent::UploadFailed(err.user_message()));
                Trigger::Failed(err)
            }
        }
    }

    /// Build the document for the current drawing, export it, and save the
    /// presentation locally.
    pub async fn start_export(&self) -> Trigger<ExportedArtifact> {
        let (project_id, document) = match self.begin(SessionEvent::ExportStarted) {
            Ok(work) => work,
            Err(reason) => return Trigger::Rejected(reason),
        };

        info!(project_id = %project_id, "Export started");
        match self.exporter.export_and_fetch(&project_id, &document).await {
            Ok(artifact) => {
                self.dispatch(SessionEvent::ExportSucceeded(artifact.path.clone()));
                Trigger::Succeeded(artifact)
            }
            Err(err) => {
                warn!(project_id = %project_id, code = err.error_code(), error = %err, "Export failed");
                self.dispatch(SessionEvent::ExportFailed(err.user_message()));
                Trigger::Failed(err)
            }
        }
    }

    /// Check the guard and enter the busy phase under one lock acquisition.
    fn begin(&self, started: SessionEvent) -> Result<(String, FrameDocument), RejectReason> {
        let mut state = self.lock();

        if let Err(reason) = state.can_start() {
            debug!(reason = %reason, "Trigger rejected");
            return Err(reason);
        }

        let work = (state.project_id.clone(), state.document());
        let current = std::mem::take(&mut *state);
        *state = current.apply(started);
        Ok(work)
    }

    fn dispatch(&self, event: SessionEvent) {
        let mut state = self.lock();
        let current = std::mem::take(&mut *state);
        *state = current.apply(event);
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
