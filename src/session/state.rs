//! Session state and its transitions.
//!
//! [`SessionState::apply`] is a pure function of the current state and one
//! [`SessionEvent`]. The controller owns the only mutable copy.

use std::fmt;
use std::path::PathBuf;

use crate::models::{build_document, DrawingBounds, FrameDocument};

/// Status shown before anything happened and after a clear.
pub const INITIAL_STATUS: &str = "Draw your wireframe, then upload as Step 1 JSON.";

/// Status after a successful upload.
pub const UPLOAD_SUCCESS_STATUS: &str =
    "Upload success. Next: call export endpoint and preview slide output.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Uploading,
    Exporting,
}

impl SessionPhase {
    pub fn is_busy(&self) -> bool {
        !matches!(self, SessionPhase::Idle)
    }
}

/// Why a trigger was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// An upload or export is already in flight
    Busy,
    /// No project id to send the drawing to
    EmptyProjectId,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Busy => write!(f, "another operation is in progress"),
            RejectReason::EmptyProjectId => write!(f, "project id is empty"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Clear,
    BoundsChanged(DrawingBounds),
    ProjectIdChanged(String),
    UploadStarted,
    ExportStarted,
    UploadSucceeded,
    UploadFailed(String),
    ExportSucceeded(PathBuf),
    ExportFailed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub project_id: String,
    /// Bounds of the current drawing
    pub bounds: DrawingBounds,
    pub status_text: String,
    /// Artifact saved by the most recent successful export
    pub last_export: Option<PathBuf>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Idle,
            project_id: String::new(),
            bounds: DrawingBounds::empty(),
            status_text: INITIAL_STATUS.to_string(),
            last_export: None,
        }
    }
}

impl SessionState {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Self::default()
        }
    }

    pub fn is_busy(&self) -> bool {
        self.phase.is_busy()
    }

    /// The busy guard: only an idle session with a project id may start work.
    pub fn can_start(&self) -> Result<(), RejectReason> {
        if self.is_busy() {
            return Err(RejectReason::Busy);
        }
        if self.project_id.trim().is_empty() {
            return Err(RejectReason::EmptyProjectId);
        }
        Ok(())
    }

    /// Document for the current drawing.
    pub fn document(&self) -> FrameDocument {
        build_document(&self.project_id, self.bounds)
    }

    pub fn apply(self, event: SessionEvent) -> Self {
        match event {
            SessionEvent::Clear => Self {
                phase: SessionPhase::Idle,
                bounds: DrawingBounds::empty(),
                status_text: INITIAL_STATUS.to_string(),
                last_export: None,
                ..self
            },
            SessionEvent::BoundsChanged(bounds) => Self { bounds, ..self },
            SessionEvent::ProjectIdChanged(project_id) => Self { project_id, ..self },
            SessionEvent::UploadStarted => self.enter(SessionPhase::Uploading),
            SessionEvent::ExportStarted => self.enter(SessionPhase::Exporting),
            SessionEvent::UploadSucceeded => self.finish(UPLOAD_SUCCESS_STATUS.to_string()),
            SessionEvent::UploadFailed(message) => {
                self.finish(format!("Upload failed: {}", message))
            }
            SessionEvent::ExportSucceeded(path) => {
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                Self {
                    last_export: Some(path),
                    ..self.finish(format!("Export ready: {}", name))
                }
            }
            SessionEvent::ExportFailed(message) => {
                self.finish(format!("Export failed: {}", message))
            }
        }
    }

    fn enter(self, phase: SessionPhase) -> Self {
        if self.can_start().is_err() {
            return self;
        }
        Self { phase, ..self }
    }

    fn finish(self, status_text: String) -> Self {
        Self {
            phase: SessionPhase::Idle,
            status_text,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exported(path: &str) -> SessionState {
        SessionState::new("demo").apply(SessionEvent::ExportSucceeded(PathBuf::from(path)))
    }

    #[test]
    fn test_initial_state() {
        let state = SessionState::new("demo");
        assert_eq!(state.phase, SessionPhase::Idle);
        assert_eq!(state.status_text, INITIAL_STATUS);
        assert!(state.last_export.is_none());
        assert!(state.bounds.is_empty());
    }

    #[test]
    fn test_guard_admits_idle_with_project() {
        let state = SessionState::new("demo").apply(SessionEvent::UploadStarted);
        assert_eq!(state.phase, SessionPhase::Uploading);

        let state = SessionState::new("demo").apply(SessionEvent::ExportStarted);
        assert_eq!(state.phase, SessionPhase::Exporting);
    }

    #[test]
    fn test_guard_rejects_while_busy() {
        let uploading = SessionState::new("demo").apply(SessionEvent::UploadStarted);
        assert_eq!(uploading.can_start(), Err(RejectReason::Busy));

        let after = uploading.clone().apply(SessionEvent::ExportStarted);
        assert_eq!(after, uploading);
    }

    #[test]
    fn test_guard_rejects_empty_project() {
        for id in ["", "   "] {
            let state = SessionState::new(id);
            assert_eq!(state.can_start(), Err(RejectReason::EmptyProjectId));
            assert_eq!(state.clone().apply(SessionEvent::UploadStarted), state);
        }
    }

    #[test]
    fn test_upload_success() {
        let state = SessionState::new("demo")
            .apply(SessionEvent::UploadStarted)
            .apply(SessionEvent::UploadSucceeded);
        assert_eq!(state.phase, SessionPhase::Idle);
        assert_eq!(state.status_text, UPLOAD_SUCCESS_STATUS);
    }

    #[test]
    fn test_failures_keep_last_export() {
        let state = exported("/tmp/e0.pptx")
            .apply(SessionEvent::UploadStarted)
            .apply(SessionEvent::UploadFailed("connection refused".to_string()));
        assert_eq!(state.phase, SessionPhase::Idle);
        assert_eq!(state.status_text, "Upload failed: connection refused");
        assert_eq!(state.last_export, Some(PathBuf::from("/tmp/e0.pptx")));

        let state = state
            .apply(SessionEvent::ExportStarted)
            .apply(SessionEvent::ExportFailed("HTTP 500".to_string()));
        assert_eq!(state.status_text, "Export failed: HTTP 500");
        assert_eq!(state.last_export, Some(PathBuf::from("/tmp/e0.pptx")));
    }

    #[test]
    fn test_export_success_names_file() {
        let state = exported("/tmp/drawppt-exports/demo-1a2b3c4d.pptx");
        assert_eq!(state.status_text, "Export ready: demo-1a2b3c4d.pptx");
        assert_eq!(
            state.last_export,
            Some(PathBuf::from("/tmp/drawppt-exports/demo-1a2b3c4d.pptx"))
        );
    }

    #[test]
    fn test_clear_from_any_state() {
        let drawn = exported("/tmp/e1.pptx")
            .apply(SessionEvent::BoundsChanged(DrawingBounds::new(300.0, 400.0)));

        for state in [
            drawn.clone(),
            drawn.clone().apply(SessionEvent::UploadStarted),
            drawn.clone().apply(SessionEvent::ExportStarted),
        ] {
            let cleared = state.apply(SessionEvent::Clear);
            assert_eq!(cleared.phase, SessionPhase::Idle);
            assert_eq!(cleared.status_text, INITIAL_STATUS);
            assert!(cleared.last_export.is_none());
            assert!(cleared.bounds.is_empty());
            assert_eq!(cleared.project_id, "demo");
        }
    }

    #[test]
    fn test_late_completion_after_clear_still_lands() {
        let state = SessionState::new("demo")
            .apply(SessionEvent::ExportStarted)
            .apply(SessionEvent::Clear)
            .apply(SessionEvent::ExportSucceeded(PathBuf::from("/tmp/e1.pptx")));
        assert_eq!(state.last_export, Some(PathBuf::from("/tmp/e1.pptx")));
    }

    #[test]
    fn test_document_uses_current_bounds() {
        let state = SessionState::new("demo")
            .apply(SessionEvent::BoundsChanged(DrawingBounds::new(2000.0, 3000.0)))
            .apply(SessionEvent::ProjectIdChanged("deck".to_string()));
        let document = state.document();
        assert_eq!(document.project_id, "deck");
        assert_eq!(document.pages[0].canvas.width, 2000);
        assert_eq!(document.pages[0].canvas.height, 3000);
    }
}
