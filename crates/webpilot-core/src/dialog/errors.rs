use crate::errors::PilotError;
use crate::session::WindowHandle;

#[derive(Debug, thiserror::Error)]
pub enum DialogError {
    #[error("No file dialog appeared within {timeout_ms}ms ({checks} checks)")]
    NotFound { timeout_ms: u64, checks: u32 },

    #[error("Failed to enter file path into dialog {dialog}: {reason}")]
    InjectionFailed { dialog: WindowHandle, reason: String },

    #[error("File dialog did not complete within {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("A file dialog wait is already active for window {window}")]
    Busy { window: WindowHandle },

    #[error("Dialog wait was revoked")]
    Cancelled,

    #[error("Failed to enumerate native windows: {reason}")]
    DetectionFailed { reason: String },

    #[error("Failed to start dialog worker: {reason}")]
    WorkerSpawnFailed { reason: String },

    #[error("Dialog worker exited without reporting a result")]
    WorkerLost,
}

impl PilotError for DialogError {
    fn error_code(&self) -> &'static str {
        match self {
            DialogError::NotFound { .. } => "DIALOG_NOT_FOUND",
            DialogError::InjectionFailed { .. } => "DIALOG_INJECTION_FAILED",
            DialogError::Timeout { .. } => "DIALOG_TIMEOUT",
            DialogError::Busy { .. } => "DIALOG_BUSY",
            DialogError::Cancelled => "DIALOG_CANCELLED",
            DialogError::DetectionFailed { .. } => "DIALOG_DETECTION_FAILED",
            DialogError::WorkerSpawnFailed { .. } => "DIALOG_WORKER_SPAWN_FAILED",
            DialogError::WorkerLost => "DIALOG_WORKER_LOST",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            DialogError::NotFound { .. } | DialogError::Timeout { .. } | DialogError::Busy { .. }
        )
    }
}

/// Failure reported by a [`super::NativeSurfaceLocator`]
#[derive(Debug, thiserror::Error)]
#[error("{reason}")]
pub struct LocatorError {
    pub reason: String,
}

impl LocatorError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Failure reported by a [`super::DialogDriver`]
#[derive(Debug, thiserror::Error)]
pub enum DialogDriverError {
    #[error("Dialog text field did not accept the text")]
    TextRejected,

    #[error("{reason}")]
    Failed { reason: String },
}

impl DialogDriverError {
    pub fn failed(reason: impl Into<String>) -> Self {
        DialogDriverError::Failed {
            reason: reason.into(),
        }
    }
}
