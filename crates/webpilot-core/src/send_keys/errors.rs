use crate::command::StatusCode;
use crate::dialog::DialogError;
use crate::element::ElementError;
use crate::errors::PilotError;
use crate::focus::FocusError;
use crate::session::{SessionError, WindowHandle};

#[derive(Debug, thiserror::Error)]
pub enum SendKeysError {
    #[error("Element '{element}' is not interactable: {reason}")]
    ElementNotInteractable { element: String, reason: String },

    #[error("Element '{element}' did not receive focus within {timeout_ms}ms")]
    FocusTimeout { element: String, timeout_ms: u64 },

    #[error("Cannot position insertion point: {reason}")]
    InsertionPointUnavailable { reason: String },

    #[error("No file dialog appeared within {timeout_ms}ms")]
    DialogNotFound { timeout_ms: u64 },

    #[error("Failed to fill file dialog {dialog}: {reason}")]
    DialogInjectionFailed { dialog: WindowHandle, reason: String },

    #[error("File dialog interaction did not finish within {timeout_ms}ms")]
    DialogTimeout { timeout_ms: u64 },

    #[error("A file dialog is already being handled for window {window}")]
    DialogBusy { window: WindowHandle },

    #[error("Failed to detect file dialog: {reason}")]
    DialogDetectionFailed { reason: String },

    #[error("Key delivery failed after {delivered} of {total} keys: {reason}")]
    KeyDeliveryFailed {
        delivered: usize,
        total: usize,
        reason: String,
    },

    #[error("Send keys was cancelled")]
    Cancelled,

    #[error("Element operation failed: {source}")]
    Element {
        #[from]
        source: ElementError,
    },

    #[error(transparent)]
    Session {
        #[from]
        source: SessionError,
    },
}

impl SendKeysError {
    /// Wire status for a response reporting this error
    pub fn status(&self) -> StatusCode {
        match self {
            SendKeysError::ElementNotInteractable { .. } => StatusCode::ElementNotInteractable,
            SendKeysError::FocusTimeout { .. } | SendKeysError::DialogTimeout { .. } => {
                StatusCode::Timeout
            }
            SendKeysError::DialogNotFound { .. } => StatusCode::NoSuchWindow,
            SendKeysError::DialogBusy { .. } => StatusCode::InvalidElementState,
            SendKeysError::Element {
                source: ElementError::Stale,
            } => StatusCode::StaleElementReference,
            SendKeysError::Session { source } => source.status(),
            SendKeysError::InsertionPointUnavailable { .. }
            | SendKeysError::DialogInjectionFailed { .. }
            | SendKeysError::DialogDetectionFailed { .. }
            | SendKeysError::KeyDeliveryFailed { .. }
            | SendKeysError::Cancelled
            | SendKeysError::Element { .. } => StatusCode::UnknownError,
        }
    }

    /// Step of the delivery that failed, for response messages and logs
    pub fn operation(&self) -> &'static str {
        match self {
            SendKeysError::ElementNotInteractable { .. } => "interactability check",
            SendKeysError::FocusTimeout { .. } => "focus",
            SendKeysError::InsertionPointUnavailable { .. } => "positioning",
            SendKeysError::DialogNotFound { .. } | SendKeysError::DialogDetectionFailed { .. } => {
                "dialog detection"
            }
            SendKeysError::DialogInjectionFailed { .. } => "dialog interaction",
            SendKeysError::DialogTimeout { .. } | SendKeysError::DialogBusy { .. } => {
                "dialog wait"
            }
            SendKeysError::KeyDeliveryFailed { .. } => "key delivery",
            SendKeysError::Cancelled => "cancellation",
            SendKeysError::Element { .. } => "element access",
            SendKeysError::Session { .. } => "session lookup",
        }
    }

    /// Timing failures that may succeed on a later attempt
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SendKeysError::FocusTimeout { .. }
                | SendKeysError::DialogNotFound { .. }
                | SendKeysError::DialogTimeout { .. }
                | SendKeysError::DialogBusy { .. }
        )
    }

    pub(crate) fn from_focus(element: &str, error: FocusError) -> Self {
        match error {
            FocusError::Timeout { timeout_ms, .. } => SendKeysError::FocusTimeout {
                element: element.to_string(),
                timeout_ms,
            },
            FocusError::Cancelled { .. } => SendKeysError::Cancelled,
            FocusError::Element { source } => SendKeysError::Element { source },
            FocusError::RestoreFailed { window, reason } => SendKeysError::Element {
                source: ElementError::OperationFailed {
                    operation: "focus restore",
                    reason: format!("{}: {}", window, reason),
                },
            },
        }
    }
}

impl From<DialogError> for SendKeysError {
    fn from(error: DialogError) -> Self {
        match error {
            DialogError::NotFound { timeout_ms, .. } => SendKeysError::DialogNotFound { timeout_ms },
            DialogError::InjectionFailed { dialog, reason } => {
                SendKeysError::DialogInjectionFailed { dialog, reason }
            }
            DialogError::Timeout { timeout_ms } => SendKeysError::DialogTimeout { timeout_ms },
            DialogError::Busy { window } => SendKeysError::DialogBusy { window },
            DialogError::Cancelled => SendKeysError::Cancelled,
            DialogError::DetectionFailed { reason } => {
                SendKeysError::DialogDetectionFailed { reason }
            }
            DialogError::WorkerSpawnFailed { reason } => SendKeysError::DialogDetectionFailed {
                reason: format!("worker could not start: {}", reason),
            },
            DialogError::WorkerLost => SendKeysError::DialogDetectionFailed {
                reason: DialogError::WorkerLost.to_string(),
            },
        }
    }
}

impl PilotError for SendKeysError {
    fn error_code(&self) -> &'static str {
        match self {
            SendKeysError::ElementNotInteractable { .. } => "SEND_KEYS_ELEMENT_NOT_INTERACTABLE",
            SendKeysError::FocusTimeout { .. } => "SEND_KEYS_FOCUS_TIMEOUT",
            SendKeysError::InsertionPointUnavailable { .. } => {
                "SEND_KEYS_INSERTION_POINT_UNAVAILABLE"
            }
            SendKeysError::DialogNotFound { .. } => "SEND_KEYS_DIALOG_NOT_FOUND",
            SendKeysError::DialogInjectionFailed { .. } => "SEND_KEYS_DIALOG_INJECTION_FAILED",
            SendKeysError::DialogTimeout { .. } => "SEND_KEYS_DIALOG_TIMEOUT",
            SendKeysError::DialogBusy { .. } => "SEND_KEYS_DIALOG_BUSY",
            SendKeysError::DialogDetectionFailed { .. } => "SEND_KEYS_DIALOG_DETECTION_FAILED",
            SendKeysError::KeyDeliveryFailed { .. } => "SEND_KEYS_KEY_DELIVERY_FAILED",
            SendKeysError::Cancelled => "SEND_KEYS_CANCELLED",
            SendKeysError::Element { .. } => "SEND_KEYS_ELEMENT_FAILED",
            SendKeysError::Session { .. } => "SEND_KEYS_SESSION_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            SendKeysError::ElementNotInteractable { .. }
            | SendKeysError::FocusTimeout { .. }
            | SendKeysError::DialogNotFound { .. }
            | SendKeysError::DialogBusy { .. } => true,
            SendKeysError::Session { source } => source.is_user_error(),
            _ => false,
        }
    }
}
