use crate::element::ElementError;
use crate::errors::PilotError;
use crate::session::WindowHandle;

#[derive(Debug, thiserror::Error)]
pub enum FocusError {
    #[error("Element did not report focus within {timeout_ms}ms ({checks} checks)")]
    Timeout { timeout_ms: u64, checks: u32 },

    #[error("Focus wait cancelled after {checks} checks")]
    Cancelled { checks: u32 },

    #[error("Failed to restore focus to window {window}: {reason}")]
    RestoreFailed { window: WindowHandle, reason: String },

    #[error("Focus query failed: {source}")]
    Element {
        #[from]
        source: ElementError,
    },
}

impl PilotError for FocusError {
    fn error_code(&self) -> &'static str {
        match self {
            FocusError::Timeout { .. } => "FOCUS_TIMEOUT",
            FocusError::Cancelled { .. } => "FOCUS_CANCELLED",
            FocusError::RestoreFailed { .. } => "FOCUS_RESTORE_FAILED",
            FocusError::Element { .. } => "FOCUS_ELEMENT_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, FocusError::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_timeout_error() {
        let error = FocusError::Timeout {
            timeout_ms: 1000,
            checks: 20,
        };
        assert_eq!(
            error.to_string(),
            "Element did not report focus within 1000ms (20 checks)"
        );
        assert_eq!(error.error_code(), "FOCUS_TIMEOUT");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_restore_failed_error() {
        let error = FocusError::RestoreFailed {
            window: WindowHandle::new(0x1a2b),
            reason: "SetForegroundWindow refused".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to restore focus to window 0x1a2b: SetForegroundWindow refused"
        );
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_element_error_source() {
        let error = FocusError::from(ElementError::Stale);
        assert_eq!(error.error_code(), "FOCUS_ELEMENT_FAILED");
        assert!(error.source().is_some());
    }
}
