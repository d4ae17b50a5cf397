use crate::command::StatusCode;
use crate::errors::PilotError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("No browser window is available in this session")]
    NoSuchWindow,

    #[error("No element found with id: '{id}'")]
    NoSuchElement { id: String },

    #[error("Element '{id}' is no longer attached to the page")]
    StaleElement { id: String },

    #[error("Navigation to '{url}' failed: {reason}")]
    NavigationFailed { url: String, reason: String },
}

impl SessionError {
    /// Wire status for a response reporting this error
    pub fn status(&self) -> StatusCode {
        match self {
            SessionError::NoSuchWindow => StatusCode::NoSuchWindow,
            SessionError::NoSuchElement { .. } => StatusCode::NoSuchElement,
            SessionError::StaleElement { .. } => StatusCode::StaleElementReference,
            SessionError::NavigationFailed { .. } => StatusCode::UnknownError,
        }
    }
}

impl PilotError for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            SessionError::NoSuchWindow => "SESSION_NO_SUCH_WINDOW",
            SessionError::NoSuchElement { .. } => "SESSION_NO_SUCH_ELEMENT",
            SessionError::StaleElement { .. } => "SESSION_STALE_ELEMENT",
            SessionError::NavigationFailed { .. } => "SESSION_NAVIGATION_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        !matches!(self, SessionError::NavigationFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_such_element_error() {
        let error = SessionError::NoSuchElement {
            id: "el-1".to_string(),
        };
        assert_eq!(error.to_string(), "No element found with id: 'el-1'");
        assert_eq!(error.error_code(), "SESSION_NO_SUCH_ELEMENT");
        assert_eq!(error.status(), StatusCode::NoSuchElement);
        assert!(error.is_user_error());
    }

    #[test]
    fn test_navigation_failed_error() {
        let error = SessionError::NavigationFailed {
            url: "https://example.com".to_string(),
            reason: "Navigate2 returned E_FAIL".to_string(),
        };
        assert_eq!(error.status(), StatusCode::UnknownError);
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_stale_element_status() {
        let error = SessionError::StaleElement {
            id: "el-2".to_string(),
        };
        assert_eq!(error.status(), StatusCode::StaleElementReference);
    }
}
