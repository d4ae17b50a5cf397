use crate::errors::PilotError;

#[derive(Debug, thiserror::Error)]
pub enum ElementError {
    #[error("Element is no longer attached to the page")]
    Stale,

    #[error("Element does not support {operation}")]
    Unsupported { operation: &'static str },

    #[error("Element {operation} failed: {reason}")]
    OperationFailed {
        operation: &'static str,
        reason: String,
    },
}

impl PilotError for ElementError {
    fn error_code(&self) -> &'static str {
        match self {
            ElementError::Stale => "ELEMENT_STALE",
            ElementError::Unsupported { .. } => "ELEMENT_UNSUPPORTED",
            ElementError::OperationFailed { .. } => "ELEMENT_OPERATION_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ElementError::Stale | ElementError::Unsupported { .. }
        )
    }
}
