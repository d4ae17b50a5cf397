//! Caret placement before literal character input.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::element::{ElementError, ElementHandle};
use crate::errors::PilotError;

/// Where the caret was placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsertionPoint {
    /// After the last character of the existing content
    End { offset: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum InsertionError {
    #[error("Insertion point unavailable: {reason}")]
    Unavailable { reason: String },

    /// The element itself failed, e.g. it left the page
    #[error(transparent)]
    Element { source: ElementError },
}

impl PilotError for InsertionError {
    fn error_code(&self) -> &'static str {
        match self {
            InsertionError::Unavailable { .. } => "INSERTION_POINT_UNAVAILABLE",
            InsertionError::Element { source } => source.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            InsertionError::Unavailable { .. } => false,
            InsertionError::Element { source } => source.is_user_error(),
        }
    }
}

impl From<ElementError> for InsertionError {
    /// A detached element is fatal; anything else means the caret could not
    /// be placed.
    fn from(error: ElementError) -> Self {
        match error {
            ElementError::Stale => InsertionError::Element { source: error },
            other => InsertionError::Unavailable {
                reason: other.to_string(),
            },
        }
    }
}

/// Place the caret at the end of the element's content so typed keys append.
///
/// # Errors
///
/// `InsertionError::Unavailable` when the element has no caret concept or
/// refuses the position. Callers skip positioning and rely on the element's
/// own default in that case. `InsertionError::Element` when the element is
/// gone; callers must fail the command.
pub fn set_insertion_point(element: &dyn ElementHandle) -> Result<InsertionPoint, InsertionError> {
    let Some(length) = element.content_length()? else {
        return Err(InsertionError::Unavailable {
            reason: "element exposes no caret position".to_string(),
        });
    };

    element.set_caret(length)?;

    debug!(
        event = "core.insertion.set_completed",
        element = element.id(),
        offset = length
    );
    Ok(InsertionPoint::End { offset: length })
}
