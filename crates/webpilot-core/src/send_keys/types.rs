use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::dialog::DialogOutcome;
use crate::element::ElementHandle;
use crate::insertion::InsertionPoint;

/// One send-keys invocation: the target element and the text to deliver.
#[derive(Clone)]
pub struct InputRequest {
    element: Arc<dyn ElementHandle>,
    text: String,
    file_upload: bool,
}

impl InputRequest {
    pub fn new(element: Arc<dyn ElementHandle>, text: impl Into<String>) -> Self {
        Self {
            element,
            text: text.into(),
            file_upload: false,
        }
    }

    /// Route the text through the native file dialog
    pub fn file_upload(element: Arc<dyn ElementHandle>, path: impl Into<String>) -> Self {
        Self {
            element,
            text: path.into(),
            file_upload: true,
        }
    }

    pub fn element(&self) -> &dyn ElementHandle {
        self.element.as_ref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_file_upload(&self) -> bool {
        self.file_upload
    }
}

impl fmt::Debug for InputRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputRequest")
            .field("element", &self.element.id())
            .field("text_len", &self.text.chars().count())
            .field("file_upload", &self.file_upload)
            .finish()
    }
}

/// What a successful delivery did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputOutcome {
    pub keys_delivered: usize,
    /// Element focus checks performed; zero on the dialog path
    pub focus_checks: u32,
    pub insertion: Option<InsertionPoint>,
    pub dialog: Option<DialogOutcome>,
}
