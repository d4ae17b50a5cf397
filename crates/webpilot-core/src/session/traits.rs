use std::sync::Arc;

use super::errors::SessionError;
use super::types::{ProcessId, WindowHandle};
use crate::element::ElementHandle;

/// A live browser instance under automation.
pub trait Browser: Send + Sync {
    /// Process owning the browser's native windows
    fn process_id(&self) -> ProcessId;

    /// Outermost native window of the browser
    fn top_level_window(&self) -> WindowHandle;

    /// Child surface rendering page content, if the platform exposes one
    fn content_window(&self) -> Option<WindowHandle>;

    fn navigate_to_url(&self, url: &str) -> Result<(), SessionError>;

    /// Switch the frame that receives element lookups; `None` selects the top document.
    fn set_focused_frame_by_element(&self, element_id: Option<&str>);
}

/// The session registry: current browser plus element references.
pub trait BrowserSession: Send + Sync {
    fn current_browser(&self) -> Result<Arc<dyn Browser>, SessionError>;

    fn element(&self, id: &str) -> Result<Arc<dyn ElementHandle>, SessionError>;
}
