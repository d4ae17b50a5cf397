use tracing::{debug, info, warn};

use super::errors::FocusError;
use super::types::FocusState;
use crate::session::WindowHandle;

/// OS-level focus queries and the single restoration primitive.
pub trait FocusProbe: Send + Sync {
    /// Window currently holding keyboard focus, if any
    fn focused_window(&self) -> Option<WindowHandle>;

    /// Bring `window` to the foreground and give it keyboard focus
    fn restore_focus(&self, window: WindowHandle) -> Result<(), FocusError>;
}

/// Classify the current OS focus relative to the browser's windows.
///
/// A pure read: nothing is cached and nothing is changed.
pub fn verify_page_focus(
    probe: &dyn FocusProbe,
    top_level: WindowHandle,
    content: Option<WindowHandle>,
) -> FocusState {
    let state = match probe.focused_window() {
        Some(focused) if Some(focused) == content => FocusState::ChildSurface,
        Some(focused) if focused == top_level => FocusState::TopLevel,
        _ => FocusState::Unfocused,
    };

    debug!(
        event = "core.focus.verify_completed",
        top_level = %top_level,
        state = ?state
    );
    state
}

/// Verify focus and, if the browser is not focused, restore it exactly once.
///
/// Returns the state observed after the (optional) restoration. A failed or
/// ineffective restore is logged, not raised: the element focus wait that
/// follows decides whether input can proceed.
pub fn ensure_page_focus(
    probe: &dyn FocusProbe,
    top_level: WindowHandle,
    content: Option<WindowHandle>,
) -> FocusState {
    let state = verify_page_focus(probe, top_level, content);
    if state.is_browser_focused() {
        return state;
    }

    info!(event = "core.focus.restore_started", top_level = %top_level);
    if let Err(e) = probe.restore_focus(top_level) {
        warn!(
            event = "core.focus.restore_failed",
            top_level = %top_level,
            error = %e
        );
        return state;
    }

    let restored = verify_page_focus(probe, top_level, content);
    if restored.is_browser_focused() {
        info!(event = "core.focus.restore_completed", state = ?restored);
    } else {
        warn!(
            event = "core.focus.restore_ineffective",
            top_level = %top_level
        );
    }
    restored
}
