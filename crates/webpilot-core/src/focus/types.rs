use serde::{Deserialize, Serialize};

/// Which native surface holds OS input focus at the moment of the check.
///
/// Recomputed on every check; focus can move between producer and consumer,
/// so a value is never carried across operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusState {
    /// The browser frame has focus, but not its content surface
    TopLevel,
    /// The surface rendering page content has focus; input reaches the page
    ChildSurface,
    /// Some other window (or none) has focus
    Unfocused,
}

impl FocusState {
    /// Whether keyboard input would reach the browser at all
    pub fn is_browser_focused(&self) -> bool {
        !matches!(self, FocusState::Unfocused)
    }
}
