use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::polling::PollOptions;
use crate::session::{ProcessId, WindowHandle};

/// Role the platform's accessibility layer reports for a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceRole {
    Window,
    Dialog,
    Other,
}

/// One native window owned by the browser process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeWindow {
    pub handle: WindowHandle,
    pub process_id: ProcessId,
    /// Owner window, when the platform reports ownership
    pub parent: Option<WindowHandle>,
    pub class_name: String,
    pub title: String,
    pub role: SurfaceRole,
    /// Monotonic creation order; higher is newer
    pub created_seq: u64,
}

/// Class/title predicate identifying the file dialog among a process's windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogPattern {
    class_names: Vec<String>,
    title_patterns: Vec<String>,
}

impl DialogPattern {
    pub fn new(class_names: Vec<String>, title_patterns: Vec<String>) -> Self {
        Self {
            class_names,
            title_patterns,
        }
    }

    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    pub fn title_patterns(&self) -> &[String] {
        &self.title_patterns
    }

    /// A window matches when it reports the dialog role, carries one of the
    /// dialog classes, or its title equals one of the patterns (case-insensitive).
    pub fn matches(&self, window: &NativeWindow) -> bool {
        if window.role == SurfaceRole::Dialog {
            return true;
        }
        if self.class_names.iter().any(|c| c == &window.class_name) {
            return true;
        }
        let title = window.title.trim().to_lowercase();
        !title.is_empty()
            && self
                .title_patterns
                .iter()
                .any(|p| p.to_lowercase() == title)
    }
}

/// Snapshot handed to the dialog worker.
///
/// Moved into the worker at spawn; the command thread keeps no reference to it.
#[derive(Debug, Clone)]
pub struct DialogWaitContext {
    generation: Uuid,
    process_id: ProcessId,
    top_level: WindowHandle,
    dialog: Option<WindowHandle>,
    text: String,
    pattern: DialogPattern,
    options: PollOptions,
}

impl DialogWaitContext {
    pub fn new(
        process_id: ProcessId,
        top_level: WindowHandle,
        text: impl Into<String>,
        pattern: DialogPattern,
        options: PollOptions,
    ) -> Self {
        Self {
            generation: Uuid::new_v4(),
            process_id,
            top_level,
            dialog: None,
            text: text.into(),
            pattern,
            options,
        }
    }

    pub fn generation(&self) -> Uuid {
        self.generation
    }

    pub fn process_id(&self) -> ProcessId {
        self.process_id
    }

    pub fn top_level(&self) -> WindowHandle {
        self.top_level
    }

    /// Resolved dialog, once the worker has found it
    pub fn dialog(&self) -> Option<WindowHandle> {
        self.dialog
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn pattern(&self) -> &DialogPattern {
        &self.pattern
    }

    pub fn options(&self) -> &PollOptions {
        &self.options
    }

    pub(crate) fn resolve_dialog(&mut self, dialog: WindowHandle) {
        self.dialog = Some(dialog);
    }
}

/// Result of a completed dialog interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialogOutcome {
    pub dialog: WindowHandle,
    pub checks: u32,
    pub elapsed: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(class_name: &str, title: &str, role: SurfaceRole) -> NativeWindow {
        NativeWindow {
            handle: WindowHandle::new(1),
            process_id: ProcessId::new(10),
            parent: None,
            class_name: class_name.to_string(),
            title: title.to_string(),
            role,
            created_seq: 1,
        }
    }

    fn pattern() -> DialogPattern {
        DialogPattern::new(
            vec!["#32770".to_string()],
            vec!["Choose File to Upload".to_string(), "Open".to_string()],
        )
    }

    #[test]
    fn test_pattern_matches_class() {
        assert!(pattern().matches(&window("#32770", "", SurfaceRole::Window)));
    }

    #[test]
    fn test_pattern_matches_title_case_insensitive() {
        assert!(pattern().matches(&window("NSWindow", "choose file to upload", SurfaceRole::Window)));
        assert!(pattern().matches(&window("NSWindow", " Open ", SurfaceRole::Window)));
    }

    #[test]
    fn test_pattern_matches_dialog_role() {
        assert!(pattern().matches(&window("NSPanel", "Anything", SurfaceRole::Dialog)));
    }

    #[test]
    fn test_pattern_rejects_browser_windows() {
        assert!(!pattern().matches(&window("Chrome_WidgetWin_1", "Example Domain", SurfaceRole::Window)));
        assert!(!pattern().matches(&window("NSWindow", "", SurfaceRole::Other)));
        assert!(!pattern().matches(&window("NSWindow", "Opening soon", SurfaceRole::Window)));
    }

    #[test]
    fn test_wait_context_generations_are_unique() {
        let options = PollOptions::new(100, 1000);
        let a = DialogWaitContext::new(ProcessId::new(1), WindowHandle::new(2), "/tmp/a", pattern(), options);
        let b = DialogWaitContext::new(ProcessId::new(1), WindowHandle::new(2), "/tmp/a", pattern(), options);
        assert_ne!(a.generation(), b.generation());
        assert_eq!(a.dialog(), None);
        assert_eq!(a.text(), "/tmp/a");
    }
}
