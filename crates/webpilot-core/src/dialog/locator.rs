use super::errors::{DialogDriverError, LocatorError};
use super::types::{DialogPattern, NativeWindow};
use crate::session::{ProcessId, WindowHandle};

/// Enumerates the native windows owned by a process.
pub trait NativeSurfaceLocator: Send + Sync {
    fn windows_for_process(&self, process_id: ProcessId) -> Result<Vec<NativeWindow>, LocatorError>;
}

/// Drives an open file dialog.
pub trait DialogDriver: Send + Sync {
    /// Type `text` into the dialog's filename field.
    ///
    /// Returns [`DialogDriverError::TextRejected`] when the field did not
    /// take the text, in which case the caller may focus it and retry.
    fn enter_text(&self, dialog: &NativeWindow, text: &str) -> Result<(), DialogDriverError>;

    fn focus_text_field(&self, dialog: &NativeWindow) -> Result<(), DialogDriverError>;

    /// Press the dialog's confirmation button
    fn confirm(&self, dialog: &NativeWindow) -> Result<(), DialogDriverError>;
}

/// Pick the file dialog belonging to `top_level` from a process's windows.
///
/// Candidates must match `pattern`, must not be the top-level window itself,
/// and must be owned by the top-level window when the platform reports an
/// owner. The most recently created candidate wins.
pub fn select_dialog<'w>(
    windows: &'w [NativeWindow],
    top_level: WindowHandle,
    pattern: &DialogPattern,
) -> Option<&'w NativeWindow> {
    windows
        .iter()
        .filter(|w| w.handle != top_level)
        .filter(|w| w.parent.is_none_or(|parent| parent == top_level))
        .filter(|w| pattern.matches(w))
        .max_by_key(|w| w.created_seq)
}
