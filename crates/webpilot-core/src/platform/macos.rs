//! macOS backend: window enumeration through `xcap`, keyboard events through
//! Core Graphics, activation through System Events.

use std::thread;
use std::time::Duration;

use core_graphics::event::{CGEvent, CGEventFlags, CGEventTapLocation, CGKeyCode};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
use tracing::{debug, warn};

use crate::dialog::{
    DialogDriver, DialogDriverError, LocatorError, NativeSurfaceLocator, NativeWindow, SurfaceRole,
};
use crate::focus::{FocusError, FocusProbe};
use crate::session::{ProcessId, WindowHandle};

// SAFETY: FFI declaration for AXIsProcessTrusted from the ApplicationServices framework.
// Returns false when the process lacks accessibility permissions.
#[link(name = "ApplicationServices", kind = "framework")]
unsafe extern "C" {
    fn AXIsProcessTrusted() -> bool;
}

const KEY_G: CGKeyCode = 0x05;
const KEY_RETURN: CGKeyCode = 0x24;

const KEY_EVENT_DELAY: Duration = Duration::from_millis(10);

/// Time for the "Go to folder" sheet to open or close
const SHEET_SETTLE_DELAY: Duration = Duration::from_millis(250);

/// Time for System Events activation to take effect
const FOCUS_SETTLE_DELAY: Duration = Duration::from_millis(50);

fn accessibility_trusted() -> bool {
    unsafe { AXIsProcessTrusted() }
}

/// AppleScript bringing the process with `pid` to the front
fn frontmost_script(pid: u32) -> String {
    format!(
        "tell application \"System Events\" to set frontmost of (first process whose unix id is {}) to true",
        pid
    )
}

fn activate_process(pid: u32) -> Result<(), String> {
    debug!(event = "core.platform.activate_started", pid = pid);

    let output = std::process::Command::new("osascript")
        .arg("-e")
        .arg(frontmost_script(pid))
        .output()
        .map_err(|e| format!("Failed to execute osascript: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!(event = "core.platform.activate_failed", pid = pid, stderr = %stderr);
        return Err(stderr.trim().to_string());
    }

    thread::sleep(FOCUS_SETTLE_DELAY);
    debug!(event = "core.platform.activate_completed", pid = pid);
    Ok(())
}

fn window_handle(window: &xcap::Window) -> Option<WindowHandle> {
    window.id().ok().map(|id| WindowHandle::new(u64::from(id)))
}

fn find_window(handle: WindowHandle) -> Result<xcap::Window, String> {
    xcap::Window::all()
        .map_err(|e| format!("Failed to enumerate windows: {}", e))?
        .into_iter()
        .find(|w| window_handle(w) == Some(handle))
        .ok_or_else(|| format!("window {} not found", handle))
}

/// Focus queries against the window server.
#[derive(Debug, Default)]
pub struct MacFocusProbe;

impl MacFocusProbe {
    pub fn new() -> Self {
        Self
    }
}

impl FocusProbe for MacFocusProbe {
    fn focused_window(&self) -> Option<WindowHandle> {
        let windows = match xcap::Window::all() {
            Ok(windows) => windows,
            Err(e) => {
                warn!(event = "core.platform.focus_query_failed", error = %e);
                return None;
            }
        };
        windows
            .iter()
            .find(|w| w.is_focused().unwrap_or(false))
            .and_then(window_handle)
    }

    fn restore_focus(&self, window: WindowHandle) -> Result<(), FocusError> {
        let restore_failed = |reason: String| FocusError::RestoreFailed { window, reason };

        let target = find_window(window).map_err(restore_failed)?;
        if target.is_minimized().unwrap_or(false) {
            return Err(restore_failed("window is minimized".to_string()));
        }
        let pid = target
            .pid()
            .map_err(|e| restore_failed(format!("Failed to read owner pid: {}", e)))?;
        activate_process(pid).map_err(restore_failed)
    }
}

/// Lists a process's on-screen windows. macOS reports no owner relation, so
/// `parent` is always `None`; window ids grow monotonically and double as
/// creation order.
#[derive(Debug, Default)]
pub struct MacSurfaceLocator;

impl MacSurfaceLocator {
    pub fn new() -> Self {
        Self
    }
}

impl NativeSurfaceLocator for MacSurfaceLocator {
    fn windows_for_process(&self, process_id: ProcessId) -> Result<Vec<NativeWindow>, LocatorError> {
        let windows = xcap::Window::all()
            .map_err(|e| LocatorError::new(format!("Failed to enumerate windows: {}", e)))?;

        Ok(windows
            .iter()
            .filter(|w| w.pid().ok() == Some(process_id.raw()))
            .filter_map(|w| {
                let handle = window_handle(w)?;
                Some(NativeWindow {
                    handle,
                    process_id,
                    parent: None,
                    class_name: w.app_name().unwrap_or_default(),
                    title: w.title().unwrap_or_default(),
                    role: SurfaceRole::Window,
                    created_seq: handle.raw(),
                })
            })
            .collect())
    }
}

/// Fills an open/save panel through its "Go to folder" sheet: Cmd+Shift+G,
/// the path as a unicode string, Return to accept the path and Return again
/// to confirm the panel.
#[derive(Debug, Default)]
pub struct MacDialogDriver;

impl MacDialogDriver {
    pub fn new() -> Self {
        Self
    }

    fn source() -> Result<CGEventSource, DialogDriverError> {
        CGEventSource::new(CGEventSourceStateID::HIDSystemState)
            .map_err(|()| DialogDriverError::failed("Failed to create CGEventSource"))
    }

    fn press(keycode: CGKeyCode, flags: CGEventFlags) -> Result<(), DialogDriverError> {
        let source = Self::source()?;
        let key_down = CGEvent::new_keyboard_event(source.clone(), keycode, true).map_err(|()| {
            DialogDriverError::failed(format!("Failed to create key down event for {}", keycode))
        })?;
        let key_up = CGEvent::new_keyboard_event(source, keycode, false).map_err(|()| {
            DialogDriverError::failed(format!("Failed to create key up event for {}", keycode))
        })?;
        if flags != CGEventFlags::CGEventFlagNull {
            key_down.set_flags(flags);
            key_up.set_flags(flags);
        }
        key_down.post(CGEventTapLocation::HID);
        thread::sleep(KEY_EVENT_DELAY);
        key_up.post(CGEventTapLocation::HID);
        Ok(())
    }

    fn type_string(text: &str) -> Result<(), DialogDriverError> {
        let event = CGEvent::new_keyboard_event(Self::source()?, 0, true)
            .map_err(|()| DialogDriverError::failed("Failed to create keyboard event"))?;
        event.set_string(text);
        event.post(CGEventTapLocation::HID);
        Ok(())
    }

    fn prepare(dialog: &NativeWindow) -> Result<(), DialogDriverError> {
        if !accessibility_trusted() {
            return Err(DialogDriverError::failed(
                "Accessibility permission not granted",
            ));
        }
        activate_process(dialog.process_id.raw()).map_err(DialogDriverError::failed)
    }
}

impl DialogDriver for MacDialogDriver {
    fn enter_text(&self, dialog: &NativeWindow, text: &str) -> Result<(), DialogDriverError> {
        self.focus_text_field(dialog)?;
        Self::type_string(text)?;
        thread::sleep(SHEET_SETTLE_DELAY);

        // The panel must still be on screen; a vanished panel means the
        // keystrokes went elsewhere.
        find_window(dialog.handle).map_err(|_| DialogDriverError::TextRejected)?;
        debug!(
            event = "core.platform.dialog_text_entered",
            dialog = %dialog.handle,
            text_len = text.len()
        );
        Ok(())
    }

    fn focus_text_field(&self, dialog: &NativeWindow) -> Result<(), DialogDriverError> {
        Self::prepare(dialog)?;
        Self::press(
            KEY_G,
            CGEventFlags::CGEventFlagCommand | CGEventFlags::CGEventFlagShift,
        )?;
        thread::sleep(SHEET_SETTLE_DELAY);
        Ok(())
    }

    fn confirm(&self, dialog: &NativeWindow) -> Result<(), DialogDriverError> {
        Self::press(KEY_RETURN, CGEventFlags::CGEventFlagNull)?;
        thread::sleep(SHEET_SETTLE_DELAY);
        Self::press(KEY_RETURN, CGEventFlags::CGEventFlagNull)?;
        debug!(event = "core.platform.dialog_confirmed", dialog = %dialog.handle);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frontmost_script_targets_pid() {
        assert_eq!(
            frontmost_script(4242),
            "tell application \"System Events\" to set frontmost of (first process whose unix id is 4242) to true"
        );
    }

    #[test]
    #[ignore = "requires a desktop session"]
    fn test_focused_window_is_listed() {
        let Some(focused) = MacFocusProbe::new().focused_window() else {
            return;
        };
        assert!(find_window(focused).is_ok());
    }

    #[test]
    #[ignore = "requires a desktop session"]
    fn test_locator_lists_own_process_windows_only() {
        let pid = ProcessId::new(std::process::id());
        let windows = MacSurfaceLocator::new().windows_for_process(pid).unwrap();
        assert!(windows.iter().all(|w| w.process_id == pid));
    }
}
