//! Hand-written fakes of the browser and OS collaborators for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::dialog::{
    DialogDriver, DialogDriverError, LocatorError, NativeSurfaceLocator, NativeWindow, SurfaceRole,
};
use crate::element::{ElementError, ElementHandle};
use crate::focus::{FocusError, FocusProbe};
use crate::keys::Key;
use crate::session::{Browser, BrowserSession, ProcessId, SessionError, WindowHandle};

pub struct FakeBrowser {
    navigation_error: Option<String>,
    visited: Mutex<Vec<String>>,
    focused_frame: Mutex<Option<String>>,
}

impl FakeBrowser {
    pub const PROCESS: ProcessId = ProcessId::new(4242);
    pub const TOP_LEVEL: WindowHandle = WindowHandle::new(0x100);
    pub const CONTENT: WindowHandle = WindowHandle::new(0x101);

    pub fn failing_navigation(mut self, reason: &str) -> Self {
        self.navigation_error = Some(reason.to_string());
        self
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }

    pub fn focused_frame(&self) -> Option<String> {
        self.focused_frame.lock().unwrap().clone()
    }
}

impl Default for FakeBrowser {
    fn default() -> Self {
        Self {
            navigation_error: None,
            visited: Mutex::new(Vec::new()),
            focused_frame: Mutex::new(None),
        }
    }
}

impl Browser for FakeBrowser {
    fn process_id(&self) -> ProcessId {
        Self::PROCESS
    }

    fn top_level_window(&self) -> WindowHandle {
        Self::TOP_LEVEL
    }

    fn content_window(&self) -> Option<WindowHandle> {
        Some(Self::CONTENT)
    }

    fn navigate_to_url(&self, url: &str) -> Result<(), SessionError> {
        if let Some(reason) = &self.navigation_error {
            return Err(SessionError::NavigationFailed {
                url: url.to_string(),
                reason: reason.clone(),
            });
        }
        self.visited.lock().unwrap().push(url.to_string());
        Ok(())
    }

    fn set_focused_frame_by_element(&self, element_id: Option<&str>) {
        *self.focused_frame.lock().unwrap() = element_id.map(str::to_string);
    }
}

pub struct FakeSession {
    browser: Option<Arc<dyn Browser>>,
    elements: HashMap<String, Arc<dyn ElementHandle>>,
}

impl FakeSession {
    pub fn with_browser(browser: Arc<FakeBrowser>) -> Self {
        Self {
            browser: Some(browser as Arc<dyn Browser>),
            elements: HashMap::new(),
        }
    }

    pub fn without_browser() -> Self {
        Self {
            browser: None,
            elements: HashMap::new(),
        }
    }

    pub fn with_element(mut self, element: Arc<FakeElement>) -> Self {
        self.elements.insert(element.id().to_string(), element);
        self
    }
}

impl Default for FakeSession {
    fn default() -> Self {
        Self::with_browser(Arc::new(FakeBrowser::default()))
    }
}

impl BrowserSession for FakeSession {
    fn current_browser(&self) -> Result<Arc<dyn Browser>, SessionError> {
        self.browser.clone().ok_or(SessionError::NoSuchWindow)
    }

    fn element(&self, id: &str) -> Result<Arc<dyn ElementHandle>, SessionError> {
        self.elements
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::NoSuchElement { id: id.to_string() })
    }
}

#[derive(Debug, Clone, Copy)]
enum CaretFault {
    Stale,
    Refused,
}

pub struct FakeElement {
    id: String,
    displayed: bool,
    enabled: bool,
    file_input: bool,
    stale: bool,
    /// Check number on which focus is first reported; `None` never
    focused_after: Option<u32>,
    content: Option<String>,
    fail_key_after: Option<usize>,
    caret_fault: Option<CaretFault>,
    accepts_assignment: bool,
    focus_checks: AtomicU32,
    clicks: AtomicU32,
    caret: Mutex<Option<usize>>,
    keys: Mutex<Vec<Key>>,
    assigned: Mutex<Option<String>>,
}

impl FakeElement {
    pub fn text_field(id: &str) -> Self {
        Self {
            id: id.to_string(),
            displayed: true,
            enabled: true,
            file_input: false,
            stale: false,
            focused_after: Some(1),
            content: Some(String::new()),
            fail_key_after: None,
            caret_fault: None,
            accepts_assignment: false,
            focus_checks: AtomicU32::new(0),
            clicks: AtomicU32::new(0),
            caret: Mutex::new(None),
            keys: Mutex::new(Vec::new()),
            assigned: Mutex::new(None),
        }
    }

    pub fn file_input(id: &str) -> Self {
        Self {
            file_input: true,
            content: None,
            ..Self::text_field(id)
        }
    }

    pub fn with_content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn without_caret(mut self) -> Self {
        self.content = None;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn focused_after(mut self, checks: u32) -> Self {
        self.focused_after = Some(checks);
        self
    }

    pub fn never_focused(mut self) -> Self {
        self.focused_after = None;
        self
    }

    pub fn stale(mut self) -> Self {
        self.stale = true;
        self
    }

    pub fn failing_key_after(mut self, keys: usize) -> Self {
        self.fail_key_after = Some(keys);
        self
    }

    /// Content is readable but the element detaches when the caret moves
    pub fn stale_at_caret(mut self) -> Self {
        self.caret_fault = Some(CaretFault::Stale);
        self
    }

    pub fn refusing_caret(mut self) -> Self {
        self.caret_fault = Some(CaretFault::Refused);
        self
    }

    pub fn accepting_assignment(mut self) -> Self {
        self.accepts_assignment = true;
        self
    }

    pub fn focus_checks(&self) -> u32 {
        self.focus_checks.load(Ordering::SeqCst)
    }

    pub fn clicks(&self) -> u32 {
        self.clicks.load(Ordering::SeqCst)
    }

    pub fn caret(&self) -> Option<usize> {
        *self.caret.lock().unwrap()
    }

    pub fn keys(&self) -> Vec<Key> {
        self.keys.lock().unwrap().clone()
    }

    /// Literal characters received, in order
    pub fn typed_text(&self) -> String {
        self.keys()
            .into_iter()
            .filter_map(|key| match key {
                Key::Char(c) => Some(c),
                Key::Named(_) => None,
            })
            .collect()
    }

    pub fn assigned_file(&self) -> Option<String> {
        self.assigned.lock().unwrap().clone()
    }

    fn attached(&self) -> Result<(), ElementError> {
        if self.stale {
            Err(ElementError::Stale)
        } else {
            Ok(())
        }
    }
}

impl ElementHandle for FakeElement {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_displayed(&self) -> Result<bool, ElementError> {
        self.attached()?;
        Ok(self.displayed)
    }

    fn is_enabled(&self) -> Result<bool, ElementError> {
        self.attached()?;
        Ok(self.enabled)
    }

    fn is_file_input(&self) -> Result<bool, ElementError> {
        self.attached()?;
        Ok(self.file_input)
    }

    fn focus(&self) -> Result<(), ElementError> {
        self.attached()
    }

    fn is_focused(&self) -> Result<bool, ElementError> {
        self.attached()?;
        let check = self.focus_checks.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(self.focused_after.is_some_and(|after| check >= after))
    }

    fn content_length(&self) -> Result<Option<usize>, ElementError> {
        self.attached()?;
        Ok(self.content.as_ref().map(|c| c.chars().count()))
    }

    fn set_caret(&self, offset: usize) -> Result<(), ElementError> {
        self.attached()?;
        match self.caret_fault {
            Some(CaretFault::Stale) => return Err(ElementError::Stale),
            Some(CaretFault::Refused) => {
                return Err(ElementError::OperationFailed {
                    operation: "caret placement",
                    reason: "selection range rejected".to_string(),
                });
            }
            None => {}
        }
        *self.caret.lock().unwrap() = Some(offset);
        Ok(())
    }

    fn send_key(&self, key: Key) -> Result<(), ElementError> {
        self.attached()?;
        let mut keys = self.keys.lock().unwrap();
        if self.fail_key_after.is_some_and(|limit| keys.len() >= limit) {
            return Err(ElementError::OperationFailed {
                operation: "key delivery",
                reason: "element detached".to_string(),
            });
        }
        keys.push(key);
        Ok(())
    }

    fn click(&self) -> Result<(), ElementError> {
        self.attached()?;
        self.clicks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn assign_file_value(&self, path: &str) -> Result<bool, ElementError> {
        self.attached()?;
        if !self.accepts_assignment {
            return Ok(false);
        }
        *self.assigned.lock().unwrap() = Some(path.to_string());
        Ok(true)
    }
}

pub struct FakeProbe {
    focused: Mutex<Option<WindowHandle>>,
    fail_restore: bool,
    restore_calls: AtomicU32,
}

impl FakeProbe {
    pub fn focused(window: Option<WindowHandle>) -> Self {
        Self {
            focused: Mutex::new(window),
            fail_restore: false,
            restore_calls: AtomicU32::new(0),
        }
    }

    pub fn with_failing_restore(mut self) -> Self {
        self.fail_restore = true;
        self
    }

    pub fn restore_calls(&self) -> u32 {
        self.restore_calls.load(Ordering::SeqCst)
    }
}

impl FocusProbe for FakeProbe {
    fn focused_window(&self) -> Option<WindowHandle> {
        *self.focused.lock().unwrap()
    }

    fn restore_focus(&self, window: WindowHandle) -> Result<(), FocusError> {
        self.restore_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_restore {
            return Err(FocusError::RestoreFailed {
                window,
                reason: "window is minimized".to_string(),
            });
        }
        *self.focused.lock().unwrap() = Some(window);
        Ok(())
    }
}

/// A file dialog owned by `parent`; newer handles sort as newer windows.
pub fn dialog_window(handle: WindowHandle, parent: WindowHandle) -> NativeWindow {
    NativeWindow {
        handle,
        process_id: FakeBrowser::PROCESS,
        parent: Some(parent),
        class_name: "#32770".to_string(),
        title: "Open".to_string(),
        role: SurfaceRole::Window,
        created_seq: handle.raw(),
    }
}

pub struct FakeLocator {
    dialog: Option<NativeWindow>,
    appears_after: Duration,
    error: Option<String>,
    per_call: Duration,
    first_call: Mutex<Option<Instant>>,
}

impl FakeLocator {
    pub fn empty() -> Self {
        Self {
            dialog: None,
            appears_after: Duration::ZERO,
            error: None,
            per_call: Duration::ZERO,
            first_call: Mutex::new(None),
        }
    }

    pub fn with_dialog(dialog: NativeWindow) -> Self {
        Self::dialog_after(Duration::ZERO, dialog)
    }

    /// Dialog becomes visible `delay` after the first enumeration
    pub fn dialog_after(delay: Duration, dialog: NativeWindow) -> Self {
        Self {
            dialog: Some(dialog),
            appears_after: delay,
            ..Self::empty()
        }
    }

    /// Every enumeration blocks for `delay` before answering
    pub fn with_enumeration_delay(mut self, delay: Duration) -> Self {
        self.per_call = delay;
        self
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            error: Some(reason.to_string()),
            ..Self::empty()
        }
    }
}

impl NativeSurfaceLocator for FakeLocator {
    fn windows_for_process(&self, process_id: ProcessId) -> Result<Vec<NativeWindow>, LocatorError> {
        std::thread::sleep(self.per_call);
        if let Some(reason) = &self.error {
            return Err(LocatorError::new(reason.clone()));
        }
        let started = *self
            .first_call
            .lock()
            .unwrap()
            .get_or_insert_with(Instant::now);

        let mut windows = vec![NativeWindow {
            handle: FakeBrowser::TOP_LEVEL,
            process_id,
            parent: None,
            class_name: "BrowserFrame".to_string(),
            title: "Example Domain".to_string(),
            role: SurfaceRole::Window,
            created_seq: 0,
        }];
        if started.elapsed() >= self.appears_after {
            windows.extend(self.dialog.clone());
        }
        Ok(windows)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    EnterText(String),
    FocusTextField,
    Confirm,
}

#[derive(Default)]
pub struct FakeDriver {
    reject_first_text: bool,
    reject_all_text: bool,
    fail_confirm: bool,
    enter_delay: Duration,
    calls: Mutex<Vec<DriverCall>>,
}

impl FakeDriver {
    pub fn rejecting_first_text(mut self) -> Self {
        self.reject_first_text = true;
        self
    }

    pub fn rejecting_all_text(mut self) -> Self {
        self.reject_all_text = true;
        self
    }

    pub fn failing_confirm(mut self) -> Self {
        self.fail_confirm = true;
        self
    }

    pub fn with_enter_delay(mut self, delay: Duration) -> Self {
        self.enter_delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<DriverCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn confirm_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| **call == DriverCall::Confirm)
            .count()
    }
}

impl DialogDriver for FakeDriver {
    fn enter_text(&self, _dialog: &NativeWindow, text: &str) -> Result<(), DialogDriverError> {
        std::thread::sleep(self.enter_delay);
        let mut calls = self.calls.lock().unwrap();
        let first = !calls.iter().any(|c| matches!(c, DriverCall::EnterText(_)));
        calls.push(DriverCall::EnterText(text.to_string()));
        if self.reject_all_text || (self.reject_first_text && first) {
            return Err(DialogDriverError::TextRejected);
        }
        Ok(())
    }

    fn focus_text_field(&self, _dialog: &NativeWindow) -> Result<(), DialogDriverError> {
        self.calls.lock().unwrap().push(DriverCall::FocusTextField);
        Ok(())
    }

    fn confirm(&self, _dialog: &NativeWindow) -> Result<(), DialogDriverError> {
        self.calls.lock().unwrap().push(DriverCall::Confirm);
        if self.fail_confirm {
            return Err(DialogDriverError::failed("confirm button not found"));
        }
        Ok(())
    }
}
