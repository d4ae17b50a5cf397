use std::sync::Arc;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::errors::SendKeysError;
use super::types::{InputOutcome, InputRequest};
use crate::command::{
    CommandContext, CommandHandler, Parameters, Response, StatusCode, string_param,
};
use crate::config::PilotConfig;
use crate::dialog::{
    DialogBridge, DialogDriver, DialogError, DialogGate, DialogWaitContext, NativeSurfaceLocator,
};
use crate::element::ElementHandle;
use crate::errors::PilotError;
use crate::focus::{FocusProbe, ensure_page_focus, wait_until_element_focused};
use crate::insertion::{InsertionError, set_insertion_point};
use crate::keys;
use crate::session::Browser;

/// The send-keys command: typed input for ordinary elements, native dialog
/// interaction for file inputs.
pub struct SendKeysHandler {
    config: PilotConfig,
    focus_probe: Arc<dyn FocusProbe>,
    bridge: DialogBridge,
}

impl SendKeysHandler {
    pub fn new(
        config: PilotConfig,
        focus_probe: Arc<dyn FocusProbe>,
        locator: Arc<dyn NativeSurfaceLocator>,
        driver: Arc<dyn DialogDriver>,
    ) -> Self {
        Self {
            config,
            focus_probe,
            bridge: DialogBridge::new(locator, driver, Arc::new(DialogGate::new())),
        }
    }

    pub fn config(&self) -> &PilotConfig {
        &self.config
    }

    pub fn gate(&self) -> &Arc<DialogGate> {
        self.bridge.gate()
    }

    /// Deliver the request's text to its element.
    ///
    /// File inputs (flagged on the request or reported by the element) go
    /// through the native dialog bridge; everything else is typed key by key
    /// after focus has been confirmed.
    ///
    /// # Errors
    ///
    /// See [`SendKeysError`]. Keys already delivered when a failure occurs are
    /// not rolled back.
    pub fn deliver(
        &self,
        browser: &dyn Browser,
        request: &InputRequest,
        cancel: &CancellationToken,
    ) -> Result<InputOutcome, SendKeysError> {
        let element = request.element();
        info!(
            event = "core.send_keys.deliver_started",
            element = element.id(),
            file_upload = request.is_file_upload()
        );

        let result = ensure_interactable(element).and_then(|()| {
            if request.is_file_upload() || element.is_file_input()? {
                self.deliver_file(browser, request, cancel)
            } else {
                self.deliver_keys(browser, request, cancel)
            }
        });

        match &result {
            Ok(outcome) => info!(
                event = "core.send_keys.deliver_completed",
                element = element.id(),
                keys_delivered = outcome.keys_delivered,
                focus_checks = outcome.focus_checks,
                via_dialog = outcome.dialog.is_some()
            ),
            Err(e) if e.is_user_error() => warn!(
                event = "core.send_keys.deliver_failed",
                element = element.id(),
                operation = e.operation(),
                error = %e,
                error_code = e.error_code()
            ),
            Err(e) => error!(
                event = "core.send_keys.deliver_failed",
                element = element.id(),
                operation = e.operation(),
                error = %e,
                error_code = e.error_code()
            ),
        }
        result
    }

    fn deliver_keys(
        &self,
        browser: &dyn Browser,
        request: &InputRequest,
        cancel: &CancellationToken,
    ) -> Result<InputOutcome, SendKeysError> {
        let element = request.element();

        ensure_page_focus(
            self.focus_probe.as_ref(),
            browser.top_level_window(),
            browser.content_window(),
        );

        element.focus()?;
        let focus_checks =
            wait_until_element_focused(element, &self.config.focus.wait_options(), cancel)
                .map_err(|e| SendKeysError::from_focus(element.id(), e))?;

        let insertion = match set_insertion_point(element) {
            Ok(point) => Some(point),
            Err(InsertionError::Element { source }) => {
                return Err(SendKeysError::Element { source });
            }
            Err(e) => {
                let e = SendKeysError::InsertionPointUnavailable {
                    reason: e.to_string(),
                };
                warn!(
                    event = "core.send_keys.insertion_skipped",
                    element = element.id(),
                    error = %e
                );
                None
            }
        };

        let keys = keys::decode(request.text());
        let total = keys.len();
        for (delivered, key) in keys.into_iter().enumerate() {
            if cancel.is_cancelled() {
                info!(
                    event = "core.send_keys.delivery_cancelled",
                    element = element.id(),
                    delivered = delivered,
                    total = total
                );
                return Err(SendKeysError::Cancelled);
            }
            element
                .send_key(key)
                .map_err(|e| SendKeysError::KeyDeliveryFailed {
                    delivered,
                    total,
                    reason: e.to_string(),
                })?;
        }

        Ok(InputOutcome {
            keys_delivered: total,
            focus_checks,
            insertion,
            dialog: None,
        })
    }

    fn deliver_file(
        &self,
        browser: &dyn Browser,
        request: &InputRequest,
        cancel: &CancellationToken,
    ) -> Result<InputOutcome, SendKeysError> {
        let element = request.element();
        let dialog = &self.config.dialog;
        let ctx = DialogWaitContext::new(
            browser.process_id(),
            browser.top_level_window(),
            request.text(),
            dialog.pattern(),
            dialog.wait_options(),
        );

        let pending = self.bridge.spawn(ctx)?;

        // Opens the dialog; on some platforms blocks until it is dismissed.
        if let Err(e) = element.click() {
            pending.revoke();
            return Err(e.into());
        }

        match pending.wait(cancel) {
            Ok(outcome) => Ok(InputOutcome {
                keys_delivered: 0,
                focus_checks: 0,
                insertion: None,
                dialog: Some(outcome),
            }),
            Err(not_found @ DialogError::NotFound { .. }) => {
                assign_without_dialog(element, request.text(), not_found)
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn ensure_interactable(element: &dyn ElementHandle) -> Result<(), SendKeysError> {
    let reason = if !element.is_displayed()? {
        "element is not displayed"
    } else if !element.is_enabled()? {
        "element is disabled"
    } else {
        return Ok(());
    };
    Err(SendKeysError::ElementNotInteractable {
        element: element.id().to_string(),
        reason: reason.to_string(),
    })
}

fn assign_without_dialog(
    element: &dyn ElementHandle,
    path: &str,
    not_found: DialogError,
) -> Result<InputOutcome, SendKeysError> {
    if element.assign_file_value(path)? {
        info!(
            event = "core.send_keys.file_assigned_directly",
            element = element.id()
        );
        Ok(InputOutcome {
            keys_delivered: 0,
            focus_checks: 0,
            insertion: None,
            dialog: None,
        })
    } else {
        Err(not_found.into())
    }
}

/// Text payload: `"value"` as a string or array of strings, else `"text"`.
fn text_param(parameters: &Parameters) -> Option<String> {
    match parameters.get("value") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Array(parts)) => parts
            .iter()
            .map(|p| p.as_str())
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.concat()),
        _ => string_param(parameters, "text").map(str::to_string),
    }
}

impl CommandHandler for SendKeysHandler {
    fn execute(&self, ctx: &CommandContext<'_>, parameters: &Parameters, response: &mut Response) {
        let Some(id) = string_param(parameters, "id") else {
            response.set_error_response(StatusCode::InvalidArgument, "Missing parameter: id");
            return;
        };
        let Some(text) = text_param(parameters) else {
            response.set_error_response(StatusCode::InvalidArgument, "Missing parameter: value");
            return;
        };
        let file_upload = parameters
            .get("file")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let browser = match ctx.session().current_browser() {
            Ok(browser) => browser,
            Err(e) => {
                response.set_error_response(e.status(), "Unable to get browser");
                return;
            }
        };
        let element = match ctx.session().element(id) {
            Ok(element) => element,
            Err(e) => {
                response.set_error_response(e.status(), e.to_string());
                return;
            }
        };

        let request = if file_upload {
            InputRequest::file_upload(element, text)
        } else {
            InputRequest::new(element, text)
        };

        match self.deliver(browser.as_ref(), &request, ctx.cancel_token()) {
            Ok(_) => response.set_success_response(Value::Null),
            Err(e) => response.set_error_response(
                e.status(),
                format!("Failed during {}: {}", e.operation(), e),
            ),
        }
    }
}
