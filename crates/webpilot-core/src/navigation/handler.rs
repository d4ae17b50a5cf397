use serde_json::Value;
use tracing::{error, info};

use crate::command::{
    CommandContext, CommandHandler, Parameters, Response, StatusCode, string_param,
};
use crate::session::SessionError;

/// Navigates the current browser to `"url"` and resets the focused frame.
#[derive(Debug, Default)]
pub struct GoToUrlHandler;

impl GoToUrlHandler {
    pub fn new() -> Self {
        Self
    }
}

impl CommandHandler for GoToUrlHandler {
    fn execute(&self, ctx: &CommandContext<'_>, parameters: &Parameters, response: &mut Response) {
        let Some(url) = string_param(parameters, "url") else {
            response.set_error_response(StatusCode::InvalidArgument, "Missing parameter: url");
            return;
        };

        let browser = match ctx.session().current_browser() {
            Ok(browser) => browser,
            Err(e) => {
                response.set_error_response(e.status(), "Unable to get browser");
                return;
            }
        };

        info!(event = "core.navigation.goto_started", url = url);
        if let Err(e) = browser.navigate_to_url(url) {
            let reason = match &e {
                SessionError::NavigationFailed { reason, .. } => reason.clone(),
                other => other.to_string(),
            };
            error!(event = "core.navigation.goto_failed", url = url, error = %e);
            response.set_error_response(
                e.status(),
                format!("Failed to navigate to {}: {}", url, reason),
            );
            return;
        }

        browser.set_focused_frame_by_element(None);
        info!(event = "core.navigation.goto_completed", url = url);
        response.set_success_response(Value::Null);
    }
}
