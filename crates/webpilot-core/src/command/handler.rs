use tokio_util::sync::CancellationToken;

use super::response::Response;
use crate::session::BrowserSession;

/// Parsed parameter map handed over by the dispatch layer.
pub type Parameters = serde_json::Map<String, serde_json::Value>;

/// Everything a handler needs from the invocation besides its parameters.
pub struct CommandContext<'a> {
    session: &'a dyn BrowserSession,
    cancel: CancellationToken,
}

impl<'a> CommandContext<'a> {
    pub fn new(session: &'a dyn BrowserSession, cancel: CancellationToken) -> Self {
        Self { session, cancel }
    }

    pub fn session(&self) -> &'a dyn BrowserSession {
        self.session
    }

    /// Fires when the command is aborted (session timeout, client disconnect)
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }
}

/// A named driver command.
///
/// The dispatch layer routes a command name to one handler and passes the
/// already deserialized parameters. Handlers never fail past this boundary:
/// every outcome is written to `response`.
pub trait CommandHandler: Send + Sync {
    fn execute(&self, ctx: &CommandContext<'_>, parameters: &Parameters, response: &mut Response);
}

/// Read a string parameter
pub fn string_param<'p>(parameters: &'p Parameters, key: &str) -> Option<&'p str> {
    parameters.get(key).and_then(serde_json::Value::as_str)
}
