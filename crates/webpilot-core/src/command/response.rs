use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::status::StatusCode;

/// Response sink filled in by a command handler.
///
/// Serialized as `{"status": <code>, "value": <payload>}`. Error responses carry
/// `{"error": <w3c name>, "message": <text>}` as the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    status: StatusCode,
    value: Value,
}

impl Response {
    /// A fresh response; handlers are expected to overwrite it.
    pub fn new() -> Self {
        Self {
            status: StatusCode::Success,
            value: Value::Null,
        }
    }

    pub fn set_success_response(&mut self, value: Value) {
        self.status = StatusCode::Success;
        self.value = value;
    }

    pub fn set_error_response(&mut self, status: StatusCode, message: impl Into<String>) {
        self.status = status;
        self.value = serde_json::json!({
            "error": status.as_str(),
            "message": message.into(),
        });
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Error message, if this is an error response
    pub fn error_message(&self) -> Option<&str> {
        if self.is_success() {
            return None;
        }
        self.value.get("message").and_then(Value::as_str)
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}
