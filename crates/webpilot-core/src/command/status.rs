use serde::{Deserialize, Serialize};

/// Wire status codes returned in command responses.
///
/// Numeric values follow the legacy JSON wire protocol; [`StatusCode::as_str`]
/// gives the W3C error name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum StatusCode {
    Success,
    NoSuchElement,
    StaleElementReference,
    ElementNotInteractable,
    InvalidElementState,
    UnknownError,
    Timeout,
    NoSuchWindow,
    InvalidArgument,
}

impl StatusCode {
    pub fn code(&self) -> u16 {
        match self {
            StatusCode::Success => 0,
            StatusCode::NoSuchElement => 7,
            StatusCode::StaleElementReference => 10,
            StatusCode::ElementNotInteractable => 11,
            StatusCode::InvalidElementState => 12,
            StatusCode::UnknownError => 13,
            StatusCode::Timeout => 21,
            StatusCode::NoSuchWindow => 23,
            StatusCode::InvalidArgument => 400,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::Success => "success",
            StatusCode::NoSuchElement => "no such element",
            StatusCode::StaleElementReference => "stale element reference",
            StatusCode::ElementNotInteractable => "element not interactable",
            StatusCode::InvalidElementState => "invalid element state",
            StatusCode::UnknownError => "unknown error",
            StatusCode::Timeout => "timeout",
            StatusCode::NoSuchWindow => "no such window",
            StatusCode::InvalidArgument => "invalid argument",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StatusCode::Success)
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.code())
    }
}

impl From<StatusCode> for u16 {
    fn from(status: StatusCode) -> Self {
        status.code()
    }
}

impl TryFrom<u16> for StatusCode {
    type Error = String;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(StatusCode::Success),
            7 => Ok(StatusCode::NoSuchElement),
            10 => Ok(StatusCode::StaleElementReference),
            11 => Ok(StatusCode::ElementNotInteractable),
            12 => Ok(StatusCode::InvalidElementState),
            13 => Ok(StatusCode::UnknownError),
            21 => Ok(StatusCode::Timeout),
            23 => Ok(StatusCode::NoSuchWindow),
            400 => Ok(StatusCode::InvalidArgument),
            other => Err(format!("Unknown status code: {}", other)),
        }
    }
}
