//! OS backends for focus probing and native dialog handling.
//!
//! Only macOS is provided. Other targets pass their own trait implementations
//! to [`SendKeysHandler::new`](crate::send_keys::SendKeysHandler::new).

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "macos")]
pub use macos::{MacDialogDriver, MacFocusProbe, MacSurfaceLocator};
