//! webpilot-core: Command execution core for browser automation
//!
//! Delivers typed input to page elements the way a user would: it makes sure
//! the browser window holds OS focus, waits for the element to report focus,
//! places the caret and sends one key event per character. File inputs are
//! handled by driving the native file dialog from a short-lived worker thread.
//!
//! # Main Entry Points
//!
//! - [`send_keys`] - The send-keys command and its delivery pipeline
//! - [`navigation`] - The go-to-url command
//! - [`dialog`] - Native file dialog detection and interaction
//! - [`config`] - Configuration management
//! - [`platform`] - OS backends

pub mod command;
pub mod config;
pub mod dialog;
pub mod element;
pub mod errors;
pub mod focus;
pub mod insertion;
pub mod keys;
pub mod logging;
pub mod navigation;
pub mod platform;
pub mod polling;
pub mod send_keys;
pub mod session;

#[cfg(test)]
mod testing;

// Re-export commonly used types at crate root for convenience
pub use command::{CommandContext, CommandHandler, Parameters, Response, StatusCode};
pub use config::PilotConfig;
pub use dialog::{DialogDriver, DialogGate, NativeSurfaceLocator, NativeWindow};
pub use element::{ElementError, ElementHandle};
pub use errors::PilotError;
pub use focus::{FocusProbe, FocusState};
pub use keys::{Key, NamedKey};
pub use navigation::GoToUrlHandler;
pub use polling::PollOptions;
pub use send_keys::{InputOutcome, InputRequest, SendKeysError, SendKeysHandler};
pub use session::{Browser, BrowserSession, ProcessId, WindowHandle};

// Re-export so embedders can build command contexts without a direct dependency
pub use tokio_util::sync::CancellationToken;

pub use logging::init_logging;
