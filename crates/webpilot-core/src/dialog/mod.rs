//! Native file dialog bridge.
//!
//! A file input's click opens a modal OS dialog that blocks the browser's UI
//! thread until dismissed. The bridge runs a short-lived worker that finds
//! that dialog among the browser process's windows, types the path and
//! confirms it, while the command thread waits with a hard deadline.
//!
//! At most one wait is alive per top-level window ([`DialogGate`]). A worker
//! abandoned after a timeout keeps its slot until it exits and is revoked so
//! it never touches a dialog again.

pub mod bridge;
pub mod errors;
pub mod gate;
pub mod locator;
pub mod types;

pub use bridge::{DialogBridge, PendingDialog, run_dialog_wait};
pub use errors::{DialogDriverError, DialogError, LocatorError};
pub use gate::{DialogGate, DialogTicket};
pub use locator::{DialogDriver, NativeSurfaceLocator, select_dialog};
pub use types::{DialogOutcome, DialogPattern, DialogWaitContext, NativeWindow, SurfaceRole};
