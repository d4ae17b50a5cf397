//! Focus verification and element focus waiting.

pub mod errors;
pub mod types;
pub mod verifier;
pub mod waiter;

pub use errors::FocusError;
pub use types::FocusState;
pub use verifier::{FocusProbe, ensure_page_focus, verify_page_focus};
pub use waiter::wait_until_element_focused;
