//! Send-keys command: focus-aware key delivery and file input handling.

pub mod errors;
pub mod handler;
pub mod types;

pub use errors::SendKeysError;
pub use handler::SendKeysHandler;
pub use types::{InputOutcome, InputRequest};
