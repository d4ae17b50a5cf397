pub mod errors;
pub mod traits;
pub mod types;

pub use errors::SessionError;
pub use traits::{Browser, BrowserSession};
pub use types::{ProcessId, WindowHandle};
