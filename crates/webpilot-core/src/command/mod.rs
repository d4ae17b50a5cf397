pub mod handler;
pub mod response;
pub mod status;

pub use handler::{CommandContext, CommandHandler, Parameters, string_param};
pub use response::Response;
pub use status::StatusCode;
