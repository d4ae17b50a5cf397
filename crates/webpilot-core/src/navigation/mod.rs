pub mod handler;

pub use handler::GoToUrlHandler;
