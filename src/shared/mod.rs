//! Shared state and messaging between the views, the app loop and background tasks

pub mod context;
pub mod messages;
pub mod state;

pub use context::AppContext;
pub use messages::WorkerMessage;
pub use state::{RunId, RuntimeState, SharedAppState, StatusLevel, StatusLine, UiCommand};
