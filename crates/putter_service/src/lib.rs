pub mod error;
pub mod handlers;
pub mod middleware;
pub mod prompt;
pub mod server;

pub use prompt::PUTTER_EXPERT_PROMPT;
pub use server::{app_config, run, AppState, ServerConfig};
