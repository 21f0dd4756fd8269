// src/lib.rs

pub mod api;
pub mod config;
pub mod feedback;
pub mod llm;
pub mod prompt;
pub mod state;
pub mod types;

pub use api::create_router;
pub use config::RelayConfig;
pub use state::AppState;
