// src/state.rs
// Shared, read-only application state handed to every handler

use std::sync::Arc;

use crate::{
    api::http::rate_limit::RateLimiter,
    config::RelayConfig,
    llm::{GeminiClient, HttpTransport, JsonTransport},
};

#[derive(Clone)]
pub struct AppState {
    pub gemini: GeminiClient,
    pub limiter: RateLimiter,
}

impl AppState {
    /// State backed by the real HTTP transport
    pub fn new(config: RelayConfig) -> Self {
        Self::with_transport(config, Arc::new(HttpTransport::new()))
    }

    /// State with a substituted transport, used by tests
    pub fn with_transport(config: RelayConfig, transport: Arc<dyn JsonTransport>) -> Self {
        let limiter = RateLimiter::per_minute(config.rate_limit_per_minute);
        Self {
            gemini: GeminiClient::new(Arc::new(config), transport),
            limiter,
        }
    }
}
