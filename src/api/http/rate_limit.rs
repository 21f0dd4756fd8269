// src/api/http/rate_limit.rs
// Fixed-window admission control per caller, applied in front of /api routes

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::warn;

use crate::api::error::ApiError;

pub const WINDOW: Duration = Duration::from_secs(60);

/// Callers tracked before expired windows are swept
const SWEEP_THRESHOLD: usize = 1024;

#[derive(Debug, Clone, Copy)]
struct Window {
    opened: Instant,
    count: u32,
}

#[derive(Clone)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    callers: Arc<Mutex<HashMap<String, Window>>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            callers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn per_minute(max_requests: u32) -> Self {
        Self::new(max_requests, WINDOW)
    }

    /// Count one request for `caller`. Returns false once the caller has
    /// used up the current window.
    pub async fn check(&self, caller: &str) -> bool {
        self.check_at(caller, Instant::now()).await
    }

    async fn check_at(&self, caller: &str, now: Instant) -> bool {
        let mut callers = self.callers.lock().await;

        if callers.len() >= SWEEP_THRESHOLD {
            let window = self.window;
            callers.retain(|_, w| now.duration_since(w.opened) < window);
        }

        let entry = callers.entry(caller.to_string()).or_insert(Window {
            opened: now,
            count: 0,
        });

        if now.duration_since(entry.opened) >= self.window {
            entry.opened = now;
            entry.count = 0;
        }

        if entry.count >= self.max_requests {
            warn!(caller, limit = self.max_requests, "rate limit exceeded");
            return false;
        }

        entry.count += 1;
        true
    }
}

/// Caller identity: peer IP when the server provides connection info
fn caller_key(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    let caller = caller_key(&request);

    if !limiter.check(&caller).await {
        return ApiError::RateLimited.into_response();
    }

    next.run(request).await
}
