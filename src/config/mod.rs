// src/config/mod.rs
// Process configuration, loaded once at startup and shared read-only

use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta2";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 60;

/// How the API credential is attached to outbound calls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthMode {
    /// `?key=<credential>` on the request URL
    #[default]
    Key,
    /// `Authorization: Bearer <credential>`
    Bearer,
    /// Anything else; no credential is sent
    Unrecognized(String),
}

impl AuthMode {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "key" => AuthMode::Key,
            "bearer" => AuthMode::Bearer,
            other => AuthMode::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AuthMode::Key => "key",
            AuthMode::Bearer => "bearer",
            AuthMode::Unrecognized(s) => s,
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    // ── Upstream API
    pub api_key: Option<String>,
    pub model: String,
    pub auth_mode: AuthMode,
    pub base_url: String,

    // ── Server
    pub host: String,
    pub port: u16,

    // ── Admission control (requests per caller per minute)
    pub rate_limit_per_minute: u32,

    // ── Logging
    pub log_level: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            auth_mode: AuthMode::Key,
            base_url: DEFAULT_BASE_URL.to_string(),
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            rate_limit_per_minute: DEFAULT_RATE_LIMIT_PER_MINUTE,
            log_level: "info".to_string(),
        }
    }
}

/// Read `key` from the environment, falling back to `default` when it is
/// unset or does not parse.
fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            let clean_val = val.trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => {
                    debug!(key, value = clean_val, "config value from environment");
                    parsed
                }
                Err(_) => {
                    warn!(key, value = %val, "config value failed to parse, using default");
                    default
                }
            }
        }
        Err(_) => default,
    }
}

fn read_key(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|k| !k.trim().is_empty())
}

impl RelayConfig {
    /// Load `.env` (if any) and build the config from environment variables.
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_err() {
            debug!(".env file not found, using process environment");
        }

        let defaults = Self::default();
        Self {
            api_key: read_key("GEMINI_API_KEY"),
            model: env_var_or("GEMINI_MODEL", defaults.model),
            auth_mode: AuthMode::parse(&env_var_or("GEMINI_AUTH_TYPE", "key".to_string())),
            base_url: env_var_or("GEMINI_BASE_URL", defaults.base_url),
            host: env_var_or("HOST", defaults.host),
            port: env_var_or("PORT", defaults.port),
            rate_limit_per_minute: env_var_or("PRACTICE_RATE_LIMIT", defaults.rate_limit_per_minute),
            log_level: env_var_or("LOG_LEVEL", defaults.log_level),
        }
    }

    /// Endpoint for a single generate call, without credentials
    pub fn generate_endpoint(&self) -> String {
        format!(
            "{}/models/{}:generate",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Startup checks. Nothing here stops the server from starting.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.api_key.is_none() {
            warnings.push("Missing GEMINI_API_KEY env var.".to_string());
        }

        if let AuthMode::Unrecognized(mode) = &self.auth_mode {
            warnings.push(format!(
                "Unknown GEMINI_AUTH_TYPE '{}'. Valid options: key, bearer. No credential will be sent",
                mode
            ));
        }

        if self.rate_limit_per_minute == 0 {
            warnings.push("PRACTICE_RATE_LIMIT is 0, every /api request will be rejected".to_string());
        }

        warnings
    }
}
