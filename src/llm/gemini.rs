// src/llm/gemini.rs
// Single-shot generate call against the Gemini REST endpoint

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use url::Url;

use super::transport::{JsonTransport, OutboundRequest};
use crate::config::{AuthMode, RelayConfig};
use crate::types::UpstreamCallResult;

pub const TEMPERATURE: f64 = 0.0;
pub const MAX_OUTPUT_TOKENS: u32 = 700;

// ============================================================================
// API Types
// ============================================================================

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: Vec<PromptTurn<'a>>,
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Serialize)]
struct PromptTurn<'a> {
    role: &'static str,
    content: &'a str,
}

// ============================================================================
// Client
// ============================================================================

#[derive(Clone)]
pub struct GeminiClient {
    config: Arc<RelayConfig>,
    transport: Arc<dyn JsonTransport>,
}

impl GeminiClient {
    pub fn new(config: Arc<RelayConfig>, transport: Arc<dyn JsonTransport>) -> Self {
        Self { config, transport }
    }

    /// Make exactly one upstream call. Transport failures are returned as-is.
    pub async fn generate(&self, system_prompt: &str, user_message: &str) -> Result<UpstreamCallResult> {
        let request = build_request(&self.config, system_prompt, user_message)?;
        let start = Instant::now();

        debug!(
            model = %self.config.model,
            auth_mode = %self.config.auth_mode,
            "sending generate request"
        );

        let raw = self.transport.send(request).await?;
        let content = extract_content(&raw);

        info!(
            model = %self.config.model,
            content_len = content.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "generate call completed"
        );

        Ok(UpstreamCallResult { content, raw })
    }
}

/// Build the outbound request, attaching the credential according to the auth mode.
pub fn build_request(config: &RelayConfig, system_prompt: &str, user_message: &str) -> Result<OutboundRequest> {
    let endpoint = config.generate_endpoint();
    let mut url = Url::parse(&endpoint).with_context(|| format!("invalid Gemini endpoint: {}", endpoint))?;
    let credential = config.api_key.as_deref().unwrap_or_default();

    let bearer = match &config.auth_mode {
        AuthMode::Key => {
            url.query_pairs_mut().append_pair("key", credential);
            None
        }
        AuthMode::Bearer => Some(credential.to_string()),
        AuthMode::Unrecognized(_) => None,
    };

    let body = serde_json::to_value(GenerateRequest {
        model: &config.model,
        prompt: vec![
            PromptTurn {
                role: "system",
                content: system_prompt,
            },
            PromptTurn {
                role: "user",
                content: user_message,
            },
        ],
        temperature: TEMPERATURE,
        max_output_tokens: MAX_OUTPUT_TOKENS,
    })?;

    Ok(OutboundRequest { url, bearer, body })
}

/// Pick the generated text out of the response envelope. First match wins:
/// `candidates[0].content`, then `output[0].content`, then the whole body
/// serialized. Null, `false`, `0` and `""` do not count as a match.
pub fn extract_content(raw: &Value) -> String {
    let candidate = raw.pointer("/candidates/0/content").filter(|v| is_truthy(v));
    let output = || raw.pointer("/output/0/content").filter(|v| is_truthy(v));

    match candidate.or_else(output) {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => raw.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
