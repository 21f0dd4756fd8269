// src/llm/transport.rs
// "Send JSON, get JSON" seam between the Gemini client and the network

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Instant;
use tracing::debug;
use url::Url;

/// One outbound POST
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub url: Url,
    /// Sent as `Authorization: Bearer <token>` when present
    pub bearer: Option<String>,
    pub body: Value,
}

#[async_trait]
pub trait JsonTransport: Send + Sync {
    /// Send the request once and return the decoded response body.
    async fn send(&self, request: OutboundRequest) -> Result<Value>;
}

/// Production transport on reqwest. No timeout is set here.
#[derive(Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl JsonTransport for HttpTransport {
    async fn send(&self, request: OutboundRequest) -> Result<Value> {
        let start = Instant::now();

        let mut builder = self.client.post(request.url.clone()).json(&request.body);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        // reqwest errors carry the full URL, including `?key=`
        let response = builder
            .send()
            .await
            .map_err(|e| e.without_url())
            .with_context(|| format!("request to {} failed", redact(&request.url)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| e.without_url())
            .context("failed to read upstream response body")?;

        debug!(
            status = status.as_u16(),
            bytes = body.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "upstream responded"
        );

        if !status.is_success() {
            anyhow::bail!("Gemini API error: {} - {}", status, body);
        }

        serde_json::from_str(&body).context("upstream response body is not valid JSON")
    }
}

/// URL with the `key` query parameter masked, for logs and error messages
pub fn redact(url: &Url) -> String {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();

    if pairs.is_empty() {
        return masked.to_string();
    }

    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_hides_key() {
        let url = Url::parse("https://example.test/models/m:generate?key=secret123").unwrap();
        let shown = redact(&url);
        assert!(!shown.contains("secret123"));
        assert!(shown.contains("key=***") || shown.contains("key=%2A%2A%2A"));
    }

    #[test]
    fn test_redact_without_query() {
        let url = Url::parse("https://example.test/models/m:generate").unwrap();
        assert_eq!(redact(&url), "https://example.test/models/m:generate");
    }
}
