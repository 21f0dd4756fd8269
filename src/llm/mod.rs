// src/llm/mod.rs
// Upstream generative-language client

pub mod gemini;
pub mod transport;

pub use gemini::{build_request, extract_content, GeminiClient};
pub use transport::{HttpTransport, JsonTransport, OutboundRequest};
