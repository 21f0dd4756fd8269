// src/feedback/mod.rs
// Recovers the feedback JSON object from free-form model text

use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use tracing::debug;

/// Earliest `{` through the last `}`. Greedy, not brace-balanced.
/// An opening brace that is never closed still counts as a span.
static BRACE_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{(?:.*\})?").expect("brace span pattern is valid"));

/// Outcome of decoding model output. Every variant serializes to valid JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedFeedback {
    /// The whole text, or its brace span, parsed as JSON
    Parsed(Value),
    /// A brace span existed but did not parse; carries the full text
    FailedExtraction(String),
    /// No brace span in the text; carries the full text
    NoJsonFound(String),
}

impl DecodedFeedback {
    pub fn is_parsed(&self) -> bool {
        matches!(self, DecodedFeedback::Parsed(_))
    }

    /// Marker reason reported to callers, `None` when parsing succeeded
    pub fn parse_error(&self) -> Option<&'static str> {
        match self {
            DecodedFeedback::Parsed(_) => None,
            DecodedFeedback::FailedExtraction(_) => Some("failed"),
            DecodedFeedback::NoJsonFound(_) => Some("no_json"),
        }
    }
}

impl Serialize for DecodedFeedback {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            DecodedFeedback::Parsed(value) => value.serialize(serializer),
            DecodedFeedback::FailedExtraction(raw) | DecodedFeedback::NoJsonFound(raw) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("parse_error", &self.parse_error())?;
                map.serialize_entry("raw", raw)?;
                map.end()
            }
        }
    }
}

/// Decode model output. Never fails:
/// 1. parse the whole text;
/// 2. otherwise parse the greedy `{...}` span, or report `failed`;
/// 3. with no `{` at all, report `no_json`.
pub fn decode(content: &str) -> DecodedFeedback {
    if let Ok(value) = serde_json::from_str::<Value>(content) {
        return DecodedFeedback::Parsed(value);
    }

    match BRACE_SPAN.find(content) {
        Some(span) => match serde_json::from_str::<Value>(span.as_str()) {
            Ok(value) => {
                debug!(start = span.start(), end = span.end(), "feedback recovered from brace span");
                DecodedFeedback::Parsed(value)
            }
            Err(e) => {
                debug!(error = %e, "brace span is not valid JSON");
                DecodedFeedback::FailedExtraction(content.to_string())
            }
        },
        None => DecodedFeedback::NoJsonFound(content.to_string()),
    }
}
