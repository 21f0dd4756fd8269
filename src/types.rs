// src/types.rs
// Request-scoped values shared by the prompt builder, the upstream client and the API layer

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::feedback::DecodedFeedback;

pub const DEFAULT_MODE: &str = "shadow";
pub const DEFAULT_LEVEL: &str = "A1";

/// Body of `POST /api/practice`. Every field is optional on the wire;
/// `targetText` is checked by the handler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeRequest {
    #[serde(default)]
    pub target_text: Option<String>,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
}

/// A practice request with defaults applied and `target_text` known to be non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeInput {
    pub target_text: String,
    pub transcript: String,
    pub mode: PracticeMode,
    pub level: String,
}

impl PracticeRequest {
    /// Apply defaults to absent fields. Returns `None` when `targetText` is
    /// missing or empty.
    pub fn normalized(self) -> Option<PracticeInput> {
        let target_text = self.target_text.filter(|t| !t.is_empty())?;

        Some(PracticeInput {
            target_text,
            transcript: self.transcript.unwrap_or_default(),
            mode: PracticeMode::from(self.mode.unwrap_or_else(|| DEFAULT_MODE.to_string())),
            level: self.level.unwrap_or_else(|| DEFAULT_LEVEL.to_string()),
        })
    }
}

/// Practice mode. Only `explain` changes what the tutor is asked for;
/// unknown modes are carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PracticeMode {
    Shadow,
    Explain,
    Other(String),
}

impl PracticeMode {
    pub fn as_str(&self) -> &str {
        match self {
            PracticeMode::Shadow => "shadow",
            PracticeMode::Explain => "explain",
            PracticeMode::Other(mode) => mode,
        }
    }
}

impl From<String> for PracticeMode {
    fn from(mode: String) -> Self {
        match mode.as_str() {
            "shadow" => PracticeMode::Shadow,
            "explain" => PracticeMode::Explain,
            _ => PracticeMode::Other(mode),
        }
    }
}

/// What one upstream call produced
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamCallResult {
    /// Best-effort generated text
    pub content: String,
    /// Decoded upstream body, untouched
    pub raw: Value,
}

/// Body of a successful `POST /api/practice`
#[derive(Debug, Clone, Serialize)]
pub struct PracticeResponse {
    pub feedback: DecodedFeedback,
    pub raw: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_applied() {
        let request: PracticeRequest =
            serde_json::from_value(json!({ "targetText": "Good morning" })).unwrap();
        let input = request.normalized().unwrap();

        assert_eq!(input.target_text, "Good morning");
        assert_eq!(input.transcript, "");
        assert_eq!(input.mode, PracticeMode::Shadow);
        assert_eq!(input.level, "A1");
    }

    #[test]
    fn test_missing_or_empty_target_text() {
        let missing: PracticeRequest = serde_json::from_value(json!({ "transcript": "hi" })).unwrap();
        assert!(missing.normalized().is_none());

        let empty: PracticeRequest = serde_json::from_value(json!({ "targetText": "" })).unwrap();
        assert!(empty.normalized().is_none());
    }

    #[test]
    fn test_null_mode_and_level_use_defaults() {
        let request: PracticeRequest =
            serde_json::from_value(json!({ "targetText": "Hi", "mode": null, "level": null })).unwrap();
        let input = request.normalized().unwrap();

        assert_eq!(input.mode, PracticeMode::Shadow);
        assert_eq!(input.level, "A1");
    }

    #[test]
    fn test_unknown_mode_passes_through() {
        let request = PracticeRequest {
            target_text: Some("How are you?".to_string()),
            mode: Some("drill".to_string()),
            level: Some("B2".to_string()),
            ..Default::default()
        };
        let input = request.normalized().unwrap();

        assert_eq!(input.mode, PracticeMode::Other("drill".to_string()));
        assert_eq!(input.mode.as_str(), "drill");
        assert_eq!(input.level, "B2");
    }
}
