// Gemini cached content and generation wire types
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single content part: plain text or base64 inline data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    /// Text content part.
    Text { text: String },

    /// Inline binary data (documents, images, audio).
    InlineData { inline_data: InlineData },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Part::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String, // base64 encoded
}

/// Content in a turn (user or model)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,
    pub role: String,
}

impl Content {
    /// A user turn carrying the given parts.
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            parts,
            role: "user".to_string(),
        }
    }

    /// A user turn with a single text part.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self::user(vec![Part::text(text)])
    }
}

/// Request to create a cached content entry
#[derive(Debug, Clone, Serialize)]
pub struct CreateCachedContentRequest {
    pub model: String, // "models/<id>"
    pub display_name: String,
    pub contents: Vec<Content>,
    pub ttl: String, // e.g., "300s"
}

impl CreateCachedContentRequest {
    pub fn new(parts: Vec<Part>, display_name: &str, model: &str, ttl: u64) -> Self {
        Self {
            model: format!("models/{}", model),
            display_name: display_name.to_string(),
            contents: vec![Content::user(parts)],
            ttl: ttl_string(ttl),
        }
    }
}

/// Request to generate content against a cached context
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub cached_content: String,
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<Value>,
}

/// Parsed response from `generateContent`.
///
/// The body is kept as raw JSON; accessors pull out the commonly used paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerationResult {
    raw: Value,
}

impl GenerationResult {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// Text of `candidates[0].content.parts[0]`, if the response has one.
    pub fn content(&self) -> Option<&str> {
        self.raw
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
    }

    /// Token usage reported by the API.
    pub fn usage(&self) -> Option<&Map<String, Value>> {
        self.raw.get("usageMetadata").and_then(Value::as_object)
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }
}

/// TTL in the API's duration format.
pub fn ttl_string(seconds: u64) -> String {
    format!("{}s", seconds)
}

/// Model id without its resource prefix (`models/gemini-x` -> `gemini-x`).
pub fn model_id(model: &str) -> &str {
    model.rsplit('/').next().unwrap_or(model)
}
