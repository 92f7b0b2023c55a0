// Cached content record with self-referencing operations
// Author: kelexine (https://github.com/kelexine)

use super::models::GenerationMode;
use crate::error::Result;
use crate::gemini::{
    model_id, ttl_string, Content, GeminiClient, GenerateContentRequest, GenerationResult,
};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{debug, info};

/// A cache record as returned by the API, bound to the client that listed it.
///
/// The record itself is kept as an opaque JSON map; only `name`,
/// `displayName` and `model` are read. Every operation acts on the record's
/// own `name`.
#[derive(Debug, Clone, Serialize)]
pub struct CachedContent {
    #[serde(flatten)]
    record: Map<String, Value>,
    #[serde(skip)]
    client: Arc<GeminiClient>,
}

impl CachedContent {
    pub(crate) fn new(record: Map<String, Value>, client: Arc<GeminiClient>) -> Self {
        Self { record, client }
    }

    /// Vendor-assigned resource name (`cachedContents/...`).
    pub fn name(&self) -> &str {
        self.str_field("name")
    }

    pub fn display_name(&self) -> &str {
        self.str_field("displayName")
    }

    /// Stored model, e.g. `models/gemini-1.5-flash-8b`.
    pub fn model(&self) -> &str {
        self.str_field("model")
    }

    /// Raw field lookup.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.record.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.record
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.record
    }

    /// Delete this cache.
    pub async fn delete(&self) -> Result<bool> {
        self.client.delete_cache(self.name()).await?;
        info!("Deleted cache {}", self.name());
        Ok(true)
    }

    /// Replace this cache's TTL, counted from now.
    pub async fn set_ttl(&self, ttl: u64) -> Result<Value> {
        debug!("Setting TTL of {} to {}s", self.name(), ttl);
        self.client
            .update_cache(self.name(), &json!({ "ttl": ttl_string(ttl) }))
            .await
    }

    /// Generate content with this cache as context.
    ///
    /// `generation_config` is left out of the request when `None`.
    pub async fn generate_content(
        &self,
        contents: Vec<Content>,
        generation_config: Option<Value>,
    ) -> Result<GenerationResult> {
        let request = GenerateContentRequest {
            cached_content: self.name().to_string(),
            contents,
            generation_config,
        };

        self.client.generate_content(model_id(self.model()), &request).await
    }

    /// Ask a single user question and return the first candidate's text.
    ///
    /// A successful response without text yields `Ok(None)`.
    pub async fn single_prompt(
        &self,
        prompt: &str,
        mode: GenerationMode,
    ) -> Result<Option<String>> {
        let result = self
            .generate_content(vec![Content::user_text(prompt)], mode.resolve())
            .await?;

        Ok(result.content().map(str::to_string))
    }

    fn str_field(&self, key: &str) -> &str {
        self.record.get(key).and_then(Value::as_str).unwrap_or_default()
    }
}
