// Gemini cached content API client
// Author: kelexine (https://github.com/kelexine)

use super::models::{CreateCachedContentRequest, GenerateContentRequest, GenerationResult};
use crate::config::GeminiConfig;
use crate::error::{CacheError, Result};
use crate::utils::logging::sanitize;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, error};

/// API version segment prepended to every path.
pub const API_VERSION: &str = "v1beta";

/// Connect and overall timeout for `generateContent` calls.
pub const GENERATION_TIMEOUT: Duration = Duration::from_secs(300);

/// Client for the Gemini cached content REST API.
///
/// Handles key attachment, URL construction, and mapping of non-200
/// responses to [`CacheError`]. Two HTTP clients are kept:
/// - one for the cache collection endpoints (transport defaults)
/// - one for content generation, with a fixed 300 second timeout
///
/// No retries are performed.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    generation_client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client from configuration, resolving the API key up front.
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let api_key = config.resolve_api_key()?;

        let http_client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .use_rustls_tls()
            .build()
            .map_err(|e| CacheError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        let generation_client = Client::builder()
            .timeout(GENERATION_TIMEOUT)
            .connect_timeout(GENERATION_TIMEOUT)
            .use_rustls_tls()
            .build()
            .map_err(|e| CacheError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created Gemini client for {}", config.api_base_url);

        Ok(Self {
            http_client,
            generation_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Get the HTTP client used for cache operations
    pub fn http_client(&self) -> &Client {
        &self.http_client
    }

    /// POST a new cached content entry.
    pub async fn create_cache(&self, request: &CreateCachedContentRequest) -> Result<Value> {
        let url = self.collection_url();
        let builder = self.request(Method::POST, &url).json(request);
        self.send("create cache", builder).await
    }

    /// GET the cached content collection.
    pub async fn list_caches(&self) -> Result<Value> {
        let url = self.collection_url();
        let builder = self.request(Method::GET, &url);
        self.send("list caches", builder).await
    }

    /// PATCH the cache at `name` (e.g. `cachedContents/abc123`).
    pub async fn update_cache(&self, name: &str, content: &Value) -> Result<Value> {
        let url = self.resource_url(name);
        let builder = self.request(Method::PATCH, &url).json(content);
        self.send("update cache", builder).await
    }

    /// DELETE the cache at `name`.
    pub async fn delete_cache(&self, name: &str) -> Result<Value> {
        let url = self.resource_url(name);
        let builder = self.request(Method::DELETE, &url);
        self.send("delete cache", builder).await
    }

    /// Call `models/{model_id}:generateContent` against a cached context.
    pub async fn generate_content(
        &self,
        model_id: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerationResult> {
        let url = format!(
            "{}/{}/models/{}:generateContent",
            self.base_url, API_VERSION, model_id
        );
        debug!("Calling generateContent for model {} with {}", model_id, request.cached_content);

        let response = self
            .generation_client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|e| CacheError::Generation {
                status: None,
                body: format!("Request failed: {}", sanitize(&e.to_string())),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| CacheError::Generation {
            status: None,
            body: format!("Request failed: {}", sanitize(&e.to_string())),
        })?;

        if status != StatusCode::OK {
            error!("generateContent failed: HTTP {} - {}", status, body);
            return Err(CacheError::Generation {
                status: Some(status.as_u16()),
                body,
            });
        }

        Ok(GenerationResult::new(parse_body(&body)?))
    }

    fn collection_url(&self) -> String {
        format!("{}/{}/cachedContents", self.base_url, API_VERSION)
    }

    fn resource_url(&self, name: &str) -> String {
        format!("{}/{}/{}", self.base_url, API_VERSION, name.trim_start_matches('/'))
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .query(&[("key", self.api_key.as_str())])
    }

    async fn send(&self, operation: &str, builder: RequestBuilder) -> Result<Value> {
        debug!("Sending {} request", operation);

        let response = builder.send().await.map_err(|e| {
            error!("{} failed before a response arrived", operation);
            CacheError::network(sanitize(&e.to_string()))
        })?;

        Self::handle_response(operation, response).await
    }

    /// Parse a 200 body, or turn anything else into [`CacheError::Api`].
    async fn handle_response(operation: &str, response: Response) -> Result<Value> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CacheError::network(sanitize(&e.to_string())))?;

        if status == StatusCode::OK {
            return parse_body(&body);
        }

        error!("{} failed: HTTP {} - {}", operation, status, body);
        Err(CacheError::Api {
            status: Some(status.as_u16()),
            message: extract_error_message(&body),
        })
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// A 200 with an empty body is treated as an empty object.
fn parse_body(body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    Ok(serde_json::from_str(body)?)
}

/// Best-effort extraction of the `error` field, falling back to the raw body.
fn extract_error_message(body: &str) -> String {
    let error = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|parsed| parsed.get("error").cloned());

    match error {
        Some(Value::String(message)) => message,
        Some(Value::Object(detail)) => match detail.get("message").and_then(Value::as_str) {
            Some(message) => message.to_string(),
            None => Value::Object(detail).to_string(),
        },
        Some(Value::Null) | None => body.to_string(),
        Some(other) => other.to_string(),
    }
}
