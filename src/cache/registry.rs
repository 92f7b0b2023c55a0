// Cache registry - create, look up, update and delete cached contents
// Author: kelexine (https://github.com/kelexine)

use super::item::CachedContent;
use super::models::{CacheLookup, CreateOptions, OnConflict};
use crate::config::{AppConfig, GeminiConfig};
use crate::content;
use crate::error::{CacheError, Result};
use crate::gemini::{CreateCachedContentRequest, GeminiClient, Part};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Entry point for managing Gemini cached contents.
///
/// Holds the configuration and a shared [`GeminiClient`]; every record it
/// returns is a [`CachedContent`] bound to that same client.
#[derive(Clone)]
pub struct GeminiCache {
    config: GeminiConfig,
    client: Arc<GeminiClient>,
}

impl std::fmt::Debug for GeminiCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiCache")
            .field("api_base_url", &self.config.api_base_url)
            .field("default_model", &self.config.default_model)
            .field("default_ttl", &self.config.default_ttl)
            .finish()
    }
}

impl GeminiCache {
    /// Build a registry from explicit configuration.
    ///
    /// Fails with [`CacheError::Configuration`] when no API key can be resolved.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = GeminiClient::new(&config)?;
        Ok(Self {
            config,
            client: Arc::new(client),
        })
    }

    /// Build a registry from the config file and environment.
    pub fn from_env() -> Result<Self> {
        Self::new(AppConfig::load()?.gemini)
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    pub fn client(&self) -> &GeminiClient {
        &self.client
    }

    /// Create a cache from content parts.
    ///
    /// An existing cache with the same display name is handled per
    /// `options.on_conflict`. The new cache is re-read from the listing so the
    /// returned record has the same shape as any other listed record.
    ///
    /// The existence check and the create call are not atomic and the API
    /// does not enforce unique display names: two concurrent callers using
    /// the same display name can both end up creating a cache.
    pub async fn create(
        &self,
        parts: Vec<Part>,
        display_name: &str,
        options: CreateOptions,
    ) -> Result<CachedContent> {
        if let Some(existing) = self.find_by_display_name(display_name).await? {
            return match options.on_conflict {
                OnConflict::RaiseError => Err(CacheError::Conflict(display_name.to_string())),
                OnConflict::GetExisting => {
                    debug!("Reusing existing cache {} for '{}'", existing.name(), display_name);
                    Ok(existing)
                }
            };
        }

        let model = options.model.as_deref().unwrap_or(&self.config.default_model);
        let ttl = options.ttl.unwrap_or(self.config.default_ttl);
        let request = CreateCachedContentRequest::new(parts, display_name, model, ttl);

        let response = self.client.create_cache(&request).await?;
        let name = response
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| CacheError::Api {
                status: Some(200),
                message: format!("create response for '{}' has no name", display_name),
            })?;

        info!("Created cache {} ('{}', {}s)", name, display_name, ttl);

        self.find_by_name(name)
            .await?
            .ok_or_else(|| CacheError::NotFound(name.to_string()))
    }

    /// Create a cache holding a single text part.
    pub async fn create_from_text(
        &self,
        text: &str,
        display_name: &str,
        options: CreateOptions,
    ) -> Result<CachedContent> {
        self.create(vec![Part::text(text)], display_name, options).await
    }

    /// Create a cache from the visible text of a web page.
    pub async fn create_from_webpage(
        &self,
        url: &str,
        display_name: &str,
        options: CreateOptions,
    ) -> Result<CachedContent> {
        let text = content::read_html(self.client.http_client(), url, true)
            .await?
            .text();
        self.create_from_text(&text, display_name, options).await
    }

    /// Create a cache from a local file sent as inline data.
    pub async fn create_from_local_file(
        &self,
        path: impl AsRef<Path>,
        mime_type: &str,
        display_name: &str,
        options: CreateOptions,
    ) -> Result<CachedContent> {
        let part = content::read_local_file(path, mime_type).await?;
        self.create(vec![part], display_name, options).await
    }

    /// Create a cache from a downloaded file sent as inline data.
    pub async fn create_from_remote_file(
        &self,
        url: &str,
        mime_type: &str,
        display_name: &str,
        options: CreateOptions,
    ) -> Result<CachedContent> {
        let part = content::read_remote_file(self.client.http_client(), url, mime_type).await?;
        self.create(vec![part], display_name, options).await
    }

    /// All caches, in the order the API returns them.
    pub async fn list(&self) -> Result<Vec<CachedContent>> {
        let response = self.client.list_caches().await?;

        let records = match response.get("cachedContents") {
            Some(Value::Array(records)) => records,
            _ => return Ok(Vec::new()),
        };

        records
            .iter()
            .map(|record| match record {
                Value::Object(record) => Ok(CachedContent::new(record.clone(), Arc::clone(&self.client))),
                other => Err(CacheError::Api {
                    status: Some(200),
                    message: format!("malformed cachedContents entry: {}", other),
                }),
            })
            .collect()
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<CachedContent>> {
        Ok(self.list().await?.into_iter().find(|item| item.name() == name))
    }

    pub async fn find_by_display_name(&self, display_name: &str) -> Result<Option<CachedContent>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|item| item.display_name() == display_name))
    }

    /// Look up a cache by name or display name.
    pub async fn get(&self, lookup: &CacheLookup) -> Result<Option<CachedContent>> {
        match lookup {
            CacheLookup::Name(name) => self.find_by_name(name).await,
            CacheLookup::DisplayName(display_name) => self.find_by_display_name(display_name).await,
        }
    }

    /// Patch a cache; `content` is sent as the full request body, e.g. `{"ttl": "600s"}`.
    pub async fn update(&self, name: &str, content: &Value) -> Result<Value> {
        self.client.update_cache(name, content).await
    }

    pub async fn delete(&self, name: &str) -> Result<bool> {
        self.client.delete_cache(name).await?;
        info!("Deleted cache {}", name);
        Ok(true)
    }

    /// Delete every cache one after another, returning how many were removed.
    ///
    /// Stops at the first failure.
    pub async fn delete_all(&self) -> Result<usize> {
        let items = self.list().await?;
        for item in &items {
            item.delete().await?;
        }
        Ok(items.len())
    }

    /// Alias for [`GeminiCache::delete_all`].
    pub async fn clear(&self) -> Result<usize> {
        self.delete_all().await
    }
}
