//! Option types for cache creation, lookup and generation.

// Author: kelexine (https://github.com/kelexine)

use serde_json::{json, Value};

/// What `create` does when a cache with the same display name exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnConflict {
    /// Fail with [`CacheError::Conflict`](crate::error::CacheError::Conflict).
    #[default]
    RaiseError,
    /// Return the existing cache unchanged, without comparing contents.
    GetExisting,
}

/// Per-call overrides for cache creation.
///
/// Unset fields fall back to the configured default model and TTL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOptions {
    pub on_conflict: OnConflict,
    pub model: Option<String>,
    pub ttl: Option<u64>,
}

impl CreateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_conflict(mut self, on_conflict: OnConflict) -> Self {
        self.on_conflict = on_conflict;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn ttl(mut self, seconds: u64) -> Self {
        self.ttl = Some(seconds);
        self
    }
}

/// Key used to look up a single cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// Vendor-assigned resource name, e.g. `cachedContents/abc123`.
    Name(String),
    /// Caller-assigned display name.
    DisplayName(String),
}

/// Sampling configuration for `single_prompt`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GenerationMode {
    /// Deterministic sampling: `{"temperature": 0, "topP": 0, "topK": 1}`.
    #[default]
    Accurate,
    /// Sent verbatim as `generation_config`.
    Custom(Value),
    /// No `generation_config`; the model's own defaults apply.
    Unset,
}

impl GenerationMode {
    /// Resolve to the `generation_config` body field.
    pub fn resolve(self) -> Option<Value> {
        match self {
            GenerationMode::Accurate => Some(accurate_mode_config()),
            GenerationMode::Custom(config) => Some(config),
            GenerationMode::Unset => None,
        }
    }
}

/// The fixed accurate-mode sampling parameters.
pub fn accurate_mode_config() -> Value {
    json!({ "temperature": 0, "topP": 0, "topK": 1 })
}
