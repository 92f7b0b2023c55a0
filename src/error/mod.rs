// Error types for gemini-cache
// Author: kelexine (https://github.com/kelexine)

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Cache name already exists: '{0}'")]
    Conflict(String),

    /// Non-200 response from a cache endpoint, or a network failure
    /// (`status` is `None` and the message starts with "Network error:").
    #[error("API request failed{}: {message}", status_label(.status))]
    Api {
        status: Option<u16>,
        message: String,
    },

    #[error("Content generation failed{}: {body}", status_label(.status))]
    Generation {
        status: Option<u16>,
        body: String,
    },

    #[error("Cache not found: {0}")]
    NotFound(String),

    #[error("HTML error: {0}")]
    Html(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),
}

impl CacheError {
    /// HTTP status of the failed response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            CacheError::Api { status, .. } | CacheError::Generation { status, .. } => *status,
            _ => None,
        }
    }

    pub(crate) fn network(message: impl std::fmt::Display) -> Self {
        CacheError::Api {
            status: None,
            message: format!("Network error: {}", message),
        }
    }
}

fn status_label(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" ({})", code),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_includes_status() {
        let error = CacheError::Api {
            status: Some(404),
            message: "Cached content not found".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "API request failed (404): Cached content not found"
        );
        assert_eq!(error.status(), Some(404));
    }

    #[test]
    fn test_network_error_has_no_status() {
        let error = CacheError::network("connection refused");
        assert_eq!(error.status(), None);
        assert!(error.to_string().contains("Network error: connection refused"));
    }
}
