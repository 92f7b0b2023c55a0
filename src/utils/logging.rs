//! Structured logging and credential-safe trace utilities.
//!
//! This module configures the `tracing` ecosystem for the CLI and provides
//! a helper that keeps the Gemini API key out of logs and error messages.
//! The key travels as a query parameter, so any transport error that
//! echoes the request URL would otherwise leak it.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs.
/// - `compact`: Single-line human-readable output.
/// - `pretty` (default): Multi-line, colorized output for development.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        "compact" => registry.with(tracing_subscriber::fmt::layer().compact()).init(),
        _ => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
    }

    Ok(())
}

/// Redacts Gemini API keys from a string.
///
/// Two patterns are handled:
/// - the `key=` query parameter, whatever its value
/// - bare Google API keys, which start with `AIza`
pub fn sanitize(input: &str) -> String {
    let mut result = redact_after(input, "key=", "[REDACTED_API_KEY]");
    result = redact_after(&result, "AIza", "[REDACTED_API_KEY]");
    result
}

fn redact_after(input: &str, marker: &str, replacement: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(marker) {
        let value_start = if marker == "key=" { pos + marker.len() } else { pos };
        output.push_str(&rest[..value_start]);

        let tail = &rest[value_start..];
        let end = tail
            .find(|c: char| c.is_whitespace() || matches!(c, '&' | '"' | '\'' | ')' | '#'))
            .unwrap_or(tail.len());

        // Already-redacted values are left alone
        if tail[..end].starts_with('[') || end == 0 {
            output.push_str(&tail[..end]);
        } else {
            output.push_str(replacement);
        }
        rest = &tail[end..];
    }

    output.push_str(rest);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_query_parameter() {
        let input = "error sending request for url (https://example.com/v1beta/cachedContents?key=secret123)";
        let output = sanitize(input);
        assert!(output.contains("key=[REDACTED_API_KEY])"));
        assert!(!output.contains("secret123"));
    }

    #[test]
    fn test_sanitize_bare_key() {
        let input = "using key AIzaSyA-example_value for request";
        let output = sanitize(input);
        assert_eq!(output, "using key [REDACTED_API_KEY] for request");
    }

    #[test]
    fn test_sanitize_leaves_other_params() {
        let input = "https://host/path?alt=sse&key=abc&foo=bar";
        assert_eq!(sanitize(input), "https://host/path?alt=sse&key=[REDACTED_API_KEY]&foo=bar");
    }

    #[test]
    fn test_sanitize_noop() {
        assert_eq!(sanitize("nothing to hide"), "nothing to hide");
    }
}
