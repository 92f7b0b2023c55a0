//! Content readers that turn files and web pages into cacheable parts.
//!
//! Local and remote files become base64 [`Part::InlineData`]; web pages are
//! parsed into an [`HtmlDocument`] whose visible text feeds a text part.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod html;

pub use html::HtmlDocument;

use crate::error::{CacheError, Result};
use crate::gemini::Part;
use crate::utils::logging::sanitize;
use base64::Engine;
use reqwest::{Client, StatusCode};
use std::path::Path;
use tracing::debug;

/// Read a local file into an inline data part.
///
/// Fails with [`CacheError::Io`] if the file cannot be read.
pub async fn read_local_file(path: impl AsRef<Path>, mime_type: &str) -> Result<Part> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    Ok(inline_part(&bytes, mime_type))
}

/// Download a remote file into an inline data part.
pub async fn read_remote_file(client: &Client, url: &str, mime_type: &str) -> Result<Part> {
    let bytes = fetch(client, url).await?.bytes().await.map_err(|e| {
        CacheError::network(sanitize(&e.to_string()))
    })?;
    debug!("Fetched {} bytes from {}", bytes.len(), url);

    Ok(inline_part(&bytes, mime_type))
}

/// Fetch and parse an HTML page.
///
/// With `default_remover` set, `script` and `style` elements are dropped
/// before the document is returned.
pub async fn read_html(client: &Client, url: &str, default_remover: bool) -> Result<HtmlDocument> {
    let body = fetch(client, url).await?.text().await.map_err(|e| {
        CacheError::network(sanitize(&e.to_string()))
    })?;
    debug!("Fetched {} bytes of HTML from {}", body.len(), url);

    let mut document = HtmlDocument::parse(&body);
    if default_remover {
        document.remove_default_elements();
    }
    Ok(document)
}

fn inline_part(bytes: &[u8], mime_type: &str) -> Part {
    let data = base64::engine::general_purpose::STANDARD.encode(bytes);
    Part::inline(mime_type, data)
}

async fn fetch(client: &Client, url: &str) -> Result<reqwest::Response> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| CacheError::network(sanitize(&e.to_string())))?;

    let status = response.status();
    if status != StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        return Err(CacheError::Api {
            status: Some(status.as_u16()),
            message: format!("failed to fetch {}: {}", url, body),
        });
    }

    Ok(response)
}
