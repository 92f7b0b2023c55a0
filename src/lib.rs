// gemini-cache - Client library and CLI for the Gemini cached content API
// Author: kelexine (https://github.com/kelexine)

pub mod cache;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod gemini;
pub mod utils;

pub use cache::{CacheLookup, CachedContent, CreateOptions, GeminiCache, GenerationMode, OnConflict};
pub use error::{CacheError, Result};
