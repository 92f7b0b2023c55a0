// Gemini API client module
// Author: kelexine (https://github.com/kelexine)

mod client;
pub mod models;

pub use client::{GeminiClient, API_VERSION, GENERATION_TIMEOUT};
pub use models::{
    model_id, ttl_string, Content, CreateCachedContentRequest, GenerateContentRequest,
    GenerationResult, InlineData, Part,
};
