// Cache registry module
// Author: kelexine (https://github.com/kelexine)

pub mod item;
pub mod models;
pub mod registry;

pub use item::CachedContent;
pub use models::{accurate_mode_config, CacheLookup, CreateOptions, GenerationMode, OnConflict};
pub use registry::GeminiCache;
