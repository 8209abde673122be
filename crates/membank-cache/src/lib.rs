//! # Membank Cache
//!
//! TTL- and size-bounded key/value store for generated template payloads,
//! with least-recently-used eviction and one-file-per-entry disk persistence.
//!
//! ## Features
//!
//! - **TTL expiry**: entries older than their time-to-live are never returned
//! - **Strict LRU eviction**: size pressure removes the least recently read entry
//! - **Disk persistence**: entries survive process restarts as JSON files
//! - **Statistics**: hit/miss/eviction counters plus per-level and per-type breakdowns
//! - **Export/import**: whole-cache backup and restore as a single JSON document

#![warn(missing_docs)]

pub mod entry;
pub mod error;
pub mod metrics;
pub mod store;

pub use entry::CacheEntry;
pub use error::CacheError;
pub use metrics::{CacheReport, CacheStats};
pub use store::{generate_key, CacheConfig, TemplateCache};

/// Re-export commonly used Result type
pub type Result<T> = std::result::Result<T, CacheError>;
