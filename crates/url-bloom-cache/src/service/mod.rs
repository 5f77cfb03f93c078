//! Service Layer
//!
//! Application services that orchestrate domain logic and coordinate with
//! external dependencies via ports.

pub mod url_cache_service;

pub use url_cache_service::{added_line, existence_line, UrlCacheService};
