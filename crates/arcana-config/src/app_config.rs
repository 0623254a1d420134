//! Application configuration structures.

use arcana_core::{LoggingConfig, PageRequest, DEFAULT_PAGE_NAME};
use serde::{Deserialize, Serialize};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Resource rendering configuration.
    #[serde(default)]
    pub resources: ResourceConfig,

    /// Pagination configuration.
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "arcana-resources".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// How resources are rendered into response bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Top-level key the transformed data is wrapped in. `None` or an empty
    /// key emits the data unwrapped where the response shape allows it.
    #[serde(default = "default_wrap")]
    pub wrap: Option<String>,
}

fn default_wrap() -> Option<String> {
    Some("data".to_string())
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self { wrap: default_wrap() }
    }
}

impl ResourceConfig {
    /// Returns the wrap key, if any.
    #[must_use]
    pub fn wrap_key(&self) -> Option<&str> {
        self.wrap.as_deref().filter(|key| !key.is_empty())
    }
}

/// Pagination defaults applied to incoming list requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Page size used when the request does not ask for one.
    #[serde(default = "default_per_page")]
    pub default_per_page: usize,

    /// Largest page size a request may ask for.
    #[serde(default = "default_max_per_page")]
    pub max_per_page: usize,

    /// Query-string key carrying the page number.
    #[serde(default = "default_page_name")]
    pub page_name: String,
}

fn default_per_page() -> usize {
    PageRequest::DEFAULT_SIZE
}

fn default_max_per_page() -> usize {
    PageRequest::MAX_SIZE
}

fn default_page_name() -> String {
    DEFAULT_PAGE_NAME.to_string()
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_per_page: default_per_page(),
            max_per_page: default_max_per_page(),
            page_name: default_page_name(),
        }
    }
}

impl PaginationConfig {
    /// Builds a page request from optional query values.
    #[must_use]
    pub fn page_request(&self, page: Option<usize>, per_page: Option<usize>) -> PageRequest {
        PageRequest::with_max_size(
            page.unwrap_or(1),
            per_page.unwrap_or(self.default_per_page),
            self.max_per_page,
        )
    }
}
