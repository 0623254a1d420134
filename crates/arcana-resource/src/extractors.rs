//! Pagination extractor.

use crate::RequestContext;
use arcana_config::PaginationConfig;
use arcana_core::PageRequest;
use serde::Deserialize;
use tracing::warn;

/// Query parameters for pagination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PaginationQuery {
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub per_page: Option<usize>,
}

impl PaginationQuery {
    /// Reads the page number from the configured page key and the size
    /// from `per_page`. Values that do not parse are ignored.
    #[must_use]
    pub fn from_context(ctx: &RequestContext, config: &PaginationConfig) -> Self {
        Self {
            page: ctx.query_as(&config.page_name),
            per_page: ctx.query_as("per_page"),
        }
    }

    /// Converts into a page request using the configured defaults.
    #[must_use]
    pub fn to_page_request(&self, config: &PaginationConfig) -> PageRequest {
        if let Some(per_page) = self.per_page {
            if per_page > config.max_per_page {
                warn!(
                    requested = per_page,
                    max = config.max_per_page,
                    "Requested page size exceeds maximum, clamping"
                );
            }
        }
        config.page_request(self.page, self.per_page)
    }
}

impl From<PaginationQuery> for PageRequest {
    fn from(query: PaginationQuery) -> Self {
        query.to_page_request(&PaginationConfig::default())
    }
}
