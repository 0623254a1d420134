//! Pagination types for list operations.
//!
//! Pages are 1-based. A [`Page`] carries its items together with the
//! metadata needed to render `links` and `meta` blocks in a paginated
//! JSON response.

use serde::{Deserialize, Serialize};

/// Query-string key used for the page number unless overridden.
pub const DEFAULT_PAGE_NAME: &str = "page";

fn default_page_name() -> String {
    DEFAULT_PAGE_NAME.to_string()
}

/// A request for a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (1-based).
    pub page: usize,
    /// The number of items per page.
    pub size: usize,
}

impl PageRequest {
    /// The default page size.
    pub const DEFAULT_SIZE: usize = 15;
    /// The maximum allowed page size.
    pub const MAX_SIZE: usize = 100;

    /// Creates a new page request. Page `0` is treated as the first page
    /// and the size is clamped to `1..=MAX_SIZE`.
    #[must_use]
    pub fn new(page: usize, size: usize) -> Self {
        Self::with_max_size(page, size, Self::MAX_SIZE)
    }

    /// Creates a new page request clamping the size to a custom maximum.
    #[must_use]
    pub fn with_max_size(page: usize, size: usize, max_size: usize) -> Self {
        Self {
            page: page.max(1),
            size: size.clamp(1, max_size.max(1)),
        }
    }

    /// Creates a page request for the first page with default size.
    #[must_use]
    pub fn first() -> Self {
        Self::new(1, Self::DEFAULT_SIZE)
    }

    /// Returns the offset for database queries. Saturates instead of
    /// overflowing for page numbers past the addressable range.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.size)
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.size
    }

    /// Cuts the requested page out of an in-memory result set.
    #[must_use]
    pub fn paginate<T>(&self, items: Vec<T>) -> Page<T> {
        let total = items.len() as u64;
        let content = items
            .into_iter()
            .skip(self.offset())
            .take(self.limit())
            .collect();
        Page::new(content, self.page, self.size, total)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// Pagination metadata for a page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// The current page number (1-based).
    pub current_page: usize,
    /// The number of items per page.
    pub per_page: usize,
    /// The total number of items across all pages.
    pub total: u64,
    /// The number of items on this page.
    pub count: usize,
    /// Base URL used to build page links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Query-string key carrying the page number.
    #[serde(default = "default_page_name")]
    pub page_name: String,
}

impl PageInfo {
    /// Creates new page info.
    #[must_use]
    pub fn new(current_page: usize, per_page: usize, total: u64, count: usize) -> Self {
        Self {
            current_page: current_page.max(1),
            per_page,
            total,
            count,
            path: None,
            page_name: default_page_name(),
        }
    }

    /// Returns the number of the last page (at least 1).
    #[must_use]
    pub fn last_page(&self) -> u64 {
        if self.per_page == 0 {
            return 1;
        }
        self.total.div_ceil(self.per_page as u64).max(1)
    }

    /// Returns the 1-based position of the first item on this page.
    #[must_use]
    pub fn first_item(&self) -> Option<u64> {
        (self.count > 0).then(|| {
            (self.current_page.saturating_sub(1) as u64)
                .saturating_mul(self.per_page as u64)
                .saturating_add(1)
        })
    }

    /// Returns the 1-based position of the last item on this page.
    #[must_use]
    pub fn last_item(&self) -> Option<u64> {
        self.first_item().map(|first| first.saturating_add(self.count as u64 - 1))
    }

    /// Returns true if there are pages after this one.
    #[must_use]
    pub fn has_more_pages(&self) -> bool {
        (self.current_page as u64) < self.last_page()
    }

    /// Returns true if this is the first page.
    #[must_use]
    pub const fn on_first_page(&self) -> bool {
        self.current_page <= 1
    }

    /// Returns the URL for the given page number. Numbers below 1 point to
    /// the first page.
    #[must_use]
    pub fn url(&self, page: u64) -> String {
        let path = self.path.as_deref().unwrap_or("/");
        let separator = if path.contains('?') { '&' } else { '?' };
        format!("{}{}{}={}", path, separator, self.page_name, page.max(1))
    }

    /// Returns the URL of the first page.
    #[must_use]
    pub fn first_page_url(&self) -> String {
        self.url(1)
    }

    /// Returns the URL of the last page.
    #[must_use]
    pub fn last_page_url(&self) -> String {
        self.url(self.last_page())
    }

    /// Returns the URL of the previous page, if any.
    #[must_use]
    pub fn previous_page_url(&self) -> Option<String> {
        (!self.on_first_page()).then(|| self.url(self.current_page as u64 - 1))
    }

    /// Returns the URL of the next page, if any.
    #[must_use]
    pub fn next_page_url(&self) -> Option<String> {
        self.has_more_pages()
            .then(|| self.url(self.current_page as u64 + 1))
    }

    /// Builds the `links` block of a paginated response.
    #[must_use]
    pub fn links(&self) -> PageLinks {
        PageLinks {
            first: self.first_page_url(),
            last: self.last_page_url(),
            prev: self.previous_page_url(),
            next: self.next_page_url(),
        }
    }

    /// Builds the `meta` block of a paginated response.
    #[must_use]
    pub fn meta(&self) -> PageMeta {
        PageMeta {
            current_page: self.current_page,
            from: self.first_item(),
            last_page: self.last_page(),
            path: self.path.clone().unwrap_or_else(|| "/".to_string()),
            per_page: self.per_page,
            to: self.last_item(),
            total: self.total,
        }
    }
}

/// Navigation links of a paginated response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PageLinks {
    pub first: String,
    pub last: String,
    pub prev: Option<String>,
    pub next: Option<String>,
}

/// Metadata block of a paginated response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PageMeta {
    pub current_page: usize,
    pub from: Option<u64>,
    pub last_page: u64,
    pub path: String,
    pub per_page: usize,
    pub to: Option<u64>,
    pub total: u64,
}

/// A page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub content: Vec<T>,
    /// Information about this page.
    #[serde(flatten)]
    pub info: PageInfo,
}

impl<T> Page<T> {
    /// Creates a new page.
    #[must_use]
    pub fn new(content: Vec<T>, current_page: usize, per_page: usize, total: u64) -> Self {
        let count = content.len();
        Self {
            content,
            info: PageInfo::new(current_page, per_page, total, count),
        }
    }

    /// Creates an empty page.
    #[must_use]
    pub fn empty(current_page: usize, per_page: usize) -> Self {
        Self::new(Vec::new(), current_page, per_page, 0)
    }

    /// Sets the base URL used for page links.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.info.path = Some(path.into());
        self
    }

    /// Sets the query-string key carrying the page number.
    #[must_use]
    pub fn with_page_name(mut self, page_name: impl Into<String>) -> Self {
        self.info.page_name = page_name.into();
        self
    }

    /// Returns a copy of this page's metadata attached to a replacement
    /// set of items.
    #[must_use]
    pub fn with_content<U>(&self, content: Vec<U>) -> Page<U> {
        let mut info = self.info.clone();
        info.count = content.len();
        Page { content, info }
    }

    /// Maps the page content to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            info: self.info,
        }
    }

    /// Splits the page into its items and metadata.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, PageInfo) {
        (self.content, self.info)
    }

    /// Returns true if the page is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns an iterator over the items on this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.content.iter()
    }

    /// Returns the current page number.
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.info.current_page
    }

    /// Returns the total number of elements across all pages.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.info.total
    }

    /// Returns the number of the last page.
    #[must_use]
    pub fn last_page(&self) -> u64 {
        self.info.last_page()
    }

    /// Returns true if there is a next page.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.info.has_more_pages()
    }

    /// Returns true if there is a previous page.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        !self.info.on_first_page()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty(1, PageRequest::DEFAULT_SIZE)
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.iter()
    }
}
