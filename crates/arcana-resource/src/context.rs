//! Request context handed to resources during conversion.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{request::Parts, Method, Uri},
};
use std::collections::HashMap;
use std::convert::Infallible;

/// The parts of an incoming request a resource may look at while
/// converting itself to JSON.
///
/// Collections never inspect the context; they pass it through to each
/// element unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    method: Method,
    path: String,
    query: HashMap<String, String>,
}

impl RequestContext {
    /// Creates a context for the given method and path with no query.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: HashMap::new(),
        }
    }

    /// Builds a context from a request method and URI.
    ///
    /// A malformed query string yields an empty query map.
    #[must_use]
    pub fn from_uri(method: Method, uri: &Uri) -> Self {
        let query = Query::<HashMap<String, String>>::try_from_uri(uri)
            .map(|Query(query)| query)
            .unwrap_or_default();

        Self {
            method,
            path: uri.path().to_string(),
            query,
        }
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Returns the request method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request path without the query string.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns a query parameter.
    #[must_use]
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Returns a query parameter parsed into `T`, or `None` when it is
    /// missing or does not parse.
    #[must_use]
    pub fn query_as<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.query(key).and_then(|value| value.parse().ok())
    }

    /// Returns true if a comma-separated query parameter contains `value`,
    /// e.g. `?include=posts,comments`.
    #[must_use]
    pub fn query_contains(&self, key: &str, value: &str) -> bool {
        self.query(key)
            .is_some_and(|list| list.split(',').any(|item| item.trim() == value))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_uri(parts.method.clone(), &parts.uri))
    }
}
