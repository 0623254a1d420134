//! Response builders for resources and resource collections.

use crate::{JsonResource, RequestContext};
use arcana_core::{ArcanaError, ArcanaResult, ErrorResponse, PageInfo, PageLinks, PageMeta};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};

/// Key used when the data has to be wrapped but no wrapper is configured.
const FALLBACK_WRAP: &str = "data";

/// Response for a single resource or a plain, unpaginated collection.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultResponse {
    status: StatusCode,
    body: Value,
}

impl DefaultResponse {
    /// Wraps `data` and merges `with` into the body.
    #[must_use]
    pub fn new(data: Value, wrap: Option<&str>, with: Map<String, Value>) -> Self {
        Self {
            status: StatusCode::OK,
            body: wrap_data(data, wrap, with),
        }
    }

    /// Overrides the status code (e.g. `201 Created`).
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Returns the status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the JSON body.
    #[must_use]
    pub fn body(&self) -> &Value {
        &self.body
    }
}

/// Response for a paginated collection: the wrapped data plus `links` and
/// `meta` blocks describing the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedResponse {
    links: PageLinks,
    meta: PageMeta,
    body: Value,
}

impl PaginatedResponse {
    /// Builds the response from converted items and page metadata.
    ///
    /// The data is always wrapped, under `"data"` when no wrapper is set.
    #[must_use]
    pub fn new(
        data: Vec<Value>,
        info: &PageInfo,
        wrap: Option<&str>,
        with: Map<String, Value>,
    ) -> Self {
        let links = info.links();
        let meta = info.meta();

        let mut pagination = Map::new();
        pagination.insert("links".to_string(), json_of(&links));
        pagination.insert("meta".to_string(), json_of(&meta));
        merge_objects(&mut pagination, with);

        let body = wrap_data(
            Value::Array(data),
            Some(wrap.unwrap_or(FALLBACK_WRAP)),
            pagination,
        );

        Self { links, meta, body }
    }

    /// Returns the navigation links.
    #[must_use]
    pub fn links(&self) -> &PageLinks {
        &self.links
    }

    /// Returns the page metadata.
    #[must_use]
    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    /// Returns the JSON body.
    #[must_use]
    pub fn body(&self) -> &Value {
        &self.body
    }
}

/// A built resource response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceResponse {
    Default(DefaultResponse),
    Paginated(PaginatedResponse),
}

impl ResourceResponse {
    /// Builds the response for a single resource.
    pub fn for_resource<R>(
        resource: &R,
        ctx: &RequestContext,
        wrap: Option<&str>,
    ) -> ArcanaResult<Self>
    where
        R: JsonResource + ?Sized,
    {
        let data = resource.to_json(ctx)?;
        Ok(Self::Default(DefaultResponse::new(data, wrap, resource.with(ctx))))
    }

    /// Returns true for a paginated response.
    #[must_use]
    pub const fn is_paginated(&self) -> bool {
        matches!(self, Self::Paginated(_))
    }

    /// Returns the status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Default(response) => response.status(),
            Self::Paginated(_) => StatusCode::OK,
        }
    }

    /// Returns the JSON body.
    #[must_use]
    pub fn body(&self) -> &Value {
        match self {
            Self::Default(response) => response.body(),
            Self::Paginated(response) => response.body(),
        }
    }

    /// Returns the page metadata of a paginated response.
    #[must_use]
    pub fn meta(&self) -> Option<&PageMeta> {
        match self {
            Self::Default(_) => None,
            Self::Paginated(response) => Some(response.meta()),
        }
    }

    /// Consumes the response, returning its JSON body.
    #[must_use]
    pub fn into_body(self) -> Value {
        match self {
            Self::Default(response) => response.body,
            Self::Paginated(response) => response.body,
        }
    }
}

impl IntoResponse for DefaultResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl IntoResponse for PaginatedResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.body)).into_response()
    }
}

impl IntoResponse for ResourceResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Default(response) => response.into_response(),
            Self::Paginated(response) => response.into_response(),
        }
    }
}

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub ArcanaError);

impl From<ArcanaError> for AppError {
    fn from(err: ArcanaError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Resource response failed");
        }

        let body = Json(ErrorResponse::from_error(&self.0));
        (status, body).into_response()
    }
}

/// Result type for handlers returning resources.
pub type ResourceResult = Result<ResourceResponse, AppError>;

/// Places `data` under the wrapper key when it is not already there and
/// merges `with` into the result.
///
/// Without a wrapper the data is only wrapped (under `"data"`) when there
/// is something to merge next to it.
fn wrap_data(data: Value, wrap: Option<&str>, with: Map<String, Value>) -> Value {
    let already_wrapped = |key: &str| matches!(&data, Value::Object(map) if map.contains_key(key));

    let wrap_key = match wrap {
        Some(key) => (!already_wrapped(key)).then_some(key),
        None => (!with.is_empty() && !already_wrapped(FALLBACK_WRAP)).then_some(FALLBACK_WRAP),
    };

    let mut body = match wrap_key {
        Some(key) => single_entry(key, data),
        None => data,
    };

    if !with.is_empty() {
        if let Value::Object(map) = &mut body {
            merge_objects(map, with);
        }
    }

    body
}

fn single_entry(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

/// Merges `other` into `target`, recursing into nested objects and
/// letting `other` win on any other clash.
fn merge_objects(target: &mut Map<String, Value>, other: Map<String, Value>) {
    for (key, value) in other {
        match (target.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_objects(existing, incoming);
            }
            (_, value) => {
                target.insert(key, value);
            }
        }
    }
}

fn json_of<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Serialized;
    use arcana_core::Page;
    use serde_json::json;

    fn with(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_default_response_wraps_data() {
        let response = DefaultResponse::new(json!([1, 2]), Some("data"), Map::new());
        assert_eq!(response.body(), &json!({ "data": [1, 2] }));
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_default_response_custom_wrap_and_with() {
        let response = DefaultResponse::new(
            json!([1]),
            Some("items"),
            with(&[("version", json!("1.0"))]),
        );
        assert_eq!(response.body(), &json!({ "items": [1], "version": "1.0" }));
    }

    #[test]
    fn test_default_response_without_wrap() {
        let bare = DefaultResponse::new(json!([1, 2]), None, Map::new());
        assert_eq!(bare.body(), &json!([1, 2]));

        let merged = DefaultResponse::new(json!([1, 2]), None, with(&[("count", json!(2))]));
        assert_eq!(merged.body(), &json!({ "data": [1, 2], "count": 2 }));
    }

    #[test]
    fn test_default_response_does_not_double_wrap() {
        let response =
            DefaultResponse::new(json!({ "data": { "id": 1 } }), Some("data"), Map::new());
        assert_eq!(response.body(), &json!({ "data": { "id": 1 } }));
    }

    #[test]
    fn test_paginated_response_body() {
        let page: Page<()> = Page::new(vec![(), (), ()], 1, 3, 10).with_path("/users");
        let response = PaginatedResponse::new(
            vec![json!({ "id": 1 }), json!({ "id": 2 }), json!({ "id": 3 })],
            &page.info,
            Some("data"),
            Map::new(),
        );

        let body = response.body();
        assert_eq!(body["data"].as_array().unwrap().len(), 3);
        assert_eq!(body["links"]["first"], "/users?page=1");
        assert_eq!(body["links"]["last"], "/users?page=4");
        assert_eq!(body["links"]["prev"], Value::Null);
        assert_eq!(body["links"]["next"], "/users?page=2");
        assert_eq!(body["meta"]["current_page"], 1);
        assert_eq!(body["meta"]["from"], 1);
        assert_eq!(body["meta"]["to"], 3);
        assert_eq!(body["meta"]["total"], 10);
        assert_eq!(body["meta"]["last_page"], 4);
        assert_eq!(body["meta"]["per_page"], 3);
        assert_eq!(body["meta"]["path"], "/users");
        assert_eq!(response.meta().total, 10);
    }

    #[test]
    fn test_paginated_response_without_wrap_uses_data() {
        let page: Page<()> = Page::new(vec![()], 1, 1, 1);
        let response = PaginatedResponse::new(vec![json!(1)], &page.info, None, Map::new());
        assert_eq!(response.body()["data"], json!([1]));
    }

    #[test]
    fn test_paginated_response_merges_meta_recursively() {
        let page: Page<()> = Page::new(vec![()], 1, 1, 1);
        let response = PaginatedResponse::new(
            vec![json!(1)],
            &page.info,
            Some("data"),
            with(&[("meta", json!({ "generated_by": "arcana" }))]),
        );
        assert_eq!(response.body()["meta"]["generated_by"], "arcana");
        assert_eq!(response.body()["meta"]["total"], 1);
    }

    #[test]
    fn test_for_resource() {
        let ctx = RequestContext::default();
        let resource = Serialized(json!({ "id": 5 }));
        let response = ResourceResponse::for_resource(&resource, &ctx, Some("data")).unwrap();
        assert!(!response.is_paginated());
        assert!(response.meta().is_none());
        assert_eq!(response.into_body(), json!({ "data": { "id": 5 } }));
    }

    #[test]
    fn test_app_error_into_response() {
        let response = AppError(ArcanaError::configuration("missing collects")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = AppError::from(ArcanaError::not_found("User", 3)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_resource_response_status() {
        let created = ResourceResponse::Default(
            DefaultResponse::new(json!({}), Some("data"), Map::new())
                .with_status(StatusCode::CREATED),
        );
        assert_eq!(created.status(), StatusCode::CREATED);
        assert_eq!(created.into_response().status(), StatusCode::CREATED);
    }
}
