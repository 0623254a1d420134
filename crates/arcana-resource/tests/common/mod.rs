//! Shared fixtures for the HTTP-level resource tests.

use arcana_config::AppConfig;
use arcana_core::{ArcanaError, ArcanaResult};
use arcana_resource::{
    AppError, Collects, JsonResource, PaginationQuery, RequestContext, ResourceCollection,
    ResourceRegistry, ResourceResponse, ResourceResult,
};
use axum::{
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// A user row as a repository would return it.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: u64,
    pub username: String,
    pub email: String,
}

/// Public representation of a user.
pub struct User(UserRecord);

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self(record)
    }
}

impl JsonResource for User {
    fn to_json(&self, ctx: &RequestContext) -> ArcanaResult<Value> {
        let mut json = json!({
            "id": self.0.id,
            "username": self.0.username,
        });
        if ctx.query_contains("include", "email") {
            json["email"] = json!(self.0.email);
        }
        Ok(json)
    }
}

/// Collects `User` by naming convention.
pub struct UserCollection;
impl Collects for UserCollection {}

/// Declares nothing and matches no convention.
pub struct Roster;
impl Collects for Roster {}

#[derive(Clone)]
pub struct TestState {
    users: Arc<Vec<UserRecord>>,
    registry: Arc<ResourceRegistry<UserRecord>>,
    config: Arc<AppConfig>,
}

pub fn users(n: u64) -> Vec<UserRecord> {
    (1..=n)
        .map(|id| UserRecord {
            id,
            username: format!("user{}", id),
            email: format!("user{}@example.com", id),
        })
        .collect()
}

pub fn router(users: Vec<UserRecord>, config: AppConfig) -> Router {
    let mut registry = ResourceRegistry::new();
    registry.register::<User>();

    let state = TestState {
        users: Arc::new(users),
        registry: Arc::new(registry),
        config: Arc::new(config),
    };

    Router::new()
        .route("/users", get(list_users))
        .route("/users/all", get(all_users))
        .route("/users/:id", get(show_user))
        .route("/roster", get(roster))
        .with_state(state)
}

async fn list_users(State(state): State<TestState>, ctx: RequestContext) -> ResourceResult {
    let pagination = &state.config.pagination;
    let page = PaginationQuery::from_context(&ctx, pagination)
        .to_page_request(pagination)
        .paginate(state.users.to_vec())
        .with_page_name(pagination.page_name.clone());

    let collection = ResourceCollection::for_collection::<UserCollection, _>(page, &state.registry)?
        .configured(&state.config.resources);
    Ok(collection.build_response(&ctx)?)
}

async fn all_users(State(state): State<TestState>, ctx: RequestContext) -> ResourceResult {
    let collection = ResourceCollection::for_collection::<UserCollection, _>(
        state.users.to_vec(),
        &state.registry,
    )?
    .configured(&state.config.resources)
    .additional("count", json!(state.users.len()));
    Ok(collection.build_response(&ctx)?)
}

async fn show_user(
    State(state): State<TestState>,
    Path(id): Path<u64>,
    ctx: RequestContext,
) -> ResourceResult {
    let record = state
        .users
        .iter()
        .find(|user| user.id == id)
        .cloned()
        .ok_or_else(|| AppError(ArcanaError::not_found("User", id)))?;

    Ok(ResourceResponse::for_resource(
        &User::from(record),
        &ctx,
        state.config.resources.wrap_key(),
    )?)
}

async fn roster(State(state): State<TestState>, ctx: RequestContext) -> ResourceResult {
    let collection =
        ResourceCollection::for_collection::<Roster, _>(state.users.to_vec(), &state.registry)?;
    Ok(collection.build_response(&ctx)?)
}

/// Sends a GET request and returns the status and parsed JSON body.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}
