use axum::{
    extract::{Path, State},
    middleware::from_fn,
    response::Response,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::Value;

use super::resource::{self, CreateSpec, EntityDef, UniqueRule};
use crate::error::ApiError;
use crate::middleware::{require_admin, require_authenticated};
use crate::models::category::NewCategory;
use crate::state::AppState;
use crate::validation::FieldRule;

static CATEGORY: EntityDef = EntityDef {
    collection: "categories",
    singular: "category",
    plural: "categories",
    update_whitelist: &["name"],
    list_fields: &["name"],
    list_map: None,
    redact_fields: &[],
};

static CATEGORY_CREATE: CreateSpec = CreateSpec {
    rules: &[FieldRule::new("name", "The name is missing!")],
    build_doc,
    unique: Some(UniqueRule {
        field: "name",
        message: "A category with this name already exists.",
    }),
};

fn build_doc(payload: Value) -> Result<Value, ApiError> {
    let category: NewCategory = resource::decode_payload(payload)?;
    resource::encode_doc(&category)
}

/// Reads are public; mutations require an admin credential.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list).merge(
                post(create)
                    .route_layer(from_fn(require_admin))
                    .route_layer(from_fn(require_authenticated)),
            ),
        )
        .route(
            "/:id",
            get(get_one).merge(
                put(update)
                    .delete(remove)
                    .route_layer(from_fn(require_admin))
                    .route_layer(from_fn(require_authenticated)),
            ),
        )
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    resource::create(&CATEGORY, &CATEGORY_CREATE, &state, payload).await
}

async fn list(State(state): State<AppState>) -> Result<Response, ApiError> {
    resource::list(&CATEGORY, &state).await
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    resource::get_by_id(&CATEGORY, &state, &id).await
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    resource::update(&CATEGORY, &state, &id, payload).await
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    resource::remove(&CATEGORY, &state, &id).await
}
