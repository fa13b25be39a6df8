use axum::{
    extract::{Path, State},
    middleware::from_fn,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

use super::resource::{self, CreateSpec, EntityDef};
use crate::error::ApiError;
use crate::middleware::require_authenticated;
use crate::models::unit::NewUnit;
use crate::state::AppState;
use crate::validation::FieldRule;

static UNIT: EntityDef = EntityDef {
    collection: "units",
    singular: "unit",
    plural: "units",
    update_whitelist: &["title", "video", "slide", "image", "description", "exercises"],
    // no list route
    list_fields: &[],
    list_map: None,
    redact_fields: &[],
};

static UNIT_CREATE: CreateSpec = CreateSpec {
    rules: &[
        FieldRule::new("title", "The title is missing!"),
        FieldRule::new("description", "The description is missing!"),
    ],
    build_doc,
    unique: None,
};

fn build_doc(payload: Value) -> Result<Value, ApiError> {
    let unit: NewUnit = resource::decode_payload(payload)?;
    resource::encode_doc(&unit)
}

/// Every unit route requires a valid token; there is no list route.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create))
        .route("/:id", get(get_one).put(update).delete(remove))
        .route_layer(from_fn(require_authenticated))
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    resource::create(&UNIT, &UNIT_CREATE, &state, payload).await
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    resource::get_by_id(&UNIT, &state, &id).await
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    resource::update(&UNIT, &state, &id, payload).await
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    resource::remove(&UNIT, &state, &id).await
}
