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
use crate::models::course::NewCourse;
use crate::state::AppState;
use crate::validation::FieldRule;

static COURSE: EntityDef = EntityDef {
    collection: "courses",
    singular: "course",
    plural: "courses",
    update_whitelist: &[
        "title",
        "units",
        "categories",
        "description",
        "features",
        "certificate",
        "comments",
        "moreInfo",
        "rating",
        "time",
    ],
    list_fields: &["title", "units", "description", "categories", "time"],
    list_map: None,
    redact_fields: &[],
};

static COURSE_CREATE: CreateSpec = CreateSpec {
    rules: &[
        FieldRule::new("title", "The title is missing!"),
        FieldRule::new("units", "You must have at least one unit"),
        FieldRule::new("categories", "You must have at least one category"),
        FieldRule::new("description", "The description is missing!"),
        FieldRule::new("certificate", "The certificate is missing!"),
        FieldRule::new("time", "The time is missing!"),
    ],
    build_doc,
    unique: None,
};

fn build_doc(payload: Value) -> Result<Value, ApiError> {
    let course: NewCourse = resource::decode_payload(payload)?;
    resource::encode_doc(&course)
}

/// The course list is the public catalogue; everything else needs a token.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list).merge(post(create).route_layer(from_fn(require_authenticated))),
        )
        .route(
            "/:id",
            get(get_one)
                .put(update)
                .delete(remove)
                .route_layer(from_fn(require_authenticated)),
        )
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    resource::create(&COURSE, &COURSE_CREATE, &state, payload).await
}

async fn list(State(state): State<AppState>) -> Result<Response, ApiError> {
    resource::list(&COURSE, &state).await
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    resource::get_by_id(&COURSE, &state, &id).await
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    resource::update(&COURSE, &state, &id, payload).await
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    resource::remove(&COURSE, &state, &id).await
}
