use axum::{
    extract::{Path, State},
    middleware::from_fn,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde_json::{Map, Value};

use super::resource::{self, CreateSpec, EntityDef};
use crate::error::ApiError;
use crate::middleware::require_authenticated;
use crate::models::faq::{FaqDoc, NewFaq};
use crate::state::AppState;
use crate::validation::FieldRule;

static FAQ: EntityDef = EntityDef {
    collection: "faqs",
    singular: "faq",
    plural: "faqs",
    update_whitelist: &["question", "description", "image", "categories", "answers"],
    list_fields: &["question", "description", "categories", "createdFaq", "answers"],
    list_map: Some(list_map),
    redact_fields: &[],
};

static FAQ_CREATE: CreateSpec = CreateSpec {
    rules: &[
        FieldRule::new("question", "The question is missing!"),
        FieldRule::new("description", "The description is missing!"),
        FieldRule::new("categories", "You must have at least one category"),
        FieldRule::new("user", "The creating user is missing!"),
    ],
    build_doc,
    unique: None,
};

fn build_doc(payload: Value) -> Result<Value, ApiError> {
    let faq: NewFaq = resource::decode_payload(payload)?;
    resource::encode_doc(&FaqDoc::from(faq))
}

/// List entries carry the answer count and the date part of the creation
/// timestamp rather than the full values.
fn list_map(entry: &mut Map<String, Value>) {
    if let Some(answers) = entry.get("answers").and_then(Value::as_array) {
        let count = answers.len();
        entry.insert("answers".to_string(), Value::from(count));
    }
    if let Some(created) = entry.get("createdFaq").and_then(Value::as_str) {
        let date_only = created.split('T').next().unwrap_or(created).to_string();
        entry.insert("createdFaq".to_string(), Value::String(date_only));
    }
}

/// The FAQ list is public; everything else needs a token.
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
    resource::create(&FAQ, &FAQ_CREATE, &state, payload).await
}

async fn list(State(state): State<AppState>) -> Result<Response, ApiError> {
    resource::list(&FAQ, &state).await
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    resource::get_by_id(&FAQ, &state, &id).await
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    resource::update(&FAQ, &state, &id, payload).await
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    resource::remove(&FAQ, &state, &id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_map_counts_answers_and_trims_timestamp() {
        let mut entry = json!({
            "answers": [{"user": "u", "comment": "c", "votes": 5}],
            "createdFaq": "2023-12-07T10:15:30.000Z"
        })
        .as_object()
        .cloned()
        .unwrap();

        list_map(&mut entry);

        assert_eq!(entry["answers"], 1);
        assert_eq!(entry["createdFaq"], "2023-12-07");
    }
}
