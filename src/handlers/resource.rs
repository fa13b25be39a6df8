//! Generic CRUD controller shared by every resource family.
//!
//! Each resource supplies a static [`EntityDef`] (and a [`CreateSpec`] where
//! the generic create path applies); the handlers here perform the single
//! store operation and map the outcome onto the JSON envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::database::Collection;
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::{self, FieldRule};

/// Static description of one resource family.
pub struct EntityDef {
    /// Collection/table name, also the URL base path segment
    pub collection: &'static str,
    pub singular: &'static str,
    pub plural: &'static str,
    /// Fields a PUT may merge; everything else in the payload is dropped
    pub update_whitelist: &'static [&'static str],
    /// Projection returned by the list operation
    pub list_fields: &'static [&'static str],
    /// Optional per-entry rewrite applied after projection
    pub list_map: Option<fn(&mut Map<String, Value>)>,
    /// Fields stripped from get-by-id responses
    pub redact_fields: &'static [&'static str],
}

/// Create-path configuration for resources served by the generic create.
pub struct CreateSpec {
    pub rules: &'static [FieldRule],
    /// Normalize the validated payload into the stored document shape
    pub build_doc: fn(Value) -> Result<Value, ApiError>,
    pub unique: Option<UniqueRule>,
}

/// A field that must be unique within the collection.
pub struct UniqueRule {
    pub field: &'static str,
    pub message: &'static str,
}

pub async fn create(
    def: &EntityDef,
    spec: &CreateSpec,
    state: &AppState,
    payload: Value,
) -> Result<Response, ApiError> {
    validation::check(spec.rules, &payload)?;

    let collection = Collection::new(def.collection, &state.pool);

    if let Some(unique) = &spec.unique {
        if let Some(value) = payload.get(unique.field).and_then(Value::as_str) {
            if collection.find_by_field(unique.field, value).await?.is_some() {
                return Err(ApiError::conflict(unique.message));
            }
        }
    }

    let doc = (spec.build_doc)(payload)?;
    let id = Uuid::new_v4();
    collection.insert(id, &doc).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "msg": format!("New {} created successfully!", def.singular),
            "URL": format!("/{}/{}", def.collection, id),
        })),
    )
        .into_response())
}

pub async fn list(def: &EntityDef, state: &AppState) -> Result<Response, ApiError> {
    let documents = Collection::new(def.collection, &state.pool)
        .find_all()
        .await?;

    let entries: Vec<Value> = documents
        .iter()
        .map(|document| project(def, document.id, &document.doc))
        .collect();

    Ok(keyed_envelope(def.plural, Value::Array(entries)).into_response())
}

pub async fn get_by_id(def: &EntityDef, state: &AppState, id: &str) -> Result<Response, ApiError> {
    let not_found =
        || ApiError::not_found(format!("Unable to find any {} with the ID {}", def.singular, id));

    let uuid = Uuid::parse_str(id).map_err(|_| not_found())?;

    let doc = Collection::new(def.collection, &state.pool)
        .find_by_id(uuid)
        .await?
        .ok_or_else(not_found)?;

    Ok(keyed_envelope(def.singular, with_id(def, uuid, doc)).into_response())
}

pub async fn update(
    def: &EntityDef,
    state: &AppState,
    id: &str,
    payload: Value,
) -> Result<Response, ApiError> {
    let not_found = || {
        ApiError::not_found(format!(
            "Cannot update {} with id={}. Check that it exists!",
            def.singular, id
        ))
    };

    let uuid = Uuid::parse_str(id).map_err(|_| not_found())?;
    let patch = filter_to_whitelist(def.update_whitelist, &payload)?;

    let updated = Collection::new(def.collection, &state.pool)
        .merge(uuid, &Value::Object(patch))
        .await?;

    if !updated {
        return Err(not_found());
    }

    Ok(Json(json!({
        "success": true,
        "msg": format!("{} updated successfully!", capitalize(def.singular)),
    }))
    .into_response())
}

pub async fn remove(def: &EntityDef, state: &AppState, id: &str) -> Result<Response, ApiError> {
    let not_found = || {
        ApiError::not_found(format!(
            "It is not possible to delete the {} with id={} as it does not exist.",
            def.singular, id
        ))
    };

    let uuid = Uuid::parse_str(id).map_err(|_| not_found())?;

    let deleted = Collection::new(def.collection, &state.pool)
        .delete(uuid)
        .await?;

    if !deleted {
        return Err(not_found());
    }

    Ok(Json(json!({
        "success": true,
        "msg": format!(
            "{} with id={} was successfully deleted!",
            capitalize(def.singular),
            id
        ),
    }))
    .into_response())
}

/// Deserialize a payload into its typed shape, reporting type mismatches as
/// a validation failure rather than a 500.
pub fn decode_payload<T: DeserializeOwned>(payload: Value) -> Result<T, ApiError> {
    serde_json::from_value(payload)
        .map_err(|e| ApiError::validation_error(format!("Invalid payload: {}", e), vec![]))
}

pub fn encode_doc<T: Serialize>(doc: &T) -> Result<Value, ApiError> {
    serde_json::to_value(doc).map_err(|e| {
        tracing::error!("failed to serialize document: {}", e);
        ApiError::internal_server_error("An error occurred while processing your request")
    })
}

/// Keep only whitelisted fields of an update payload. An update carrying no
/// usable field is a client error, not a silent no-op.
fn filter_to_whitelist(
    whitelist: &[&str],
    payload: &Value,
) -> Result<Map<String, Value>, ApiError> {
    let Some(obj) = payload.as_object() else {
        return Err(ApiError::validation_error(
            "Request body must be a JSON object",
            vec![],
        ));
    };

    let patch: Map<String, Value> = obj
        .iter()
        .filter(|(key, _)| whitelist.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    if patch.is_empty() {
        return Err(ApiError::validation_error(
            "No updatable fields provided",
            vec![],
        ));
    }

    Ok(patch)
}

fn project(def: &EntityDef, id: Uuid, doc: &Value) -> Value {
    let mut entry = Map::new();
    entry.insert("_id".to_string(), Value::String(id.to_string()));

    if let Some(obj) = doc.as_object() {
        for field in def.list_fields {
            if let Some(value) = obj.get(*field) {
                entry.insert((*field).to_string(), value.clone());
            }
        }
    }

    if let Some(map_fn) = def.list_map {
        map_fn(&mut entry);
    }

    Value::Object(entry)
}

fn with_id(def: &EntityDef, id: Uuid, doc: Value) -> Value {
    let mut obj = match doc {
        Value::Object(obj) => obj,
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            map
        }
    };
    for field in def.redact_fields {
        obj.remove(*field);
    }
    obj.insert("_id".to_string(), Value::String(id.to_string()));
    Value::Object(obj)
}

fn keyed_envelope(key: &str, value: Value) -> Json<Value> {
    let mut body = Map::new();
    body.insert("success".to_string(), Value::Bool(true));
    body.insert(key.to_string(), value);
    Json(Value::Object(body))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
