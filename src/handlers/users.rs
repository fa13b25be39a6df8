use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware::from_fn,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use super::resource::{self, EntityDef};
use crate::auth::{self, Claims};
use crate::database::Collection;
use crate::error::{ApiError, FieldError};
use crate::middleware::{require_admin, require_authenticated};
use crate::models::user::{LoginRequest, RegisterRequest, UserDoc};
use crate::state::AppState;
use crate::validation::{self, FieldRule};

static USER: EntityDef = EntityDef {
    collection: "users",
    singular: "user",
    plural: "users",
    // role and password are deliberately not updatable through PUT
    update_whitelist: &[
        "name",
        "email",
        "image",
        "description",
        "active",
        "completedCourses",
        "coursesInProgress",
    ],
    list_fields: &["name", "image", "type", "createdUser", "completedCourses"],
    list_map: Some(list_map),
    redact_fields: &["password"],
};

/// List entries carry the completed-course count, not the ids.
fn list_map(entry: &mut Map<String, Value>) {
    let completed = entry
        .get("completedCourses")
        .and_then(Value::as_array)
        .map(|courses| courses.len())
        .unwrap_or(0);
    entry.insert("completedCourses".to_string(), Value::from(completed));
}

static REGISTER_RULES: &[FieldRule] = &[
    FieldRule::new("name", "The name is missing!"),
    FieldRule::new("email", "Your email is missing!"),
    FieldRule::new("password", "A password is missing!"),
];

static LOGIN_RULES: &[FieldRule] = &[
    FieldRule::new("email", "Your email is missing!"),
    FieldRule::new("password", "A password is missing!"),
];

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route(
            "/",
            get(list)
                .route_layer(from_fn(require_admin))
                .route_layer(from_fn(require_authenticated)),
        )
        .route(
            "/:id",
            get(get_one)
                .put(update)
                .route_layer(from_fn(require_authenticated)),
        )
}

/// POST /users/login - verify credentials and issue a bearer token
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    validation::check(LOGIN_RULES, &payload)?;
    let request: LoginRequest = resource::decode_payload(payload)?;

    let users = Collection::new("users", &state.pool);

    let Some(document) = users.find_by_field("email", &request.email).await? else {
        return Err(ApiError::not_found("Invalid email"));
    };

    let stored_hash = document
        .doc
        .get("password")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            tracing::error!("user {} has no password hash stored", document.id);
            ApiError::internal_server_error("An error occurred while logging in.")
        })?;

    if auth::verify_password(&request.password, stored_hash).is_err() {
        return Ok((
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "success": false,
                "accessToken": null,
                "msg": "Password is incorrect",
            })),
        )
            .into_response());
    }

    let role = document
        .doc
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or(auth::ROLE_USER);

    let token = auth::generate_jwt(&Claims::new(document.id, role))?;

    Ok(Json(json!({
        "success": true,
        "accessToken": token,
        "id": document.id,
        "type": role,
    }))
    .into_response())
}

/// POST /users/register - create an account with a hashed password
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    validation::check(REGISTER_RULES, &payload)?;
    let request: RegisterRequest = resource::decode_payload(payload)?;

    if !validation::looks_like_email(&request.email) {
        return Err(ApiError::validation_error(
            "Missing or invalid fields",
            vec![FieldError::new("email", "A valid email is required!")],
        ));
    }

    let users = Collection::new("users", &state.pool);

    if users.find_by_field("email", &request.email).await?.is_some() {
        return Err(ApiError::conflict("A user with this email already exists."));
    }

    let password_hash = auth::hash_password(&request.password).map_err(|e| {
        tracing::error!("password hashing failed: {}", e);
        ApiError::internal_server_error("An error occurred while creating the user.")
    })?;

    let doc = resource::encode_doc(&UserDoc::new(request.name, request.email, password_hash))?;
    let id = Uuid::new_v4();
    users.insert(id, &doc).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "msg": "New user created successfully!",
            "URL": format!("/users/{}", id),
        })),
    )
        .into_response())
}

/// GET /users - admin-only listing
async fn list(State(state): State<AppState>) -> Result<Response, ApiError> {
    resource::list(&USER, &state).await
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    resource::get_by_id(&USER, &state, &id).await
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    resource::update(&USER, &state, &id, payload).await
}
