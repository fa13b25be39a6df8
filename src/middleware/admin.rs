use axum::{extract::Request, middleware::Next, response::Response};

use super::auth::AuthUser;
use crate::error::ApiError;

/// Middleware gating admin-only routes. Must be layered after
/// [`require_authenticated`](super::require_authenticated), which provides
/// the `AuthUser` extension this reads.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    if !user.is_admin() {
        tracing::warn!("user {} denied admin route (role: {})", user.id, user.role);
        return Err(ApiError::forbidden("Administrator access required"));
    }

    Ok(next.run(request).await)
}
