mod common;

use anyhow::Result;
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use medcourses_api::auth::{self, Claims};

#[tokio::test]
async fn missing_token_is_401() -> Result<()> {
    let (status, body) = common::send(
        common::test_app(),
        "POST",
        "/categories",
        None,
        Some(json!({"name": "Geriatrics"})),
    )
    .await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    Ok(())
}

#[tokio::test]
async fn garbage_token_is_401() -> Result<()> {
    let (status, _) = common::send(
        common::test_app(),
        "POST",
        "/categories",
        Some("not.a.token"),
        Some(json!({"name": "Geriatrics"})),
    )
    .await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn expired_token_is_401() -> Result<()> {
    let now = Utc::now();
    let claims = Claims {
        sub: Uuid::new_v4(),
        role: auth::ROLE_ADMIN.to_string(),
        exp: (now - Duration::hours(2)).timestamp(),
        iat: (now - Duration::hours(3)).timestamp(),
    };
    let token = auth::generate_jwt(&claims)?;

    let (status, _) = common::send(
        common::test_app(),
        "POST",
        "/categories",
        Some(&token),
        Some(json!({"name": "Geriatrics"})),
    )
    .await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn non_admin_token_is_403_on_admin_route() -> Result<()> {
    let token = common::user_token();

    let (status, body) = common::send(
        common::test_app(),
        "POST",
        "/categories",
        Some(&token),
        Some(json!({"name": "Geriatrics"})),
    )
    .await?;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
    Ok(())
}

#[tokio::test]
async fn user_listing_requires_admin() -> Result<()> {
    let (status, _) =
        common::send(common::test_app(), "GET", "/users", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = common::user_token();
    let (status, _) =
        common::send(common::test_app(), "GET", "/users", Some(&token), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

// An admin credential passes both middleware layers and reaches field
// validation, which rejects before any store access.
#[tokio::test]
async fn admin_token_reaches_validation() -> Result<()> {
    let token = common::admin_token();

    let (status, body) = common::send(
        common::test_app(),
        "POST",
        "/categories",
        Some(&token),
        Some(json!({})),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "name");
    assert_eq!(body["errors"][0]["message"], "The name is missing!");
    Ok(())
}

#[tokio::test]
async fn protected_reads_reject_anonymous_callers() -> Result<()> {
    let id = Uuid::new_v4();

    for uri in [
        format!("/courses/{}", id),
        format!("/units/{}", id),
        format!("/faqs/{}", id),
        format!("/users/{}", id),
    ] {
        let (status, _) = common::send(common::test_app(), "GET", &uri, None, None).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "expected 401 for {}", uri);
    }
    Ok(())
}
