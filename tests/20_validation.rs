mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn course_create_reports_each_missing_field() -> Result<()> {
    let token = common::admin_token();

    let (status, body) = common::send(
        common::test_app(),
        "POST",
        "/courses",
        Some(&token),
        Some(json!({"title": "Geriatrics 101"})),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 5);

    let messages: Vec<&str> = errors
        .iter()
        .map(|e| e["message"].as_str().unwrap())
        .collect();
    assert!(messages.contains(&"You must have at least one unit"));
    assert!(messages.contains(&"You must have at least one category"));
    assert!(messages.contains(&"The certificate is missing!"));
    Ok(())
}

#[tokio::test]
async fn empty_arrays_do_not_satisfy_course_rules() -> Result<()> {
    let token = common::admin_token();

    let (status, body) = common::send(
        common::test_app(),
        "POST",
        "/courses",
        Some(&token),
        Some(json!({
            "title": "Geriatrics 101",
            "units": [],
            "categories": [],
            "description": "intro",
            "certificate": "yes",
            "time": "20h"
        })),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    Ok(())
}

#[tokio::test]
async fn blank_category_name_is_400() -> Result<()> {
    let token = common::admin_token();

    let (status, body) = common::send(
        common::test_app(),
        "POST",
        "/categories",
        Some(&token),
        Some(json!({"name": "   "})),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["message"], "The name is missing!");
    Ok(())
}

#[tokio::test]
async fn faq_create_requires_the_creating_user() -> Result<()> {
    let token = common::user_token();

    let (status, body) = common::send(
        common::test_app(),
        "POST",
        "/faqs",
        Some(&token),
        Some(json!({
            "question": "Is there a certificate?",
            "description": "asking for a friend",
            "categories": ["c1"]
        })),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "user");
    assert_eq!(body["errors"][0]["message"], "The creating user is missing!");
    Ok(())
}

#[tokio::test]
async fn register_rejects_malformed_email() -> Result<()> {
    let (status, body) = common::send(
        common::test_app(),
        "POST",
        "/users/register",
        None,
        Some(json!({"name": "admin", "email": "not-an-email", "password": "12345"})),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["message"], "A valid email is required!");
    Ok(())
}

#[tokio::test]
async fn register_reports_all_missing_fields() -> Result<()> {
    let (status, body) = common::send(
        common::test_app(),
        "POST",
        "/users/register",
        None,
        Some(json!({})),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 3);
    Ok(())
}

#[tokio::test]
async fn login_requires_credentials() -> Result<()> {
    let (status, body) = common::send(
        common::test_app(),
        "POST",
        "/users/login",
        None,
        Some(json!({"email": "admin@example.com"})),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["message"], "A password is missing!");
    Ok(())
}

#[tokio::test]
async fn update_without_updatable_fields_is_400() -> Result<()> {
    let token = common::admin_token();

    let (status, body) = common::send(
        common::test_app(),
        "PUT",
        &format!("/categories/{}", Uuid::new_v4()),
        Some(&token),
        Some(json!({"role": "admin", "password": "pwned"})),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "No updatable fields provided");
    Ok(())
}

#[tokio::test]
async fn update_with_non_object_body_is_400() -> Result<()> {
    let token = common::admin_token();

    let (status, _) = common::send(
        common::test_app(),
        "PUT",
        &format!("/categories/{}", Uuid::new_v4()),
        Some(&token),
        Some(json!(["name"])),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}
