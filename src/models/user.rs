use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A user document as persisted. `password` holds the argon2 hash and is
/// redacted from every response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDoc {
    pub name: String,
    pub email: String,
    pub password: String,
    pub image: String,
    pub description: String,
    #[serde(rename = "type")]
    pub role: String,
    pub active: bool,
    pub completed_courses: Vec<Value>,
    pub courses_in_progress: Vec<Value>,
    pub created_user: DateTime<Utc>,
}

impl UserDoc {
    /// Build a fresh user document with server-assigned defaults.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            name,
            email,
            password: password_hash,
            image: String::new(),
            description: String::new(),
            role: auth::ROLE_USER.to_string(),
            active: true,
            completed_courses: Vec::new(),
            courses_in_progress: Vec::new(),
            created_user: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_doc_serializes_with_defaults() {
        let doc = UserDoc::new(
            "admin".to_string(),
            "admin@example.com".to_string(),
            "$argon2id$...".to_string(),
        );
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["type"], "user");
        assert_eq!(value["active"], true);
        assert_eq!(value["completedCourses"], serde_json::json!([]));
        assert_eq!(value["coursesInProgress"], serde_json::json!([]));
        assert!(value["createdUser"].is_string());
    }
}
