use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Create payload: `user` names the creating user.
#[derive(Debug, Deserialize)]
pub struct NewFaq {
    pub question: String,
    pub description: String,
    #[serde(default)]
    pub image: String,
    pub categories: Vec<String>,
    pub user: String,
}

/// A FAQ document as persisted; the creation timestamp is server-assigned.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqDoc {
    pub question: String,
    pub description: String,
    pub image: String,
    pub categories: Vec<String>,
    pub user_created: String,
    pub created_faq: DateTime<Utc>,
    pub answers: Vec<Value>,
}

impl From<NewFaq> for FaqDoc {
    fn from(faq: NewFaq) -> Self {
        Self {
            question: faq.question,
            description: faq.description,
            image: faq.image,
            categories: faq.categories,
            user_created: faq.user,
            created_faq: Utc::now(),
            answers: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn faq_doc_carries_creator_and_timestamp() {
        let faq: NewFaq = serde_json::from_value(json!({
            "question": "Is there a certificate?",
            "description": "asking for a friend",
            "categories": ["c1"],
            "user": "admin"
        }))
        .unwrap();

        let doc = serde_json::to_value(FaqDoc::from(faq)).unwrap();
        assert_eq!(doc["userCreated"], "admin");
        assert_eq!(doc["image"], "");
        assert_eq!(doc["answers"], json!([]));
        assert!(doc["createdFaq"].is_string());
    }
}
