use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
pub struct NewUnit {
    pub title: String,
    #[serde(default)]
    pub video: String,
    #[serde(default)]
    pub slide: String,
    #[serde(default)]
    pub image: String,
    pub description: String,
    #[serde(default)]
    pub exercises: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn media_references_default_to_empty() {
        let unit: NewUnit = serde_json::from_value(json!({
            "title": "Anatomy basics",
            "description": "skeleton walkthrough"
        }))
        .unwrap();

        assert!(unit.video.is_empty());
        assert!(unit.slide.is_empty());
        assert!(unit.exercises.is_empty());
    }
}
