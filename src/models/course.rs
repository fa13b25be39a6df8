use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Create payload for a course. Optional fields take the collection's
/// defaults when omitted.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub title: String,
    pub units: Vec<String>,
    pub categories: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub features: String,
    pub certificate: String,
    #[serde(default)]
    pub comments: Vec<Value>,
    #[serde(default)]
    pub more_info: String,
    #[serde(default)]
    pub rating: f64,
    pub time: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_fields_default() {
        let course: NewCourse = serde_json::from_value(json!({
            "title": "Geriatrics 101",
            "units": ["u1"],
            "categories": ["c1"],
            "description": "intro",
            "certificate": "Certificate of completion",
            "time": "20h"
        }))
        .unwrap();

        assert_eq!(course.rating, 0.0);
        assert!(course.features.is_empty());
        assert!(course.comments.is_empty());

        let doc = serde_json::to_value(&course).unwrap();
        assert_eq!(doc["moreInfo"], "");
    }
}
