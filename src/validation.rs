use serde_json::Value;

use crate::error::{ApiError, FieldError};

/// A required, non-empty field and the message reported when it is absent.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldRule {
    pub const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Check every rule against the payload. Violations are collected into a
/// single 400 with one entry per field; nothing reaches the store on failure.
pub fn check(rules: &[FieldRule], payload: &Value) -> Result<(), ApiError> {
    let Some(obj) = payload.as_object() else {
        return Err(ApiError::validation_error(
            "Request body must be a JSON object",
            vec![],
        ));
    };

    let mut errors = Vec::new();
    for rule in rules {
        let satisfied = match obj.get(rule.field) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(_) => true,
        };
        if !satisfied {
            errors.push(FieldError::new(rule.field, rule.message));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error(
            "Missing or invalid fields",
            errors,
        ))
    }
}

/// Minimal email shape check: something@domain.tld
pub fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
