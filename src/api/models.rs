use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::recipe::document::coerce_string;

/// Search request body: `{"ingredients": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl SearchRequest {
    /// Lenient decoding of an arbitrary JSON body.
    ///
    /// A missing or non-array `ingredients` is an empty selection. Items are
    /// coerced to text and trimmed; empty ones are dropped.
    pub fn from_body(body: &Value) -> Self {
        let ingredients = match body.get("ingredients") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| coerce_string(item).trim().to_string())
                .filter(|item| !item.is_empty())
                .collect(),
            _ => Vec::new(),
        };

        Self { ingredients }
    }
}

/// Response to a stored recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Readiness check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub database: String,
    pub recipes: i64,
}
