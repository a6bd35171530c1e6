use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use tracing::warn;

use crate::recipe::{normalize_recipe_document, Recipe};

/// A recipe document exactly as it was stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StoredRecipe {
    pub id: i64,
    pub document: String,
    pub created_at: DateTime<Utc>,
}

impl StoredRecipe {
    /// Parse the stored JSON. Unparseable text yields `Value::Null`.
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.document).unwrap_or_else(|e| {
            warn!("Stored recipe {} is not valid JSON: {}", self.id, e);
            Value::Null
        })
    }

    pub fn to_recipe(&self) -> Recipe {
        normalize_recipe_document(&self.json(), self.id)
    }
}
