pub mod document;

use serde::{Deserialize, Serialize};

use crate::matcher::tokenize;

pub use document::normalize_recipe_document;

/// A recipe in the shape the frontend consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub ingredients: Vec<String>,
    /// Lines obtainable at the pantry, a subset of `ingredients`.
    pub pantry_ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

/// Debug view of how a recipe's pantry lines tokenize.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryIndexEntry {
    pub id: String,
    pub title: String,
    pub pantry_ingredients: Vec<String>,
    pub pantry_ingredient_tokens: Vec<Vec<String>>,
}

impl From<Recipe> for PantryIndexEntry {
    fn from(recipe: Recipe) -> Self {
        let pantry_ingredient_tokens = recipe
            .pantry_ingredients
            .iter()
            .map(|line| tokenize(line))
            .collect();

        Self {
            id: recipe.id,
            title: recipe.title,
            pantry_ingredients: recipe.pantry_ingredients,
            pantry_ingredient_tokens,
        }
    }
}
