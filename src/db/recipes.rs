use crate::db::{models::StoredRecipe, DbPool};
use crate::error::{Error, Result};
use crate::recipe::Recipe;
use chrono::Utc;
use serde_json::Value;
use sqlx::{Executor, Sqlite};
use tracing::debug;

/// Store a raw recipe document. Only JSON objects are accepted.
///
/// Takes a pool or an open transaction.
pub async fn insert_document<'e, E>(executor: E, document: &Value) -> Result<StoredRecipe>
where
    E: Executor<'e, Database = Sqlite>,
{
    if !document.is_object() {
        return Err(Error::Validation(
            "Recipe document must be a JSON object".to_string(),
        ));
    }

    let stored = sqlx::query_as::<_, StoredRecipe>(
        r#"
        INSERT INTO recipes (document, created_at)
        VALUES (?, ?)
        RETURNING *
        "#,
    )
    .bind(serde_json::to_string(document)?)
    .bind(Utc::now())
    .fetch_one(executor)
    .await?;

    debug!("Stored recipe document {}", stored.id);
    Ok(stored)
}

/// List every stored document in insertion order
pub async fn list_documents(pool: &DbPool) -> Result<Vec<StoredRecipe>> {
    let documents = sqlx::query_as::<_, StoredRecipe>("SELECT * FROM recipes ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(documents)
}

/// Count stored documents, titled or not
pub async fn count_documents(pool: &DbPool) -> Result<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes")
        .fetch_one(pool)
        .await?;
    Ok(count.0)
}

/// Load and normalize all recipes, skipping documents without a title
pub async fn load_recipes(pool: &DbPool) -> Result<Vec<Recipe>> {
    let recipes: Vec<Recipe> = list_documents(pool)
        .await?
        .iter()
        .map(StoredRecipe::to_recipe)
        .filter(|recipe| !recipe.title.is_empty())
        .collect();

    debug!("Loaded {} titled recipes", recipes.len());
    Ok(recipes)
}

/// Find a normalized recipe by its normalized id
pub async fn find_recipe(pool: &DbPool, id: &str) -> Result<Recipe> {
    load_recipes(pool)
        .await?
        .into_iter()
        .find(|recipe| recipe.id == id)
        .ok_or_else(|| Error::NotFound(format!("Recipe {id} not found")))
}
