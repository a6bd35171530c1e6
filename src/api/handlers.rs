use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    api::models::*,
    config::Settings,
    db,
    matcher::{rank, rank_scored, ScoredRecipe},
    recipe::{PantryIndexEntry, Recipe},
    Result,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::SqlitePool,
    pub settings: Settings,
}

/// GET /recipes - All titled recipes in normalized shape
pub async fn list_recipes(State(state): State<AppState>) -> Result<Json<Vec<Recipe>>> {
    debug!("List recipes request");

    let recipes = db::recipes::load_recipes(&state.pool).await?;
    Ok(Json(recipes))
}

/// GET /recipes/pantry-index - Pantry lines and their tokens, for debugging matches
pub async fn pantry_index(State(state): State<AppState>) -> Result<Json<Vec<PantryIndexEntry>>> {
    debug!("Pantry index request");

    let entries = db::recipes::load_recipes(&state.pool)
        .await?
        .into_iter()
        .map(PantryIndexEntry::from)
        .collect();

    Ok(Json(entries))
}

/// GET /recipes/:id - One recipe by its normalized id
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>> {
    debug!("Get recipe request: {}", id);

    let recipe = db::recipes::find_recipe(&state.pool, &id).await?;
    Ok(Json(recipe))
}

/// A search body that is not declared as JSON counts as no selection.
/// Malformed JSON is rejected.
fn search_body(body: std::result::Result<Json<Value>, JsonRejection>) -> Result<Value> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(Value::Null),
        Err(rejection) => Err(rejection.into()),
    }
}

/// Decode the selection and load recipes, or `None` when nothing was selected.
async fn selection_and_recipes(
    state: &AppState,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Option<(Vec<String>, Vec<Recipe>)>> {
    let request = SearchRequest::from_body(&search_body(body)?);

    if request.ingredients.is_empty() {
        debug!("Search request with empty selection");
        return Ok(None);
    }

    let recipes = db::recipes::load_recipes(&state.pool).await?;
    Ok(Some((request.ingredients, recipes)))
}

/// POST /recipes/search - Recipes ranked by matched pantry lines
pub async fn search_recipes(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<Vec<Recipe>>> {
    let Some((selected, recipes)) = selection_and_recipes(&state, body).await? else {
        return Ok(Json(Vec::new()));
    };

    let options = state.settings.matching.rank_options();
    let candidates = recipes.len();
    let ranked = rank(recipes, &selected, &options);

    debug!(
        "Search for {} ingredients matched {}/{} recipes",
        selected.len(),
        ranked.len(),
        candidates
    );

    Ok(Json(ranked))
}

/// POST /recipes/search/scored - Same ranking, with match counts and matched lines
pub async fn search_recipes_scored(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<Vec<ScoredRecipe>>> {
    let Some((selected, recipes)) = selection_and_recipes(&state, body).await? else {
        return Ok(Json(Vec::new()));
    };

    let options = state.settings.matching.rank_options();
    let scored = rank_scored(recipes, &selected, &options);

    debug!(
        "Scored search for {} ingredients matched {} recipes",
        selected.len(),
        scored.len()
    );

    Ok(Json(scored))
}

/// POST /recipes - Store a recipe document as-is
pub async fn create_recipe(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<CreatedResponse>> {
    let Json(document) = body?;
    let stored = db::recipes::insert_document(&state.pool, &document).await?;
    let recipe = stored.to_recipe();

    info!("Recipe added: {} ({})", recipe.id, recipe.title);

    Ok(Json(CreatedResponse {
        message: "Recipe added!".to_string(),
        id: recipe.id,
    }))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

/// GET /ready - Readiness check endpoint
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<ReadinessResponse>> {
    let count = db::recipes::count_documents(&state.pool).await.ok();

    Ok(Json(ReadinessResponse {
        ready: count.is_some(),
        database: if count.is_some() { "ok" } else { "error" }.to_string(),
        recipes: count.unwrap_or(0),
    }))
}
