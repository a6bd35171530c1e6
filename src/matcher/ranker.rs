use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ingredient::IngredientQuery;
use super::tokenizer::token_set;
use crate::recipe::Recipe;

/// Which ingredient list of a recipe the ranker scores against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    /// Lines obtainable at the pantry.
    #[default]
    Pantry,
    /// The full ingredient list.
    Ingredients,
}

impl MatchField {
    pub fn lines<'a>(&self, recipe: &'a Recipe) -> &'a [String] {
        match self {
            MatchField::Pantry => &recipe.pantry_ingredients,
            MatchField::Ingredients => &recipe.ingredients,
        }
    }
}

impl FromStr for MatchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pantry" | "pantry_ingredients" | "pantryingredients" => Ok(MatchField::Pantry),
            "ingredients" | "all" => Ok(MatchField::Ingredients),
            other => Err(format!(
                "Invalid match field: {other}. Must be pantry or ingredients"
            )),
        }
    }
}

impl fmt::Display for MatchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchField::Pantry => write!(f, "pantry"),
            MatchField::Ingredients => write!(f, "ingredients"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankOptions {
    pub field: MatchField,
    /// Recipes matching fewer lines than this are dropped.
    pub min_matches: usize,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            field: MatchField::Pantry,
            min_matches: 1,
        }
    }
}

/// A recipe with the outcome of scoring it against a selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRecipe {
    pub recipe: Recipe,
    pub match_count: usize,
    pub total_lines: usize,
    /// The scored lines covered by at least one selected ingredient, in
    /// recipe order.
    pub matched_lines: Vec<String>,
}

/// Tokenized selection, reused across every recipe of one ranking pass.
struct Selection {
    queries: Vec<IngredientQuery>,
}

impl Selection {
    fn new<S: AsRef<str>>(selected: &[S]) -> Self {
        Self {
            queries: selected
                .iter()
                .map(|s| IngredientQuery::new(s.as_ref()))
                .filter(|q| !q.is_empty())
                .collect(),
        }
    }

    fn covers(&self, line_tokens: &HashSet<String>) -> bool {
        self.queries.iter().any(|q| q.matches_tokens(line_tokens))
    }

    fn matched_lines(&self, lines: &[String]) -> Vec<String> {
        lines
            .iter()
            .filter(|line| self.covers(&token_set(line)))
            .cloned()
            .collect()
    }
}

/// Count the lines of `field` in `recipe` that at least one selected
/// ingredient matches.
pub fn match_count<S: AsRef<str>>(recipe: &Recipe, selected: &[S], field: MatchField) -> usize {
    let selection = Selection::new(selected);
    field
        .lines(recipe)
        .iter()
        .filter(|line| selection.covers(&token_set(line)))
        .count()
}

/// Score, filter and sort recipes, keeping the per-recipe details.
///
/// An empty selection yields no results. Recipes below `options.min_matches`
/// are dropped; the rest are ordered by match count, highest first, with ties
/// left in input order.
pub fn rank_scored<S: AsRef<str>>(
    recipes: impl IntoIterator<Item = Recipe>,
    selected: &[S],
    options: &RankOptions,
) -> Vec<ScoredRecipe> {
    if selected.is_empty() {
        return Vec::new();
    }

    let selection = Selection::new(selected);
    if selection.queries.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<ScoredRecipe> = recipes
        .into_iter()
        .map(|recipe| {
            let lines = options.field.lines(&recipe);
            let total_lines = lines.len();
            let matched_lines = selection.matched_lines(lines);
            ScoredRecipe {
                match_count: matched_lines.len(),
                total_lines,
                matched_lines,
                recipe,
            }
        })
        .filter(|s| s.match_count >= options.min_matches)
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.match_count.cmp(&a.match_count));
    scored
}

/// Rank recipes against the selected ingredients, returning only recipes.
pub fn rank<S: AsRef<str>>(
    recipes: impl IntoIterator<Item = Recipe>,
    selected: &[S],
    options: &RankOptions,
) -> Vec<Recipe> {
    rank_scored(recipes, selected, options)
        .into_iter()
        .map(|s| s.recipe)
        .collect()
}
