//! Ingredient matching.
//!
//! A selected ingredient matches a recipe line when all of its tokens appear
//! among the line's tokens. The ranker scores recipes by how many of their
//! lines are matched.

pub mod ingredient;
pub mod ranker;
pub mod tokenizer;

pub use ingredient::{ingredient_matches, IngredientQuery};
pub use ranker::{match_count, rank, rank_scored, MatchField, RankOptions, ScoredRecipe};
pub use tokenizer::tokenize;
