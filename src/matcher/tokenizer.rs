//! Ingredient-line tokenizer.
//!
//! Splits on whitespace, lowercases each word, keeps only ASCII letters and
//! drops quantity, unit and preparation words. The result is consumed as a
//! set by the matcher, so order carries no meaning.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Words that never identify an ingredient: articles, connectors, units of
/// measure and preparation adjectives.
pub static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "an", "and", "at", "of", "to", "taste", "or",
        // Units and containers
        "cup", "cups", "clove", "cloves", "can", "cans", "oz", "ounce", "ounces", "tbsp", "tsp",
        "teaspoon", "teaspoons", "tablespoon", "tablespoons", "pouch",
        // Sizes and preparation
        "medium", "small", "large", "ripe", "fresh", "chopped", "diced", "sliced", "shredded",
        "grated", "minced",
    ]
    .into_iter()
    .collect()
});

/// Lowercase a word and strip everything outside `a-z`.
pub fn normalize_token(word: &str) -> String {
    word.chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_lowercase)
        .collect()
}

/// Returns `true` if `token` is a filler or measurement word.
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}

/// Tokenize one ingredient line.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace()
        .map(normalize_token)
        .filter(|token| !token.is_empty() && !is_stop_word(token))
        .collect()
}

/// Tokenize a line straight into a set, for the candidate side of a match.
pub fn token_set(line: &str) -> HashSet<String> {
    tokenize(line).into_iter().collect()
}
