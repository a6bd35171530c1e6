use std::collections::HashSet;

use super::tokenizer::{token_set, tokenize};

/// A selected ingredient phrase, tokenized once so it can be tested against
/// many candidate lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientQuery {
    tokens: Vec<String>,
}

impl IngredientQuery {
    pub fn new(phrase: &str) -> Self {
        Self {
            tokens: tokenize(phrase),
        }
    }

    /// A query that tokenizes to nothing never matches.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Subset test against an already tokenized candidate line.
    pub fn matches_tokens(&self, candidate: &HashSet<String>) -> bool {
        !self.tokens.is_empty()
            && !candidate.is_empty()
            && self.tokens.iter().all(|token| candidate.contains(token))
    }

    pub fn matches(&self, candidate_line: &str) -> bool {
        !self.is_empty() && self.matches_tokens(&token_set(candidate_line))
    }
}

/// Returns `true` when every token of `selected` appears in `candidate_line`.
///
/// Both sides must tokenize to something: `""` never matches and nothing
/// matches `""`.
pub fn ingredient_matches(selected: &str, candidate_line: &str) -> bool {
    IngredientQuery::new(selected).matches(candidate_line)
}
