//! Normalization of stored recipe documents.
//!
//! Documents come from spreadsheet exports and hand-written JSON, so field
//! names vary ("Ingredient(s) at The Pantry", "pantryIngredients", ...) and
//! list fields may be arrays or a single comma/newline separated string.
//! Missing or mistyped fields become empty rather than errors.

use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::LazyLock;

use super::Recipe;

static FIELD_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n|,").expect("field separator pattern is valid"));

const TITLE_KEYS: &[&str] = &["Recipe", "recipe", "title"];
const INGREDIENT_KEYS: &[&str] = &["Ingredients", "ingredients"];
const PANTRY_KEYS: &[&str] = &[
    "Ingredient(s) at The Pantry",
    "ingredient(s) at the pantry",
    "pantryIngredients",
];
const INSTRUCTION_KEYS: &[&str] = &["Preparation", "preparation", "instructions"];

/// Lowercase a header and drop everything outside `a-z`.
pub fn normalize_header_key(key: &str) -> String {
    key.chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_lowercase)
        .collect()
}

/// JavaScript-style truthiness, used to pick the first populated field.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Coerce a scalar to text. Falsy values and containers become empty.
pub fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(_) if !is_present(value) => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Split a list field into trimmed, non-empty lines.
pub fn split_field(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| coerce_string(item).trim().to_string())
            .filter(|item| !item.is_empty())
            .collect(),
        Some(other) => FIELD_SEPARATOR
            .split(&coerce_string(other))
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}

struct Fields<'a> {
    raw: &'a Map<String, Value>,
    normalized: HashMap<String, &'a Value>,
}

impl<'a> Fields<'a> {
    fn new(raw: &'a Map<String, Value>) -> Self {
        let normalized = raw
            .iter()
            .map(|(key, value)| (normalize_header_key(key), value))
            .collect();
        Self { raw, normalized }
    }

    /// First present value among the exact keys, then the normalized ones.
    fn lookup(&self, exact: &[&str], normalized: &[&str]) -> Option<&'a Value> {
        exact
            .iter()
            .filter_map(|key| self.raw.get(*key))
            .chain(normalized.iter().filter_map(|key| self.normalized.get(*key).copied()))
            .find(|value| is_present(value))
    }
}

fn document_id(fields: &Fields<'_>) -> String {
    let value = fields.lookup(&["id", "_id"], &[]);
    let id = match value {
        // Extended JSON form of an ObjectId
        Some(Value::Object(obj)) => obj.get("$oid").map(coerce_string).unwrap_or_default(),
        Some(other) => coerce_string(other),
        None => String::new(),
    };
    id.trim().to_string()
}

/// Build a [`Recipe`] from a raw stored document.
///
/// `row_id` supplies the fallback id (`recipe-<row_id>`) for documents that
/// carry none. Non-object documents normalize to an untitled recipe, which
/// listings skip.
pub fn normalize_recipe_document(raw: &Value, row_id: i64) -> Recipe {
    let empty = Map::new();
    let fields = Fields::new(raw.as_object().unwrap_or(&empty));

    let title = fields
        .lookup(TITLE_KEYS, &["recipe"])
        .map(coerce_string)
        .unwrap_or_default()
        .trim()
        .to_string();

    let id = match document_id(&fields) {
        id if id.is_empty() => format!("recipe-{row_id}"),
        id => id,
    };

    Recipe {
        id,
        title,
        ingredients: split_field(fields.lookup(INGREDIENT_KEYS, &["ingredients"])),
        pantry_ingredients: split_field(
            fields.lookup(PANTRY_KEYS, &["ingredientsatthepantry", "ingredientspantry"]),
        ),
        instructions: split_field(fields.lookup(INSTRUCTION_KEYS, &["preparation"])),
    }
}
