use crate::api::models::SearchRequest;
use crate::db::{self, DbPool};
use crate::matcher::{tokenize, ScoredRecipe};
use crate::recipe::Recipe;
use crate::{Error, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};
use url::Url;

/// Outcome of importing a file of recipe documents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

/// Import recipe documents from a JSON file into storage
pub async fn import(pool: &DbPool, path: impl AsRef<Path>) -> Result<ImportReport> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path).await?;
    let value: Value = serde_json::from_str(&content)?;

    let documents = match value {
        Value::Array(items) => items,
        other => vec![other],
    };

    let mut report = ImportReport::default();
    let mut tx = pool.begin().await?;
    for (index, document) in documents.iter().enumerate() {
        if !document.is_object() {
            warn!("Skipping entry {} in {}: not a JSON object", index, path.display());
            report.skipped += 1;
            continue;
        }

        db::recipes::insert_document(&mut *tx, document).await?;
        report.imported += 1;
    }
    tx.commit().await?;

    info!(
        "Imported {} recipe documents from {} ({} skipped)",
        report.imported,
        path.display(),
        report.skipped
    );

    Ok(report)
}

fn endpoint(server_url: &str, path: &str) -> Result<Url> {
    let mut base = Url::parse(server_url)?;
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    Ok(base.join(path)?)
}

async fn post_search<T: DeserializeOwned>(
    client: &Client,
    server_url: &str,
    path: &str,
    ingredients: &[String],
) -> Result<T> {
    let url = endpoint(server_url, path)?;
    let request = SearchRequest {
        ingredients: ingredients.to_vec(),
    };

    let response = client
        .post(url)
        .json(&request)
        .send()
        .await?
        .error_for_status()?;

    Ok(response.json().await?)
}

/// Ask a running server for ranked recipes
pub async fn fetch_search(
    client: &Client,
    server_url: &str,
    ingredients: &[String],
) -> Result<Vec<Recipe>> {
    post_search(client, server_url, "recipes/search", ingredients).await
}

/// Ask a running server for ranked recipes with match details
pub async fn fetch_scored_search(
    client: &Client,
    server_url: &str,
    ingredients: &[String],
) -> Result<Vec<ScoredRecipe>> {
    post_search(client, server_url, "recipes/search/scored", ingredients).await
}

/// Search for recipes and print them
pub async fn search(server_url: &str, ingredients: &[String], scored: bool) -> Result<()> {
    let client = Client::new();

    if scored {
        let results = fetch_scored_search(&client, server_url, ingredients).await?;
        print_scored_results(&results);
    } else {
        let results = fetch_search(&client, server_url, ingredients).await?;
        print_search_results(&results);
    }

    Ok(())
}

/// Print the tokens of one ingredient line
pub fn print_tokens(line: &str) -> Result<()> {
    let tokens = tokenize(line);
    if tokens.is_empty() {
        return Err(Error::Validation(format!(
            "\"{line}\" has no ingredient words"
        )));
    }

    println!("{}", tokens.join(" "));
    Ok(())
}

fn print_search_results(results: &[Recipe]) {
    if results.is_empty() {
        println!("No recipes found");
        return;
    }

    println!("\nFound {} recipes:\n", results.len());
    println!("{:<24} {:<50}", "ID", "Title");
    println!("{}", "-".repeat(75));

    for recipe in results {
        println!(
            "{:<24} {:<50}",
            truncate(&recipe.id, 22),
            truncate(&recipe.title, 48)
        );
    }
}

fn print_scored_results(results: &[ScoredRecipe]) {
    if results.is_empty() {
        println!("No recipes found");
        return;
    }

    println!("\nFound {} recipes:\n", results.len());
    for scored in results {
        println!(
            "{} ({}/{} ingredients)",
            scored.recipe.title, scored.match_count, scored.total_lines
        );
        for line in &scored.matched_lines {
            println!("  \u{2713} {line}");
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
