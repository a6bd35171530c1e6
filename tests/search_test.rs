use picaplate::cli::commands;
use picaplate::db::{self, recipes};
use picaplate::matcher::{rank, rank_scored, MatchField, RankOptions};
use serde_json::json;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::io::Write;

async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

fn write_fixture(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write fixture");
    file
}

const PANTRY_EXPORT: &str = r#"[
  {
    "Recipe": "Quick Garlic Butter Pasta",
    "Ingredients": "8 oz pasta\n4 cloves garlic, sliced\n2 tbsp butter\n2 tbsp olive oil\nSalt and pepper",
    "Ingredient(s) at The Pantry": "8 oz pasta\n4 cloves garlic, sliced\n2 tbsp olive oil",
    "Preparation": "Cook pasta.\nSizzle garlic in butter and oil.\nToss and season."
  },
  {
    "Recipe": "Hearty Beans and Rice Bowl",
    "Ingredients": "1 cup rice, 1 can black beans, 1 medium onion, 2 cloves garlic, 1 can diced tomatoes",
    "Ingredient(s) at The Pantry": "1 cup rice, 1 can black beans, 1 can diced tomatoes, 1 medium onion",
    "Preparation": "Cook rice.\nSimmer beans with onion, garlic and tomatoes."
  },
  {
    "Recipe": "Peanut Butter Banana Toast",
    "Ingredients": ["2 slices bread", "2 tbsp peanut butter", "1 ripe banana"],
    "Ingredient(s) at The Pantry": ["2 slices bread", "2 tbsp peanut butter"],
    "Preparation": ["Toast bread.", "Spread and top with banana."]
  },
  "not a recipe",
  {"Ingredients": "no title here"}
]"#;

#[tokio::test]
async fn test_import_then_rank() {
    let pool = test_pool().await;
    let fixture = write_fixture(PANTRY_EXPORT);

    let report = commands::import(&pool, fixture.path())
        .await
        .expect("Failed to import fixture");
    assert_eq!(report.imported, 4);
    assert_eq!(report.skipped, 1);

    let loaded = recipes::load_recipes(&pool)
        .await
        .expect("Failed to load recipes");
    assert_eq!(loaded.len(), 3, "Untitled documents should be skipped");
    assert_eq!(loaded[0].id, "recipe-1");

    let selected = ["Garlic", "Olive Oil", "Rice", "Black Beans", "Canned Tomatoes", "Onion"];
    let ranked = rank(loaded.clone(), &selected, &RankOptions::default());
    let titles: Vec<&str> = ranked.iter().map(|r| r.title.as_str()).collect();
    // "Canned Tomatoes" needs the token "canned", which "1 can diced tomatoes" lacks
    assert_eq!(
        titles,
        vec!["Hearty Beans and Rice Bowl", "Quick Garlic Butter Pasta"]
    );

    let scored = rank_scored(loaded, &selected, &RankOptions::default());
    assert_eq!(scored[0].match_count, 3);
    assert_eq!(scored[0].total_lines, 4);
    assert_eq!(scored[1].match_count, 2);
    assert_eq!(scored[1].matched_lines, vec!["4 cloves garlic, sliced", "2 tbsp olive oil"]);
}

#[tokio::test]
async fn test_full_ingredient_threshold_variant() {
    let pool = test_pool().await;
    let fixture = write_fixture(PANTRY_EXPORT);
    commands::import(&pool, fixture.path())
        .await
        .expect("Failed to import fixture");

    let loaded = recipes::load_recipes(&pool).await.unwrap();
    let options = RankOptions {
        field: MatchField::Ingredients,
        min_matches: 2,
    };

    let ranked = rank(loaded, &["Peanut Butter", "Banana", "Garlic"], &options);
    let titles: Vec<&str> = ranked.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Peanut Butter Banana Toast"]);
}

#[tokio::test]
async fn test_single_document_import() {
    let pool = test_pool().await;
    let fixture = write_fixture(r#"{"id": "oats", "title": "Overnight Oats", "pantryIngredients": "oats, milk"}"#);

    let report = commands::import(&pool, fixture.path()).await.unwrap();
    assert_eq!(report.imported, 1);

    let recipe = recipes::find_recipe(&pool, "oats").await.unwrap();
    assert_eq!(recipe.pantry_ingredients, vec!["oats", "milk"]);
    assert_eq!(recipes::count_documents(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn test_import_rejects_invalid_json() {
    let pool = test_pool().await;
    let fixture = write_fixture("{ not json");

    let result = commands::import(&pool, fixture.path()).await;
    assert!(matches!(result, Err(picaplate::Error::Json(_))));
}

#[tokio::test]
async fn test_import_is_all_or_nothing() {
    let pool = test_pool().await;
    sqlx::query(
        r#"
        CREATE TRIGGER reject_spoiled BEFORE INSERT ON recipes
        WHEN json_extract(NEW.document, '$.title') = 'Spoiled'
        BEGIN
            SELECT RAISE(ABORT, 'spoiled recipe');
        END
        "#,
    )
    .execute(&pool)
    .await
    .expect("Failed to create trigger");

    let fixture = write_fixture(
        r#"[
          {"title": "Rice Bowl", "pantryIngredients": "rice"},
          {"title": "Spoiled"},
          {"title": "Toast", "pantryIngredients": "bread"}
        ]"#,
    );

    let result = commands::import(&pool, fixture.path()).await;
    assert!(matches!(result, Err(picaplate::Error::Database(_))));
    assert_eq!(recipes::count_documents(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_search_is_repeatable_against_storage() {
    let pool = test_pool().await;
    recipes::insert_document(&pool, &json!({"title": "A", "pantryIngredients": ["rice", "milk"]}))
        .await
        .unwrap();
    recipes::insert_document(&pool, &json!({"title": "B", "pantryIngredients": ["almond milk"]}))
        .await
        .unwrap();

    let selected = ["Milk", "Rice"];
    let first = rank(recipes::load_recipes(&pool).await.unwrap(), &selected, &RankOptions::default());
    let second = rank(recipes::load_recipes(&pool).await.unwrap(), &selected, &RankOptions::default());

    assert_eq!(first, second);
    assert_eq!(first.iter().map(|r| r.title.as_str()).collect::<Vec<_>>(), vec!["A", "B"]);
}
