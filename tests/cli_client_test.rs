use mockito::Matcher;
use picaplate::cli::commands;
use reqwest::Client;
use serde_json::json;

#[tokio::test]
async fn test_fetch_search_posts_selection() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/recipes/search")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"ingredients": ["Garlic", "Rice"]})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([{
                "id": "bean-bowl",
                "title": "Beans and Rice",
                "ingredients": ["rice", "beans", "garlic"],
                "pantryIngredients": ["1 cup rice"],
                "instructions": ["Cook."]
            }])
            .to_string(),
        )
        .create_async()
        .await;

    let ingredients = vec!["Garlic".to_string(), "Rice".to_string()];
    let results = commands::fetch_search(&Client::new(), &server.url(), &ingredients)
        .await
        .expect("Search request failed");

    mock.assert_async().await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "bean-bowl");
    assert_eq!(results[0].pantry_ingredients, vec!["1 cup rice"]);
}

#[tokio::test]
async fn test_fetch_scored_search() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/recipes/search/scored")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([{
                "recipe": {
                    "id": "toast",
                    "title": "Toast",
                    "ingredients": [],
                    "pantryIngredients": ["2 slices bread", "butter"],
                    "instructions": []
                },
                "matchCount": 1,
                "totalLines": 2,
                "matchedLines": ["2 slices bread"]
            }])
            .to_string(),
        )
        .create_async()
        .await;

    let results = commands::fetch_scored_search(&Client::new(), &server.url(), &["bread".to_string()])
        .await
        .expect("Scored search request failed");

    mock.assert_async().await;
    assert_eq!(results[0].recipe.title, "Toast");
    assert_eq!(results[0].match_count, 1);
    assert_eq!(results[0].total_lines, 2);
}

#[tokio::test]
async fn test_fetch_search_surfaces_server_errors() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/recipes/search")
        .with_status(500)
        .with_body(r#"{"error": "Database error"}"#)
        .create_async()
        .await;

    let result = commands::fetch_search(&Client::new(), &server.url(), &["rice".to_string()]).await;
    assert!(matches!(result, Err(picaplate::Error::Http(_))));
}
