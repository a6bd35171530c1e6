use axum::body::Body;
use axum::http::{Request, StatusCode};
use picaplate::api::{handlers::AppState, routes};
use picaplate::config::{DatabaseConfig, MatchingConfig, ServerConfig, Settings};
use picaplate::db;
use picaplate::MatchField;
use std::time::Duration;
use tower::ServiceExt;

fn settings(api_rate_limit: u64) -> Settings {
    Settings {
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            connection_timeout_seconds: 30,
            idle_timeout_seconds: 600,
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5050,
            external_url: None,
            api_rate_limit,
            max_request_body_size: 1048576,
        },
        matching: MatchingConfig {
            field: MatchField::Pantry,
            min_match_count: 1,
        },
    }
}

async fn test_router(api_rate_limit: u64) -> axum::Router {
    let settings = settings(api_rate_limit);
    let pool = db::init_pool_with_config(&settings.database)
        .await
        .expect("Failed to create in-memory database");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let state = AppState {
        pool,
        settings: settings.clone(),
    };
    routes::create_router(state, &settings)
}

async fn list_status(app: &axum::Router) -> StatusCode {
    let request = Request::builder()
        .uri("/recipes")
        .body(Body::empty())
        .expect("Failed to build request");
    app.clone()
        .oneshot(request)
        .await
        .expect("Router failed")
        .status()
}

#[tokio::test]
async fn test_rate_limit_is_requests_per_second() {
    let app = test_router(2).await;

    // Burst is twice the per-second rate
    let mut burst = Vec::new();
    for _ in 0..5 {
        burst.push(list_status(&app).await);
    }
    assert_eq!(
        burst,
        vec![
            StatusCode::OK,
            StatusCode::OK,
            StatusCode::OK,
            StatusCode::OK,
            StatusCode::TOO_MANY_REQUESTS,
        ]
    );

    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert_eq!(list_status(&app).await, StatusCode::OK);
    assert_eq!(list_status(&app).await, StatusCode::OK);
}

#[tokio::test]
async fn test_health_is_not_rate_limited() {
    let app = test_router(1).await;

    for _ in 0..5 {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .expect("Failed to build request");
        let status = app
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed")
            .status();
        assert_eq!(status, StatusCode::OK);
    }
}
