//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use supplement_cache::{
    api::create_router,
    domain::{ProductListQuery, Role},
    trie::{Vocabulary, VocabularyStore},
    AppState, Config,
};
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_state() -> AppState {
    let vocabulary = Vocabulary::from_seed(VocabularyStore::new("/nonexistent/autocomplete"));
    AppState::from_config(&Config::default(), vocabulary)
}

fn create_test_app() -> Router {
    create_router(create_test_state())
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// == Autocomplete Endpoint Tests ==

#[tokio::test]
async fn test_autocomplete_returns_seed_suggestions() {
    let app = create_test_app();

    let response = app
        .oneshot(get("/autocomplete/products?q=whey"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["kind"], "products");
    assert_eq!(json["query"], "whey");
    assert_eq!(json["suggestions"], json!(["whey isolate"]));
}

#[tokio::test]
async fn test_autocomplete_is_case_insensitive() {
    let app = create_test_app();

    let response = app
        .oneshot(get("/autocomplete/brands?q=OPTIMUM"))
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["suggestions"], json!(["optimum nutrition"]));
}

#[tokio::test]
async fn test_autocomplete_respects_limit() {
    let app = create_test_app();

    let response = app
        .oneshot(get("/autocomplete/products?q=p&limit=2"))
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    // "pre workout", "pre-jym" and "protein powder" all match
    assert_eq!(json["suggestions"], json!(["pre workout", "pre-jym"]));
}

#[tokio::test]
async fn test_autocomplete_unknown_prefix_is_empty() {
    let app = create_test_app();

    let response = app
        .oneshot(get("/autocomplete/flavors?q=xyz"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["suggestions"], json!([]));
}

#[tokio::test]
async fn test_autocomplete_unknown_kind() {
    let app = create_test_app();

    let response = app
        .oneshot(get("/autocomplete/colors?q=b"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("colors"));
}

// == Vocabulary Endpoint Tests ==

#[tokio::test]
async fn test_added_products_become_suggestions() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/vocabulary/products",
            json!([
                {"name": "Nitro Tech", "brand": "MuscleTech", "flavor": "Milk Chocolate"},
                {"name": "ISO100", "brand": "Dymatize"}
            ]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["products"], 2);
    assert_eq!(json["added"], 4);

    let response = app.oneshot(get("/autocomplete/products?q=nit")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["suggestions"], json!(["nitro tech"]));
}

#[tokio::test]
async fn test_flush_endpoint_persists_vocabulary() {
    let dir = tempfile::tempdir().unwrap();
    let vocabulary = Vocabulary::from_seed(VocabularyStore::new(dir.path()));
    let app = create_router(AppState::from_config(&Config::default(), vocabulary));

    let response = app
        .oneshot(post_json("/vocabulary/flush", json!(null)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["saved"], true);

    for file in ["products.json", "brands.json", "flavors.json"] {
        assert!(dir.path().join(file).exists(), "{} missing", file);
    }
}

// == Invalidate Endpoint Tests ==

#[tokio::test]
async fn test_invalidate_products_scope() {
    let state = create_test_state();
    state
        .products
        .set(&ProductListQuery::page(1, 25), json!([{"id": 1}]))
        .await;
    let app = create_router(state.clone());

    let response = app
        .oneshot(post_json("/invalidate", json!({"scope": "products"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["scope"], "products");
    assert_eq!(json["removed"], 1);
    assert_eq!(state.products.get(&ProductListQuery::page(1, 25)).await, None);
}

#[tokio::test]
async fn test_invalidate_roles_scope() {
    let state = create_test_state();
    state.roles.grant("alice", Role::Owner);
    state.roles.grant("bob", Role::Admin);
    let app = create_router(state.clone());

    let response = app
        .oneshot(post_json("/invalidate", json!({"scope": "roles"})))
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["removed"], 2);
    // No seeder is configured, so nothing refills the set
    assert!(!state.roles.is_admin("alice").await);
}

#[tokio::test]
async fn test_invalidate_on_empty_caches() {
    let app = create_test_app();

    let response = app
        .oneshot(post_json("/invalidate", json!({"scope": "all"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["removed"], 0);
}

#[tokio::test]
async fn test_invalidate_missing_scope() {
    let app = create_test_app();

    let response = app
        .oneshot(post_json("/invalidate", json!({})))
        .await
        .unwrap();

    // Axum rejects the body before the handler runs
    assert!(response.status().is_client_error());
}

// == Stats Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint_reports_every_cache() {
    let state = create_test_state();
    let query = ProductListQuery::page(1, 25);
    state.products.set(&query, json!([])).await;
    state.products.get(&query).await;
    state.products.get(&ProductListQuery::page(2, 25)).await;
    let app = create_router(state);

    let response = app.oneshot(get("/stats")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["product_lists"]["size"], 1);
    assert_eq!(json["product_lists"]["hits"], 1);
    assert_eq!(json["product_lists"]["misses"], 1);
    assert_eq!(json["product_lists"]["hit_rate"], 0.5);
    assert_eq!(json["leaderboard"]["size"], 0);
    assert_eq!(json["roles"], 0);
    assert_eq!(json["vocabulary"]["products"], 20);
}

#[tokio::test]
async fn test_stats_endpoint_after_daily_reset() {
    let state = create_test_state();
    let query = ProductListQuery::page(1, 25);
    state.products.set(&query, json!([])).await;
    state.products.get(&query).await;
    state.products.daily_reset().await;
    let app = create_router(state);

    let response = app.oneshot(get("/stats")).await.unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["product_lists"]["size"], 0);
    assert_eq!(json["product_lists"]["hits"], 0);
    assert!(json["product_lists"]["last_reset"].is_string());
    assert!(json["leaderboard"]["last_reset"].is_null());
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_test_app();

    let response = app.oneshot(get("/get/some_key")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
