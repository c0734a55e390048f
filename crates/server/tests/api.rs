use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use config::Config;
use database::DatabaseHandleCreator;
use serde_json::{Value, json};
use server::{app::AppState, create_router};
use tower::ServiceExt;

async fn test_router(database_name: &str) -> Router {
    let config = Arc::new(Config::minimal_config_with_in_ram_database());
    let (write_handle, _write_close_handle) =
        DatabaseHandleCreator::create_write_handle_from_config(&config, database_name)
            .await
            .unwrap();
    let (read_handle, _read_close_handle) =
        DatabaseHandleCreator::create_read_handle_from_config(&config, database_name)
            .await
            .unwrap();
    create_router(AppState::new(config, read_handle, write_handle))
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_page(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

fn alice_payload() -> Value {
    json!({
        "handle": "alice",
        "description": "Hello world!",
        "imageUrl": "https://x.com/a.png",
        "links": [
            {"title": "Site", "url": "https://alice.dev"},
            {"title": "Blog", "url": "https://alice.dev/blog"}
        ]
    })
}

#[tokio::test]
async fn create_profile_and_render_page() {
    let router = test_router("setlinks_test_create").await;

    let response = router
        .clone()
        .oneshot(post_json("/api/setlink", &alice_payload()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Link added");
    assert_eq!(body["handle"], "alice");

    let response = router.oneshot(get_page("/alice")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_string(response).await;
    assert!(page.contains("@alice"));
    assert!(page.contains("Hello world!"));
    assert!(page.contains("https://x.com/a.png"));
    assert!(page.contains("https://alice.dev"));

    let site = page.find("Site").unwrap();
    let blog = page.find("Blog").unwrap();
    assert!(site < blog);
}

#[tokio::test]
async fn duplicate_handle_returns_conflict_and_keeps_existing_profile() {
    let router = test_router("setlinks_test_duplicate").await;

    let response = router
        .clone()
        .oneshot(post_json("/api/setlink", &alice_payload()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let mut second = alice_payload();
    second["description"] = json!("Different description here");
    let response = router
        .clone()
        .oneshot(post_json("/api/setlink", &second))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Handle already exists");

    let response = router.oneshot(get_page("/alice")).await.unwrap();
    let page = body_string(response).await;
    assert!(page.contains("Hello world!"));
    assert!(!page.contains("Different description here"));
}

#[tokio::test]
async fn invalid_payloads_are_rejected_without_writes() {
    let router = test_router("setlinks_test_validation").await;

    let mut short_handle = alice_payload();
    short_handle["handle"] = json!("a");

    let mut long_handle = alice_payload();
    long_handle["handle"] = json!("a".repeat(51));

    let mut short_description = alice_payload();
    short_description["description"] = json!("short");

    let mut bad_image_url = alice_payload();
    bad_image_url["imageUrl"] = json!("not an url");

    let mut no_links = alice_payload();
    no_links["links"] = json!([]);

    let mut empty_title = alice_payload();
    empty_title["links"][0]["title"] = json!("");

    let mut bad_link_url = alice_payload();
    bad_link_url["links"][0]["url"] = json!("alice.dev");

    for payload in [
        short_handle,
        long_handle,
        short_description,
        bad_image_url,
        no_links,
        empty_title,
        bad_link_url,
    ] {
        let response = router
            .clone()
            .oneshot(post_json("/api/setlink", &payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["message"].is_string());
    }

    let response = router.oneshot(get_page("/alice")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let router = test_router("setlinks_test_malformed").await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/setlink")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn unknown_handle_renders_not_found_page() {
    let router = test_router("setlinks_test_not_found").await;

    let response = router.oneshot(get_page("/nobody")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let page = body_string(response).await;
    assert!(page.contains("Profile not found"));
}

#[tokio::test]
async fn form_page_is_served() {
    let router = test_router("setlinks_test_form").await;

    let response = router.oneshot(get_page("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_string(response).await;
    assert!(page.contains("Create Your Setlink"));
    assert!(page.contains("/api/setlink"));
}
