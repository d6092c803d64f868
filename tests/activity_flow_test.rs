//! End-to-end: the application calling its own backend through each client.

mod common;

use activity_rest::Activity;
use common::{config_for, spawn_app};

fn expected() -> Vec<Activity> {
    vec![Activity::new("Running", 10), Activity::new("Swimming", 20)]
}

async fn get_activities(url: &str) -> Vec<Activity> {
    let response = reqwest::get(url).await.unwrap();
    assert_eq!(response.status(), 200, "GET {url}");
    response.json().await.unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_backend_lists_activities() {
    let app = spawn_app(config_for).await;
    assert_eq!(get_activities(&app.url("/api/activities")).await, expected());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_simple_client() {
    let app = spawn_app(config_for).await;
    assert_eq!(get_activities(&app.url("/simple")).await, expected());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_quarkus_client() {
    let app = spawn_app(config_for).await;
    assert_eq!(get_activities(&app.url("/quarkus")).await, expected());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_microprofile_blocking_matches_non_blocking() {
    let app = spawn_app(config_for).await;

    let non_blocking = get_activities(&app.url("/microprofile/non-blocking")).await;
    let blocking = get_activities(&app.url("/microprofile/blocking")).await;

    assert_eq!(non_blocking, expected());
    assert_eq!(blocking, non_blocking);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_unknown_route_is_json_404() {
    let app = spawn_app(config_for).await;

    let response = reqwest::get(app.url("/nope")).await.unwrap();
    assert_eq!(response.status(), 404);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn test_missing_client_url_fails_bootstrap() {
    let config = config_for("http://127.0.0.1:1/api");
    let empty = activity_rest::activity_config::ConfigService::new();
    empty
        .set("rest-client.activities-simple.url", "http://127.0.0.1:1/api")
        .unwrap();

    assert!(activity_rest::build_application(config).is_ok());
    assert!(activity_rest::build_application(empty).is_err());
}
