//! Integration tests for AssetTrack
//!
//! These tests drive the full HTTP router end-to-end over an in-memory
//! SQLite database with all migrations applied.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use migration::MigratorTrait as _;
use sea_orm::Database;
use std::sync::Arc;
use tower::ServiceExt;
use tracker::api::{AppState, app_router};
use tracker::config::AppConfig;

async fn make_app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    app_router(AppState {
        db,
        config: Arc::new(AppConfig::default()),
    })
}

fn json_request(method: Method, uri: &str, value: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(&value).unwrap()))
        .unwrap()
}

fn bare_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(res: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn post_ok(app: &Router, uri: &str, value: serde_json::Value) -> serde_json::Value {
    let res = app
        .clone()
        .oneshot(json_request(Method::POST, uri, value))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    body_json(res).await
}

#[tokio::test]
async fn root_reports_operational() {
    let app = make_app().await;

    let res = app
        .oneshot(bare_request(Method::GET, "/"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let info = body_json(res).await;
    assert_eq!(info["status"], "operational");
    assert!(info["version"].is_string());
}

#[tokio::test]
async fn health_endpoint_responds() {
    let app = make_app().await;

    let res = app
        .oneshot(bare_request(Method::GET, "/health"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn full_inventory_lifecycle() {
    let app = make_app().await;

    // Build the reference graph bottom-up.
    let dept = post_ok(&app, "/api/v1/departments", serde_json::json!({"name": "IT"})).await;
    let user = post_ok(
        &app,
        "/api/v1/users",
        serde_json::json!({
            "distinguished_name": "a123z",
            "name": "Alice",
            "department_id": dept["id"],
            "office_location": "B2"
        }),
    )
    .await;
    let ws_type = post_ok(
        &app,
        "/api/v1/workstation-types",
        serde_json::json!({"type_name": "laptop"}),
    )
    .await;
    let ws = post_ok(
        &app,
        "/api/v1/workstations",
        serde_json::json!({
            "hostname": "ws-001",
            "type_id": ws_type["id"],
            "user_id": user["id"],
            "department_id": dept["id"],
            "system_ram_gb": 32
        }),
    )
    .await;

    // Everything the workstation references is delete-protected.
    for uri in [
        format!("/api/v1/departments/{}", dept["id"]),
        format!("/api/v1/users/{}", user["id"]),
        format!("/api/v1/workstation-types/{}", ws_type["id"]),
    ] {
        let res = app
            .clone()
            .oneshot(bare_request(Method::DELETE, &uri))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CONFLICT, "{uri}");
    }

    // Tear down leaf-first; every delete reports success.
    for uri in [
        format!("/api/v1/workstations/{}", ws["id"]),
        format!("/api/v1/workstation-types/{}", ws_type["id"]),
        format!("/api/v1/users/{}", user["id"]),
        format!("/api/v1/departments/{}", dept["id"]),
    ] {
        let res = app
            .clone()
            .oneshot(bare_request(Method::DELETE, &uri))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{uri}");
        assert_eq!(body_json(res).await, serde_json::json!({"deleted": true}));
    }

    // All four collections are empty again.
    for uri in [
        "/api/v1/departments",
        "/api/v1/users",
        "/api/v1/workstation-types",
        "/api/v1/workstations",
    ] {
        let res = app
            .clone()
            .oneshot(bare_request(Method::GET, uri))
            .await
            .unwrap();
        assert_eq!(body_json(res).await.as_array().unwrap().len(), 0, "{uri}");
    }
}
