use std::net::SocketAddr;

use api::middleware::log_request;
use axum::{
    Router,
    extract::connect_info::MockConnectInfo,
    http::StatusCode,
    middleware::from_fn,
};
use tower::ServiceExt;

use crate::helpers::{json_request, make_test_app, read_json};

async fn logged_app() -> Router {
    let (app, _db) = make_test_app().await;
    app.layer(from_fn(log_request))
        .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))))
}

#[tokio::test]
async fn request_logging_passes_responses_through() {
    let app = logged_app().await;

    let ok = app
        .clone()
        .oneshot(json_request("GET", "/api/health", None))
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(read_json(ok).await["data"], "OK");

    let missing = app
        .oneshot(json_request("GET", "/api/sessions/9999", None))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(missing).await["success"], false);
}

#[tokio::test]
async fn preflight_requests_skip_logging() {
    let app = logged_app().await;
    let response = app
        .oneshot(json_request("OPTIONS", "/api/health", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
