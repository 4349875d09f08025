mod common;

use api_lib::web::build_router;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use common::TestApp;
use masal_core::ports::DatabaseService;
use serde_json::Value;
use tower::ServiceExt;

fn get(uri: &str) -> axum::http::request::Builder {
    Request::builder().method("GET").uri(uri)
}

async fn send(router: &Router, request: axum::http::request::Builder) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn signed_in_routes_need_a_live_session() {
    let app = TestApp::new();
    let router = build_router(app.state.clone());
    let (user, token) = app.sign_up("deniz@example.com").await;

    let (status, body) = send(&router, get("/api/users/credits")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["detail"].is_string());

    let (status, body) = send(
        &router,
        get("/api/users/credits").header(header::AUTHORIZATION, format!("Bearer {token}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["credits"], user.credits);

    // Push the stored session past its expiry.
    let mut session = app
        .db
        .get_auth_session(&token)
        .await
        .unwrap()
        .expect("session stored");
    session.expires_at = Utc::now() - Duration::minutes(1);
    app.db.delete_auth_session(&token).await.unwrap();
    app.db.create_auth_session(session).await.unwrap();

    let (status, _) = send(
        &router,
        get("/api/users/credits").header(header::AUTHORIZATION, format!("Bearer {token}")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn cookie_wins_over_bearer_header() {
    let app = TestApp::new();
    let router = build_router(app.state.clone());
    let (_, token) = app.sign_up("deniz@example.com").await;

    let (status, _) = send(
        &router,
        get("/api/users/profile")
            .header(header::COOKIE, format!("theme=dark; session_token={token}"))
            .header(header::AUTHORIZATION, "Bearer not-a-real-token"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &router,
        get("/api/users/profile")
            .header(header::COOKIE, "session_token=not-a-real-token")
            .header(header::AUTHORIZATION, format!("Bearer {token}")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_routes_refuse_regular_users() {
    let app = TestApp::new();
    let router = build_router(app.state.clone());
    let (_, user_token) = app.sign_up("deniz@example.com").await;
    let (_, admin_token) = app.admin().await;

    let (status, _) = send(&router, get("/api/admin/stats")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &router,
        get("/api/admin/stats").header(header::AUTHORIZATION, format!("Bearer {user_token}")),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["detail"].is_string());

    let (status, body) = send(
        &router,
        get("/api/admin/stats").header(header::COOKIE, format!("session_token={admin_token}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_users"], 2);
}

#[tokio::test]
async fn public_routes_stay_open() {
    let app = TestApp::new();
    let router = build_router(app.state.clone());

    let (status, body) = send(&router, get("/api/topics")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().is_some_and(|topics| !topics.is_empty()));

    let (status, _) = send(&router, get("/api/no-such-route")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
