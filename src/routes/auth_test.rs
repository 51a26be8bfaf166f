use axum::body::Body;
use axum::http::{Request, header};
use serde_json::json;
use tower::ServiceExt;

use super::*;
use crate::routes::app;
use crate::routes::testing::call;
use crate::state::test_helpers::{sign_in, test_app_state};

#[tokio::test]
async fn signup_returns_token_and_sets_cookie() {
    let state = test_app_state().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/signup")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"email": "jane@brand.co", "name": "Jane", "role": "brand"}).to_string()))
        .unwrap();
    let response = app(state.clone()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.starts_with("session_token="));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn signup_validation_lists_fields() {
    let state = test_app_state().await;
    let (status, body) = call(
        &state,
        "POST",
        "/api/auth/signup",
        None,
        Some(json!({"email": "not-an-email", "name": "J", "role": "none"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<&str> = body["fields"].as_array().unwrap().iter().map(|f| f["field"].as_str().unwrap()).collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"role"));
}

#[tokio::test]
async fn cookie_authenticates_me() {
    let state = test_app_state().await;
    let (token, user) = sign_in(&state, "cookie@brand.co", UserRole::Brand);
    let request = Request::builder()
        .uri("/api/auth/me")
        .header(header::COOKIE, format!("{COOKIE_NAME}={token}"))
        .body(Body::empty())
        .unwrap();
    let response = app(state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = http_body_util::BodyExt::collect(response.into_body()).await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["id"], user.id.to_string());
}

#[tokio::test]
async fn missing_or_unknown_token_is_unauthorized() {
    let state = test_app_state().await;
    let (status, body) = call(&state, "GET", "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E_UNAUTHENTICATED");

    let (status, _) = call(&state, "GET", "/api/auth/me", Some("deadbeef"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_with_known_email_resumes_user() {
    let state = test_app_state().await;
    let (_, user) = sign_in(&state, "again@brand.co", UserRole::Brand);
    let (status, body) = call(
        &state,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "AGAIN@brand.co", "role": "agency"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], user.id.to_string());
    assert_eq!(body["user"]["role"], "agency");
}

#[tokio::test]
async fn switch_role_then_logout() {
    let state = test_app_state().await;
    let (token, _) = sign_in(&state, "switch@brand.co", UserRole::Brand);

    let (status, body) = call(&state, "POST", "/api/auth/role", Some(&token), Some(json!({"role": "influencer"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "influencer");

    let (status, _) = call(&state, "POST", "/api/auth/role", Some(&token), Some(json!({"role": "none"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = call(&state, "POST", "/api/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&state, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn nav_follows_role() {
    let state = test_app_state().await;
    let (token, _) = sign_in(&state, "nav@influencer.co", UserRole::Influencer);
    let (status, body) = call(&state, "GET", "/api/nav", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["roleName"], "Influencer");
    assert_eq!(body["items"].as_array().unwrap().len(), 5);
}
