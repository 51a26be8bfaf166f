use axum::http::StatusCode;
use serde_json::json;

use crate::domain::user::UserRole;
use crate::routes::testing::call;
use crate::state::test_helpers::{sign_in, test_app_state};

#[tokio::test]
async fn blank_profile_then_save() {
    let state = test_app_state().await;
    let (token, user) = sign_in(&state, "acme@brand.co", UserRole::Brand);

    let (status, body) = call(&state, "GET", "/api/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "brand");
    assert_eq!(body["companyName"], "");

    let profile = json!({
        "role": "brand",
        "userId": uuid::Uuid::nil(),
        "companyName": "Acme",
        "industry": "Retail",
        "website": "https://acme.example"
    });
    let (status, body) = call(&state, "PUT", "/api/profile", Some(&token), Some(profile)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userId"], user.id.to_string());

    let (_, body) = call(&state, "GET", "/api/profile", Some(&token), None).await;
    assert_eq!(body["companyName"], "Acme");
}

#[tokio::test]
async fn invalid_profile_is_rejected() {
    let state = test_app_state().await;
    let (token, _) = sign_in(&state, "bad@brand.co", UserRole::Brand);
    let profile = json!({
        "role": "brand",
        "userId": uuid::Uuid::nil(),
        "companyName": "A",
        "industry": "Retail",
        "website": "acme"
    });
    let (status, body) = call(&state, "PUT", "/api/profile", Some(&token), Some(profile)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn settings_default_to_system_theme() {
    let state = test_app_state().await;
    let (token, _) = sign_in(&state, "theme@brand.co", UserRole::Brand);

    let (_, body) = call(&state, "GET", "/api/settings", Some(&token), None).await;
    assert_eq!(body["theme"], "system");

    let (status, body) = call(&state, "PUT", "/api/settings", Some(&token), Some(json!({"theme": "dark"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["theme"], "dark");
    assert!(state.dirty.is_set());
}
