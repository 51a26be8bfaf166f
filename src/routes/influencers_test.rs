use axum::http::StatusCode;

use crate::domain::user::UserRole;
use crate::routes::testing::call;
use crate::state::test_helpers::{sign_in, test_app_state};

#[tokio::test]
async fn empty_query_returns_whole_directory() {
    let state = test_app_state().await;
    let (token, _) = sign_in(&state, "discover@brand.co", UserRole::Brand);
    let (status, body) = call(&state, "GET", "/api/influencers", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), state.profiles.influencer_directory().len());
}

#[tokio::test]
async fn follower_range_bounds_every_result() {
    let state = test_app_state().await;
    let (token, _) = sign_in(&state, "range@agency.co", UserRole::Agency);
    let (status, body) =
        call(&state, "GET", "/api/influencers?minFollowers=100000&maxFollowers=500000", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    for profile in body.as_array().unwrap() {
        let total: u64 = profile["socialMediaLinks"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["followers"].as_u64().unwrap())
            .sum();
        assert!((100_000..=500_000).contains(&total), "{total} out of range");
    }
}

#[tokio::test]
async fn influencers_cannot_discover() {
    let state = test_app_state().await;
    let (token, _) = sign_in(&state, "peer@influencer.co", UserRole::Influencer);
    let (status, _) = call(&state, "GET", "/api/influencers", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
