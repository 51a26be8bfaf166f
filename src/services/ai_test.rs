use std::time::Duration;

use super::test_support::{MockLlm, service};
use super::*;
use crate::error::ErrorCode;
use crate::rate_limit::RateLimitConfig;

#[derive(Debug, serde::Deserialize, PartialEq)]
struct Reply {
    ok: bool,
}

// =============================================================================
// extract_json
// =============================================================================

#[test]
fn extract_plain_object() {
    assert_eq!(extract_json(" {\"ok\":true} "), "{\"ok\":true}");
}

#[test]
fn extract_fenced_block_with_language() {
    assert_eq!(extract_json("```json\n{\"ok\":true}\n```"), "{\"ok\":true}");
}

#[test]
fn extract_fenced_block_without_language() {
    assert_eq!(extract_json("```\n{\"ok\":true}\n```\n"), "{\"ok\":true}");
}

#[test]
fn extract_object_from_prose() {
    assert_eq!(extract_json("Here you go: {\"ok\":true} Hope it helps."), "{\"ok\":true}");
}

// =============================================================================
// complete_json
// =============================================================================

#[tokio::test]
async fn complete_json_parses_reply() {
    let llm = MockLlm::replying("```json\n{\"ok\": true}\n```");
    let reply: Reply = service(llm.clone())
        .complete_json(Uuid::new_v4(), "test", "sys", "prompt".into())
        .await
        .unwrap();
    assert_eq!(reply, Reply { ok: true });
    assert_eq!(llm.calls(), 1);
}

#[tokio::test]
async fn complete_json_rejects_non_json() {
    let llm = MockLlm::replying("I cannot help with that.");
    let err = service(llm)
        .complete_json::<Reply>(Uuid::new_v4(), "test", "sys", "prompt".into())
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::InvalidOutput(_)));
    assert_eq!(err.error_code(), "E_AI_INVALID_OUTPUT");
}

#[tokio::test]
async fn complete_json_surfaces_provider_errors() {
    let err = service(MockLlm::failing(503))
        .complete_json::<Reply>(Uuid::new_v4(), "test", "sys", "prompt".into())
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::Llm(LlmError::ApiResponse { status: 503, .. })));
    assert!(err.retryable());
}

#[tokio::test]
async fn unconfigured_llm_is_reported() {
    let ai = AiService::new(None, RateLimiter::default(), DEFAULT_AI_MAX_TOKENS);
    let err = ai
        .complete_json::<Reply>(Uuid::new_v4(), "test", "sys", "prompt".into())
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::LlmNotConfigured));
}

#[tokio::test]
async fn rate_limit_blocks_before_calling_llm() {
    let llm = MockLlm::replying("{\"ok\":true}");
    let limiter = RateLimiter::new(RateLimitConfig {
        per_user_limit: 1,
        per_user_window: Duration::from_secs(60),
        global_limit: 10,
        global_window: Duration::from_secs(60),
    });
    let ai = AiService::new(Some(llm.clone()), limiter, DEFAULT_AI_MAX_TOKENS);
    let user = Uuid::new_v4();

    ai.complete_json::<Reply>(user, "test", "sys", "one".into()).await.unwrap();
    let err = ai
        .complete_json::<Reply>(user, "test", "sys", "two".into())
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::RateLimited(_)));
    assert_eq!(llm.calls(), 1);
}
