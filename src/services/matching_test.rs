use super::*;
use crate::services::ai::test_support::{MockLlm, service};

fn input() -> MatchInput {
    MatchInput {
        campaign_description: "Launch of a reusable water bottle for hikers".into(),
        influencer_niche: "Outdoors".into(),
        target_audience_demographics: "Adults 20-35 who hike on weekends".into(),
        budget: 5000.0,
    }
}

const GOOD_REPLY: &str = r#"```json
{"recommendedInfluencers": [
  {"name": "Trail Tess", "profileUrl": "https://instagram.com/trailtess", "engagementRate": 5.2,
   "audienceOverlapScore": 0.8, "reasoning": "Hiking content, matching age bracket."}
]}
```"#;

#[tokio::test]
async fn negative_budget_never_reaches_the_llm() {
    let llm = MockLlm::replying(GOOD_REPLY);
    let ai = service(llm.clone());
    let mut bad = input();
    bad.budget = -5.0;

    let err = match_influencers(&ai, Uuid::new_v4(), &bad).await.unwrap_err();
    match err {
        AiError::Validation(errors) => {
            assert!(errors.has_field("budget"));
            assert_eq!(errors.fields()[0].message, "Budget must be a positive number.");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(llm.calls(), 0);
}

#[test]
fn short_fields_are_all_reported() {
    let errors = MatchInput {
        campaign_description: "too short".into(),
        influencer_niche: "ab".into(),
        target_audience_demographics: "teens".into(),
        budget: 0.5,
    }
    .validate()
    .unwrap_err();
    for field in ["campaignDescription", "influencerNiche", "targetAudienceDemographics", "budget"] {
        assert!(errors.has_field(field), "missing {field}");
    }
}

#[tokio::test]
async fn valid_request_returns_recommendations() {
    let llm = MockLlm::replying(GOOD_REPLY);
    let output = match_influencers(&service(llm.clone()), Uuid::new_v4(), &input()).await.unwrap();
    assert_eq!(output.recommended_influencers.len(), 1);
    assert_eq!(output.recommended_influencers[0].name, "Trail Tess");

    let prompts = llm.prompts.lock().unwrap();
    assert!(prompts[0].contains("Influencer Niche: Outdoors"));
    assert!(prompts[0].contains("Budget: 5000"));
}

#[tokio::test]
async fn out_of_range_overlap_is_invalid_output() {
    let llm = MockLlm::replying(
        r#"{"recommendedInfluencers": [{"name": "X", "profileUrl": "", "engagementRate": 3.0, "audienceOverlapScore": 1.7, "reasoning": ""}]}"#,
    );
    let err = match_influencers(&service(llm), Uuid::new_v4(), &input()).await.unwrap_err();
    assert!(matches!(err, AiError::InvalidOutput(msg) if msg.contains("audienceOverlapScore")));
}

#[tokio::test]
async fn missing_key_is_invalid_output() {
    let llm = MockLlm::replying(r#"{"influencers": []}"#);
    let err = match_influencers(&service(llm), Uuid::new_v4(), &input()).await.unwrap_err();
    assert!(matches!(err, AiError::InvalidOutput(_)));
}
