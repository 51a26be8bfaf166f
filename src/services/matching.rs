//! AI influencer matching.
//!
//! Takes a campaign brief and asks the model for a ranked list of influencers
//! that fit it. Input is validated before any external call; output is
//! validated before it reaches the caller.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::ai::{AiError, AiService};
use crate::domain::validation::{ValidationErrors, Validator};

const SYSTEM_PROMPT: &str = "You are an AI-powered influencer recommendation system. \
Given a campaign description, an influencer niche, target audience demographics, and a budget, \
you suggest the influencers that best fit the criteria. Respond with a single JSON object and nothing else.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInput {
    pub campaign_description: String,
    pub influencer_niche: String,
    pub target_audience_demographics: String,
    pub budget: f64,
}

impl MatchInput {
    /// # Errors
    ///
    /// Returns every failing field of the matching form.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .min_chars(
                "campaignDescription",
                &self.campaign_description,
                20,
                "Campaign description must be at least 20 characters.",
            )
            .min_chars("influencerNiche", &self.influencer_niche, 3, "Influencer niche must be at least 3 characters.")
            .min_chars(
                "targetAudienceDemographics",
                &self.target_audience_demographics,
                10,
                "Target audience description must be at least 10 characters.",
            )
            .check(self.budget >= 1.0, "budget", "Budget must be a positive number.")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedInfluencer {
    pub name: String,
    #[serde(default)]
    pub profile_url: String,
    /// Percent, within `[0, 100]`.
    pub engagement_rate: f64,
    /// Fraction of the campaign's audience the influencer reaches, within `[0, 1]`.
    pub audience_overlap_score: f64,
    #[serde(default)]
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOutput {
    pub recommended_influencers: Vec<RecommendedInfluencer>,
}

impl MatchOutput {
    fn check(&self) -> Result<(), String> {
        for (i, rec) in self.recommended_influencers.iter().enumerate() {
            if rec.name.trim().is_empty() {
                return Err(format!("recommendedInfluencers[{i}].name is empty"));
            }
            if !(0.0..=100.0).contains(&rec.engagement_rate) {
                return Err(format!("recommendedInfluencers[{i}].engagementRate {} is outside 0..=100", rec.engagement_rate));
            }
            if !(0.0..=1.0).contains(&rec.audience_overlap_score) {
                return Err(format!(
                    "recommendedInfluencers[{i}].audienceOverlapScore {} is outside 0..=1",
                    rec.audience_overlap_score
                ));
            }
        }
        Ok(())
    }
}

fn render_prompt(input: &MatchInput) -> String {
    format!(
        "Campaign Description: {}\n\
         Influencer Niche: {}\n\
         Target Audience Demographics: {}\n\
         Budget: {}\n\n\
         Consider relevance, engagement rate, audience demographics, and potential ROI. \
         Give a brief explanation for each recommendation.\n\n\
         Answer with JSON of the form:\n\
         {{\"recommendedInfluencers\": [{{\"name\": string, \"profileUrl\": string, \
         \"engagementRate\": number (percent, 0-100), \"audienceOverlapScore\": number (0-1), \
         \"reasoning\": string}}]}}",
        input.campaign_description.trim(),
        input.influencer_niche.trim(),
        input.target_audience_demographics.trim(),
        input.budget,
    )
}

/// Recommend influencers for a campaign brief.
///
/// # Errors
///
/// `Validation` before any call is made, then whatever
/// [`AiService::complete_json`] reports, or `InvalidOutput` when a
/// recommendation is out of range.
pub async fn match_influencers(ai: &AiService, user_id: Uuid, input: &MatchInput) -> Result<MatchOutput, AiError> {
    input.validate()?;
    let output: MatchOutput = ai.complete_json(user_id, "matching", SYSTEM_PROMPT, render_prompt(input)).await?;
    output.check().map_err(AiError::InvalidOutput)?;
    info!(%user_id, count = output.recommended_influencers.len(), "matching: recommendations ready");
    Ok(output)
}

#[cfg(test)]
#[path = "matching_test.rs"]
mod tests;
