//! AI campaign performance summary.

use serde::{Deserialize, Deserializer, Serialize};
use time::Date;
use tracing::info;
use uuid::Uuid;

use super::ai::{AiError, AiService};
use crate::domain::analytics::CampaignAnalyticsData;
use crate::domain::campaign::Campaign;
use crate::domain::iso_date;
use crate::domain::validation::{ValidationErrors, Validator};

const SYSTEM_PROMPT: &str = "You are an expert marketing analyst summarizing campaign performance. \
Respond with a single JSON object and nothing else.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryInput {
    pub campaign_name: String,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    #[serde(with = "iso_date")]
    pub start_date: Date,
    #[serde(with = "iso_date")]
    pub end_date: Date,
    pub budget: f64,
}

impl SummaryInput {
    /// Summary input for a stored campaign and its analytics.
    #[must_use]
    pub fn from_campaign(campaign: &Campaign, analytics: &CampaignAnalyticsData) -> Self {
        Self {
            campaign_name: campaign.name.clone(),
            impressions: analytics.impressions,
            clicks: analytics.clicks,
            conversions: analytics.conversions,
            start_date: campaign.start_date,
            end_date: campaign.end_date,
            budget: campaign.budget,
        }
    }

    /// # Errors
    ///
    /// Returns every failing field of the summary request.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .min_chars("campaignName", &self.campaign_name, 1, "Campaign name is required.")
            .check(self.end_date >= self.start_date, "endDate", "End date cannot be before start date.")
            .check(self.budget >= 0.0, "budget", "Budget cannot be negative.")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceRating {
    Excellent,
    Good,
    Average,
    Poor,
}

impl PerformanceRating {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "excellent" => Some(Self::Excellent),
            "good" => Some(Self::Good),
            "average" => Some(Self::Average),
            "poor" => Some(Self::Poor),
            _ => None,
        }
    }
}

// Models capitalize freely ("Good", "EXCELLENT"); accept any case.
impl<'de> Deserialize<'de> for PerformanceRating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| {
            serde::de::Error::unknown_variant(&raw, &["excellent", "good", "average", "poor"])
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryOutput {
    pub summary: String,
    pub overall_performance: PerformanceRating,
    #[serde(default)]
    pub key_insights: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

fn render_prompt(input: &SummaryInput) -> String {
    format!(
        "Analyze the following campaign data and provide a concise summary, an overall performance \
         assessment, key insights, and recommendations for future campaigns.\n\n\
         Campaign Name: {}\n\
         Impressions: {}\n\
         Clicks: {}\n\
         Conversions: {}\n\
         Start Date: {}\n\
         End Date: {}\n\
         Budget: {}\n\n\
         Answer with JSON of the form:\n\
         {{\"summary\": string, \"overallPerformance\": \"excellent\" | \"good\" | \"average\" | \"poor\", \
         \"keyInsights\": [string], \"recommendations\": [string]}}",
        input.campaign_name.trim(),
        input.impressions,
        input.clicks,
        input.conversions,
        input.start_date,
        input.end_date,
        input.budget,
    )
}

/// Summarize a campaign's performance.
///
/// # Errors
///
/// `Validation` before any call is made, otherwise whatever
/// [`AiService::complete_json`] reports.
pub async fn summarize_campaign(ai: &AiService, user_id: Uuid, input: &SummaryInput) -> Result<SummaryOutput, AiError> {
    input.validate()?;
    let output: SummaryOutput = ai.complete_json(user_id, "summary", SYSTEM_PROMPT, render_prompt(input)).await?;
    if output.summary.trim().is_empty() {
        return Err(AiError::InvalidOutput("summary is empty".into()));
    }
    info!(%user_id, rating = ?output.overall_performance, "summary: ready");
    Ok(output)
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod tests;
