//! Campaign records and the creation form.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::iso_date;
use super::validation::{ValidationErrors, Validator};

/// Flat status enum. Any status may be set directly; there is no transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Draft,
    Active,
    Paused,
    Completed,
    Archived,
}

impl CampaignStatus {
    pub const ALL: [Self; 5] = [Self::Draft, Self::Active, Self::Paused, Self::Completed, Self::Archived];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "active" => Some(Self::Active),
            "paused" => Some(Self::Paused),
            "completed" => Some(Self::Completed),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: Uuid,
    /// Brand or agency user that created the campaign.
    pub owner_id: Uuid,
    pub name: String,
    pub goals: String,
    pub target_audience: String,
    pub budget: f64,
    pub description: String,
    pub content_requirements: String,
    #[serde(with = "iso_date")]
    pub start_date: Date,
    #[serde(with = "iso_date")]
    pub end_date: Date,
    pub status: CampaignStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub influencer_niche: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience_demographics: Option<String>,
}

/// Payload of the campaign creation form. New campaigns always start as drafts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCampaign {
    pub name: String,
    pub goals: String,
    pub target_audience: String,
    pub budget: f64,
    pub description: String,
    pub content_requirements: String,
    #[serde(with = "iso_date")]
    pub start_date: Date,
    #[serde(with = "iso_date")]
    pub end_date: Date,
    #[serde(default)]
    pub influencer_niche: Option<String>,
    #[serde(default)]
    pub target_audience_demographics: Option<String>,
}

impl NewCampaign {
    /// # Errors
    ///
    /// Returns every failing field of the creation form.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .min_chars("name", &self.name, 5, "Campaign name must be at least 5 characters.")
            .min_chars("goals", &self.goals, 10, "Campaign goals must be at least 10 characters.")
            .min_chars("targetAudience", &self.target_audience, 10, "Target audience description is required.")
            .check(
                self.budget.is_finite() && self.budget >= 0.0,
                "budget",
                "Budget must be a positive number.",
            )
            .min_chars("description", &self.description, 20, "Campaign description must be at least 20 characters.")
            .max_chars("description", &self.description, 1000, "Description too long.")
            .min_chars(
                "contentRequirements",
                &self.content_requirements,
                10,
                "Content requirements are needed.",
            )
            .check(self.end_date >= self.start_date, "endDate", "End date cannot be before start date.")
            .finish()
    }

    /// Materialize the form as a draft owned by `owner_id`.
    #[must_use]
    pub fn into_campaign(self, owner_id: Uuid, now: OffsetDateTime) -> Campaign {
        Campaign {
            id: Uuid::new_v4(),
            owner_id,
            name: self.name.trim().to_owned(),
            goals: self.goals,
            target_audience: self.target_audience,
            budget: self.budget,
            description: self.description,
            content_requirements: self.content_requirements,
            start_date: self.start_date,
            end_date: self.end_date,
            status: CampaignStatus::Draft,
            created_at: now,
            updated_at: now,
            influencer_niche: none_if_blank(self.influencer_niche),
            target_audience_demographics: none_if_blank(self.target_audience_demographics),
        }
    }
}

fn none_if_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "campaign_test.rs"]
mod tests;
