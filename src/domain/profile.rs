//! Influencer, brand, and agency profiles.
//!
//! A user keeps one profile blob per role; [`Profile`] is the tagged union
//! stored under `(user_id, role)`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserRole;
use super::validation::{ValidationErrors, Validator};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
    pub followers: u64,
}

/// Audience gender split in percent. Values are entered independently and are
/// not required to sum to 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GenderSplit {
    #[serde(default)]
    pub male: f64,
    #[serde(default)]
    pub female: f64,
    #[serde(default)]
    pub other: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceDemographics {
    #[serde(default)]
    pub age_range: String,
    #[serde(default)]
    pub gender_split: GenderSplit,
    #[serde(default)]
    pub top_locations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfluencerProfile {
    pub user_id: Uuid,
    pub bio: String,
    pub niche: Vec<String>,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    pub social_media_links: Vec<SocialLink>,
    #[serde(default)]
    pub audience_demographics: AudienceDemographics,
    /// Percent, within `[0, 100]`.
    #[serde(default)]
    pub engagement_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_campaigns: Option<u32>,
    #[serde(default)]
    pub portfolio_highlights: Vec<String>,
}

impl InfluencerProfile {
    /// Blank profile handed to an influencer who has not saved one yet.
    #[must_use]
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            user_id,
            bio: String::new(),
            niche: Vec::new(),
            location: String::new(),
            profile_picture_url: None,
            social_media_links: Vec::new(),
            audience_demographics: AudienceDemographics::default(),
            engagement_rate: 0.0,
            completed_campaigns: None,
            portfolio_highlights: Vec::new(),
        }
    }

    /// Followers summed across every linked platform.
    #[must_use]
    pub fn total_followers(&self) -> u64 {
        self.social_media_links
            .iter()
            .fold(0_u64, |sum, link| sum.saturating_add(link.followers))
    }

    /// # Errors
    ///
    /// Returns every failing field of the influencer profile form.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.min_chars("bio", &self.bio, 10, "Bio must be at least 10 characters.")
            .max_chars("bio", &self.bio, 500, "Bio cannot exceed 500 characters.")
            .check(
                self.niche.iter().any(|n| !n.trim().is_empty()),
                "niche",
                "Select at least one niche.",
            )
            .min_chars("location", &self.location, 2, "Location is required.")
            .check(!self.social_media_links.is_empty(), "socialMediaLinks", "Add at least one social media link.")
            .range(
                "engagementRate",
                self.engagement_rate,
                0.0,
                100.0,
                "Engagement rate must be between 0 and 100.",
            );

        if let Some(url) = self.profile_picture_url.as_deref().filter(|u| !u.is_empty()) {
            v.url("profilePictureUrl", url, "Invalid URL for profile picture.");
        }

        for (i, link) in self.social_media_links.iter().enumerate() {
            v.check(!link.platform.trim().is_empty(), &format!("socialMediaLinks[{i}].platform"), "Platform is required.")
                .url(&format!("socialMediaLinks[{i}].url"), &link.url, "Invalid URL.");
        }

        let split = self.audience_demographics.gender_split;
        for (name, value) in [("male", split.male), ("female", split.female), ("other", split.other)] {
            v.range(
                &format!("audienceDemographics.genderSplit.{name}"),
                value,
                0.0,
                100.0,
                "Percentage must be between 0 and 100.",
            );
        }

        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandProfile {
    pub user_id: Uuid,
    pub company_name: String,
    pub industry: String,
    pub website: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_description: Option<String>,
}

impl BrandProfile {
    /// # Errors
    ///
    /// Returns every failing field of the brand profile form.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.min_chars("companyName", &self.company_name, 2, "Company name is required.")
            .min_chars("industry", &self.industry, 2, "Industry is required.")
            .url("website", &self.website, "Invalid website URL.");
        if let Some(url) = self.company_logo_url.as_deref().filter(|u| !u.is_empty()) {
            v.url("companyLogoUrl", url, "Invalid URL for company logo.");
        }
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgencyProfile {
    pub user_id: Uuid,
    pub agency_name: String,
    pub specialization: Vec<String>,
    pub website: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agency_logo_url: Option<String>,
    #[serde(default)]
    pub client_list: Vec<String>,
}

impl AgencyProfile {
    /// # Errors
    ///
    /// Returns every failing field of the agency profile form.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.min_chars("agencyName", &self.agency_name, 2, "Agency name is required.")
            .check(
                self.specialization.iter().any(|s| !s.trim().is_empty()),
                "specialization",
                "Add at least one specialization.",
            )
            .url("website", &self.website, "Invalid website URL.");
        if let Some(url) = self.agency_logo_url.as_deref().filter(|u| !u.is_empty()) {
            v.url("agencyLogoUrl", url, "Invalid URL for agency logo.");
        }
        v.finish()
    }
}

/// A profile blob of any role, tagged by `role` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Profile {
    Influencer(InfluencerProfile),
    Brand(BrandProfile),
    Agency(AgencyProfile),
}

impl Profile {
    #[must_use]
    pub fn role(&self) -> UserRole {
        match self {
            Self::Influencer(_) => UserRole::Influencer,
            Self::Brand(_) => UserRole::Brand,
            Self::Agency(_) => UserRole::Agency,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> Uuid {
        match self {
            Self::Influencer(p) => p.user_id,
            Self::Brand(p) => p.user_id,
            Self::Agency(p) => p.user_id,
        }
    }

    /// Rebind ownership to `user_id`; callers cannot write someone else's blob.
    pub fn set_user_id(&mut self, user_id: Uuid) {
        match self {
            Self::Influencer(p) => p.user_id = user_id,
            Self::Brand(p) => p.user_id = user_id,
            Self::Agency(p) => p.user_id = user_id,
        }
    }

    /// # Errors
    ///
    /// Returns the failing fields of the underlying profile form.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Self::Influencer(p) => p.validate(),
            Self::Brand(p) => p.validate(),
            Self::Agency(p) => p.validate(),
        }
    }
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
