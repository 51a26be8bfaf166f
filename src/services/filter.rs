//! Filter engine for influencer discovery and campaign lists.
//!
//! Criteria arrive as loose query parameters and are normalized once into a
//! filter where every `None` is a no-op: blank strings and the `all` sentinel
//! collapse to `None`, as does a range with neither bound. A bound the caller
//! sends is always applied, even when it equals the UI default. Matching is
//! then a conjunction over the criteria that remain. Input order is preserved.

use serde::Deserialize;

use crate::domain::campaign::{Campaign, CampaignStatus};
use crate::domain::profile::InfluencerProfile;
use crate::domain::validation::ValidationErrors;

const ALL: &str = "all";

fn criterion(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty() && s != ALL)
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Inclusive range, `None` only when both bounds are missing. A missing bound
/// defaults to the open end.
fn range<T: Copy>(min: Option<T>, max: Option<T>, open: (T, T)) -> Option<(T, T)> {
    if min.is_none() && max.is_none() {
        return None;
    }
    Some((min.unwrap_or(open.0), max.unwrap_or(open.1)))
}

fn in_range<T: PartialOrd>(value: T, (lo, hi): &(T, T)) -> bool {
    *lo <= value && value <= *hi
}

// =============================================================================
// INFLUENCERS
// =============================================================================

/// Discovery query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfluencerQuery {
    pub search: Option<String>,
    pub niche: Option<String>,
    pub location: Option<String>,
    pub platform: Option<String>,
    pub min_followers: Option<u64>,
    pub max_followers: Option<u64>,
    pub min_engagement: Option<f64>,
    pub max_engagement: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfluencerFilter {
    pub search: Option<String>,
    pub niche: Option<String>,
    pub location: Option<String>,
    pub platform: Option<String>,
    pub followers: Option<(u64, u64)>,
    pub engagement: Option<(f64, f64)>,
}

impl From<InfluencerQuery> for InfluencerFilter {
    fn from(q: InfluencerQuery) -> Self {
        Self {
            search: criterion(q.search),
            niche: criterion(q.niche),
            location: criterion(q.location),
            platform: criterion(q.platform),
            followers: range(q.min_followers, q.max_followers, (0, u64::MAX)),
            engagement: range(q.min_engagement, q.max_engagement, (f64::NEG_INFINITY, f64::INFINITY)),
        }
    }
}

impl InfluencerFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    #[must_use]
    pub fn matches(&self, profile: &InfluencerProfile) -> bool {
        if let Some(term) = &self.search {
            let by_id = profile.user_id.to_string().contains(term.as_str());
            if !by_id && !contains_ci(&profile.bio, term) {
                return false;
            }
        }
        if let Some(niche) = &self.niche {
            if !profile.niche.iter().any(|n| n.to_lowercase() == *niche) {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if !contains_ci(&profile.location, location) {
                return false;
            }
        }
        if let Some(platform) = &self.platform {
            if !profile
                .social_media_links
                .iter()
                .any(|l| l.platform.to_lowercase() == *platform)
            {
                return false;
            }
        }
        if let Some(bounds) = &self.followers {
            if !in_range(profile.total_followers(), bounds) {
                return false;
            }
        }
        if let Some(bounds) = &self.engagement {
            if !in_range(profile.engagement_rate, bounds) {
                return false;
            }
        }
        true
    }
}

#[must_use]
pub fn filter_influencers(candidates: Vec<InfluencerProfile>, filter: &InfluencerFilter) -> Vec<InfluencerProfile> {
    candidates.into_iter().filter(|p| filter.matches(p)).collect()
}

// =============================================================================
// CAMPAIGNS
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CampaignQuery {
    pub search: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignFilter {
    pub search: Option<String>,
    pub status: Option<CampaignStatus>,
}

impl TryFrom<CampaignQuery> for CampaignFilter {
    type Error = ValidationErrors;

    fn try_from(q: CampaignQuery) -> Result<Self, Self::Error> {
        let status = match criterion(q.status) {
            None => None,
            Some(raw) => Some(
                CampaignStatus::parse(&raw).ok_or_else(|| ValidationErrors::single("status", "Unknown campaign status."))?,
            ),
        };
        Ok(Self { search: criterion(q.search), status })
    }
}

impl CampaignFilter {
    #[must_use]
    pub fn matches(&self, campaign: &Campaign) -> bool {
        if let Some(term) = &self.search {
            if !contains_ci(&campaign.name, term) {
                return false;
            }
        }
        self.status.is_none_or(|status| campaign.status == status)
    }
}

#[must_use]
pub fn filter_campaigns(candidates: Vec<Campaign>, filter: &CampaignFilter) -> Vec<Campaign> {
    candidates.into_iter().filter(|c| filter.matches(c)).collect()
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
