//! Campaign performance figures. Mocked, never derived from real events.

use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use super::iso_date;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsPoint {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignAnalyticsData {
    pub campaign_id: Uuid,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub engagement_rate: f64,
    pub spend: f64,
    pub data_points: Vec<AnalyticsPoint>,
}

#[allow(clippy::cast_precision_loss)]
fn ratio(numerator: u64, denominator: u64) -> Option<f64> {
    (denominator > 0).then(|| numerator as f64 / denominator as f64)
}

impl CampaignAnalyticsData {
    /// Clicks per impression.
    #[must_use]
    pub fn click_through_rate(&self) -> Option<f64> {
        ratio(self.clicks, self.impressions)
    }

    /// Conversions per click.
    #[must_use]
    pub fn conversion_rate(&self) -> Option<f64> {
        ratio(self.conversions, self.clicks)
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cost_per_conversion(&self) -> Option<f64> {
        (self.conversions > 0).then(|| self.spend / self.conversions as f64)
    }
}

/// Analytics plus the derived ratios, as served to dashboards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    #[serde(flatten)]
    pub data: CampaignAnalyticsData,
    pub click_through_rate: Option<f64>,
    pub conversion_rate: Option<f64>,
    pub cost_per_conversion: Option<f64>,
}

impl From<CampaignAnalyticsData> for AnalyticsReport {
    fn from(data: CampaignAnalyticsData) -> Self {
        Self {
            click_through_rate: data.click_through_rate(),
            conversion_rate: data.conversion_rate(),
            cost_per_conversion: data.cost_per_conversion(),
            data,
        }
    }
}
