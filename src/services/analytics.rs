//! Mock campaign analytics.
//!
//! Demo campaigns return their recorded figures. Any other campaign gets
//! generated figures from an RNG seeded with the campaign id, so repeated
//! requests for the same campaign agree with each other.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::domain::analytics::{AnalyticsPoint, CampaignAnalyticsData};
use crate::domain::campaign::Campaign;
use crate::services::fixtures;

const DAILY_POINTS: usize = 5;

/// Recorded figures for demo campaigns, generated ones otherwise.
#[must_use]
pub fn analytics_for(campaign: &Campaign) -> CampaignAnalyticsData {
    fixtures::analytics(campaign.id).unwrap_or_else(|| generate(campaign, &mut seeded_rng(campaign.id)))
}

fn seeded_rng(id: Uuid) -> StdRng {
    let (hi, lo) = id.as_u64_pair();
    StdRng::seed_from_u64(hi ^ lo)
}

/// Random figures within the mock bounds: totals under 1M impressions, 50k
/// clicks and 1k conversions, spend under budget, five daily points from the
/// start date.
pub fn generate<R: Rng + ?Sized>(campaign: &Campaign, rng: &mut R) -> CampaignAnalyticsData {
    let spend = if campaign.budget.is_finite() && campaign.budget > 0.0 {
        rng.random_range(0.0..campaign.budget).floor()
    } else {
        0.0
    };

    let mut date = campaign.start_date;
    let mut data_points = Vec::with_capacity(DAILY_POINTS);
    for _ in 0..DAILY_POINTS {
        data_points.push(AnalyticsPoint {
            date,
            impressions: rng.random_range(0..200_000),
            clicks: rng.random_range(0..10_000),
            conversions: rng.random_range(0..200),
        });
        date = date.next_day().unwrap_or(date);
    }

    CampaignAnalyticsData {
        campaign_id: campaign.id,
        impressions: rng.random_range(0..1_000_000),
        clicks: rng.random_range(0..50_000),
        conversions: rng.random_range(0..1_000),
        engagement_rate: f64::from(rng.random_range(0_u32..100)) / 10.0,
        spend,
        data_points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::campaign::CampaignStatus;
    use time::macros::{date, datetime};

    fn campaign(budget: f64) -> Campaign {
        Campaign {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            name: "Spring Drop".into(),
            goals: "Sell out the spring line".into(),
            target_audience: "Students".into(),
            budget,
            description: "Spring collection launch with creators.".into(),
            content_requirements: "Reels".into(),
            start_date: date!(2025 - 04 - 01),
            end_date: date!(2025 - 04 - 30),
            status: CampaignStatus::Active,
            created_at: datetime!(2025-03-01 00:00 UTC),
            updated_at: datetime!(2025-03-01 00:00 UTC),
            influencer_niche: None,
            target_audience_demographics: None,
        }
    }

    #[test]
    fn generated_figures_stay_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let c = campaign(2500.0);
            let data = generate(&c, &mut rng);
            assert!(data.impressions < 1_000_000);
            assert!(data.clicks < 50_000);
            assert!(data.conversions < 1_000);
            assert!((0.0..10.0).contains(&data.engagement_rate));
            assert!(data.spend < c.budget);
            assert_eq!(data.data_points.len(), DAILY_POINTS);
            assert_eq!(data.data_points[0].date, c.start_date);
            assert_eq!(data.data_points[4].date, date!(2025 - 04 - 05));
            assert!(data.data_points.iter().all(|p| p.impressions < 200_000 && p.clicks < 10_000 && p.conversions < 200));
        }
    }

    #[test]
    fn zero_budget_means_zero_spend() {
        let data = generate(&campaign(0.0), &mut StdRng::seed_from_u64(1));
        assert!(data.spend.abs() < f64::EPSILON);
    }

    #[test]
    fn same_campaign_same_figures() {
        let c = campaign(900.0);
        assert_eq!(analytics_for(&c), analytics_for(&c));
    }

    #[test]
    fn demo_campaigns_use_recorded_figures() {
        let demo = fixtures::campaigns().remove(0);
        assert_eq!(analytics_for(&demo).impressions, 1_250_000);
    }
}
