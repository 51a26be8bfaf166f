//! Seed data: the demo influencers, campaigns, analytics, and chats the app
//! ships with. Fixture ids are fixed (`Uuid::from_u128`) so they stay stable
//! across restarts and never collide with v4 ids.

use time::macros::{date, datetime};
use time::{Date, Duration, OffsetDateTime};
use uuid::Uuid;

use crate::domain::analytics::{AnalyticsPoint, CampaignAnalyticsData};
use crate::domain::campaign::{Campaign, CampaignStatus};
use crate::domain::chat::{Chat, Message};
use crate::domain::profile::{AudienceDemographics, GenderSplit, InfluencerProfile, SocialLink};
use crate::domain::user::{User, UserRole};

pub const BRAND_ONE: Uuid = Uuid::from_u128(0x2001);
pub const BRAND_TWO: Uuid = Uuid::from_u128(0x2002);

pub const CAMPAIGN_ECO_LAUNCH: Uuid = Uuid::from_u128(0x3001);
pub const CAMPAIGN_MOBILE_GAME: Uuid = Uuid::from_u128(0x3002);
pub const CAMPAIGN_FASHION_WEEK: Uuid = Uuid::from_u128(0x3003);

pub const CONTACT_ALICE: Uuid = Uuid::from_u128(0x4001);
pub const CONTACT_BOB: Uuid = Uuid::from_u128(0x4002);
pub const CONTACT_CHARLIE: Uuid = Uuid::from_u128(0x4003);

pub const CHAT_WITH_BOB: Uuid = Uuid::from_u128(0x5001);
pub const CHAT_WITH_CHARLIE: Uuid = Uuid::from_u128(0x5002);

#[must_use]
pub fn influencer_id(n: u128) -> Uuid {
    Uuid::from_u128(0x1000 + n)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn link(platform: &str, followers: u64) -> SocialLink {
    SocialLink { platform: platform.to_owned(), url: "#".to_owned(), followers }
}

#[allow(clippy::too_many_arguments)]
fn influencer(
    n: u128,
    bio: &str,
    niche: &[&str],
    location: &str,
    picture: Option<&str>,
    links: Vec<SocialLink>,
    age_range: &str,
    (male, female, other): (f64, f64, f64),
    top_locations: &[&str],
    engagement_rate: f64,
) -> InfluencerProfile {
    InfluencerProfile {
        user_id: influencer_id(n),
        bio: bio.to_owned(),
        niche: strings(niche),
        location: location.to_owned(),
        profile_picture_url: picture.map(str::to_owned),
        social_media_links: links,
        audience_demographics: AudienceDemographics {
            age_range: age_range.to_owned(),
            gender_split: GenderSplit { male, female, other },
            top_locations: strings(top_locations),
        },
        engagement_rate,
        completed_campaigns: None,
        portfolio_highlights: Vec::new(),
    }
}

/// Influencers listed on the discovery page.
#[must_use]
pub fn influencers() -> Vec<InfluencerProfile> {
    vec![
        influencer(
            1,
            "Fashion enthusiast sharing daily OOTDs and style tips. Love sustainable brands!",
            &["Fashion", "Sustainability", "Lifestyle"],
            "New York, USA",
            Some("https://placehold.co/200x200/9400D3/FFFFFF.png?text=IF1"),
            vec![link("Instagram", 150_000), link("TikTok", 300_000)],
            "18-24",
            (20.0, 75.0, 5.0),
            &["New York", "Los Angeles", "London"],
            5.2,
        ),
        influencer(
            2,
            "Tech reviewer and gadget lover. Unboxing the latest tech and giving honest reviews.",
            &["Tech", "Gadgets"],
            "San Francisco, USA",
            Some("https://placehold.co/200x200/7DF9FF/000000.png?text=IF2"),
            vec![link("YouTube", 500_000), link("Twitter", 75_000)],
            "25-34",
            (60.0, 35.0, 5.0),
            &["San Francisco", "Austin", "Seattle"],
            3.8,
        ),
        influencer(
            3,
            "Food blogger exploring world cuisines. Easy recipes and restaurant reviews.",
            &["Food", "Travel"],
            "London, UK",
            Some("https://placehold.co/200x200/F0F0F0/333333.png?text=IF3"),
            vec![link("Instagram", 220_000), link("Pinterest", 90_000)],
            "25-34",
            (30.0, 65.0, 5.0),
            &["London", "Paris", "Rome"],
            4.5,
        ),
        influencer(
            4,
            "Fitness coach and yoga instructor. Helping you achieve your wellness goals.",
            &["Fitness", "Wellness", "Yoga"],
            "Miami, USA",
            None,
            vec![link("Instagram", 180_000), link("YouTube", 60_000)],
            "30-45",
            (40.0, 55.0, 5.0),
            &["Miami", "Los Angeles", "Sydney"],
            6.1,
        ),
    ]
}

/// Demo campaigns owned by the two fixture brands.
#[must_use]
pub fn campaigns() -> Vec<Campaign> {
    vec![
        Campaign {
            id: CAMPAIGN_ECO_LAUNCH,
            owner_id: BRAND_ONE,
            name: "Eco-Friendly Product Launch".to_owned(),
            goals: "Increase awareness for new eco-friendly product line.".to_owned(),
            target_audience: "Millennials interested in sustainability".to_owned(),
            budget: 5000.0,
            description: "Launch campaign for new line of sustainable home goods. Focus on Instagram and TikTok."
                .to_owned(),
            content_requirements: "3 IG posts, 5 TikToks, 2 blog reviews".to_owned(),
            start_date: date!(2024 - 08 - 01),
            end_date: date!(2024 - 09 - 01),
            status: CampaignStatus::Active,
            created_at: datetime!(2024-07-15 00:00 UTC),
            updated_at: datetime!(2024-07-15 00:00 UTC),
            influencer_niche: Some("Sustainability, Lifestyle".to_owned()),
            target_audience_demographics: Some("Female, 25-35, USA, interested in eco-living.".to_owned()),
        },
        Campaign {
            id: CAMPAIGN_MOBILE_GAME,
            owner_id: BRAND_TWO,
            name: "Mobile Game Promotion".to_owned(),
            goals: "Drive downloads for new mobile game.".to_owned(),
            target_audience: "Gamers aged 16-24".to_owned(),
            budget: 10000.0,
            description: "Promote new RPG mobile game \"Chronicles of Aethel\". Highlight gameplay and story."
                .to_owned(),
            content_requirements: "YouTube gameplay videos, Twitch streams, Twitter mentions".to_owned(),
            start_date: date!(2024 - 07 - 20),
            end_date: date!(2024 - 08 - 20),
            status: CampaignStatus::Draft,
            created_at: datetime!(2024-07-10 00:00 UTC),
            updated_at: datetime!(2024-07-10 00:00 UTC),
            influencer_niche: Some("Gaming, Mobile Gaming".to_owned()),
            target_audience_demographics: Some("Male/Female, 16-24, Global, interested in RPGs.".to_owned()),
        },
        Campaign {
            id: CAMPAIGN_FASHION_WEEK,
            owner_id: BRAND_ONE,
            name: "Fashion Week Showcase".to_owned(),
            goals: "Generate buzz for Fashion Week collection.".to_owned(),
            target_audience: "Fashion enthusiasts, bloggers".to_owned(),
            budget: 7500.0,
            description: "Showcase new collection during Fashion Week. Influencers to attend and post live."
                .to_owned(),
            content_requirements: "Live IG stories, lookbook posts, event coverage".to_owned(),
            start_date: date!(2024 - 09 - 05),
            end_date: date!(2024 - 09 - 12),
            status: CampaignStatus::Completed,
            created_at: datetime!(2024-06-01 00:00 UTC),
            updated_at: datetime!(2024-06-01 00:00 UTC),
            influencer_niche: None,
            target_audience_demographics: None,
        },
    ]
}

#[must_use]
pub fn is_fixture_campaign(id: Uuid) -> bool {
    [CAMPAIGN_ECO_LAUNCH, CAMPAIGN_MOBILE_GAME, CAMPAIGN_FASHION_WEEK].contains(&id)
}

fn points(start: Date, rows: &[(u64, u64, u64)]) -> Vec<AnalyticsPoint> {
    let mut date = start;
    rows.iter()
        .map(|&(impressions, clicks, conversions)| {
            let point = AnalyticsPoint { date, impressions, clicks, conversions };
            date = date.next_day().unwrap_or(date);
            point
        })
        .collect()
}

/// Recorded analytics for the fixture campaigns that have any.
#[must_use]
pub fn analytics(campaign_id: Uuid) -> Option<CampaignAnalyticsData> {
    if campaign_id == CAMPAIGN_ECO_LAUNCH {
        return Some(CampaignAnalyticsData {
            campaign_id,
            impressions: 1_250_000,
            clicks: 62_500,
            conversions: 1_250,
            engagement_rate: 4.8,
            spend: 4500.0,
            data_points: points(
                date!(2024 - 08 - 01),
                &[
                    (50_000, 2_500, 50),
                    (55_000, 2_800, 60),
                    (60_000, 3_000, 55),
                    (52_000, 2_600, 45),
                    (65_000, 3_200, 70),
                ],
            ),
        });
    }
    if campaign_id == CAMPAIGN_MOBILE_GAME {
        return Some(CampaignAnalyticsData {
            campaign_id,
            impressions: 800_000,
            clicks: 40_000,
            conversions: 800,
            engagement_rate: 3.5,
            spend: 7500.0,
            data_points: points(
                date!(2024 - 07 - 20),
                &[(30_000, 1_500, 30), (35_000, 1_800, 35), (40_000, 2_000, 40)],
            ),
        });
    }
    None
}

fn contact(id: Uuid, email: &str, name: &str, role: UserRole, avatar: &str) -> User {
    User {
        id,
        email: email.to_owned(),
        name: Some(name.to_owned()),
        role,
        avatar_url: Some(avatar.to_owned()),
    }
}

/// Users that appear as the other side of the seeded chats.
#[must_use]
pub fn contacts() -> Vec<User> {
    vec![
        contact(
            CONTACT_ALICE,
            "alice@amplyst.demo",
            "Alice (Brand Manager)",
            UserRole::Brand,
            "https://placehold.co/100x100/9400D3/FFFFFF.png?text=AM",
        ),
        contact(
            CONTACT_BOB,
            "bob@amplyst.demo",
            "Bob (Influencer)",
            UserRole::Influencer,
            "https://placehold.co/100x100/7DF9FF/000000.png?text=BI",
        ),
        contact(
            CONTACT_CHARLIE,
            "charlie@amplyst.demo",
            "Charlie (Agency Rep)",
            UserRole::Agency,
            "https://placehold.co/100x100/F0F0F0/333333.png?text=CR",
        ),
    ]
}

fn message(chat_id: Uuid, from: Uuid, to: Uuid, content: &str, timestamp: OffsetDateTime, read: bool) -> Message {
    Message {
        id: Uuid::new_v4(),
        chat_id,
        sender_id: from,
        receiver_id: to,
        content: content.to_owned(),
        timestamp,
        read,
    }
}

/// The starter inbox for `me`, with timestamps relative to `now`.
#[must_use]
pub fn chats(me: Uuid, now: OffsetDateTime) -> Vec<(Chat, Vec<Message>)> {
    let bob_at = now - Duration::hours(1);
    let bob_history = vec![
        message(CHAT_WITH_BOB, CONTACT_BOB, me, "Hey, interested in your new campaign!", bob_at, false),
        message(
            CHAT_WITH_BOB,
            me,
            CONTACT_BOB,
            "Great! Let me send you the brief.",
            bob_at + Duration::seconds(100),
            true,
        ),
    ];

    let charlie_at = now - Duration::hours(2);
    let charlie_history = vec![
        message(CHAT_WITH_CHARLIE, me, CONTACT_CHARLIE, "Let's discuss the terms for Project X.", charlie_at, true),
        message(
            CHAT_WITH_CHARLIE,
            CONTACT_CHARLIE,
            me,
            "Sure, I'm available to chat now.",
            charlie_at + Duration::seconds(100),
            true,
        ),
    ];

    vec![
        (
            Chat {
                id: CHAT_WITH_BOB,
                participant_ids: [me, CONTACT_BOB],
                last_message: bob_history.last().cloned(),
                updated_at: bob_history.last().map_or(bob_at, |m| m.timestamp),
            },
            bob_history,
        ),
        (
            Chat {
                id: CHAT_WITH_CHARLIE,
                participant_ids: [me, CONTACT_CHARLIE],
                last_message: charlie_history.last().cloned(),
                updated_at: charlie_history.last().map_or(charlie_at, |m| m.timestamp),
            },
            charlie_history,
        ),
    ]
}
