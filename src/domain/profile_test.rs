use super::*;

fn valid_influencer() -> InfluencerProfile {
    InfluencerProfile {
        user_id: Uuid::new_v4(),
        bio: "Tech reviewer and gadget lover.".into(),
        niche: vec!["Tech".into()],
        location: "San Francisco, USA".into(),
        profile_picture_url: None,
        social_media_links: vec![
            SocialLink { platform: "YouTube".into(), url: "https://youtube.com/@tech".into(), followers: 500_000 },
            SocialLink { platform: "Twitter".into(), url: "https://twitter.com/tech".into(), followers: 75_000 },
        ],
        audience_demographics: AudienceDemographics {
            age_range: "25-34".into(),
            gender_split: GenderSplit { male: 60.0, female: 35.0, other: 5.0 },
            top_locations: vec!["Austin".into()],
        },
        engagement_rate: 3.8,
        completed_campaigns: None,
        portfolio_highlights: Vec::new(),
    }
}

#[test]
fn total_followers_sums_links() {
    assert_eq!(valid_influencer().total_followers(), 575_000);
    assert_eq!(InfluencerProfile::empty(Uuid::nil()).total_followers(), 0);
}

#[test]
fn total_followers_saturates() {
    let mut p = valid_influencer();
    p.social_media_links[0].followers = u64::MAX;
    assert_eq!(p.total_followers(), u64::MAX);
}

#[test]
fn valid_influencer_passes() {
    assert!(valid_influencer().validate().is_ok());
}

#[test]
fn empty_influencer_reports_required_fields() {
    let err = InfluencerProfile::empty(Uuid::nil()).validate().unwrap_err();
    assert!(err.has_field("bio"));
    assert!(err.has_field("niche"));
    assert!(err.has_field("location"));
    assert!(err.has_field("socialMediaLinks"));
}

#[test]
fn engagement_rate_above_100_rejected() {
    let mut p = valid_influencer();
    p.engagement_rate = 100.5;
    let err = p.validate().unwrap_err();
    assert!(err.has_field("engagementRate"));
}

#[test]
fn gender_split_need_not_sum_to_100() {
    let mut p = valid_influencer();
    p.audience_demographics.gender_split = GenderSplit { male: 80.0, female: 80.0, other: 10.0 };
    assert!(p.validate().is_ok());
}

#[test]
fn gender_split_value_out_of_range_rejected() {
    let mut p = valid_influencer();
    p.audience_demographics.gender_split.other = -1.0;
    let err = p.validate().unwrap_err();
    assert!(err.has_field("audienceDemographics.genderSplit.other"));
}

#[test]
fn social_link_url_checked_per_index() {
    let mut p = valid_influencer();
    p.social_media_links[1].url = "#".into();
    let err = p.validate().unwrap_err();
    assert!(err.has_field("socialMediaLinks[1].url"));
    assert!(!err.has_field("socialMediaLinks[0].url"));
}

#[test]
fn empty_profile_picture_url_is_allowed() {
    let mut p = valid_influencer();
    p.profile_picture_url = Some(String::new());
    assert!(p.validate().is_ok());
    p.profile_picture_url = Some("not a url".into());
    assert!(p.validate().unwrap_err().has_field("profilePictureUrl"));
}

#[test]
fn brand_profile_requires_website_url() {
    let brand = BrandProfile {
        user_id: Uuid::nil(),
        company_name: "Acme".into(),
        industry: "Retail".into(),
        website: "acme".into(),
        company_logo_url: None,
        company_description: None,
    };
    assert!(brand.validate().unwrap_err().has_field("website"));
}

#[test]
fn agency_profile_requires_specialization() {
    let agency = AgencyProfile {
        user_id: Uuid::nil(),
        agency_name: "Bright".into(),
        specialization: vec![" ".into()],
        website: "https://bright.agency".into(),
        agency_logo_url: None,
        client_list: Vec::new(),
    };
    assert!(agency.validate().unwrap_err().has_field("specialization"));
}

#[test]
fn profile_is_tagged_by_role() {
    let profile = Profile::Influencer(valid_influencer());
    let json = serde_json::to_value(&profile).unwrap();
    assert_eq!(json["role"], "influencer");
    assert_eq!(json["engagementRate"], 3.8);

    let parsed: Profile = serde_json::from_value(serde_json::json!({
        "role": "brand",
        "userId": Uuid::nil(),
        "companyName": "Acme",
        "industry": "Retail",
        "website": "https://acme.test"
    }))
    .unwrap();
    assert_eq!(parsed.role(), UserRole::Brand);
}

#[test]
fn set_user_id_rebinds_owner() {
    let mut profile = Profile::Influencer(valid_influencer());
    let owner = Uuid::new_v4();
    profile.set_user_id(owner);
    assert_eq!(profile.user_id(), owner);
}
