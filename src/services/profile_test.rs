use super::*;
use crate::domain::profile::SocialLink;

fn user(role: UserRole) -> User {
    User { id: Uuid::new_v4(), email: "me@site.io".into(), name: None, role, avatar_url: None }
}

fn store() -> ProfileStore {
    ProfileStore::new(DirtyFlag::default(), true)
}

fn brand_profile() -> Profile {
    Profile::Brand(BrandProfile {
        user_id: Uuid::nil(),
        company_name: "Acme".into(),
        industry: "Retail".into(),
        website: "https://acme.example".into(),
        company_logo_url: None,
        company_description: None,
    })
}

fn influencer_profile() -> Profile {
    let mut profile = InfluencerProfile::empty(Uuid::nil());
    profile.bio = "Travel vlogger with a love for trains.".into();
    profile.niche = vec!["Travel".into()];
    profile.location = "Lisbon".into();
    profile.engagement_rate = 4.0;
    profile.social_media_links = vec![SocialLink {
        platform: "YouTube".into(),
        url: "https://youtube.com/@trains".into(),
        followers: 12_000,
    }];
    Profile::Influencer(profile)
}

#[test]
fn unsaved_profile_is_blank_for_role() {
    let brand = user(UserRole::Brand);
    let profile = store().get(&brand).unwrap();
    assert_eq!(profile.role(), UserRole::Brand);
    assert_eq!(profile.user_id(), brand.id);
}

#[test]
fn no_role_has_no_profile() {
    assert!(matches!(store().get(&user(UserRole::None)), Err(ProfileError::NoRole)));
}

#[test]
fn save_rebinds_owner_and_round_trips() {
    let profiles = store();
    let brand = user(UserRole::Brand);
    let saved = profiles.save(&brand, brand_profile()).unwrap();
    assert_eq!(saved.user_id(), brand.id);
    assert_eq!(profiles.get(&brand).unwrap(), saved);
}

#[test]
fn save_rejects_mismatched_role() {
    let err = store().save(&user(UserRole::Agency), brand_profile()).unwrap_err();
    let ProfileError::Validation(errors) = err else {
        panic!("expected validation error");
    };
    assert!(errors.has_field("role"));
}

#[test]
fn save_rejects_invalid_form() {
    let mut invalid = brand_profile();
    if let Profile::Brand(p) = &mut invalid {
        p.website = "acme".into();
    }
    assert!(matches!(store().save(&user(UserRole::Brand), invalid), Err(ProfileError::Validation(_))));
}

#[test]
fn profiles_are_kept_per_role() {
    let profiles = store();
    let mut me = user(UserRole::Brand);
    profiles.save(&me, brand_profile()).unwrap();

    me.role = UserRole::Influencer;
    assert_eq!(profiles.get(&me).unwrap(), Profile::Influencer(InfluencerProfile::empty(me.id)));

    me.role = UserRole::Brand;
    assert_eq!(profiles.get(&me).unwrap().role(), UserRole::Brand);
}

#[test]
fn directory_appends_saved_influencers_to_fixtures() {
    let profiles = store();
    let creator = user(UserRole::Influencer);
    profiles.save(&creator, influencer_profile()).unwrap();

    let directory = profiles.influencer_directory();
    assert_eq!(directory.len(), fixtures::influencers().len() + 1);
    assert_eq!(directory.last().map(|p| p.user_id), Some(creator.id));
}

#[test]
fn directory_without_fixtures() {
    let profiles = ProfileStore::new(DirtyFlag::default(), false);
    assert!(profiles.influencer_directory().is_empty());
}

#[test]
fn snapshot_restore_round_trip() {
    let profiles = store();
    let brand = user(UserRole::Brand);
    profiles.save(&brand, brand_profile()).unwrap();

    let restored = store();
    restored.restore(profiles.snapshot());
    assert_eq!(restored.get(&brand).unwrap(), profiles.get(&brand).unwrap());
}
