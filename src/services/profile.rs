//! Profile store: one profile blob per `(user, role)`.
//!
//! A user who switches roles keeps the profile saved under each role, so
//! switching back restores it. The discovery directory is the demo
//! influencers plus every saved influencer profile.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;
use uuid::Uuid;

use crate::domain::profile::{AgencyProfile, BrandProfile, InfluencerProfile, Profile};
use crate::domain::user::{User, UserRole};
use crate::domain::validation::ValidationErrors;
use crate::services::fixtures;
use crate::services::persistence::DirtyFlag;

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("choose a role before editing a profile")]
    NoRole,
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

impl crate::error::ErrorCode for ProfileError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoRole => "E_FORBIDDEN",
            Self::Validation(_) => "E_VALIDATION",
        }
    }
}

/// Empty form for `user`'s current role.
#[must_use]
pub fn blank_profile(user: &User) -> Option<Profile> {
    let user_id = user.id;
    match user.role {
        UserRole::Influencer => Some(Profile::Influencer(InfluencerProfile::empty(user_id))),
        UserRole::Brand => Some(Profile::Brand(BrandProfile {
            user_id,
            company_name: String::new(),
            industry: String::new(),
            website: String::new(),
            company_logo_url: None,
            company_description: None,
        })),
        UserRole::Agency => Some(Profile::Agency(AgencyProfile {
            user_id,
            agency_name: String::new(),
            specialization: Vec::new(),
            website: String::new(),
            agency_logo_url: None,
            client_list: Vec::new(),
        })),
        UserRole::None => None,
    }
}

#[derive(Clone)]
pub struct ProfileStore {
    profiles: Arc<RwLock<HashMap<(Uuid, UserRole), Profile>>>,
    include_fixtures: bool,
    dirty: DirtyFlag,
}

impl ProfileStore {
    #[must_use]
    pub fn new(dirty: DirtyFlag, include_fixtures: bool) -> Self {
        Self { profiles: Arc::new(RwLock::new(HashMap::new())), include_fixtures, dirty }
    }

    /// The saved profile for the user's current role, else a blank form.
    ///
    /// # Errors
    ///
    /// `NoRole` when the user has not picked a role.
    pub fn get(&self, user: &User) -> Result<Profile, ProfileError> {
        let saved = self
            .profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(user.id, user.role))
            .cloned();
        match saved {
            Some(profile) => Ok(profile),
            None => blank_profile(user).ok_or(ProfileError::NoRole),
        }
    }

    /// Validate and store `profile` for the user's current role. The stored
    /// copy is always owned by `user`, whatever id the payload carried.
    ///
    /// # Errors
    ///
    /// `NoRole`, or `Validation` when the profile kind does not match the
    /// user's role or the form is invalid.
    pub fn save(&self, user: &User, mut profile: Profile) -> Result<Profile, ProfileError> {
        if user.role == UserRole::None {
            return Err(ProfileError::NoRole);
        }
        if profile.role() != user.role {
            return Err(ValidationErrors::single("role", "Profile type does not match your current role.").into());
        }
        profile.set_user_id(user.id);
        profile.validate()?;

        self.profiles
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((user.id, user.role), profile.clone());
        self.dirty.mark();
        info!(user_id = %user.id, role = user.role.as_str(), "profile: saved");
        Ok(profile)
    }

    /// Discovery candidates: demo influencers first, then saved profiles.
    #[must_use]
    pub fn influencer_directory(&self) -> Vec<InfluencerProfile> {
        let mut directory = if self.include_fixtures { fixtures::influencers() } else { Vec::new() };
        let mut saved: Vec<InfluencerProfile> = self
            .profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter_map(|p| match p {
                Profile::Influencer(inf) => Some(inf.clone()),
                Profile::Brand(_) | Profile::Agency(_) => None,
            })
            .collect();
        saved.sort_by_key(|p| p.user_id);
        directory.extend(saved);
        directory
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<Profile> {
        let mut all: Vec<Profile> = self
            .profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        all.sort_by_key(|p| (p.user_id(), p.role().as_str()));
        all
    }

    pub fn restore(&self, profiles: Vec<Profile>) {
        let mut map = self.profiles.write().unwrap_or_else(PoisonError::into_inner);
        for profile in profiles {
            map.insert((profile.user_id(), profile.role()), profile);
        }
    }
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
