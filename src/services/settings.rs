//! Per-user preferences. Unknown users get the defaults.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use uuid::Uuid;

use crate::domain::settings::UserSettings;
use crate::services::persistence::DirtyFlag;

#[derive(Clone)]
pub struct SettingsStore {
    settings: Arc<RwLock<HashMap<Uuid, UserSettings>>>,
    dirty: DirtyFlag,
}

impl SettingsStore {
    #[must_use]
    pub fn new(dirty: DirtyFlag) -> Self {
        Self { settings: Arc::new(RwLock::new(HashMap::new())), dirty }
    }

    #[must_use]
    pub fn get(&self, user_id: Uuid) -> UserSettings {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&user_id)
            .copied()
            .unwrap_or_default()
    }

    pub fn set(&self, user_id: Uuid, settings: UserSettings) -> UserSettings {
        self.settings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user_id, settings);
        self.dirty.mark();
        settings
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<(Uuid, UserSettings)> {
        let mut all: Vec<(Uuid, UserSettings)> = self
            .settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(id, s)| (*id, *s))
            .collect();
        all.sort_by_key(|(id, _)| *id);
        all
    }

    pub fn restore(&self, entries: Vec<(Uuid, UserSettings)>) {
        self.settings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(entries);
    }
}
