//! Session and user-directory management.
//!
//! ARCHITECTURE
//! ============
//! Sign-in is mocked: there are no passwords and no server-side identity
//! provider. Signup and login resolve an email to a user record and mint an
//! opaque session token; every request carries that token and is resolved
//! back to a [`User`] through this store. Nothing is a process-wide
//! singleton: the store lives in `AppState` and handlers receive the caller
//! as an explicit value.
//!
//! TRADE-OFFS
//! ==========
//! Logout only drops the session. The user record survives so a later login
//! with the same email resumes the same id (and thus the same campaigns,
//! profiles, and settings).

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::{Arc, PoisonError, RwLock};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::domain::user::{User, UserRole};
use crate::domain::validation::{ValidationErrors, Validator, is_email};
use crate::services::persistence::DirtyFlag;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid sign-in details: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("session not found")]
    UnknownSession,
}

impl crate::error::ErrorCode for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "E_VALIDATION",
            Self::UnknownSession => "E_UNAUTHENTICATED",
        }
    }
}

/// Serializable image of the store, written by the persistence task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default)]
    pub users: Vec<User>,
    /// `(token, user_id)` pairs.
    #[serde(default)]
    pub sessions: Vec<(String, Uuid)>,
}

#[derive(Default)]
struct SessionInner {
    users: HashMap<Uuid, User>,
    /// Lowercased email -> user id.
    by_email: HashMap<String, Uuid>,
    /// Session token -> user id.
    sessions: HashMap<String, Uuid>,
}

/// Users and their live sessions. Clone is cheap; all clones share one map.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<SessionInner>>,
    dirty: DirtyFlag,
}

impl SessionStore {
    #[must_use]
    pub fn new(dirty: DirtyFlag) -> Self {
        Self { inner: Arc::new(RwLock::new(SessionInner::default())), dirty }
    }

    /// Register a user without opening a session (fixture users, restores).
    pub fn insert_user(&self, user: User) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.by_email.insert(user.email.to_ascii_lowercase(), user.id);
        inner.users.insert(user.id, user);
    }

    /// Create (or resume) the account for `email` and open a session.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed email, a short name, or the
    /// `none` role.
    pub fn signup(&self, email: &str, name: &str, role: UserRole) -> Result<(String, User), SessionError> {
        Validator::new()
            .check(is_email(email), "email", "Invalid email address.")
            .min_chars("name", name, 2, "Name must be at least 2 characters.")
            .check(role != UserRole::None, "role", "Please select a role.")
            .finish()?;
        Ok(self.open_session(email, Some(name.trim()), role))
    }

    /// Sign in as `email` wearing `role`. Unknown emails get a fresh account
    /// named after the email's local part.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed email or the `none` role.
    pub fn login(&self, email: &str, role: UserRole) -> Result<(String, User), SessionError> {
        Validator::new()
            .check(is_email(email), "email", "Invalid email address.")
            .check(role != UserRole::None, "role", "Please select a role.")
            .finish()?;
        Ok(self.open_session(email, None, role))
    }

    fn open_session(&self, email: &str, name: Option<&str>, role: UserRole) -> (String, User) {
        let email = email.trim();
        let key = email.to_ascii_lowercase();
        let token = generate_token();

        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let user_id = inner.by_email.get(&key).copied().unwrap_or_else(Uuid::new_v4);
        let user = inner.users.entry(user_id).or_insert_with(|| User {
            id: user_id,
            email: email.to_owned(),
            name: None,
            role,
            avatar_url: None,
        });
        user.role = role;
        if let Some(name) = name {
            user.name = Some(name.to_owned());
        } else if user.name.is_none() {
            user.name = email.split('@').next().map(str::to_owned);
        }
        let user = user.clone();
        inner.by_email.insert(key, user_id);
        inner.sessions.insert(token.clone(), user_id);
        drop(inner);

        self.dirty.mark();
        info!(user_id = %user.id, role = user.role.as_str(), "session: opened");
        (token, user)
    }

    /// Resolve a session token to its user.
    #[must_use]
    pub fn validate(&self, token: &str) -> Option<User> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let user_id = inner.sessions.get(token)?;
        inner.users.get(user_id).cloned()
    }

    /// Drop a session. Returns whether it existed.
    pub fn logout(&self, token: &str) -> bool {
        let removed = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .sessions
            .remove(token)
            .is_some();
        if removed {
            self.dirty.mark();
        }
        removed
    }

    /// Switch the role of the user behind `token`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for the `none` role, or `UnknownSession`.
    pub fn switch_role(&self, token: &str, role: UserRole) -> Result<User, SessionError> {
        if role == UserRole::None {
            return Err(ValidationErrors::single("role", "Please select a role.").into());
        }
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let user_id = *inner
            .sessions
            .get(token)
            .ok_or(SessionError::UnknownSession)?;
        let user = inner
            .users
            .get_mut(&user_id)
            .ok_or(SessionError::UnknownSession)?;
        user.role = role;
        let user = user.clone();
        drop(inner);

        self.dirty.mark();
        info!(user_id = %user.id, role = role.as_str(), "session: role switched");
        Ok(user)
    }

    #[must_use]
    pub fn user(&self, user_id: Uuid) -> Option<User> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .users
            .get(&user_id)
            .cloned()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut users: Vec<User> = inner.users.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        let mut sessions: Vec<(String, Uuid)> = inner
            .sessions
            .iter()
            .map(|(token, id)| (token.clone(), *id))
            .collect();
        sessions.sort();
        SessionSnapshot { users, sessions }
    }

    /// Load users and sessions from a snapshot. Sessions pointing at unknown
    /// users are dropped.
    pub fn restore(&self, snapshot: SessionSnapshot) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        for user in snapshot.users {
            inner.by_email.insert(user.email.to_ascii_lowercase(), user.id);
            inner.users.insert(user.id, user);
        }
        for (token, user_id) in snapshot.sessions {
            if inner.users.contains_key(&user_id) {
                inner.sessions.insert(token, user_id);
            }
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
