//! Users and roles.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The hat a user is currently wearing. `None` is a signed-in user who has not
/// picked a role yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Influencer,
    Brand,
    Agency,
    None,
}

impl UserRole {
    pub const ALL: [Self; 4] = [Self::Influencer, Self::Brand, Self::Agency, Self::None];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Influencer => "influencer",
            Self::Brand => "brand",
            Self::Agency => "agency",
            Self::None => "none",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "influencer" => Some(Self::Influencer),
            "brand" => Some(Self::Brand),
            "agency" => Some(Self::Agency),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Influencer => "Influencer",
            Self::Brand => "Brand",
            Self::Agency => "Agency",
            Self::None => "No role",
        }
    }

    /// Icon identifier rendered next to the role badge.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Influencer => "star",
            Self::Brand => "briefcase",
            Self::Agency => "users",
            Self::None => "user",
        }
    }

    /// Brands and agencies run campaigns, discover talent, and use AI matching.
    #[must_use]
    pub fn manages_campaigns(self) -> bool {
        match self {
            Self::Brand | Self::Agency => true,
            Self::Influencer | Self::None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl User {
    /// Name to show in lists: the explicit name, else the email's local part.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.email.split('@').next().unwrap_or(&self.email),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_round_trips_as_str() {
        for role in UserRole::ALL {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::parse(" Brand "), Some(UserRole::Brand));
        assert_eq!(UserRole::parse("admin"), None);
    }

    #[test]
    fn only_brand_and_agency_manage_campaigns() {
        assert!(UserRole::Brand.manages_campaigns());
        assert!(UserRole::Agency.manages_campaigns());
        assert!(!UserRole::Influencer.manages_campaigns());
        assert!(!UserRole::None.manages_campaigns());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Agency).unwrap(), "\"agency\"");
        assert_eq!(serde_json::from_str::<UserRole>("\"none\"").unwrap(), UserRole::None);
    }

    #[test]
    fn display_name_falls_back_to_email_local_part() {
        let mut user = User {
            id: Uuid::nil(),
            email: "jane@brand.co".into(),
            name: None,
            role: UserRole::Brand,
            avatar_url: None,
        };
        assert_eq!(user.display_name(), "jane");
        user.name = Some("Jane Doe".into());
        assert_eq!(user.display_name(), "Jane Doe");
    }
}
