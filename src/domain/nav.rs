//! Dashboard sidebar navigation, resolved per role.

use serde::Serialize;

use super::user::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Dashboard,
    Profile,
    Campaigns,
    CreateCampaign,
    Discover,
    AiMatching,
    Analytics,
    Messages,
    Settings,
}

impl NavItem {
    /// Sidebar order.
    pub const ALL: [Self; 9] = [
        Self::Dashboard,
        Self::Profile,
        Self::Campaigns,
        Self::CreateCampaign,
        Self::Discover,
        Self::AiMatching,
        Self::Analytics,
        Self::Messages,
        Self::Settings,
    ];

    #[must_use]
    pub fn href(self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::Profile => "/dashboard/profile",
            Self::Campaigns => "/dashboard/campaigns",
            Self::CreateCampaign => "/dashboard/campaigns/create",
            Self::Discover => "/dashboard/discover",
            Self::AiMatching => "/dashboard/ai-matching",
            Self::Analytics => "/dashboard/analytics",
            Self::Messages => "/dashboard/messages",
            Self::Settings => "/dashboard/settings",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Profile => "My Profile",
            Self::Campaigns => "Campaigns",
            Self::CreateCampaign => "Create Campaign",
            Self::Discover => "Discover Influencers",
            Self::AiMatching => "AI Matching",
            Self::Analytics => "Analytics Overview",
            Self::Messages => "Messages",
            Self::Settings => "Settings",
        }
    }

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Dashboard => "layout-dashboard",
            Self::Profile => "user-circle",
            Self::Campaigns => "megaphone",
            Self::CreateCampaign => "plus-circle",
            Self::Discover => "search",
            Self::AiMatching => "wand",
            Self::Analytics => "bar-chart",
            Self::Messages => "message-square",
            Self::Settings => "settings",
        }
    }

    /// Placeholder pages that are listed but not yet reachable.
    #[must_use]
    pub fn disabled(self) -> bool {
        matches!(self, Self::Analytics | Self::Settings)
    }

    #[must_use]
    pub fn visible_to(self, role: UserRole) -> bool {
        match self {
            Self::Dashboard | Self::Profile | Self::Campaigns | Self::Messages | Self::Settings => {
                role != UserRole::None
            }
            Self::CreateCampaign | Self::Discover | Self::AiMatching | Self::Analytics => role.manages_campaigns(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub href: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub disabled: bool,
}

/// Sidebar entries for `role`, in display order.
#[must_use]
pub fn nav_for(role: UserRole) -> Vec<NavEntry> {
    NavItem::ALL
        .into_iter()
        .filter(|item| item.visible_to(role))
        .map(|item| NavEntry { href: item.href(), label: item.label(), icon: item.icon(), disabled: item.disabled() })
        .collect()
}
