//! Sidebar navigation for the caller's role.

use axum::response::Json;
use serde::Serialize;

use super::auth::AuthUser;
use crate::domain::nav::{NavEntry, nav_for};
use crate::domain::user::UserRole;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavResponse {
    role: UserRole,
    role_name: &'static str,
    role_icon: &'static str,
    items: Vec<NavEntry>,
}

/// `GET /api/nav`
pub async fn nav(auth: AuthUser) -> Json<NavResponse> {
    let role = auth.user.role;
    Json(NavResponse { role, role_name: role.display_name(), role_icon: role.icon(), items: nav_for(role) })
}
