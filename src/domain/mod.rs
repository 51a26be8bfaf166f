//! Domain model shared by services and routes.
//!
//! DESIGN
//! ======
//! Plain serde records, camelCase on the wire. Calendar dates travel as
//! `YYYY-MM-DD`, timestamps as RFC 3339. Role-dependent behavior is computed
//! with exhaustive matches on enums so new roles fail to compile until handled.

pub mod analytics;
pub mod campaign;
pub mod chat;
pub mod nav;
pub mod profile;
pub mod settings;
pub mod user;
pub mod validation;

use time::Date;

time::serde::format_description!(pub(crate) iso_date, Date, "[year]-[month]-[day]");
