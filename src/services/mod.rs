//! Service layer: domain operations behind the HTTP routes.

pub mod ai;
pub mod analytics;
pub mod campaign;
pub mod filter;
pub mod fixtures;
pub mod matching;
pub mod messaging;
pub mod persistence;
pub mod profile;
pub mod scrape;
pub mod session;
pub mod settings;
pub mod summary;
