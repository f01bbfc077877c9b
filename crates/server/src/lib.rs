//! `partsdash-server` — the inventory record store and settings store
//! behind the dashboard, served over HTTP with a JSON file underneath.

pub mod logs;
pub mod routes;
pub mod store;

pub use routes::build_app;
pub use store::{JsonStore, SettingsStore, StoreError, MAX_BACKUPS};
