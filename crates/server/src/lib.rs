//! Panel-side HTTP handlers for browsing and editing files on node daemons.

pub mod api;
pub mod config;
pub mod render;
pub mod session;

pub use api::{AppState, create_app};
pub use config::ServerConfig;
