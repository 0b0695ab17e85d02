//! Process settings.
//!
//! # Responsibilities
//! - Read runtime settings from environment variables, once, at startup
//! - Provide sane defaults so the server runs with no configuration
//!
//! # Design Decisions
//! - Settings are immutable after startup and threaded into constructors;
//!   no module-level mutable state
//! - Every variable has a default to keep local runs zero-setup
//! - An empty `ADMIN_TOKEN` counts as unset (open mode)

use std::path::PathBuf;

/// Runtime settings for the dashboard process.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Listening port, bound on all interfaces (`PORT`).
    pub port: u16,

    /// Optional bearer credential required for writes (`ADMIN_TOKEN`).
    /// Unset means every write is accepted.
    pub admin_token: Option<String>,

    /// Customer id whose record backs customers with no record of their
    /// own (`DEFAULT_CUSTOMER_ID`).
    pub default_customer_id: String,

    /// Path of the persisted config table (`CONFIG_STORE`).
    pub store_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: 5000,
            admin_token: None,
            default_customer_id: "DEFAULT".to_string(),
            store_path: PathBuf::from("config_store.json"),
        }
    }
}

impl Settings {
    /// Read settings from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            admin_token: std::env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty()),
            default_customer_id: std::env::var("DEFAULT_CUSTOMER_ID")
                .unwrap_or(defaults.default_customer_id),
            store_path: std::env::var("CONFIG_STORE")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
        }
    }
}
