// =============================================================================
// Surge Backend - Configuration
// =============================================================================

use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8001")
    pub bind_address: String,
}

impl Config {
    /// Load configuration from environment variables. Every field has a
    /// working default, so startup never fails on missing configuration.
    pub fn from_env() -> Self {
        Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8001".into()),
        }
    }
}
