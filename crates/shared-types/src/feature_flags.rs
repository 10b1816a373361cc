use serde::{Deserialize, Serialize};

fn enabled() -> bool {
    true
}

/// Feature flags controlling optional parts of the client.
///
/// Loaded from `config.toml` alongside the backend settings. Both flags
/// default to `true` so that a missing config file keeps the full app.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureFlags {
    /// Shows the QR check-in page and its navigation entry.
    #[serde(default = "enabled")]
    pub qr_scan: bool,
    /// Allows switching the auth form into sign-up mode.
    #[serde(default = "enabled")]
    pub self_signup: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            qr_scan: true,
            self_signup: true,
        }
    }
}

/// Connection settings for the hosted backend.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BackendConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub anon_key: String,
}

impl BackendConfig {
    pub fn is_complete(&self) -> bool {
        !self.url.trim().is_empty() && !self.anon_key.trim().is_empty()
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.url.trim().trim_end_matches('/')
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub features: FeatureFlags,
}
