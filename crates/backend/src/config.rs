use shared_types::{AppConfig, AppError, BackendConfig, FeatureFlags};
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the working directory.
#[cfg(not(target_arch = "wasm32"))]
const CONFIG_PATH: &str = "config.toml";

const URL_VAR: &str = "SUPABASE_URL";
const KEY_VAR: &str = "SUPABASE_ANON_KEY";

/// Load the app config once and cache it.
///
/// Native builds read `config.toml` (when present) and then let
/// `SUPABASE_URL` / `SUPABASE_ANON_KEY` from the environment or `.env`
/// override it. Web builds bake the two variables in at compile time.
pub fn load_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| {
        let config = read_config_file();
        let (url, key) = env_overrides();
        let config = apply_overrides(config, url, key);
        tracing::info!(
            backend_configured = config.backend.is_complete(),
            features = ?config.features,
            "Loaded client configuration"
        );
        config
    })
}

/// Backend connection settings, or a `Config` error when incomplete.
pub fn backend_config() -> Result<BackendConfig, AppError> {
    check_backend(&load_config().backend)
}

pub fn feature_flags() -> &'static FeatureFlags {
    &load_config().features
}

pub fn check_backend(backend: &BackendConfig) -> Result<BackendConfig, AppError> {
    if backend.url.trim().is_empty() {
        return Err(AppError::config(format!("{URL_VAR} is not configured")));
    }
    if backend.anon_key.trim().is_empty() {
        return Err(AppError::config(format!("{KEY_VAR} is not configured")));
    }
    Ok(backend.clone())
}

/// Non-empty override values replace what the file provided.
pub fn apply_overrides(mut config: AppConfig, url: Option<String>, key: Option<String>) -> AppConfig {
    if let Some(url) = url.filter(|v| !v.trim().is_empty()) {
        config.backend.url = url;
    }
    if let Some(key) = key.filter(|v| !v.trim().is_empty()) {
        config.backend.anon_key = key;
    }
    config
}

/// Parse config file contents, falling back to defaults on bad TOML.
pub fn parse_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to parse config file, using defaults");
        AppConfig::default()
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn read_config_file() -> AppConfig {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => parse_config(&contents),
        Err(e) => {
            tracing::debug!(path = CONFIG_PATH, error = %e, "No config file, using defaults");
            AppConfig::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn read_config_file() -> AppConfig {
    AppConfig::default()
}

#[cfg(not(target_arch = "wasm32"))]
fn env_overrides() -> (Option<String>, Option<String>) {
    dotenvy::dotenv().ok();
    (std::env::var(URL_VAR).ok(), std::env::var(KEY_VAR).ok())
}

#[cfg(target_arch = "wasm32")]
fn env_overrides() -> (Option<String>, Option<String>) {
    (
        option_env!("SUPABASE_URL").map(str::to_string),
        option_env!("SUPABASE_ANON_KEY").map(str::to_string),
    )
}
