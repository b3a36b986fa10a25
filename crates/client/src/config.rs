use shared_types::ClientConfig;
use std::sync::OnceLock;

static CONFIG: OnceLock<ClientConfig> = OnceLock::new();

/// Path to the config file, relative to the working directory.
#[cfg(not(target_arch = "wasm32"))]
const CONFIG_PATH: &str = "config.toml";

/// Environment variable overriding `[api] base_url`.
pub const API_URL_ENV: &str = "BULLETIN_API_URL";

/// Read `config.toml` and the environment (including `.env`), and store the
/// result in the global `OnceLock`. Only the first call has effect.
///
/// A missing or unparseable file yields defaults.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_config() -> &'static ClientConfig {
    CONFIG.get_or_init(|| {
        let _ = dotenvy::dotenv();
        let config = match std::fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = CONFIG_PATH, error = %e, "Failed to parse config, using defaults");
                ClientConfig::default()
            }),
            Err(e) => {
                tracing::info!(path = CONFIG_PATH, error = %e, "Config file not found, using defaults");
                ClientConfig::default()
            }
        };
        let config = with_api_url_override(config, std::env::var(API_URL_ENV).ok());
        tracing::info!(base_url = config.base_url(), "Client config loaded");
        config
    })
}

/// Install an already-parsed config, e.g. one embedded at build time. Returns
/// `false` when a config was already loaded.
pub fn install_config(config: ClientConfig) -> bool {
    CONFIG.set(config).is_ok()
}

/// The loaded config, or defaults when nothing has been loaded yet.
pub fn config() -> &'static ClientConfig {
    CONFIG.get_or_init(ClientConfig::default)
}

/// Replace the base URL with a non-blank override.
pub fn with_api_url_override(mut config: ClientConfig, override_url: Option<String>) -> ClientConfig {
    if let Some(url) = override_url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
        config.api.base_url = url;
    }
    config
}
