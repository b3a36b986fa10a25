use serde::{Deserialize, Serialize};

/// Client configuration matching `config.toml`.
///
/// Every field has a default so a missing or partial file still yields a
/// usable config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    /// Delay before scrolling to a deep-link target, so the page can render.
    #[serde(default = "default_scroll_delay")]
    pub scroll_delay_ms: u32,
    /// How long the highlight class stays on the target.
    #[serde(default = "default_highlight_duration")]
    pub highlight_duration_ms: u32,
    #[serde(default = "default_poll_secs")]
    pub notification_poll_secs: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            scroll_delay_ms: default_scroll_delay(),
            highlight_duration_ms: default_highlight_duration(),
            notification_poll_secs: default_poll_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArchiveConfig {
    /// Rows fetched per archive entity in one request.
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: u32,
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            fetch_limit: default_fetch_limit(),
            default_page_size: default_page_size(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5005/api".to_string()
}

fn default_scroll_delay() -> u32 {
    500
}

fn default_highlight_duration() -> u32 {
    3000
}

fn default_poll_secs() -> u32 {
    30
}

fn default_fetch_limit() -> u32 {
    100
}

fn default_page_size() -> usize {
    crate::listing::DEFAULT_PAGE_SIZE
}

impl ClientConfig {
    /// Parse TOML, falling back to defaults when the text is unparseable.
    pub fn from_toml_or_default(contents: &str) -> Self {
        toml::from_str(contents).unwrap_or_default()
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }
}
