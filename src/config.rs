use dioxus::logger::tracing::Level;
use serde::Deserialize;

#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

pub const DEFAULT_POLL_INTERVAL_MS: u32 = 2000;
pub const MIN_POLL_INTERVAL_MS: u32 = 250;
pub const DEFAULT_MAX_ACCOUNTS: usize = 5;

#[cfg(target_arch = "wasm32")]
const OVERRIDES_KEY: &str = "spotify_panel.config";
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Runtime settings for the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    /// Origin of the backend; request paths are appended to it.
    pub api_base_url: String,
    pub poll_interval_ms: u32,
    /// Linking is offered only while fewer accounts than this are present.
    pub max_accounts: usize,
    pub login_path: String,
    pub link_account_path: String,
    pub log_level: Level,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_accounts: DEFAULT_MAX_ACCOUNTS,
            login_path: "/google/login".to_string(),
            link_account_path: "/auth/login".to_string(),
            log_level: Level::INFO,
        }
    }
}

/// Optional overrides; anything left out keeps its default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    pub api_base_url: Option<String>,
    pub poll_interval_ms: Option<u32>,
    pub max_accounts: Option<usize>,
    pub log_level: Option<String>,
}

impl ConfigOverrides {
    /// Reads overrides through `lookup`, keyed by environment variable name.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_base_url: lookup("SPOTIFY_PANEL_API_URL").filter(|v| !v.trim().is_empty()),
            poll_interval_ms: lookup("SPOTIFY_PANEL_POLL_MS").and_then(|v| v.trim().parse().ok()),
            max_accounts: lookup("SPOTIFY_PANEL_MAX_ACCOUNTS")
                .and_then(|v| v.trim().parse().ok()),
            log_level: lookup("SPOTIFY_PANEL_LOG"),
        }
    }

    pub fn apply(self, mut config: PanelConfig) -> PanelConfig {
        if let Some(url) = self.api_base_url {
            config.api_base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(interval) = self.poll_interval_ms {
            config.poll_interval_ms = interval;
        }
        if let Some(max) = self.max_accounts {
            config.max_accounts = max;
        }
        if let Some(level) = self.log_level.and_then(|l| l.trim().parse::<Level>().ok()) {
            config.log_level = level;
        }
        config.poll_interval_ms = config.poll_interval_ms.max(MIN_POLL_INTERVAL_MS);
        config.max_accounts = config.max_accounts.max(1);
        config
    }
}

impl PanelConfig {
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default();
        let base = Self {
            api_base_url: origin,
            ..Self::default()
        };
        let overrides = LocalStorage::get::<ConfigOverrides>(OVERRIDES_KEY).unwrap_or_default();
        overrides.apply(base)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let base = Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            ..Self::default()
        };
        ConfigOverrides::from_lookup(|key| std::env::var(key).ok()).apply(base)
    }

    /// Absolute URL for a backend path, used for full-page navigation.
    pub fn backend_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}{}", self.api_base_url, path)
    }

    pub fn can_link_more(&self, linked: usize) -> bool {
        linked < self.max_accounts
    }
}
