//! Persisted user settings for the omnibar.
//!
//! Settings live in a TOML file under the platform config directory
//! (see [`crate::wisp_dirs::settings_file`]). Every field has a default,
//! so a missing or partial file always yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wisp_suggest::{ClientHint, SearchEngine, SuggestConfig, DEFAULT_PROXY_URL};

/// Top-level omnibar settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Engine selection and suggestion behavior.
    pub search: SearchSettings,
    /// Suggestion fetch proxy.
    pub proxy: ProxySettings,
    /// Whether the user has agreed to the network-consent prompt.
    ///
    /// Live suggestions send keystrokes to third-party endpoints; the
    /// first time suggestions are enabled the user is asked once. A
    /// decline leaves suggestions on but keeps this `false`, so the
    /// prompt returns next time.
    pub network_consent_given: bool,
}

/// Search engine selection and suggestion behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Engine queried for suggestions and used for dispatch.
    pub engine: SearchEngine,
    /// Whether live suggestions are fetched while typing.
    pub suggestions_enabled: bool,
    /// Preferred language tag; only its first two letters are used
    /// (Wikipedia hosts, disclaimer translations).
    pub language: String,
    /// Browser identity sent to Google's completion endpoint.
    pub client: ClientHint,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            engine: SearchEngine::Native,
            suggestions_enabled: true,
            language: "en".to_string(),
            client: ClientHint::default(),
        }
    }
}

/// Suggestion fetch proxy settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    /// Proxy URL prefix; blank means the built-in default proxy.
    pub url: String,
    /// Whether suggestion fetches are routed through the proxy.
    pub enabled: bool,
}

/// Normalizes a user-entered proxy URL the way the settings panel saves
/// it: whitespace is trimmed, a blank entry falls back to the built-in
/// default, and a missing scheme gets `https://` prefixed.
#[must_use]
pub fn normalize_proxy_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DEFAULT_PROXY_URL.to_string();
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

impl Settings {
    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::error::WispError::Settings(e.to_string()))
    }

    /// Save settings to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the settings
    /// cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::WispError::Settings(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load settings from `path`, falling back to defaults when the file
    /// is missing or unreadable. A parse failure is logged rather than
    /// fatal: the omnibar still starts, with defaults.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to load settings, using defaults"
                );
                Self::default()
            }
        }
    }

    /// Returns the default settings file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        crate::wisp_dirs::settings_file()
    }

    /// Stores a user-entered proxy URL, normalized (see
    /// [`normalize_proxy_url`]).
    pub fn set_proxy_url(&mut self, raw: &str) {
        self.proxy.url = normalize_proxy_url(raw);
    }

    /// Toggles suggestion fetching. Disabling suggestions also disables
    /// the proxy: a proxy with nothing to route is misleading UI state.
    pub fn set_suggestions_enabled(&mut self, enabled: bool) {
        self.search.suggestions_enabled = enabled;
        if !enabled {
            self.proxy.enabled = false;
        }
    }

    /// The proxy URL that fetches actually use: the stored URL, or the
    /// built-in default when none was saved.
    #[must_use]
    pub fn effective_proxy_url(&self) -> &str {
        if self.proxy.url.trim().is_empty() {
            DEFAULT_PROXY_URL
        } else {
            &self.proxy.url
        }
    }

    /// Builds the suggestion-fetch configuration reflecting these
    /// settings. Called again after any settings change so the fetch
    /// worker picks up the new proxy/language/client on the next request.
    #[must_use]
    pub fn suggest_config(&self) -> SuggestConfig {
        SuggestConfig {
            language: self.search.language.clone(),
            client: self.search.client,
            proxy: self
                .proxy
                .enabled
                .then(|| self.effective_proxy_url().to_string()),
            ..SuggestConfig::default()
        }
    }
}
