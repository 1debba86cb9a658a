//! Suggestion-fetch configuration with sensible defaults.
//!
//! [`SuggestConfig`] controls timeouts, the Google client hint, the
//! Wikipedia language, and the optional fetch proxy. The defaults match
//! what the endpoints expect from an unconfigured install.

use crate::error::SuggestError;
use crate::types::{language_code, ClientHint};

/// Proxy used when the caller enables proxying without naming one.
/// The original target URL is appended percent-encoded.
pub const DEFAULT_PROXY_URL: &str = "https://mynt-proxy.rhythmcorehq.com/proxy?url=";

/// Configuration for suggestion fetches.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct SuggestConfig {
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Preferred language, any BCP 47-ish tag; only its first two
    /// letters reach the wire (Wikipedia hosts).
    pub language: String,
    /// Browser identity for Google's completion endpoint.
    pub client: ClientHint,
    /// Fetch proxy prefix. `Some(url)` routes every suggestion request
    /// (except Reddit's) through `url` with the target percent-encoded
    /// onto it; `None` fetches directly.
    pub proxy: Option<String>,
    /// Custom User-Agent string. `None` sends the crate's own identity.
    pub user_agent: Option<String>,
    /// Replacement origin for every suggestion endpoint. Lets tests
    /// point the client at a mock server; `None` uses the real hosts.
    pub base_url: Option<String>,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 5,
            language: "en".to_string(),
            client: ClientHint::default(),
            proxy: None,
            user_agent: None,
            base_url: None,
        }
    }
}

impl SuggestConfig {
    /// Replaces every endpoint origin with `base_url` (mock servers in
    /// tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Routes suggestion fetches through `proxy`.
    #[must_use]
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Returns the two-letter language code used on the wire.
    pub fn language_code(&self) -> String {
        language_code(&self.language)
    }

    /// Validates this configuration, returning an error if any field is
    /// invalid.
    ///
    /// Checks:
    /// - `timeout_seconds` must be greater than 0
    /// - `proxy`, when set, must be non-blank
    /// - `base_url`, when set, must be non-blank
    pub fn validate(&self) -> Result<(), SuggestError> {
        if self.timeout_seconds == 0 {
            return Err(SuggestError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if let Some(proxy) = &self.proxy {
            if proxy.trim().is_empty() {
                return Err(SuggestError::Config(
                    "proxy must not be blank when set".into(),
                ));
            }
        }
        if let Some(base) = &self.base_url {
            if base.trim().is_empty() {
                return Err(SuggestError::Config(
                    "base_url must not be blank when set".into(),
                ));
            }
        }
        Ok(())
    }
}
