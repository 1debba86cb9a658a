//! # wisp-suggest
//!
//! Zero-configuration search suggestions for wisp.
//!
//! This crate fetches autocomplete suggestions from public search-engine
//! endpoints — no API keys, no external services, no user setup required.
//! It compiles into wisp's binary as a library dependency.
//!
//! ## Design
//!
//! - One closed [`SearchEngine`] enum covers every supported engine's
//!   suggestion endpoint and results URL
//! - One GET per fetch, no retry: a failed fetch is recovered by the
//!   user's next keystroke
//! - Reddit requests are spaced at least a second apart; skipped
//!   attempts surface as [`SuggestError::Throttled`] so callers keep
//!   what they already display
//! - Optional fetch proxy with the target URL percent-encoded onto it
//!
//! ## Security
//!
//! - No API keys or secrets to leak
//! - No network listeners — this is a library, not a server
//! - Query text is logged only at trace level and never appears in
//!   error messages

pub mod client;
pub mod config;
pub mod engines;
pub mod error;
pub mod http;
pub mod types;

pub use client::{SuggestClient, REDDIT_MIN_INTERVAL};
pub use config::{SuggestConfig, DEFAULT_PROXY_URL};
pub use error::{Result, SuggestError};
pub use types::{language_code, ClientHint, SearchEngine};

/// Fetch suggestions once with a throwaway client.
///
/// Convenience for one-off lookups. Interactive callers should hold a
/// [`SuggestClient`] instead: the Reddit spacing only works across
/// fetches made through the same client.
///
/// # Errors
///
/// Same as [`SuggestClient::fetch`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> wisp_suggest::Result<()> {
/// let config = wisp_suggest::SuggestConfig::default();
/// let suggestions =
///     wisp_suggest::suggest(wisp_suggest::SearchEngine::DuckDuckGo, "rust", &config).await?;
/// for s in &suggestions {
///     println!("{s}");
/// }
/// # Ok(())
/// # }
/// ```
pub async fn suggest(
    engine: SearchEngine,
    query: &str,
    config: &SuggestConfig,
) -> Result<Vec<String>> {
    SuggestClient::new(config.clone())?.fetch(engine, query).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn suggest_validates_config_zero_timeout() {
        let config = SuggestConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let result = suggest(SearchEngine::DuckDuckGo, "test", &config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout"));
    }

    #[tokio::test]
    async fn suggest_validates_config_blank_proxy() {
        let config = SuggestConfig {
            proxy: Some(String::new()),
            ..Default::default()
        };
        let result = suggest(SearchEngine::Google, "test", &config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("proxy"));
    }
}
