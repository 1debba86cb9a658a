//! Suggestion fetching: endpoint construction, throttling, proxying.
//!
//! [`SuggestClient`] holds the HTTP client plus the one piece of state
//! the fetch protocol needs across requests: the timestamp of the last
//! Reddit request. Reddit rate-limits anonymous JSON search hard, so
//! requests inside the minimum interval are skipped outright rather
//! than queued; every other engine tolerates per-keystroke load.

use crate::config::SuggestConfig;
use crate::engines;
use crate::error::{Result, SuggestError};
use crate::http;
use crate::types::SearchEngine;
use std::time::{Duration, Instant};

/// Minimum spacing between two Reddit suggestion requests.
pub const REDDIT_MIN_INTERVAL: Duration = Duration::from_millis(1000);

/// Builds the suggestion endpoint URL for one fetch.
///
/// Engines without a public suggestion endpoint of their own (Bing,
/// Google Images, Quora) borrow Google's; the Native engine borrows
/// DuckDuckGo's. A configured `base_url` replaces the origin so tests
/// can aim at a mock server.
pub(crate) fn suggest_url(engine: SearchEngine, query: &str, config: &SuggestConfig) -> String {
    let q = urlencoding::encode(query);
    let path = match engine {
        SearchEngine::Native | SearchEngine::DuckDuckGo => format!("/ac/?q={q}&type=list"),
        SearchEngine::Brave => format!("/api/suggest?q={q}&rich=true&source=web"),
        SearchEngine::Reddit => format!("/search.json?q={q}&sort=relevance&limit=15"),
        SearchEngine::Wikipedia => {
            format!("/w/api.php?action=opensearch&search={q}&format=json")
        }
        SearchEngine::YouTube => format!(
            "/complete/search?client={}&ds=yt&q={q}",
            config.client.as_param()
        ),
        SearchEngine::Google
        | SearchEngine::Bing
        | SearchEngine::GoogleImages
        | SearchEngine::Quora => {
            format!("/complete/search?client={}&q={q}", config.client.as_param())
        }
    };

    let origin = match &config.base_url {
        Some(base) => base.trim_end_matches('/').to_owned(),
        None => match engine {
            SearchEngine::Native | SearchEngine::DuckDuckGo => "https://duckduckgo.com".to_owned(),
            SearchEngine::Brave => "https://search.brave.com".to_owned(),
            SearchEngine::Reddit => "https://www.reddit.com".to_owned(),
            SearchEngine::Wikipedia => {
                format!("https://{}.wikipedia.org", config.language_code())
            }
            SearchEngine::Google
            | SearchEngine::Bing
            | SearchEngine::GoogleImages
            | SearchEngine::Quora
            | SearchEngine::YouTube => "https://www.google.com".to_owned(),
        },
    };

    format!("{origin}{path}")
}

/// Rewrites `url` to go through `proxy`, with the original target
/// percent-encoded as the proxy's final query value.
pub(crate) fn proxied_url(proxy: &str, url: &str) -> String {
    format!("{proxy}{}", urlencoding::encode(url))
}

/// A suggestion-fetching client for one configured install.
///
/// Holds the throttle timestamp, so keep one client alive for the
/// lifetime of the search box instead of constructing per fetch.
#[derive(Debug)]
pub struct SuggestClient {
    http: reqwest::Client,
    config: SuggestConfig,
    last_reddit_request: Option<Instant>,
}

impl SuggestClient {
    /// Creates a client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestError::Config`] if the configuration is invalid
    /// or [`SuggestError::Http`] if the HTTP client cannot be built.
    pub fn new(config: SuggestConfig) -> Result<Self> {
        config.validate()?;
        let http = http::build_client(&config)?;
        Ok(Self {
            http,
            config,
            last_reddit_request: None,
        })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &SuggestConfig {
        &self.config
    }

    /// Swaps in a new configuration, rebuilding the HTTP client but
    /// keeping the throttle timestamp (settings changes must not grant
    /// a free extra Reddit request).
    ///
    /// # Errors
    ///
    /// Same as [`SuggestClient::new`]; on error the old configuration
    /// stays active.
    pub fn update_config(&mut self, config: SuggestConfig) -> Result<()> {
        config.validate()?;
        self.http = http::build_client(&config)?;
        self.config = config;
        Ok(())
    }

    /// Fetches suggestions for `query` from `engine`.
    ///
    /// One GET, no retry. Proxying (when configured) applies to every
    /// engine except Reddit, whose endpoint rejects proxied requests.
    ///
    /// # Errors
    ///
    /// - [`SuggestError::Throttled`] — Reddit asked again inside
    ///   [`REDDIT_MIN_INTERVAL`]; keep whatever is displayed.
    /// - [`SuggestError::Http`] — request construction, transport, or
    ///   a non-success status.
    /// - [`SuggestError::Parse`] — the body did not match the engine's
    ///   response shape.
    pub async fn fetch(&mut self, engine: SearchEngine, query: &str) -> Result<Vec<String>> {
        if engine == SearchEngine::Reddit {
            if let Some(last) = self.last_reddit_request {
                let elapsed = last.elapsed();
                if elapsed < REDDIT_MIN_INTERVAL {
                    let wait = REDDIT_MIN_INTERVAL - elapsed;
                    tracing::debug!(
                        wait_ms = wait.as_millis() as u64,
                        "Reddit fetch skipped inside minimum interval"
                    );
                    return Err(SuggestError::Throttled(format!(
                        "{}ms until next Reddit request",
                        wait.as_millis()
                    )));
                }
            }
            self.last_reddit_request = Some(Instant::now());
        }

        let mut url = suggest_url(engine, query, &self.config);
        if engine != SearchEngine::Reddit {
            if let Some(proxy) = &self.config.proxy {
                url = proxied_url(proxy, &url);
            }
        }

        tracing::trace!(engine = %engine, "suggestion request");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| SuggestError::Http(format!("{engine} suggestion request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SuggestError::Http(format!("{engine} suggestion HTTP error: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| SuggestError::Http(format!("{engine} response read failed: {e}")))?;

        tracing::trace!(bytes = body.len(), "suggestion response received");

        let suggestions = engines::parse(engine, &body)?;
        tracing::debug!(engine = %engine, count = suggestions.len(), "suggestions parsed");
        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClientHint;

    #[test]
    fn suggest_url_duckduckgo() {
        let config = SuggestConfig::default();
        assert_eq!(
            suggest_url(SearchEngine::DuckDuckGo, "rust", &config),
            "https://duckduckgo.com/ac/?q=rust&type=list"
        );
    }

    #[test]
    fn suggest_url_native_borrows_duckduckgo() {
        let config = SuggestConfig::default();
        assert_eq!(
            suggest_url(SearchEngine::Native, "rust", &config),
            "https://duckduckgo.com/ac/?q=rust&type=list"
        );
    }

    #[test]
    fn suggest_url_google_carries_client_hint() {
        let config = SuggestConfig {
            client: ClientHint::Chrome,
            ..Default::default()
        };
        assert_eq!(
            suggest_url(SearchEngine::Google, "rust", &config),
            "https://www.google.com/complete/search?client=chrome&q=rust"
        );
    }

    #[test]
    fn suggest_url_youtube_scopes_to_video() {
        let config = SuggestConfig::default();
        assert_eq!(
            suggest_url(SearchEngine::YouTube, "ferris", &config),
            "https://www.google.com/complete/search?client=firefox&ds=yt&q=ferris"
        );
    }

    #[test]
    fn suggest_url_engines_without_endpoint_borrow_googles() {
        let config = SuggestConfig::default();
        for engine in [
            SearchEngine::Bing,
            SearchEngine::GoogleImages,
            SearchEngine::Quora,
        ] {
            assert_eq!(
                suggest_url(engine, "q", &config),
                "https://www.google.com/complete/search?client=firefox&q=q"
            );
        }
    }

    #[test]
    fn suggest_url_brave_requests_rich_results() {
        let config = SuggestConfig::default();
        assert_eq!(
            suggest_url(SearchEngine::Brave, "paris", &config),
            "https://search.brave.com/api/suggest?q=paris&rich=true&source=web"
        );
    }

    #[test]
    fn suggest_url_reddit_limits_results() {
        let config = SuggestConfig::default();
        assert_eq!(
            suggest_url(SearchEngine::Reddit, "rust", &config),
            "https://www.reddit.com/search.json?q=rust&sort=relevance&limit=15"
        );
    }

    #[test]
    fn suggest_url_wikipedia_uses_language_host() {
        let config = SuggestConfig {
            language: "de-DE".into(),
            ..Default::default()
        };
        assert_eq!(
            suggest_url(SearchEngine::Wikipedia, "russell", &config),
            "https://de.wikipedia.org/w/api.php?action=opensearch&search=russell&format=json"
        );
    }

    #[test]
    fn suggest_url_encodes_query() {
        let config = SuggestConfig::default();
        let url = suggest_url(SearchEngine::DuckDuckGo, "fish & chips", &config);
        assert_eq!(
            url,
            "https://duckduckgo.com/ac/?q=fish%20%26%20chips&type=list"
        );
    }

    #[test]
    fn suggest_url_base_override_replaces_origin() {
        let config = SuggestConfig::default().with_base_url("http://127.0.0.1:3999/");
        assert_eq!(
            suggest_url(SearchEngine::Brave, "x", &config),
            "http://127.0.0.1:3999/api/suggest?q=x&rich=true&source=web"
        );
    }

    #[test]
    fn proxied_url_encodes_whole_target() {
        let url = proxied_url(
            "https://proxy.example/proxy?url=",
            "https://duckduckgo.com/ac/?q=rust&type=list",
        );
        assert_eq!(
            url,
            "https://proxy.example/proxy?url=https%3A%2F%2Fduckduckgo.com%2Fac%2F%3Fq%3Drust%26type%3Dlist"
        );
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = SuggestConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = SuggestClient::new(config).unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn update_config_keeps_old_config_on_error() {
        let mut client = SuggestClient::new(SuggestConfig::default()).expect("default config");
        let bad = SuggestConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        assert!(client.update_config(bad).is_err());
        assert_eq!(client.config().timeout_seconds, 5);
    }

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SuggestClient>();
    }
}
