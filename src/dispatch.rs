//! Committed-query dispatch: hand the text to a browser or the OS.
//!
//! Every engine except Native opens its results URL in the default
//! browser. Native asks the operating system's web-search handler to run
//! the query with whatever default engine the user configured there; on
//! platforms without such a handler, or when the launch fails, it falls
//! back to a Google results page.

use crate::error::{Result, WispError};
use wisp_suggest::SearchEngine;

/// The results URL a commit opens for `engine`, before considering the
/// platform search handler. Native has no results URL of its own and
/// uses the Google fallback.
#[must_use]
pub fn search_url(engine: SearchEngine, query: &str, language: &str) -> String {
    engine
        .results_url(query, language)
        .unwrap_or_else(|| fallback_results_url(query))
}

/// Dispatches a committed query and returns the URI that was launched.
///
/// # Errors
///
/// Returns [`WispError::Launch`] when the browser launch fails. A failed
/// platform search handler is not an error: it falls through to the
/// browser fallback.
pub fn commit(engine: SearchEngine, query: &str, language: &str) -> Result<String> {
    if engine == SearchEngine::Native {
        if let Some(uri) = native_search_uri(query) {
            match open::that(&uri) {
                Ok(()) => {
                    tracing::debug!(%uri, "handed query to the platform search handler");
                    return Ok(uri);
                }
                Err(e) => {
                    tracing::debug!(error = %e, "platform search handler failed, falling back");
                }
            }
        }
    }
    let url = search_url(engine, query, language);
    open::that(&url).map_err(|e| WispError::Launch(format!("failed to open {url}: {e}")))?;
    tracing::debug!(%url, "opened results in the default browser");
    Ok(url)
}

/// Google results URL used when an engine has no results URL of its own.
fn fallback_results_url(query: &str) -> String {
    format!("https://www.google.com/search?q={}", urlencoding::encode(query))
}

/// The platform's web-search URI for `query`, where one exists.
#[cfg(target_os = "macos")]
fn native_search_uri(query: &str) -> Option<String> {
    Some(format!("x-web-search://?{}", urlencoding::encode(query)))
}

/// The platform's web-search URI for `query`, where one exists.
#[cfg(target_os = "windows")]
fn native_search_uri(query: &str) -> Option<String> {
    Some(format!("search:query={}", urlencoding::encode(query)))
}

/// No web-search handler on this platform; commits use the fallback URL.
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn native_search_uri(_query: &str) -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_uses_engine_template() {
        assert_eq!(
            search_url(SearchEngine::DuckDuckGo, "rust tui", "en"),
            "https://duckduckgo.com/?q=rust%20tui"
        );
        assert_eq!(
            search_url(SearchEngine::YouTube, "ferris", "en"),
            "https://www.youtube.com/results?search_query=ferris"
        );
    }

    #[test]
    fn native_search_url_falls_back_to_google() {
        assert_eq!(
            search_url(SearchEngine::Native, "rust & wasm", "en"),
            "https://www.google.com/search?q=rust%20%26%20wasm"
        );
    }

    #[test]
    fn wikipedia_search_url_uses_language() {
        let url = search_url(SearchEngine::Wikipedia, "Ada Lovelace", "fr-CA");
        assert!(url.starts_with("https://fr.wikipedia.org/"), "{url}");
    }

    #[test]
    #[cfg(target_os = "macos")]
    fn native_uri_is_web_search_scheme() {
        let uri = native_search_uri("hello world").expect("macOS has a handler");
        assert_eq!(uri, "x-web-search://?hello%20world");
    }

    #[test]
    #[cfg(target_os = "windows")]
    fn native_uri_is_search_scheme() {
        let uri = native_search_uri("hello world").expect("Windows has a handler");
        assert_eq!(uri, "search:query=hello%20world");
    }

    #[test]
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    fn native_uri_absent_elsewhere() {
        assert!(native_search_uri("anything").is_none());
    }
}
