//! Core types for suggestion engines and their result URLs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Search engines wisp can ask for suggestions and dispatch queries to.
///
/// The set is closed: every variant carries its own suggestion endpoint
/// (or borrows Google's) and its own results URL, so adding an engine is
/// a compile-time change, not a configuration one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchEngine {
    /// The platform's own web-search handler; suggestions come from
    /// DuckDuckGo, dispatch goes to the OS.
    #[serde(rename = "native")]
    Native,
    /// Google — richest suggestions, needs a client hint.
    #[serde(rename = "google")]
    Google,
    /// DuckDuckGo — privacy-aligned, plain list endpoint.
    #[serde(rename = "duckduckgo")]
    DuckDuckGo,
    /// Bing — no public suggestion endpoint, borrows Google's.
    #[serde(rename = "bing")]
    Bing,
    /// Brave Search — rich suggestions with entity annotations.
    #[serde(rename = "brave")]
    Brave,
    /// YouTube — Google's endpoint scoped to video search.
    #[serde(rename = "youtube")]
    YouTube,
    /// Google Images — borrows Google's endpoint, image results page.
    #[serde(rename = "google-images")]
    GoogleImages,
    /// Reddit — post search, rate-limited upstream.
    #[serde(rename = "reddit")]
    Reddit,
    /// Wikipedia — language-specific OpenSearch endpoint.
    #[serde(rename = "wikipedia")]
    Wikipedia,
    /// Quora — no public suggestion endpoint, borrows Google's.
    #[serde(rename = "quora")]
    Quora,
}

impl SearchEngine {
    /// Returns the human-readable name of this engine.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Native => "Native",
            Self::Google => "Google",
            Self::DuckDuckGo => "DuckDuckGo",
            Self::Bing => "Bing",
            Self::Brave => "Brave",
            Self::YouTube => "YouTube",
            Self::GoogleImages => "Google Images",
            Self::Reddit => "Reddit",
            Self::Wikipedia => "Wikipedia",
            Self::Quora => "Quora",
        }
    }

    /// Returns the stable settings key for this engine, as written to
    /// the settings file.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Google => "google",
            Self::DuckDuckGo => "duckduckgo",
            Self::Bing => "bing",
            Self::Brave => "brave",
            Self::YouTube => "youtube",
            Self::GoogleImages => "google-images",
            Self::Reddit => "reddit",
            Self::Wikipedia => "wikipedia",
            Self::Quora => "quora",
        }
    }

    /// Returns all engine variants in selector order.
    pub fn all() -> &'static [SearchEngine] {
        &[
            Self::Native,
            Self::Google,
            Self::DuckDuckGo,
            Self::Bing,
            Self::Brave,
            Self::YouTube,
            Self::GoogleImages,
            Self::Reddit,
            Self::Wikipedia,
            Self::Quora,
        ]
    }

    /// Builds the results-page URL for `query`, or `None` for
    /// [`SearchEngine::Native`], whose dispatch goes through the OS
    /// handler instead of a URL.
    ///
    /// `language` only affects Wikipedia, which searches the
    /// language-specific wiki.
    pub fn results_url(&self, query: &str, language: &str) -> Option<String> {
        let q = urlencoding::encode(query);
        let url = match self {
            Self::Native => return None,
            Self::Google => format!("https://www.google.com/search?q={q}"),
            Self::DuckDuckGo => format!("https://duckduckgo.com/?q={q}"),
            Self::Bing => format!("https://bing.com/?q={q}"),
            Self::Brave => format!("https://search.brave.com/search?q={q}"),
            Self::YouTube => format!("https://www.youtube.com/results?search_query={q}"),
            Self::GoogleImages => format!("https://www.google.com/search?tbm=isch&q={q}"),
            Self::Reddit => format!("https://www.reddit.com/search/?q={q}"),
            Self::Wikipedia => {
                let lang = language_code(language);
                format!("https://{lang}.wikipedia.org/wiki/Special:Search?search={q}")
            }
            Self::Quora => format!("https://www.quora.com/search?q={q}"),
        };
        Some(url)
    }
}

impl fmt::Display for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchEngine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        SearchEngine::all()
            .iter()
            .copied()
            .find(|engine| engine.key() == key)
            .ok_or_else(|| format!("unknown engine '{s}'"))
    }
}

/// Browser identity sent to Google's completion endpoint via its
/// `client` parameter. The endpoint shapes its response per client;
/// `firefox` yields the plain JSON pair every client here understands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientHint {
    #[default]
    #[serde(rename = "firefox")]
    Firefox,
    #[serde(rename = "opera")]
    Opera,
    #[serde(rename = "chrome")]
    Chrome,
    #[serde(rename = "safari")]
    Safari,
}

impl ClientHint {
    /// Returns the value of the endpoint's `client` query parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Firefox => "firefox",
            Self::Opera => "opera",
            Self::Chrome => "chrome",
            Self::Safari => "safari",
        }
    }
}

/// Normalises a configured language to the two-letter code Wikipedia's
/// hosts expect. Blank input falls back to English.
pub fn language_code(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "en".to_string();
    }
    trimmed.chars().take(2).collect::<String>().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_display_matches_name() {
        assert_eq!(SearchEngine::DuckDuckGo.to_string(), "DuckDuckGo");
        assert_eq!(SearchEngine::GoogleImages.to_string(), "Google Images");
        assert_eq!(SearchEngine::Native.to_string(), "Native");
    }

    #[test]
    fn engine_all_covers_every_variant() {
        let all = SearchEngine::all();
        assert_eq!(all.len(), 10);
        assert!(all.contains(&SearchEngine::Native));
        assert!(all.contains(&SearchEngine::Quora));
    }

    #[test]
    fn engine_keys_are_unique() {
        use std::collections::HashSet;
        let keys: HashSet<_> = SearchEngine::all().iter().map(|e| e.key()).collect();
        assert_eq!(keys.len(), SearchEngine::all().len());
    }

    #[test]
    fn engine_from_str_round_trips_keys() {
        for engine in SearchEngine::all() {
            let parsed: SearchEngine = engine.key().parse().expect("key should parse");
            assert_eq!(parsed, *engine);
        }
    }

    #[test]
    fn engine_from_str_rejects_unknown() {
        let err = "altavista".parse::<SearchEngine>().unwrap_err();
        assert!(err.contains("altavista"));
    }

    #[test]
    fn engine_from_str_is_case_insensitive() {
        let parsed: SearchEngine = "Google-Images".parse().expect("should parse");
        assert_eq!(parsed, SearchEngine::GoogleImages);
    }

    #[test]
    fn engine_serde_uses_stable_keys() {
        let json = serde_json::to_string(&SearchEngine::GoogleImages).expect("serialize");
        assert_eq!(json, "\"google-images\"");
        let decoded: SearchEngine = serde_json::from_str("\"reddit\"").expect("deserialize");
        assert_eq!(decoded, SearchEngine::Reddit);
    }

    #[test]
    fn results_url_encodes_query() {
        let url = SearchEngine::Google
            .results_url("rust async & await", "en")
            .expect("google has a results URL");
        assert_eq!(
            url,
            "https://www.google.com/search?q=rust%20async%20%26%20await"
        );
    }

    #[test]
    fn results_url_image_search_keeps_mode_param() {
        let url = SearchEngine::GoogleImages
            .results_url("ferris", "en")
            .expect("image search has a results URL");
        assert_eq!(url, "https://www.google.com/search?tbm=isch&q=ferris");
    }

    #[test]
    fn results_url_wikipedia_uses_language() {
        let url = SearchEngine::Wikipedia
            .results_url("Bertrand Russell", "de-DE")
            .expect("wikipedia has a results URL");
        assert!(url.starts_with("https://de.wikipedia.org/wiki/Special:Search?search="));
    }

    #[test]
    fn results_url_native_is_none() {
        assert!(SearchEngine::Native.results_url("anything", "en").is_none());
    }

    #[test]
    fn client_hint_defaults_to_firefox() {
        assert_eq!(ClientHint::default(), ClientHint::Firefox);
        assert_eq!(ClientHint::default().as_param(), "firefox");
    }

    #[test]
    fn language_code_truncates_and_lowercases() {
        assert_eq!(language_code("en-US"), "en");
        assert_eq!(language_code("DE"), "de");
        assert_eq!(language_code("pt-BR"), "pt");
    }

    #[test]
    fn language_code_blank_falls_back_to_english() {
        assert_eq!(language_code(""), "en");
        assert_eq!(language_code("   "), "en");
    }
}
