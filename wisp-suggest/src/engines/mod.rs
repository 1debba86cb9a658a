//! Per-engine response parsing.
//!
//! Each module turns one endpoint's JSON response shape into a flat
//! list of suggestion strings. Most engines speak the OpenSearch pair
//! format; Brave and Reddit have shapes of their own.

pub mod brave;
pub mod opensearch;
pub mod reddit;

use crate::error::Result;
use crate::types::SearchEngine;

/// Parse `body` according to the response shape `engine` speaks.
pub(crate) fn parse(engine: SearchEngine, body: &str) -> Result<Vec<String>> {
    match engine {
        SearchEngine::Brave => brave::parse(body),
        SearchEngine::Reddit => reddit::parse(body),
        _ => opensearch::parse(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_uses_opensearch_for_borrowed_endpoints() {
        let body = r#"["rust", ["rust lang", "rust book"]]"#;
        for engine in [
            SearchEngine::Native,
            SearchEngine::Google,
            SearchEngine::DuckDuckGo,
            SearchEngine::Bing,
            SearchEngine::YouTube,
            SearchEngine::GoogleImages,
            SearchEngine::Wikipedia,
            SearchEngine::Quora,
        ] {
            let parsed = parse(engine, body).expect("list shape should parse");
            assert_eq!(parsed, vec!["rust lang", "rust book"]);
        }
    }

    #[test]
    fn dispatch_routes_brave_to_rich_parser() {
        let body = r#"["ro", [{"q": "rome", "is_entity": false}]]"#;
        let parsed = parse(SearchEngine::Brave, body).expect("brave shape should parse");
        assert_eq!(parsed, vec!["rome"]);
    }

    #[test]
    fn dispatch_routes_reddit_to_listing_parser() {
        let body = r#"{"data": {"children": []}}"#;
        let parsed = parse(SearchEngine::Reddit, body).expect("listing shape should parse");
        assert!(parsed.is_empty());
    }
}
