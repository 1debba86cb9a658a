//! Brave rich-suggestion parsing.
//!
//! Brave's suggest API with `rich=true` answers with the familiar
//! `[query, [...]]` pair, but the completions are objects:
//! `{"q": "...", "is_entity": bool, "name": "...", "category": "..."}`.
//! Entities (people, places, works) render with their name and
//! category so the dropdown can show what the completion refers to.

use crate::error::{Result, SuggestError};
use serde_json::Value;

/// Label used when an entity suggestion carries no category.
const NO_CATEGORY: &str = "No category";

/// Parse a Brave rich-suggestion response.
///
/// Entities render as `"<q> - <name> (<category>)"`; plain completions
/// render as their query text. Items that are bare strings are taken
/// as-is, and items missing a usable query text are skipped.
pub(crate) fn parse(body: &str) -> Result<Vec<String>> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| SuggestError::Parse(format!("invalid suggestion JSON: {e}")))?;

    let items = value
        .get(1)
        .and_then(Value::as_array)
        .ok_or_else(|| SuggestError::Parse("expected [query, [suggestions]] pair".into()))?;

    let mut suggestions = Vec::with_capacity(items.len());
    for item in items {
        if let Some(text) = item.as_str() {
            suggestions.push(text.to_owned());
            continue;
        }
        let Some(q) = item.get("q").and_then(Value::as_str) else {
            continue;
        };
        let is_entity = item
            .get("is_entity")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        match item.get("name").and_then(Value::as_str) {
            Some(name) if is_entity => {
                let category = item
                    .get("category")
                    .and_then(Value::as_str)
                    .filter(|c| !c.is_empty())
                    .unwrap_or(NO_CATEGORY);
                suggestions.push(format!("{q} - {name} ({category})"));
            }
            _ => suggestions.push(q.to_owned()),
        }
    }
    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_BRAVE_BODY: &str = r#"[
        "par",
        [
            {"q": "paris", "is_entity": true, "name": "Paris", "category": "City",
             "desc": "Capital of France", "img": "https://imgs.search.brave.com/x.png"},
            {"q": "paris weather", "is_entity": false},
            {"q": "parity", "is_entity": false}
        ]
    ]"#;

    #[test]
    fn parse_formats_entities_and_plain_completions() {
        let suggestions = parse(MOCK_BRAVE_BODY).expect("should parse");
        assert_eq!(
            suggestions,
            vec!["paris - Paris (City)", "paris weather", "parity"]
        );
    }

    #[test]
    fn parse_entity_without_category_gets_placeholder() {
        let body = r#"["tol", [{"q": "tolkien", "is_entity": true, "name": "J. R. R. Tolkien"}]]"#;
        let suggestions = parse(body).expect("should parse");
        assert_eq!(suggestions, vec!["tolkien - J. R. R. Tolkien (No category)"]);
    }

    #[test]
    fn parse_entity_with_empty_category_gets_placeholder() {
        let body =
            r#"["x", [{"q": "x", "is_entity": true, "name": "X", "category": ""}]]"#;
        let suggestions = parse(body).expect("should parse");
        assert_eq!(suggestions, vec!["x - X (No category)"]);
    }

    #[test]
    fn parse_entity_without_name_falls_back_to_query_text() {
        let body = r#"["q", [{"q": "quark", "is_entity": true}]]"#;
        let suggestions = parse(body).expect("should parse");
        assert_eq!(suggestions, vec!["quark"]);
    }

    #[test]
    fn parse_accepts_bare_string_items() {
        let body = r#"["r", ["rust", {"q": "ruby", "is_entity": false}]]"#;
        let suggestions = parse(body).expect("should parse");
        assert_eq!(suggestions, vec!["rust", "ruby"]);
    }

    #[test]
    fn parse_skips_items_without_query_text() {
        let body = r#"["r", [{"is_entity": true, "name": "Nameless"}, {"q": "real"}]]"#;
        let suggestions = parse(body).expect("should parse");
        assert_eq!(suggestions, vec!["real"]);
    }

    #[test]
    fn parse_rejects_missing_pair() {
        let err = parse(r#"{"suggestions": []}"#).unwrap_err();
        assert!(err.to_string().contains("pair"));
    }
}
