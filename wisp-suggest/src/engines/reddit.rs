//! Reddit post-search listing parsing.
//!
//! Reddit's `search.json` endpoint answers with a listing:
//! `{"data": {"children": [{"data": {"title": ..., "subreddit_name_prefixed": ...}}, ...]}}`.
//! Each post becomes one suggestion, `"<title> (r/<subreddit>)"`, so
//! the dropdown names the community alongside the post.

use crate::error::{Result, SuggestError};
use serde_json::Value;

/// Parse a Reddit search listing into suggestion strings.
///
/// Posts without a title are skipped; a post without a subreddit
/// renders its bare title.
pub(crate) fn parse(body: &str) -> Result<Vec<String>> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| SuggestError::Parse(format!("invalid suggestion JSON: {e}")))?;

    let children = value
        .pointer("/data/children")
        .and_then(Value::as_array)
        .ok_or_else(|| SuggestError::Parse("expected listing with data.children".into()))?;

    let mut suggestions = Vec::with_capacity(children.len());
    for child in children {
        let post = child.get("data");
        let Some(title) = post
            .and_then(|p| p.get("title"))
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
        else {
            continue;
        };
        match post
            .and_then(|p| p.get("subreddit_name_prefixed"))
            .and_then(Value::as_str)
        {
            Some(subreddit) => suggestions.push(format!("{title} ({subreddit})")),
            None => suggestions.push(title.to_owned()),
        }
    }
    Ok(suggestions)
}
