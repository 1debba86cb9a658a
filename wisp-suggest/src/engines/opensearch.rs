//! OpenSearch suggestion pair parsing.
//!
//! Google's completion endpoint, DuckDuckGo's `ac` endpoint, and
//! Wikipedia's `action=opensearch` API all answer with the same shape:
//! a JSON array whose first element echoes the query and whose second
//! is the list of completions, `["que", ["query", "queen", ...]]`.
//! Trailing elements (descriptions, URLs) vary per engine and are
//! ignored.

use crate::error::{Result, SuggestError};
use serde_json::Value;

/// Parse an OpenSearch suggestion pair into the completion list.
///
/// Non-string entries are skipped rather than failing the whole
/// response; some endpoints pad the list with metadata objects.
pub(crate) fn parse(body: &str) -> Result<Vec<String>> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| SuggestError::Parse(format!("invalid suggestion JSON: {e}")))?;

    let items = value
        .get(1)
        .and_then(Value::as_array)
        .ok_or_else(|| SuggestError::Parse("expected [query, [suggestions]] pair".into()))?;

    Ok(items
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_owned)
        .collect())
}
