//! Error types for the wisp-suggest crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. Query text never appears in error messages.

/// Errors that can occur while fetching search suggestions.
#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
    /// An HTTP request to a suggestion endpoint failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse a suggestion endpoint's JSON response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid suggestion configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The fetch was skipped because the engine's minimum request
    /// interval has not elapsed. Callers should keep whatever
    /// suggestions they already display.
    #[error("throttled: {0}")]
    Throttled(String),
}

/// Convenience type alias for wisp-suggest results.
pub type Result<T> = std::result::Result<T, SuggestError>;
