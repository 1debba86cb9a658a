//! Shared HTTP client construction for suggestion requests.

use crate::config::SuggestConfig;
use crate::error::SuggestError;
use std::time::Duration;

/// User-Agent sent when the config does not override it.
const DEFAULT_USER_AGENT: &str = concat!("wisp/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] configured for suggestion endpoints.
///
/// The client has the config's timeout and User-Agent; suggestion
/// endpoints are plain GET + JSON, so no cookie store or redirect
/// tuning is needed.
///
/// # Errors
///
/// Returns [`SuggestError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SuggestConfig) -> Result<reqwest::Client, SuggestError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => DEFAULT_USER_AGENT.to_owned(),
    };

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .build()
        .map_err(|e| SuggestError::Http(format!("failed to build HTTP client: {e}")))
}
