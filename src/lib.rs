//! Wisp: a terminal omnibar with live web-search suggestions.
//!
//! Type a query, pick a suggestion, and the result page opens in the
//! default browser.
//!
//! # Architecture
//!
//! The app is a thin terminal shell around two pieces:
//! - **Omnibar**: the input/selection state machine and its popup,
//!   driven by crossterm events and drawn with `ratatui`
//! - **Suggestions**: fetched per keystroke by [`wisp_suggest`] on a
//!   background task, with stale responses discarded by generation
//!
//! Settings (engine, language, proxy, consent) persist as TOML in the
//! platform config directory.

pub mod dispatch;
pub mod error;
pub mod i18n;
pub mod omnibar;
pub mod settings;
pub mod wisp_dirs;

pub use error::{Result, WispError};
pub use settings::Settings;
pub use wisp_suggest::{ClientHint, SearchEngine, SuggestConfig, SuggestError};
