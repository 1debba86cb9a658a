//! Centralized application directory paths for wisp.
//!
//! Provides a single source of truth for all filesystem paths used by the app.
//! Uses the [`dirs`] crate for platform-appropriate directory resolution, which
//! is sandbox-transparent on macOS (returns container-relative paths under App
//! Sandbox automatically).
//!
//! # Directory Layout
//!
//! | Purpose | macOS (sandbox) | Linux |
//! |---------|----------------|-------|
//! | Config | `~/Library/Application Support/wisp/` | `~/.config/wisp/` |
//! | App data | `~/Library/Application Support/wisp/` | `~/.local/share/wisp/` |
//!
//! # Environment Overrides
//!
//! All paths can be overridden for testing or custom deployments:
//! - `WISP_CONFIG_DIR` — overrides [`config_dir`]
//! - `WISP_DATA_DIR` — overrides [`data_dir`]

use std::path::PathBuf;

/// Application config directory.
///
/// Used for `settings.toml`.
///
/// Resolves to `dirs::config_dir()/wisp/` by default. Override with
/// the `WISP_CONFIG_DIR` environment variable.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("WISP_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("wisp"))
        .unwrap_or_else(|| PathBuf::from("/tmp/wisp-config"))
}

/// Application data root directory.
///
/// Used for persistent runtime output, currently just log files.
///
/// Resolves to `dirs::data_dir()/wisp/` by default. Override with
/// the `WISP_DATA_DIR` environment variable.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("WISP_DATA_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join("wisp"))
        .unwrap_or_else(|| PathBuf::from("/tmp/wisp-data"))
}

/// Log file directory (`data_dir()/logs/`).
///
/// The terminal UI owns stdout while it runs, so the binary writes its
/// tracing output to rolling files under this directory.
#[must_use]
pub fn logs_dir() -> PathBuf {
    data_dir().join("logs")
}

/// Settings file path (`config_dir()/settings.toml`).
#[must_use]
pub fn settings_file() -> PathBuf {
    config_dir().join("settings.toml")
}
