//! Error types for the wisp application.

/// Top-level error type for the omnibar application.
#[derive(Debug, thiserror::Error)]
pub enum WispError {
    /// Settings load, save, or validation error.
    #[error("settings error: {0}")]
    Settings(String),

    /// Launching the browser or the OS search handler failed.
    #[error("launch error: {0}")]
    Launch(String),

    /// Channel send/receive error.
    #[error("channel error: {0}")]
    Channel(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, WispError>;
