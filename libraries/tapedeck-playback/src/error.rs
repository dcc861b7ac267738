//! Error types for playlist playback

use thiserror::Error;

/// Playback errors
///
/// Domain conditions such as a failed media load or an empty playlist are
/// not errors; they are recovered inside the player (see [`crate::PlaybackIssue`]).
#[derive(Debug, Error)]
pub enum PlayerError {
    /// A command sent to the media surface failed
    #[error("Media surface error: {0}")]
    Surface(String),

    /// Configuration could not be built or failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Playlist JSON could not be parsed
    #[error("Playlist JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The driver task is gone
    #[error("Player driver channel closed")]
    ChannelClosed,
}

impl PlayerError {
    /// Create a media surface error
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<config::ConfigError> for PlayerError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlayerError>;
