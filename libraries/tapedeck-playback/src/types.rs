//! Core types for playlist playback

use serde::{Deserialize, Serialize};

/// Elapsed playback (seconds) after which "previous" restarts the current track
pub const RESTART_THRESHOLD_SECS: f64 = 2.0;

/// Duration placeholder used while a new source loads
///
/// Keeps duration-based progress displays away from a division by zero.
pub const RESET_DURATION_SECS: f64 = 0.01;

/// A single playable item
///
/// `id` is the identity used for uniqueness and pointer lookups.
/// `position` is owned by the playlist store and rewritten on every
/// assignment, so any value supplied by the host is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: String,

    /// Source the media surface loads
    pub link: String,

    /// Display title
    pub title: String,

    /// 1-based position in the playlist
    #[serde(default)]
    pub position: usize,
}

impl Track {
    /// Create a track with an explicit identity
    pub fn new(id: impl Into<String>, link: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            link: link.into(),
            title: title.into(),
            position: 0,
        }
    }

    /// Create a track identified by its link
    pub fn from_link(link: impl Into<String>, title: impl Into<String>) -> Self {
        let link = link.into();
        Self::new(link.clone(), link, title)
    }
}

/// Navigation direction through the playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Towards the end, wrapping to the first track
    Next,

    /// Towards the start, wrapping to the last track
    Previous,
}

/// Player lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerState {
    /// Nothing loaded
    #[default]
    Idle,

    /// A source was handed to the media surface and is loading
    Loading,

    /// The media surface can play the current source
    Ready,

    /// The current source failed to load
    Error,
}

/// Transport-level playback state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Elapsed time in seconds
    pub current_time: f64,

    /// Source duration in seconds
    pub duration: f64,

    /// Sticky load failure flag
    pub is_loading_error: bool,

    /// Whether the surface is playing
    pub is_playing: bool,
}

impl PlaybackState {
    /// Reset timing for a new source
    pub fn reset_times(&mut self) {
        self.current_time = 0.0;
        self.duration = RESET_DURATION_SECS;
    }

    /// True once playback has run past [`RESTART_THRESHOLD_SECS`]
    pub fn has_started_past_threshold(&self) -> bool {
        self.current_time > RESTART_THRESHOLD_SECS
    }

    /// Playback progress in `0.0..=1.0`
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 || !self.duration.is_finite() {
            return 0.0;
        }
        (self.current_time / self.duration).clamp(0.0, 1.0)
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_time: 0.0,
            duration: RESET_DURATION_SECS,
            is_loading_error: false,
            is_playing: false,
        }
    }
}

/// Events reported by the media surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaEvent {
    /// Enough data is buffered to start playback
    CanPlay,

    /// The surface started loading a source
    LoadStart,

    /// Playback stalled waiting for data
    Waiting,

    /// The source failed to load
    Error {
        /// Surface-provided description
        message: Option<String>,
    },

    /// Playback reached the end of the source
    Ended,

    /// Elapsed time changed (seconds)
    TimeUpdate(f64),

    /// Duration became known (seconds)
    DurationChange(f64),

    /// Playback started or resumed
    Playing,

    /// Playback paused
    Pause,
}

/// Conditions the player recovers from locally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackIssue {
    /// The current source failed to load; cleared by a new load or retry
    LoadFailure,

    /// There are no tracks to navigate
    EmptyPlaylist,

    /// The pointer references a track that is no longer in the playlist
    StalePointer,
}
