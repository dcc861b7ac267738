//! Player events
//!
//! Outbound notifications for the host. The player queues them while it
//! handles an intent or media event; the host drains them once per turn.

use crate::types::{PlayerState, Track};
use serde::{Deserialize, Serialize};

/// Events emitted by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Playlist was replaced
    PlaylistChanged {
        /// New playlist length
        length: usize,
    },

    /// Pointer moved to a different track (or the same track was reselected)
    TrackChanged {
        /// Zero-based index of the new track
        index: usize,
        /// The new current track
        track: Track,
    },

    /// Lifecycle state changed
    StateChanged {
        /// The new state
        state: PlayerState,
    },

    /// Visible playlist page changed
    PageChanged {
        /// Zero-based page now visible
        page_index: usize,
    },

    /// The user asked to clear the playlist
    PlaylistCleared,

    /// The user asked to remove an entry
    RemoveRequested {
        /// Identity of the entry
        id: String,
    },

    /// The current source failed to load
    LoadFailed {
        /// Track that was selected when the failure was reported
        track: Option<Track>,
        /// Surface-provided description
        message: Option<String>,
    },
}

impl PlayerEvent {
    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PlaylistChanged { .. } => "playlist_changed",
            Self::TrackChanged { .. } => "track_changed",
            Self::StateChanged { .. } => "state_changed",
            Self::PageChanged { .. } => "page_changed",
            Self::PlaylistCleared => "playlist_cleared",
            Self::RemoveRequested { .. } => "remove_requested",
            Self::LoadFailed { .. } => "load_failed",
        }
    }
}
