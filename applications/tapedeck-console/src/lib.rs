//! Tapedeck console host
//!
//! Drives a [`tapedeck_playback::PlaylistPlayer`] from stdin lines with a
//! simulated media surface. Useful for exercising navigation, pagination
//! and recovery without an audio stack.

pub mod commands;
pub mod surface;

use anyhow::Context;
use std::path::Path;
use tapedeck_playback::{PlayerEvent, Track};

/// Read a playlist JSON file (an array of tracks)
pub fn load_playlist(path: &Path) -> anyhow::Result<Vec<Track>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read playlist {}", path.display()))?;
    let tracks: Vec<Track> = serde_json::from_str(&json)
        .with_context(|| format!("Invalid playlist JSON in {}", path.display()))?;

    tracing::info!("Loaded {} tracks from {}", tracks.len(), path.display());
    Ok(tracks)
}

/// One-line description of a player event
pub fn describe(event: &PlayerEvent) -> String {
    match event {
        PlayerEvent::PlaylistChanged { length } => format!("playlist: {} tracks", length),
        PlayerEvent::TrackChanged { index, track } => {
            format!("track #{}: {} ({})", index + 1, track.title, track.link)
        }
        PlayerEvent::StateChanged { state } => format!("state: {:?}", state),
        PlayerEvent::PageChanged { page_index } => format!("page: {}", page_index + 1),
        PlayerEvent::PlaylistCleared => "clear playlist requested".to_string(),
        PlayerEvent::RemoveRequested { id } => format!("remove requested: {}", id),
        PlayerEvent::LoadFailed { track, message } => format!(
            "load failed: {} ({})",
            track.as_ref().map(|t| t.title.as_str()).unwrap_or("<none>"),
            message.as_deref().unwrap_or("no details")
        ),
    }
}
