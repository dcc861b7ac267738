//! Playlist store
//!
//! Owns the ordered track list and the current-track pointer.
//! The pointer caches a copy of the selected track and is resolved by
//! identity, so a replaced playlist validates it instead of leaving an
//! index that silently points at a different track.

use crate::types::{Direction, Track};
use std::collections::HashSet;

/// Pointer status after a playlist replacement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerStatus {
    /// Nothing was selected
    Unset,

    /// The selected track is still present, now at `index`
    Kept {
        /// New zero-based index of the selected track
        index: usize,
    },

    /// The selected track is gone from the new playlist
    Stale {
        /// Index the pointer held before the replacement
        last_index: usize,
    },
}

/// Ordered playlist with an identity-based pointer
///
/// ```text
///  tracks:   [A:1] [B:2] [C:3] [D:4]      (id:position)
///                         ^
///  pointer:  index 2, cached copy of C
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlaylistStore {
    /// Tracks in playlist order
    tracks: Vec<Track>,

    /// Zero-based index of the selected track, `None` when unset or stale
    current_index: Option<usize>,

    /// Copy of the selected track, kept even when it goes stale
    selected: Option<Track>,

    /// Most recent valid pointer position
    last_index: Option<usize>,
}

impl PlaylistStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the playlist
    ///
    /// Positions are recomputed 1..N, duplicate ids are dropped (first
    /// occurrence wins) and the pointer is re-validated by identity.
    pub fn set_playlist(&mut self, tracks: Vec<Track>) -> PointerStatus {
        let mut seen = HashSet::with_capacity(tracks.len());
        let before = tracks.len();
        self.tracks = tracks
            .into_iter()
            .filter(|track| seen.insert(track.id.clone()))
            .collect();

        if self.tracks.len() != before {
            tracing::debug!(
                dropped = before - self.tracks.len(),
                "Dropped duplicate track ids from playlist"
            );
        }

        self.renumber();

        let Some(selected_id) = self.selected.as_ref().map(|t| t.id.clone()) else {
            self.current_index = None;
            return PointerStatus::Unset;
        };

        match self.index_of(&selected_id) {
            Some(index) => {
                self.current_index = Some(index);
                self.last_index = Some(index);
                self.selected = Some(self.tracks[index].clone());
                PointerStatus::Kept { index }
            }
            None => {
                self.current_index = None;
                PointerStatus::Stale {
                    last_index: self.last_index.unwrap_or(0),
                }
            }
        }
    }

    /// Select the first track when nothing is selected yet
    pub fn init(&mut self) -> Option<&Track> {
        if self.current_index.is_none() && self.selected.is_none() {
            self.point_at(0);
        }
        self.current_track()
    }

    /// Track the pointer resolves to in the current playlist
    ///
    /// Returns `None` when nothing is selected, the playlist is empty or the
    /// selected identity is no longer present.
    pub fn current_track(&self) -> Option<&Track> {
        let selected = self.selected.as_ref()?;
        self.tracks.iter().find(|t| t.id == selected.id)
    }

    /// Cached selection, including a stale one
    pub fn selected(&self) -> Option<&Track> {
        self.selected.as_ref()
    }

    /// Identity of the cached selection
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_ref().map(|t| t.id.as_str())
    }

    /// Zero-based index of the selected track
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Most recent valid pointer position (survives a stale pointer)
    pub fn last_known_index(&self) -> Option<usize> {
        self.last_index
    }

    /// Whether the cached selection is missing from the playlist
    pub fn is_stale(&self) -> bool {
        self.selected.is_some() && self.current_index.is_none()
    }

    /// Move the pointer one step with wraparound
    ///
    /// No-op on an empty playlist. From an unset pointer `Next` selects the
    /// first track and `Previous` the last.
    pub fn advance(&mut self, direction: Direction) -> Option<&Track> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }

        let target = match (self.current_index, direction) {
            (Some(index), Direction::Next) => (index + 1) % len,
            (Some(0), Direction::Previous) => len - 1,
            (Some(index), Direction::Previous) => (index - 1).min(len - 1),
            (None, Direction::Next) => 0,
            (None, Direction::Previous) => len - 1,
        };

        self.point_at(target);
        self.current_track()
    }

    /// Point at `index`
    ///
    /// Out-of-range indices are ignored; callers check against [`len`](Self::len).
    pub fn select_at(&mut self, index: usize) -> Option<&Track> {
        if index >= self.tracks.len() {
            tracing::debug!(index, len = self.tracks.len(), "Ignoring out-of-range selection");
            return None;
        }
        self.point_at(index);
        self.current_track()
    }

    /// Forget the selection entirely
    pub fn clear_pointer(&mut self) {
        self.current_index = None;
        self.selected = None;
        self.last_index = None;
    }

    /// All tracks in order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Track at index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Index of the track with this identity
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// Whether a track with this identity is present
    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the playlist is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    fn point_at(&mut self, index: usize) {
        if let Some(track) = self.tracks.get(index) {
            self.selected = Some(track.clone());
            self.current_index = Some(index);
            self.last_index = Some(index);
        }
    }

    fn renumber(&mut self) {
        for (i, track) in self.tracks.iter_mut().enumerate() {
            track.position = i + 1;
        }
    }
}
