//! Playlist diff reconciler
//!
//! Compares an incoming playlist with the one being played and decides
//! whether the transport has to move before the replacement is committed.

use crate::types::Track;

/// Steps to take before committing a playlist replacement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcilePlan {
    /// Pause the transport
    pub pause: bool,

    /// Advance to the next track in the old playlist context
    pub advance_before_commit: bool,
}

impl ReconcilePlan {
    /// Whether the replacement can be committed without touching playback
    pub fn is_noop(&self) -> bool {
        !self.pause && !self.advance_before_commit
    }
}

/// Plan the transition from `old` to `new` while `current_id` is selected
///
/// An empty replacement only pauses. Advancing would load and play a
/// track from the playlist being discarded, only for the commit to clear
/// the pointer again.
/// A shorter replacement that drops the selected track pauses and
/// advances, so the pointer moves while the old index and page state are
/// still consistent.
pub fn plan(old: &[Track], new: &[Track], current_id: Option<&str>) -> ReconcilePlan {
    let removed_current = current_id.is_some_and(|id| {
        !new.is_empty()
            && new.len() < old.len()
            && old.iter().any(|t| t.id == id)
            && !new.iter().any(|t| t.id == id)
    });

    ReconcilePlan {
        pause: new.is_empty() || removed_current,
        advance_before_commit: removed_current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracks(ids: &[&str]) -> Vec<Track> {
        ids.iter()
            .map(|id| Track::new(*id, format!("/{}.mp3", id), *id))
            .collect()
    }

    #[test]
    fn unchanged_playlist_is_noop() {
        let old = tracks(&["a", "b"]);
        assert!(plan(&old, &old, Some("a")).is_noop());
    }

    #[test]
    fn empty_replacement_pauses() {
        let result = plan(&tracks(&["a", "b"]), &[], Some("a"));
        assert!(result.pause);
        assert!(!result.advance_before_commit);

        let result = plan(&[], &[], None);
        assert!(result.pause);
        assert!(!result.advance_before_commit);
    }

    #[test]
    fn removing_current_track_advances() {
        let result = plan(&tracks(&["a", "b", "c"]), &tracks(&["a", "c"]), Some("b"));
        assert_eq!(
            result,
            ReconcilePlan {
                pause: true,
                advance_before_commit: true,
            }
        );
    }

    #[test]
    fn removing_other_track_is_noop() {
        let result = plan(&tracks(&["a", "b", "c"]), &tracks(&["a", "b"]), Some("b"));
        assert!(result.is_noop());
    }

    #[test]
    fn same_length_replacement_is_not_a_removal() {
        let result = plan(&tracks(&["a", "b"]), &tracks(&["a", "x"]), Some("b"));
        assert!(result.is_noop());
    }

    #[test]
    fn nothing_selected_is_noop() {
        let result = plan(&tracks(&["a", "b"]), &tracks(&["a"]), None);
        assert!(result.is_noop());
    }
}
