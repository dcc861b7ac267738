//! Error recovery policy
//!
//! Decides what the retry affordance does after a load failure and what
//! "previous" means at a given elapsed time.

use crate::types::RESTART_THRESHOLD_SECS;
use serde::{Deserialize, Serialize};

/// What retrying after a load failure does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetryPolicy {
    /// Skip the failed track and load the next one
    #[default]
    AdvanceToNext,

    /// Reload the failed track from its last known position in the playlist
    RetrySameTrack,
}

/// Outcome of the retry-or-play intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// No failure pending: ordinary play/pause toggle
    TogglePlayback,

    /// Advance to the next track
    Advance,

    /// Select and reload the track at `index`
    Reselect {
        /// Zero-based playlist index
        index: usize,
    },

    /// Nothing left to load: clear the failure and go idle
    Reset,
}

/// Meaning of "previous" at the current elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviousAction {
    /// Move the pointer back one track
    MoveBack,

    /// Restart the current track from the beginning
    Restart,
}

/// Decide what retry-or-play does
///
/// Total: with a failure pending the result always loads something or
/// leaves the error state.
pub fn decide_retry(
    policy: RetryPolicy,
    has_error: bool,
    last_index: Option<usize>,
    len: usize,
) -> RecoveryAction {
    if !has_error {
        return RecoveryAction::TogglePlayback;
    }
    if len == 0 {
        return RecoveryAction::Reset;
    }

    match policy {
        RetryPolicy::AdvanceToNext => RecoveryAction::Advance,
        RetryPolicy::RetrySameTrack => RecoveryAction::Reselect {
            index: last_index.filter(|index| *index < len).unwrap_or(0),
        },
    }
}

/// Decide what "previous" does after `elapsed` seconds of playback
pub fn decide_previous(elapsed: f64) -> PreviousAction {
    if elapsed > RESTART_THRESHOLD_SECS {
        PreviousAction::Restart
    } else {
        PreviousAction::MoveBack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_error_toggles() {
        for policy in [RetryPolicy::AdvanceToNext, RetryPolicy::RetrySameTrack] {
            assert_eq!(
                decide_retry(policy, false, Some(1), 3),
                RecoveryAction::TogglePlayback
            );
        }
    }

    #[test]
    fn advance_policy() {
        assert_eq!(
            decide_retry(RetryPolicy::AdvanceToNext, true, Some(1), 3),
            RecoveryAction::Advance
        );
    }

    #[test]
    fn retry_same_track_uses_last_index() {
        assert_eq!(
            decide_retry(RetryPolicy::RetrySameTrack, true, Some(2), 3),
            RecoveryAction::Reselect { index: 2 }
        );
    }

    #[test]
    fn retry_same_track_falls_back_to_first() {
        assert_eq!(
            decide_retry(RetryPolicy::RetrySameTrack, true, None, 3),
            RecoveryAction::Reselect { index: 0 }
        );
        assert_eq!(
            decide_retry(RetryPolicy::RetrySameTrack, true, Some(7), 3),
            RecoveryAction::Reselect { index: 0 }
        );
    }

    #[test]
    fn empty_playlist_resets() {
        assert_eq!(
            decide_retry(RetryPolicy::AdvanceToNext, true, Some(0), 0),
            RecoveryAction::Reset
        );
    }

    #[test]
    fn previous_threshold() {
        assert_eq!(decide_previous(0.0), PreviousAction::MoveBack);
        assert_eq!(decide_previous(2.0), PreviousAction::MoveBack);
        assert_eq!(decide_previous(2.5), PreviousAction::Restart);
    }

    #[test]
    fn policy_serializes_snake_case() {
        let json = serde_json::to_string(&RetryPolicy::RetrySameTrack).unwrap();
        assert_eq!(json, "\"retry_same_track\"");
    }
}
