//! Shared playback primitives
//!
//! [`Transport`] owns the media surface and the transport-level state
//! (time, duration, playing, load error, volume). Both player variants
//! compose it and expose the [`PlayerControls`] capability.

use crate::{
    error::Result,
    surface::MediaSurface,
    types::{MediaEvent, PlaybackState, RESET_DURATION_SECS, RESTART_THRESHOLD_SECS},
    volume::Volume,
};

/// Capability shared by every player variant
pub trait PlayerControls {
    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self) -> Result<()>;

    /// Play when paused, pause when playing
    fn toggle_play(&mut self) -> Result<()>;

    /// Feed an event reported by the media surface
    fn handle_media_event(&mut self, event: MediaEvent) -> Result<()>;

    /// Transport-level state
    fn playback(&self) -> &PlaybackState;

    /// Poll the surface for elapsed time (seconds)
    fn elapsed(&mut self) -> f64;

    /// Whether playback has run past the restart threshold
    fn has_started_past_threshold(&mut self) -> bool {
        self.elapsed() > RESTART_THRESHOLD_SECS
    }
}

/// Media surface handle plus transport state
pub struct Transport {
    surface: Box<dyn MediaSurface>,
    playback: PlaybackState,
    volume: Volume,
}

impl Transport {
    /// Wrap a media surface
    pub fn new(surface: Box<dyn MediaSurface>, volume_level: u8) -> Self {
        Self {
            surface,
            playback: PlaybackState::default(),
            volume: Volume::new(volume_level),
        }
    }

    /// Push the volume and mute state to the surface
    pub fn sync_volume(&mut self) -> Result<()> {
        self.surface.set_volume(self.volume.gain())?;
        self.surface.set_muted(self.volume.is_muted())
    }

    /// Start or resume playback
    pub fn play(&mut self) -> Result<()> {
        self.surface.play()?;
        self.playback.is_playing = true;
        Ok(())
    }

    /// Pause playback
    pub fn pause(&mut self) -> Result<()> {
        self.surface.pause()?;
        self.playback.is_playing = false;
        Ok(())
    }

    /// Play when paused, pause when playing
    pub fn toggle(&mut self) -> Result<()> {
        if self.playback.is_playing {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Hand a source to the surface
    ///
    /// Resets timing and clears a pending load failure; the new source gets
    /// its own chance to load.
    pub fn load(&mut self, link: &str) -> Result<()> {
        self.surface.set_source(link)?;
        self.playback.reset_times();
        self.playback.is_loading_error = false;
        Ok(())
    }

    /// Reset timing without touching the source
    pub fn reset_times(&mut self) {
        self.playback.reset_times();
    }

    /// Seek within the loaded source
    ///
    /// Clamped to `0..=duration` once the duration is known.
    pub fn seek(&mut self, seconds: f64) -> Result<()> {
        let mut target = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        let duration = self.playback.duration;
        if duration.is_finite() && duration > RESET_DURATION_SECS {
            target = target.min(duration);
        }

        self.surface.set_current_time(target)?;
        self.playback.current_time = target;
        Ok(())
    }

    /// Poll the surface for elapsed time
    pub fn elapsed(&mut self) -> f64 {
        let time = self.surface.current_time();
        if time.is_finite() && time >= 0.0 {
            self.playback.current_time = time;
        }
        self.playback.current_time
    }

    /// Whether playback has run past the restart threshold
    pub fn has_started_past_threshold(&mut self) -> bool {
        self.elapsed();
        self.playback.has_started_past_threshold()
    }

    /// Update transport state from a media event
    pub fn on_media_event(&mut self, event: &MediaEvent) {
        match event {
            MediaEvent::CanPlay | MediaEvent::LoadStart | MediaEvent::Waiting => {
                self.playback.is_loading_error = false;
            }
            MediaEvent::Error { .. } => {
                self.playback.is_loading_error = true;
                self.playback.is_playing = false;
            }
            MediaEvent::Ended | MediaEvent::Pause => {
                self.playback.is_playing = false;
            }
            MediaEvent::Playing => {
                self.playback.is_playing = true;
            }
            MediaEvent::TimeUpdate(time) => {
                if time.is_finite() && *time >= 0.0 {
                    self.playback.current_time = *time;
                }
            }
            MediaEvent::DurationChange(duration) => {
                // Live streams report an infinite duration
                if !duration.is_nan() && *duration > 0.0 {
                    self.playback.duration = *duration;
                }
            }
        }
    }

    /// Clear a pending load failure
    pub fn clear_loading_error(&mut self) {
        self.playback.is_loading_error = false;
    }

    /// Transport state
    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    // ===== Volume =====

    /// Set slider level (0-100)
    pub fn set_volume(&mut self, level: u8) -> Result<()> {
        self.volume.set_level(level);
        self.surface.set_volume(self.volume.gain())
    }

    /// Mute output
    pub fn mute(&mut self) -> Result<()> {
        self.volume.mute();
        self.surface.set_muted(true)
    }

    /// Unmute output
    pub fn unmute(&mut self) -> Result<()> {
        self.volume.unmute();
        self.surface.set_muted(false)
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) -> Result<()> {
        self.volume.toggle_mute();
        self.surface.set_muted(self.volume.is_muted())
    }

    /// Current volume
    pub fn volume(&self) -> Volume {
        self.volume
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("playback", &self.playback)
            .field("volume", &self.volume)
            .finish_non_exhaustive()
    }
}
