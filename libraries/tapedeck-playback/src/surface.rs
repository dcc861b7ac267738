//! Platform-agnostic media surface traits
//!
//! Abstracts the audio element (browser, desktop webview, native player)
//! and optional device probing.

use crate::error::Result;

/// Platform-agnostic media surface
///
/// Implementors wrap whatever renders audio for the host. The surface is
/// exclusively owned by the player; media events flow back through
/// [`crate::MediaEvent`].
#[cfg_attr(test, mockall::automock)]
pub trait MediaSurface: Send {
    /// Elapsed time of the loaded source in seconds
    fn current_time(&self) -> f64;

    /// Seek to `seconds` from the start of the source
    fn set_current_time(&mut self, seconds: f64) -> Result<()>;

    /// Duration of the loaded source in seconds (0 when unknown)
    fn duration(&self) -> f64;

    /// Hand a new source to the surface
    ///
    /// The surface starts loading and reports progress through media events.
    fn set_source(&mut self, link: &str) -> Result<()>;

    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self) -> Result<()>;

    /// Set linear output gain in `0.0..=1.0`
    fn set_volume(&mut self, gain: f32) -> Result<()>;

    /// Mute or unmute output
    fn set_muted(&mut self, muted: bool) -> Result<()>;
}

/// Host device information
///
/// Optional; the player only consults it to decide whether volume controls
/// make sense (mobile browsers ignore programmatic volume).
#[cfg_attr(test, mockall::automock)]
pub trait DeviceProbe: Send {
    /// Running on a phone
    fn is_mobile(&self) -> bool;

    /// Running on a tablet
    fn is_tablet(&self) -> bool {
        false
    }

    /// Running on a phone or tablet
    fn is_handheld(&self) -> bool {
        self.is_mobile() || self.is_tablet()
    }
}
