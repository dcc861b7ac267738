//! Single-track player
//!
//! Plays one source with the same transport as [`crate::PlaylistPlayer`],
//! without a playlist or pagination.

use crate::{
    config::BasicPlayerConfig,
    error::Result,
    surface::{DeviceProbe, MediaSurface},
    transport::{PlayerControls, Transport},
    types::{MediaEvent, PlaybackState},
    volume::Volume,
};

/// Player for a single audio source
pub struct BasicPlayer {
    config: BasicPlayerConfig,
    transport: Transport,
    device: Option<Box<dyn DeviceProbe>>,
}

impl BasicPlayer {
    /// Create a player over `surface`
    pub fn new(config: BasicPlayerConfig, surface: Box<dyn MediaSurface>) -> Self {
        let transport = Transport::new(surface, config.volume);
        Self {
            config,
            transport,
            device: None,
        }
    }

    /// Consult a device probe for device-dependent controls
    pub fn with_device_probe(mut self, probe: Box<dyn DeviceProbe>) -> Self {
        self.device = Some(probe);
        self
    }

    /// Load the configured source; auto-play if configured
    pub fn init(&mut self) -> Result<()> {
        self.transport.sync_volume()?;
        self.reset()?;

        if self.config.auto_play {
            self.transport.play()?;
        }
        Ok(())
    }

    /// Reload the source from the start
    pub fn reset(&mut self) -> Result<()> {
        if self.config.audio_url.is_empty() {
            tracing::warn!("No audio url configured");
            return Ok(());
        }

        tracing::debug!(url = %self.config.audio_url, "Loading audio");
        self.transport.load(&self.config.audio_url)
    }

    /// Seek within the source
    pub fn seek(&mut self, seconds: f64) -> Result<()> {
        self.transport.seek(seconds)
    }

    /// Set volume (0-100)
    pub fn set_volume(&mut self, level: u8) -> Result<()> {
        self.transport.set_volume(level)
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) -> Result<()> {
        self.transport.toggle_mute()
    }

    /// Current volume
    pub fn volume(&self) -> Volume {
        self.transport.volume()
    }

    /// Title to display, if enabled
    pub fn display_title(&self) -> Option<&str> {
        self.config.display_title.then_some(self.config.title.as_str())
    }

    /// Whether volume controls should be offered
    pub fn show_volume_controls(&self) -> bool {
        self.config.display_volume_controls
            && !self.device.as_ref().is_some_and(|device| device.is_handheld())
    }

    /// Player configuration
    pub fn config(&self) -> &BasicPlayerConfig {
        &self.config
    }
}

impl PlayerControls for BasicPlayer {
    fn play(&mut self) -> Result<()> {
        self.transport.play()
    }

    fn pause(&mut self) -> Result<()> {
        self.transport.pause()
    }

    fn toggle_play(&mut self) -> Result<()> {
        self.transport.toggle()
    }

    fn handle_media_event(&mut self, event: MediaEvent) -> Result<()> {
        if let MediaEvent::Error { message } = &event {
            tracing::warn!(url = %self.config.audio_url, message = message.as_deref(), "Error while loading audio");
        }
        self.transport.on_media_event(&event);
        Ok(())
    }

    fn playback(&self) -> &PlaybackState {
        self.transport.playback()
    }

    fn elapsed(&mut self) -> f64 {
        self.transport.elapsed()
    }
}
