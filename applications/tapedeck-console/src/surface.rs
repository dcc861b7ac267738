//! Simulated media surface
//!
//! Logs every command instead of rendering audio. The playhead lives in a
//! shared [`SurfaceClock`] so console commands can move it.

use std::sync::{Arc, Mutex, PoisonError};
use tapedeck_playback::{MediaSurface, Result};

#[derive(Debug, Default)]
struct ClockState {
    time: f64,
    duration: f64,
}

/// Shared playhead of a [`ConsoleSurface`]
#[derive(Debug, Clone, Default)]
pub struct SurfaceClock {
    state: Arc<Mutex<ClockState>>,
}

impl SurfaceClock {
    /// Move the playhead
    pub fn set_time(&self, seconds: f64) {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).time = seconds;
    }

    /// Current playhead position
    pub fn time(&self) -> f64 {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).time
    }

    /// Record the source duration
    pub fn set_duration(&self, seconds: f64) {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).duration = seconds;
    }

    fn duration(&self) -> f64 {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).duration
    }
}

/// Media surface that logs commands
#[derive(Debug, Default)]
pub struct ConsoleSurface {
    clock: SurfaceClock,
    source: Option<String>,
}

impl ConsoleSurface {
    /// Create a surface and a handle to its playhead
    pub fn new() -> (Self, SurfaceClock) {
        let surface = Self::default();
        let clock = surface.clock.clone();
        (surface, clock)
    }

    /// Source currently handed to the surface
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

impl MediaSurface for ConsoleSurface {
    fn current_time(&self) -> f64 {
        self.clock.time()
    }

    fn set_current_time(&mut self, seconds: f64) -> Result<()> {
        tracing::info!("[surface] seek to {:.2}s", seconds);
        self.clock.set_time(seconds);
        Ok(())
    }

    fn duration(&self) -> f64 {
        self.clock.duration()
    }

    fn set_source(&mut self, link: &str) -> Result<()> {
        tracing::info!("[surface] load {}", link);
        self.source = Some(link.to_string());
        self.clock.set_time(0.0);
        self.clock.set_duration(0.0);
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        tracing::info!("[surface] play {}", self.source.as_deref().unwrap_or("<none>"));
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        tracing::info!("[surface] pause");
        Ok(())
    }

    fn set_volume(&mut self, gain: f32) -> Result<()> {
        tracing::info!("[surface] gain {:.3}", gain);
        Ok(())
    }

    fn set_muted(&mut self, muted: bool) -> Result<()> {
        tracing::info!("[surface] muted {}", muted);
        Ok(())
    }
}
