//! Recording media surface for unit tests

use crate::{error::Result, surface::MediaSurface};
use std::sync::{Arc, Mutex};

/// Command received by the fake surface
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Source(String),
    Play,
    Pause,
}

/// Surface that records commands; clones share the log
#[derive(Clone, Default)]
pub struct FakeSurface {
    calls: Arc<Mutex<Vec<Call>>>,
    time: Arc<Mutex<f64>>,
}

impl FakeSurface {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn set_time(&self, seconds: f64) {
        *self.time.lock().unwrap() = seconds;
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl MediaSurface for FakeSurface {
    fn current_time(&self) -> f64 {
        *self.time.lock().unwrap()
    }

    fn set_current_time(&mut self, seconds: f64) -> Result<()> {
        self.set_time(seconds);
        Ok(())
    }

    fn duration(&self) -> f64 {
        180.0
    }

    fn set_source(&mut self, link: &str) -> Result<()> {
        self.set_time(0.0);
        self.record(Call::Source(link.to_string()));
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.record(Call::Play);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.record(Call::Pause);
        Ok(())
    }

    fn set_volume(&mut self, _gain: f32) -> Result<()> {
        Ok(())
    }

    fn set_muted(&mut self, _muted: bool) -> Result<()> {
        Ok(())
    }
}
