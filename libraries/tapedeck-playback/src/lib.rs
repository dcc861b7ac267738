//! Tapedeck - Playlist Playback Control
//!
//! Platform-agnostic playback control for a paginated playlist player.
//!
//! This crate provides:
//! - Playlist store with an identity-based current-track pointer
//! - Pagination sync (the visible page follows the current track)
//! - Playback controller (next, previous, select, retry)
//! - Error recovery policy (configurable retry after a load failure)
//! - Playlist diff reconciler (replacing the playlist while playing)
//! - Single-track player sharing the same transport
//! - Logarithmic volume with mute
//!
//! # Architecture
//!
//! `tapedeck-playback` never touches an audio element directly. The host
//! provides:
//! - A [`MediaSurface`] that renders audio and reports [`MediaEvent`]s back
//! - Optionally a [`PageView`] (its own paginated table) and a [`DeviceProbe`]
//!
//! The player is single-threaded and event-driven: every operation runs to
//! completion, then the host calls [`PlaylistPlayer::run_deferred`] and
//! drains [`PlayerEvent`]s. The `runtime` feature adds a tokio [`driver`]
//! that does this in a spawned task.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use tapedeck_playback::{MediaSurface, PlayerConfig, PlaylistPlayer, Result, Track};
//!
//! struct Silent;
//!
//! impl MediaSurface for Silent {
//!     fn current_time(&self) -> f64 { 0.0 }
//!     fn set_current_time(&mut self, _seconds: f64) -> Result<()> { Ok(()) }
//!     fn duration(&self) -> f64 { 0.0 }
//!     fn set_source(&mut self, _link: &str) -> Result<()> { Ok(()) }
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) -> Result<()> { Ok(()) }
//!     fn set_volume(&mut self, _gain: f32) -> Result<()> { Ok(()) }
//!     fn set_muted(&mut self, _muted: bool) -> Result<()> { Ok(()) }
//! }
//!
//! let mut player = PlaylistPlayer::new(PlayerConfig::default(), Box::new(Silent));
//! player.set_playlist(vec![
//!     Track::new("intro", "/music/intro.mp3", "Intro"),
//!     Track::new("theme", "/music/theme.mp3", "Theme"),
//! ])?;
//! player.init()?;
//!
//! player.next()?;
//! assert_eq!(player.current_track().map(|t| t.id.as_str()), Some("theme"));
//!
//! // Selecting starts playback once the current turn is over
//! player.select_track(0)?;
//! player.run_deferred()?;
//!
//! for event in player.drain_events() {
//!     println!("{:?}", event);
//! }
//! # Ok::<(), tapedeck_playback::PlayerError>(())
//! ```
//!
//! # Example: Driver
//!
//! ```rust,no_run
//! use tapedeck_playback::{driver, PlayerConfig, PlayerInput, PlaylistPlayer};
//! # use tapedeck_playback::{MediaSurface, Result};
//! # struct Silent;
//! # impl MediaSurface for Silent {
//! #     fn current_time(&self) -> f64 { 0.0 }
//! #     fn set_current_time(&mut self, _seconds: f64) -> Result<()> { Ok(()) }
//! #     fn duration(&self) -> f64 { 0.0 }
//! #     fn set_source(&mut self, _link: &str) -> Result<()> { Ok(()) }
//! #     fn play(&mut self) -> Result<()> { Ok(()) }
//! #     fn pause(&mut self) -> Result<()> { Ok(()) }
//! #     fn set_volume(&mut self, _gain: f32) -> Result<()> { Ok(()) }
//! #     fn set_muted(&mut self, _muted: bool) -> Result<()> { Ok(()) }
//! # }
//!
//! # async fn run() -> Result<()> {
//! let player = PlaylistPlayer::new(PlayerConfig::default(), Box::new(Silent));
//! let (handle, mut events, _task) = driver::spawn(player);
//!
//! handle.send(PlayerInput::Init).await?;
//! handle.send(PlayerInput::Next).await?;
//!
//! while let Some(event) = events.recv().await {
//!     println!("{}", event.kind());
//! }
//! # Ok(())
//! # }
//! ```

pub mod basic;
pub mod config;
pub mod error;
pub mod events;
pub mod pagination;
pub mod player;
pub mod reconcile;
pub mod recovery;
pub mod schedule;
pub mod store;
pub mod surface;
pub mod transport;
pub mod types;
pub mod volume;

#[cfg(feature = "runtime")]
pub mod driver;

#[cfg(test)]
mod test_support;

// Re-exports
pub use basic::BasicPlayer;
pub use config::{BasicPlayerConfig, PlayerConfig};
pub use error::{PlayerError, Result};
pub use events::PlayerEvent;
pub use pagination::{backward_action, forward_action, PageAction, PageState, PageView, Paginator};
pub use player::{PlaylistPlayer, PlaylistRow};
pub use reconcile::ReconcilePlan;
pub use recovery::{PreviousAction, RecoveryAction, RetryPolicy};
pub use store::{PlaylistStore, PointerStatus};
pub use surface::{DeviceProbe, MediaSurface};
pub use transport::PlayerControls;
pub use types::{Direction, MediaEvent, PlaybackIssue, PlaybackState, PlayerState, Track};
pub use volume::Volume;

#[cfg(feature = "runtime")]
pub use driver::{PlayerHandle, PlayerInput};
