//! Async driver
//!
//! Owns a [`PlaylistPlayer`] in one tokio task and feeds it one input per
//! turn. Deferred commands run after every turn, then the events the turn
//! produced are forwarded to the host.

use crate::{
    error::{PlayerError, Result},
    events::PlayerEvent,
    player::PlaylistPlayer,
    types::{MediaEvent, Track},
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const INPUT_CAPACITY: usize = 100;

/// One unit of work for the driver
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerInput {
    Init,
    Play,
    Pause,
    TogglePlay,
    Next,
    Previous,
    Select(usize),
    SetPageSize(usize),
    RetryOrPlay,
    Seek(f64),
    SetVolume(u8),
    ToggleMute,
    SetPlaylist(Vec<Track>),
    Media(MediaEvent),
    ClearPlaylist,
    Remove(String),
}

impl PlayerInput {
    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Play => "play",
            Self::Pause => "pause",
            Self::TogglePlay => "toggle_play",
            Self::Next => "next",
            Self::Previous => "previous",
            Self::Select(_) => "select",
            Self::SetPageSize(_) => "set_page_size",
            Self::RetryOrPlay => "retry_or_play",
            Self::Seek(_) => "seek",
            Self::SetVolume(_) => "set_volume",
            Self::ToggleMute => "toggle_mute",
            Self::SetPlaylist(_) => "set_playlist",
            Self::Media(_) => "media",
            Self::ClearPlaylist => "clear_playlist",
            Self::Remove(_) => "remove",
        }
    }
}

/// Sending side of a running driver
///
/// The driver stops once every handle is dropped.
#[derive(Debug, Clone)]
pub struct PlayerHandle {
    tx: mpsc::Sender<PlayerInput>,
}

impl PlayerHandle {
    /// Queue an input for the driver
    pub async fn send(&self, input: PlayerInput) -> Result<()> {
        self.tx
            .send(input)
            .await
            .map_err(|_| PlayerError::ChannelClosed)
    }
}

/// Spawn the driver task
///
/// Returns the input handle, the event stream and the task handle, which
/// yields the player back once the driver stops.
pub fn spawn(
    player: PlaylistPlayer,
) -> (
    PlayerHandle,
    mpsc::UnboundedReceiver<PlayerEvent>,
    JoinHandle<PlaylistPlayer>,
) {
    let (input_tx, input_rx) = mpsc::channel(INPUT_CAPACITY);
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let handle = tokio::spawn(run(player, input_rx, event_tx));

    (PlayerHandle { tx: input_tx }, event_rx, handle)
}

async fn run(
    mut player: PlaylistPlayer,
    mut inputs: mpsc::Receiver<PlayerInput>,
    events: mpsc::UnboundedSender<PlayerEvent>,
) -> PlaylistPlayer {
    tracing::info!("Player driver started");

    while let Some(input) = inputs.recv().await {
        let kind = input.kind();
        if let Err(e) = apply(&mut player, input) {
            tracing::warn!(input = kind, "Player command failed: {}", e);
        }

        if let Err(e) = player.run_deferred() {
            tracing::warn!("Deferred command failed: {}", e);
        }

        for event in player.drain_events() {
            tracing::debug!(event = event.kind(), "Forwarding player event");
            // Host may have stopped listening
            let _ = events.send(event);
        }
    }

    tracing::info!("Player driver stopped");
    player
}

fn apply(player: &mut PlaylistPlayer, input: PlayerInput) -> Result<()> {
    match input {
        PlayerInput::Init => player.init(),
        PlayerInput::Play => player.play(),
        PlayerInput::Pause => player.pause(),
        PlayerInput::TogglePlay => player.toggle_play(),
        PlayerInput::Next => player.next(),
        PlayerInput::Previous => player.previous(),
        PlayerInput::Select(index) => player.select_track(index),
        PlayerInput::SetPageSize(size) => {
            player.set_page_size(size);
            Ok(())
        }
        PlayerInput::RetryOrPlay => player.retry_or_play(),
        PlayerInput::Seek(seconds) => player.seek(seconds),
        PlayerInput::SetVolume(level) => player.set_volume(level),
        PlayerInput::ToggleMute => player.toggle_mute(),
        PlayerInput::SetPlaylist(tracks) => player.set_playlist(tracks),
        PlayerInput::Media(event) => player.handle_media_event(event),
        PlayerInput::ClearPlaylist => {
            player.request_clear_playlist();
            Ok(())
        }
        PlayerInput::Remove(id) => {
            player.request_remove(&id);
            Ok(())
        }
    }
}
