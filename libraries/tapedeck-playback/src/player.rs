//! Playlist player - core orchestration
//!
//! Coordinates the playlist store, pagination sync, transport, recovery
//! policy and playlist reconciliation. Every public operation runs to
//! completion within one turn of the host loop; commands that must wait
//! for the turn to end go on the [`TurnQueue`] and run in
//! [`PlaylistPlayer::run_deferred`].

use crate::{
    config::PlayerConfig,
    error::Result,
    events::PlayerEvent,
    pagination::{apply_to_view, backward_action, forward_action, PageAction, PageState, PageView, Paginator},
    reconcile,
    recovery::{decide_previous, decide_retry, PreviousAction, RecoveryAction},
    schedule::{Deferred, TurnQueue},
    store::{PlaylistStore, PointerStatus},
    surface::{DeviceProbe, MediaSurface},
    transport::{PlayerControls, Transport},
    types::{Direction, MediaEvent, PlaybackIssue, PlaybackState, PlayerState, Track},
    volume::Volume,
};

/// Row of the visible playlist page
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistRow {
    /// Zero-based playlist index
    pub index: usize,

    /// The track
    pub track: Track,

    /// Whether the pointer is on this row
    pub is_current: bool,
}

/// Paginated playlist player
///
/// Lifecycle:
/// ```text
///   Idle ──load──▶ Loading ──canplay──▶ Ready
///                    ▲  ▲                 │
///                    │  └──track change───┘
///   any ──error──▶ Error ──retry──┘
/// ```
pub struct PlaylistPlayer {
    config: PlayerConfig,
    transport: Transport,
    store: PlaylistStore,
    pages: Box<dyn PageView>,
    device: Option<Box<dyn DeviceProbe>>,
    state: PlayerState,
    deferred: TurnQueue,
    pending_events: Vec<PlayerEvent>,
}

impl PlaylistPlayer {
    /// Create a player over `surface` with an in-memory paginator
    pub fn new(config: PlayerConfig, surface: Box<dyn MediaSurface>) -> Self {
        let transport = Transport::new(surface, config.volume);
        let pages = Box::new(Paginator::new(config.initial_page_size()));

        Self {
            config,
            transport,
            store: PlaylistStore::new(),
            pages,
            device: None,
            state: PlayerState::Idle,
            deferred: TurnQueue::new(),
            pending_events: Vec::new(),
        }
    }

    /// Use the host's paginated view instead of the in-memory one
    pub fn with_page_view(mut self, mut view: Box<dyn PageView>) -> Self {
        view.set_length(self.store.len());
        self.pages = view;
        self
    }

    /// Consult a device probe for device-dependent controls
    pub fn with_device_probe(mut self, probe: Box<dyn DeviceProbe>) -> Self {
        self.device = Some(probe);
        self
    }

    // ===== Lifecycle =====

    /// Prepare the surface and select the first track
    ///
    /// Starts playback when `auto_play` is set and a track is loaded.
    pub fn init(&mut self) -> Result<()> {
        self.transport.sync_volume()?;

        if self.store.selected().is_none() {
            if let Some(track) = self.store.init().cloned() {
                self.load_track(track)?;
            }
        }

        if self.config.auto_play {
            if self.store.current_track().is_some() {
                self.transport.play()?;
            } else {
                tracing::debug!("Auto-play skipped: playlist is empty");
            }
        }

        Ok(())
    }

    // ===== Playback Control =====

    /// Start or resume playback
    pub fn play(&mut self) -> Result<()> {
        self.transport.play()
    }

    /// Pause playback
    pub fn pause(&mut self) -> Result<()> {
        self.transport.pause()
    }

    /// Play/pause button
    ///
    /// Ignored while a load failure is pending; [`retry_or_play`](Self::retry_or_play)
    /// is the way out of the error state.
    pub fn toggle_play(&mut self) -> Result<()> {
        if self.transport.playback().is_loading_error {
            tracing::warn!("Ignoring play/pause while a load failure is pending");
            return Ok(());
        }
        self.transport.toggle()
    }

    /// Seek within the current track
    pub fn seek(&mut self, seconds: f64) -> Result<()> {
        self.transport.seek(seconds)
    }

    /// Skip to the next track
    pub fn next(&mut self) -> Result<()> {
        if self.store.is_empty() {
            tracing::debug!("Ignoring next: playlist is empty");
            return Ok(());
        }

        self.transport.reset_times();

        let action = match self.store.current_index() {
            Some(index) => forward_action(index, &self.pages.state()),
            None => PageAction::FirstPage,
        };

        if let Some(track) = self.store.advance(Direction::Next).cloned() {
            self.load_track(track)?;
        }
        self.sync_page(action);

        self.transport.play()
    }

    /// Go back one track, or restart the current one
    ///
    /// Within the first two seconds of a track this moves the pointer back;
    /// later it reloads the current track from the start.
    pub fn previous(&mut self) -> Result<()> {
        if self.store.is_empty() {
            tracing::debug!("Ignoring previous: playlist is empty");
            return Ok(());
        }

        let decision = decide_previous(self.transport.elapsed());
        self.transport.reset_times();

        match decision {
            PreviousAction::MoveBack => {
                let action = match self.store.current_index() {
                    Some(index) => backward_action(index, &self.pages.state()),
                    None => PageAction::LastPage,
                };

                if let Some(track) = self.store.advance(Direction::Previous).cloned() {
                    self.load_track(track)?;
                }
                self.sync_page(action);
            }
            PreviousAction::Restart => self.restart_current()?,
        }

        self.transport.play()
    }

    /// Select the track at `index` and play it after this turn
    ///
    /// Out-of-range indices are ignored. The play command is deferred so it
    /// never races the source update on the media surface.
    pub fn select_track(&mut self, index: usize) -> Result<()> {
        let Some(track) = self.store.select_at(index).cloned() else {
            return Ok(());
        };

        self.load_track(track)?;
        self.sync_page(PageAction::None);
        self.deferred.schedule(Deferred::Play);
        Ok(())
    }

    /// Run commands deferred during the turn that just ended
    pub fn run_deferred(&mut self) -> Result<()> {
        for command in self.deferred.take() {
            match command {
                Deferred::Play => self.transport.play()?,
            }
        }
        Ok(())
    }

    /// Retry button: toggle playback, or recover from a load failure
    pub fn retry_or_play(&mut self) -> Result<()> {
        let action = decide_retry(
            self.config.retry_policy,
            self.transport.playback().is_loading_error,
            self.store.last_known_index(),
            self.store.len(),
        );

        match action {
            RecoveryAction::TogglePlayback => self.toggle_play(),
            RecoveryAction::Advance => {
                tracing::info!("Retrying by advancing past the failed track");
                self.transport.clear_loading_error();
                self.next()
            }
            RecoveryAction::Reselect { index } => {
                tracing::info!(index, "Retrying the failed track");
                self.transport.clear_loading_error();
                self.select_track(index)
            }
            RecoveryAction::Reset => {
                tracing::info!("Nothing to retry: playlist is empty");
                self.transport.clear_loading_error();
                self.set_state(PlayerState::Idle);
                Ok(())
            }
        }
    }

    // ===== Media Events =====

    /// Feed an event reported by the media surface
    pub fn handle_media_event(&mut self, event: MediaEvent) -> Result<()> {
        self.transport.on_media_event(&event);

        match event {
            MediaEvent::CanPlay => self.set_state(PlayerState::Ready),
            MediaEvent::LoadStart | MediaEvent::Waiting => self.set_state(PlayerState::Loading),
            MediaEvent::Playing => {
                if self.state == PlayerState::Loading {
                    self.set_state(PlayerState::Ready);
                }
            }
            MediaEvent::Error { message } => {
                let track = self.store.selected().cloned();
                tracing::warn!(
                    track = track.as_ref().map(|t| t.id.as_str()),
                    message = message.as_deref(),
                    "Error while loading audio"
                );
                self.set_state(PlayerState::Error);
                self.pending_events
                    .push(PlayerEvent::LoadFailed { track, message });
            }
            MediaEvent::Ended => {
                if self.transport.has_started_past_threshold() {
                    self.next()?;
                } else {
                    tracing::debug!("Ignoring ended event before the restart threshold");
                }
            }
            MediaEvent::TimeUpdate(_) | MediaEvent::DurationChange(_) | MediaEvent::Pause => {}
        }

        Ok(())
    }

    // ===== Playlist =====

    /// Replace the playlist without resetting playback
    ///
    /// If the replacement drops the track being played, playback pauses and
    /// advances before the new playlist is committed. Events from that advance
    /// carry the track's index in the committed playlist.
    pub fn set_playlist(&mut self, tracks: Vec<Track>) -> Result<()> {
        let plan = reconcile::plan(
            self.store.tracks(),
            &tracks,
            self.store.current_track().map(|t| t.id.as_str()),
        );

        if plan.pause {
            self.transport.pause()?;
        }

        let advance_mark = self.pending_events.len();
        if plan.advance_before_commit {
            tracing::info!("Currently playing track was removed from the playlist, advancing");
            self.next()?;
        }

        let status = self.store.set_playlist(tracks);
        let length = self.store.len();

        let page_before = self.pages.page_index();
        self.pages.set_length(length);
        if self.pages.page_index() != page_before {
            self.emit_page_changed();
        }
        self.pending_events
            .push(PlayerEvent::PlaylistChanged { length });

        match status {
            PointerStatus::Kept { index } => {
                self.rebase_track_events(advance_mark, index);
                self.sync_page(PageAction::None);
            }
            PointerStatus::Unset => {
                if let Some(track) = self.store.init().cloned() {
                    self.load_track(track)?;
                }
            }
            PointerStatus::Stale { .. } if self.store.is_empty() => {
                self.store.clear_pointer();
                self.set_state(PlayerState::Idle);
            }
            PointerStatus::Stale { last_index } => {
                let index = last_index.min(length - 1);
                tracing::info!(index, "Selected track is gone, rebinding pointer");
                self.transport.pause()?;
                if let Some(track) = self.store.select_at(index).cloned() {
                    self.load_track(track)?;
                }
                self.sync_page(PageAction::None);
            }
        }

        Ok(())
    }

    /// Parse a JSON array of tracks and replace the playlist
    pub fn set_playlist_json(&mut self, json: &str) -> Result<()> {
        let tracks: Vec<Track> = serde_json::from_str(json)?;
        self.set_playlist(tracks)
    }

    // ===== Pagination =====

    /// Page sizes the user may choose from
    pub fn page_size_options(&self) -> &[usize] {
        &self.config.page_size_options
    }

    /// Change rows per page
    ///
    /// Returns false when `page_size` is not one of the configured options.
    /// With playlist display on, the visible page is walked back to the
    /// current track.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if !self.config.page_size_options.contains(&page_size) {
            tracing::warn!(page_size, options = ?self.config.page_size_options, "Page size not offered");
            return false;
        }

        let before = self.pages.page_index();
        self.pages.set_page_size(page_size);
        if self.config.display_playlist {
            if let Some(index) = self.store.current_index() {
                self.align_page(index);
            }
        }

        tracing::debug!(page_size, page = self.pages.page_index(), "Changed page size");
        if self.pages.page_index() != before {
            self.emit_page_changed();
        }
        true
    }

    // ===== Requests =====

    /// Ask the host to clear the playlist
    pub fn request_clear_playlist(&mut self) {
        self.pending_events.push(PlayerEvent::PlaylistCleared);
    }

    /// Ask the host to remove an entry
    ///
    /// Returns false when row removal is disabled or the id is unknown.
    pub fn request_remove(&mut self, id: &str) -> bool {
        if !self.config.remove_playlist_element_enabled {
            tracing::warn!(id, "Removing playlist entries is disabled");
            return false;
        }
        if !self.store.contains(id) {
            tracing::debug!(id, "Ignoring removal of unknown entry");
            return false;
        }

        self.pending_events.push(PlayerEvent::RemoveRequested { id: id.to_string() });
        true
    }

    // ===== Volume =====

    /// Set volume (0-100)
    pub fn set_volume(&mut self, level: u8) -> Result<()> {
        self.transport.set_volume(level)
    }

    /// Mute output
    pub fn mute(&mut self) -> Result<()> {
        self.transport.mute()
    }

    /// Unmute output
    pub fn unmute(&mut self) -> Result<()> {
        self.transport.unmute()
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) -> Result<()> {
        self.transport.toggle_mute()
    }

    /// Current volume
    pub fn volume(&self) -> Volume {
        self.transport.volume()
    }

    // ===== State Queries =====

    /// Lifecycle state
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Transport-level state
    pub fn playback(&self) -> &PlaybackState {
        self.transport.playback()
    }

    /// Currently selected track
    pub fn current_track(&self) -> Option<&Track> {
        self.store.current_track()
    }

    /// Zero-based index of the current track
    pub fn current_index(&self) -> Option<usize> {
        self.store.current_index()
    }

    /// All tracks in order
    pub fn tracks(&self) -> &[Track] {
        self.store.tracks()
    }

    /// Snapshot of the playlist view's pagination
    pub fn page_state(&self) -> PageState {
        self.pages.state()
    }

    /// Rows of the visible page
    pub fn visible_rows(&self) -> Vec<PlaylistRow> {
        let current = self.store.current_index();
        self.pages
            .state()
            .page_range()
            .filter_map(|index| {
                self.store.get(index).map(|track| PlaylistRow {
                    index,
                    track: track.clone(),
                    is_current: current == Some(index),
                })
            })
            .collect()
    }

    /// Loading, failure or empty-playlist message, if any applies
    pub fn status_text(&self) -> Option<String> {
        if self.store.is_empty() {
            return Some(self.config.empty_playlist_text.clone());
        }

        let title = self.store.selected().map(|t| t.title.as_str()).unwrap_or_default();
        match self.state {
            PlayerState::Error => Some(format!("{}{}", self.config.audio_loading_error_text, title)),
            PlayerState::Loading => Some(format!(
                "{}{}",
                self.config.audio_loading_in_progress_text, title
            )),
            PlayerState::Idle | PlayerState::Ready => None,
        }
    }

    /// Whether the retry affordance should be shown
    pub fn shows_retry(&self) -> bool {
        self.transport.playback().is_loading_error
    }

    /// Condition the player is currently recovering from
    pub fn issue(&self) -> Option<PlaybackIssue> {
        if self.transport.playback().is_loading_error {
            Some(PlaybackIssue::LoadFailure)
        } else if self.store.is_empty() {
            Some(PlaybackIssue::EmptyPlaylist)
        } else if self.store.is_stale() {
            Some(PlaybackIssue::StalePointer)
        } else {
            None
        }
    }

    /// Whether volume controls should be offered
    pub fn show_volume_controls(&self) -> bool {
        self.config.display_volume_controls
            && !self.device.as_ref().is_some_and(|device| device.is_handheld())
    }

    /// Player configuration
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Whether deferred commands are waiting for the end of the turn
    pub fn has_deferred(&self) -> bool {
        !self.deferred.is_empty()
    }

    // ===== Events =====

    /// Drain all pending events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    fn load_track(&mut self, track: Track) -> Result<()> {
        self.transport.load(&track.link)?;
        self.set_state(PlayerState::Loading);

        let index = track.position.saturating_sub(1);
        tracing::debug!(index, track = %track.id, "Loading track");
        self.pending_events
            .push(PlayerEvent::TrackChanged { index, track });
        Ok(())
    }

    /// Rewrite `TrackChanged` events queued since `mark` against the
    /// committed playlist
    fn rebase_track_events(&mut self, mark: usize, index: usize) {
        let Some(current) = self.store.current_track() else {
            return;
        };

        for event in &mut self.pending_events[mark..] {
            if let PlayerEvent::TrackChanged { index: i, track } = event {
                *i = index;
                *track = current.clone();
            }
        }
    }

    fn restart_current(&mut self) -> Result<()> {
        let Some(link) = self.store.current_track().map(|t| t.link.clone()) else {
            return Ok(());
        };

        tracing::debug!("Restarting current track");
        self.transport.load(&link)?;
        self.set_state(PlayerState::Loading);
        Ok(())
    }

    /// Apply the page action computed before the pointer moved, then make
    /// sure the visible page holds the current track
    fn sync_page(&mut self, action: PageAction) {
        if !self.config.display_playlist {
            return;
        }

        let before = self.pages.page_index();
        apply_to_view(self.pages.as_mut(), action);
        if let Some(index) = self.store.current_index() {
            self.align_page(index);
        }

        if self.pages.page_index() != before {
            tracing::debug!(?action, page = self.pages.page_index(), "Turned playlist page");
            self.emit_page_changed();
        }
    }

    fn align_page(&mut self, index: usize) {
        let state = self.pages.state();
        let target = state.page_of(index);

        // Bounded: a host view may refuse to turn
        for _ in 0..state.page_count() {
            let page = self.pages.page_index();
            if page == target {
                break;
            }
            if page < target {
                self.pages.next_page();
            } else {
                self.pages.previous_page();
            }
        }
    }

    fn set_state(&mut self, state: PlayerState) {
        if self.state != state {
            self.state = state;
            self.pending_events.push(PlayerEvent::StateChanged { state });
        }
    }

    fn emit_page_changed(&mut self) {
        self.pending_events.push(PlayerEvent::PageChanged {
            page_index: self.pages.page_index(),
        });
    }
}

impl PlayerControls for PlaylistPlayer {
    fn play(&mut self) -> Result<()> {
        PlaylistPlayer::play(self)
    }

    fn pause(&mut self) -> Result<()> {
        PlaylistPlayer::pause(self)
    }

    fn toggle_play(&mut self) -> Result<()> {
        PlaylistPlayer::toggle_play(self)
    }

    fn handle_media_event(&mut self, event: MediaEvent) -> Result<()> {
        PlaylistPlayer::handle_media_event(self, event)
    }

    fn playback(&self) -> &PlaybackState {
        self.transport.playback()
    }

    fn elapsed(&mut self) -> f64 {
        self.transport.elapsed()
    }
}
