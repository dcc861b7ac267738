//! Integration tests for the playlist player
//!
//! These tests drive the player through real navigation, failure and
//! playlist-replacement scenarios and check what reaches the media surface.

use tapedeck_playback::{
    MediaEvent, PageAction, PlaybackIssue, PlayerConfig, PlayerEvent, PlayerState, PlaylistPlayer,
    RetryPolicy,
};

use test_helpers::{paged, setup_player, source, tracks, RecordingSurface, SurfaceCommand};

// ===== Navigation =====

#[test]
fn test_next_turns_page_from_last_row() {
    // [A B | C D | E], pointer on B
    let (mut player, surface) = setup_player(paged(2), &["a", "b", "c", "d", "e"]);
    player.select_track(1).unwrap();
    player.run_deferred().unwrap();
    player.drain_events();
    surface.clear();

    player.next().unwrap();

    assert_eq!(player.current_index(), Some(2));
    assert_eq!(player.page_state().page_index, 1);
    assert_eq!(
        surface.transport_commands(),
        vec![source("c"), SurfaceCommand::Play]
    );

    let events = player.drain_events();
    assert!(events.contains(&PlayerEvent::PageChanged { page_index: 1 }));
    assert!(events
        .iter()
        .any(|e| matches!(e, PlayerEvent::TrackChanged { index: 2, .. })));
}

#[test]
fn test_full_cycle_returns_to_first_page() {
    let (mut player, _surface) = setup_player(paged(2), &["a", "b", "c", "d", "e"]);

    let mut pages = Vec::new();
    for _ in 0..5 {
        player.next().unwrap();
        pages.push(player.page_state().page_index);
    }

    assert_eq!(pages, vec![0, 1, 1, 2, 0]);
    assert_eq!(player.current_index(), Some(0));
}

#[test]
fn test_previous_at_start_wraps_to_last_page() {
    let (mut player, surface) = setup_player(paged(2), &["a", "b", "c"]);

    player.previous().unwrap();

    assert_eq!(player.current_index(), Some(2));
    assert_eq!(player.page_state().page_index, 1);
    assert_eq!(
        surface.transport_commands(),
        vec![source("c"), SurfaceCommand::Play]
    );
}

#[test]
fn test_previous_two_track_playlist() {
    let (mut player, _surface) = setup_player(PlayerConfig::default(), &["a", "b"]);
    let before = player.page_state();
    assert_eq!(
        tapedeck_playback::backward_action(0, &before),
        PageAction::LastPage
    );

    player.previous().unwrap();

    assert_eq!(player.current_track().unwrap().id, "b");
    assert_eq!(player.page_state().page_index, 0);
}

#[test]
fn test_previous_after_threshold_restarts_same_track() {
    let (mut player, surface) = setup_player(PlayerConfig::default(), &["a", "b", "c"]);
    player.next().unwrap();
    player.drain_events();
    surface.clear();
    surface.set_time(2.5);

    player.previous().unwrap();

    assert_eq!(player.current_track().unwrap().id, "b");
    assert_eq!(
        surface.transport_commands(),
        vec![source("b"), SurfaceCommand::Play]
    );
    assert!(!player
        .drain_events()
        .iter()
        .any(|e| matches!(e, PlayerEvent::TrackChanged { .. })));
}

#[test]
fn test_previous_exactly_at_threshold_moves_back() {
    let (mut player, surface) = setup_player(PlayerConfig::default(), &["a", "b", "c"]);
    player.next().unwrap();
    surface.set_time(2.0);

    player.previous().unwrap();

    assert_eq!(player.current_track().unwrap().id, "a");
}

#[test]
fn test_track_change_resets_times() {
    let (mut player, _surface) = setup_player(PlayerConfig::default(), &["a", "b"]);
    player
        .handle_media_event(MediaEvent::DurationChange(200.0))
        .unwrap();
    player.handle_media_event(MediaEvent::TimeUpdate(50.0)).unwrap();

    player.next().unwrap();

    assert_eq!(player.playback().current_time, 0.0);
    assert_eq!(player.playback().duration, 0.01);
}

#[test]
fn test_single_track_next_reloads_it() {
    let (mut player, surface) = setup_player(PlayerConfig::default(), &["a"]);

    player.next().unwrap();

    assert_eq!(player.current_index(), Some(0));
    assert_eq!(
        surface.transport_commands(),
        vec![source("a"), SurfaceCommand::Play]
    );
}

#[test]
fn test_select_plays_only_after_turn() {
    let (mut player, surface) = setup_player(PlayerConfig::default(), &["a", "b", "c"]);

    player.select_track(2).unwrap();
    assert_eq!(surface.transport_commands(), vec![source("c")]);

    player.run_deferred().unwrap();
    assert_eq!(
        surface.transport_commands(),
        vec![source("c"), SurfaceCommand::Play]
    );
    assert!(player.playback().is_playing);
}

#[test]
fn test_ended_advances_after_threshold() {
    let (mut player, surface) = setup_player(PlayerConfig::default(), &["a", "b"]);
    surface.set_time(180.0);

    player.handle_media_event(MediaEvent::Ended).unwrap();

    assert_eq!(player.current_track().unwrap().id, "b");
    assert!(player.playback().is_playing);
}

// ===== Lifecycle =====

#[test]
fn test_lifecycle_states() {
    let (mut player, _surface) = setup_player(PlayerConfig::default(), &["a", "b"]);
    assert_eq!(player.state(), PlayerState::Loading);

    player.handle_media_event(MediaEvent::CanPlay).unwrap();
    assert_eq!(player.state(), PlayerState::Ready);

    player.handle_media_event(MediaEvent::Waiting).unwrap();
    assert_eq!(player.state(), PlayerState::Loading);

    player.handle_media_event(MediaEvent::Playing).unwrap();
    assert_eq!(player.state(), PlayerState::Ready);

    player
        .handle_media_event(MediaEvent::Error { message: None })
        .unwrap();
    assert_eq!(player.state(), PlayerState::Error);

    player.next().unwrap();
    assert_eq!(player.state(), PlayerState::Loading);
}

#[test]
fn test_init_applies_configured_volume() {
    test_helpers::init_logging();
    let surface = RecordingSurface::new();
    let config = PlayerConfig {
        volume: 0,
        ..Default::default()
    };
    let mut player = PlaylistPlayer::new(config, Box::new(surface.clone()));
    player.init().unwrap();

    assert_eq!(
        surface.commands(),
        vec![SurfaceCommand::Volume(0.0), SurfaceCommand::Muted(false)]
    );
    assert!(player.current_track().is_none());
}

#[test]
fn test_surface_failure_propagates() {
    let (mut player, surface) = setup_player(PlayerConfig::default(), &["a", "b"]);
    surface.fail_sources(true);

    assert!(player.next().is_err());
    assert!(player.select_track(0).is_err());
}

// ===== Error Recovery =====

#[test]
fn test_retry_after_failure_never_noop() {
    for policy in [RetryPolicy::AdvanceToNext, RetryPolicy::RetrySameTrack] {
        let config = PlayerConfig {
            retry_policy: policy,
            ..Default::default()
        };
        let (mut player, surface) = setup_player(config, &["a", "b", "c"]);
        player
            .handle_media_event(MediaEvent::Error {
                message: Some("404".into()),
            })
            .unwrap();
        surface.clear();

        player.retry_or_play().unwrap();
        player.run_deferred().unwrap();

        assert_eq!(player.state(), PlayerState::Loading, "{:?}", policy);
        assert!(!player.playback().is_loading_error);
        assert!(surface
            .transport_commands()
            .iter()
            .any(|c| matches!(c, SurfaceCommand::Source(_))));
        assert!(player.playback().is_playing);
    }
}

#[test]
fn test_retry_on_emptied_playlist_resets() {
    let (mut player, _surface) = setup_player(PlayerConfig::default(), &["a"]);
    player
        .handle_media_event(MediaEvent::Error { message: None })
        .unwrap();
    player.set_playlist(Vec::new()).unwrap();

    player.retry_or_play().unwrap();

    assert_eq!(player.state(), PlayerState::Idle);
    assert_eq!(player.issue(), Some(PlaybackIssue::EmptyPlaylist));
}

#[test]
fn test_error_is_sticky_until_new_load() {
    let (mut player, _surface) = setup_player(PlayerConfig::default(), &["a", "b"]);
    player
        .handle_media_event(MediaEvent::Error { message: None })
        .unwrap();
    player.handle_media_event(MediaEvent::TimeUpdate(1.0)).unwrap();
    player.handle_media_event(MediaEvent::Pause).unwrap();

    assert!(player.shows_retry());

    player.select_track(1).unwrap();
    assert!(!player.shows_retry());
}

// ===== Playlist Replacement =====

#[test]
fn test_removing_current_track_pauses_then_advances_once() {
    let (mut player, surface) = setup_player(PlayerConfig::default(), &["a", "b", "c"]);
    player.select_track(1).unwrap();
    player.run_deferred().unwrap();
    player.drain_events();
    surface.clear();

    player.set_playlist(tracks(&["a", "c"])).unwrap();

    assert_eq!(
        surface.transport_commands(),
        vec![SurfaceCommand::Pause, source("c"), SurfaceCommand::Play]
    );
    assert_eq!(player.current_track().unwrap().id, "c");

    let events = player.drain_events();
    let track_changes = events
        .iter()
        .filter(|e| matches!(e, PlayerEvent::TrackChanged { .. }))
        .count();
    assert_eq!(track_changes, 1);
    assert!(events.contains(&PlayerEvent::PlaylistChanged { length: 2 }));
}

#[test]
fn test_removing_last_track_wraps_to_first() {
    let (mut player, _surface) = setup_player(PlayerConfig::default(), &["a", "b", "c"]);
    player.select_track(2).unwrap();

    player.set_playlist(tracks(&["a", "b"])).unwrap();

    assert_eq!(player.current_track().unwrap().id, "a");
    assert_eq!(player.current_index(), Some(0));
}

#[test]
fn test_removing_current_and_next_rebinds_pointer() {
    let (mut player, _surface) = setup_player(PlayerConfig::default(), &["a", "b", "c", "d"]);
    player.select_track(1).unwrap();

    // Advance target "c" is removed too
    player.set_playlist(tracks(&["a", "d"])).unwrap();

    let current = player.current_track().unwrap().id.clone();
    assert_ne!(current, "b");
    assert_ne!(current, "c");
    assert!(player.issue().is_none());
}

#[test]
fn test_reordering_keeps_current_track() {
    let (mut player, surface) = setup_player(PlayerConfig::default(), &["a", "b", "c"]);
    player.select_track(1).unwrap();
    surface.clear();

    player.set_playlist(tracks(&["c", "b", "a", "d"])).unwrap();

    assert!(surface.transport_commands().is_empty());
    assert_eq!(player.current_track().unwrap().id, "b");
    let positions: Vec<usize> = player.tracks().iter().map(|t| t.position).collect();
    assert_eq!(positions, vec![1, 2, 3, 4]);
}

#[test]
fn test_shrinking_playlist_clamps_page() {
    let (mut player, _surface) = setup_player(paged(2), &["a", "b", "c", "d", "e"]);
    player.select_track(4).unwrap();
    assert_eq!(player.page_state().page_index, 2);

    player.set_playlist(tracks(&["a", "b", "e"])).unwrap();

    assert_eq!(player.current_index(), Some(2));
    assert_eq!(player.page_state().page_index, 1);
    assert_eq!(player.visible_rows().len(), 1);
}

#[test]
fn test_removing_current_track_realigns_page_to_committed_index() {
    // [A B | C D | E], pointer on B; B is dropped
    let (mut player, surface) = setup_player(paged(2), &["a", "b", "c", "d", "e"]);
    player.select_track(1).unwrap();
    player.run_deferred().unwrap();
    player.drain_events();
    surface.clear();

    player.set_playlist(tracks(&["a", "c", "d", "e"])).unwrap();

    assert_eq!(
        surface.transport_commands(),
        vec![SurfaceCommand::Pause, source("c"), SurfaceCommand::Play]
    );
    assert_eq!(player.current_index(), Some(1));
    assert_eq!(player.page_state().page_index, 0);

    let events = player.drain_events();
    let changed = events.iter().find_map(|e| match e {
        PlayerEvent::TrackChanged { index, track } => Some((*index, track.position)),
        _ => None,
    });
    assert_eq!(changed, Some((1, 2)));
    assert_eq!(events.last(), Some(&PlayerEvent::PageChanged { page_index: 0 }));

    let visible: Vec<_> = player
        .visible_rows()
        .into_iter()
        .map(|row| (row.track.id, row.is_current))
        .collect();
    assert_eq!(
        visible,
        vec![("a".to_string(), false), ("c".to_string(), true)]
    );
}

#[test]
fn test_page_size_choice_keeps_current_track_visible() {
    let config = PlayerConfig {
        page_size_options: vec![2, 3],
        ..Default::default()
    };
    let (mut player, _surface) = setup_player(config, &["a", "b", "c", "d", "e", "f", "g"]);
    player.select_track(5).unwrap();
    assert_eq!(player.page_state().page_index, 2);

    // First row 4 maps to page 1, which holds rows 3..6 at three per page
    assert!(player.set_page_size(3));
    assert_eq!(player.page_state().page_index, 1);
    assert!(player.visible_rows().iter().any(|row| row.is_current));

    assert!(!player.set_page_size(10));
    assert_eq!(player.page_state().page_size, 3);
}

#[test]
fn test_first_playlist_binds_first_track() {
    test_helpers::init_logging();
    let surface = RecordingSurface::new();
    let mut player = PlaylistPlayer::new(PlayerConfig::default(), Box::new(surface.clone()));

    player.set_playlist(tracks(&["a", "b"])).unwrap();

    assert_eq!(player.current_index(), Some(0));
    assert_eq!(surface.transport_commands(), vec![source("a")]);
}
