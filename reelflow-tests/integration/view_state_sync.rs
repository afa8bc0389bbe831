//! View-state derivation tests.
//!
//! Verifies the fold of the three input signals into the published
//! `ViewState`: feed emissions land in `video_data` immediately and
//! re-load a live player, the rendering signal controls visibility, and
//! position changes hide the player only when genuine.

use reelflow_core::config::ReelflowConfig;
use reelflow_core::feed::{ContentFeed, ContentItem};
use reelflow_core::player::{CoordinatorHandle, PlayerState, spawn_coordinator};
use reelflow_sim::{FakePlayerFactory, FakePlayerProbe, MemoryStateStore, sample_items};

fn spawn_with_feed(feed: &ContentFeed) -> (CoordinatorHandle, FakePlayerProbe) {
    let factory = FakePlayerFactory::new();
    let probe = factory.probe();
    let handle = spawn_coordinator(
        ReelflowConfig::default(),
        factory,
        MemoryStateStore::new(),
        feed.subscribe(),
    );
    (handle, probe)
}

/// Brings the coordinator to "live and visibly rendering at `index`".
async fn live_and_rendering_at(
    handle: &CoordinatorHandle,
    probe: &FakePlayerProbe,
    index: usize,
) {
    handle.acquire().await.unwrap();
    probe.set_player_state(PlayerState::default().at_index(index));
    probe.set_rendering(true);
    handle
        .view_states()
        .wait_for(|view| view.show_player)
        .await
        .unwrap();
}

#[tokio::test]
async fn feed_emission_lands_in_view_state_without_player() {
    let feed = ContentFeed::default();
    let (handle, probe) = spawn_with_feed(&feed);
    let mut view = handle.view_states();

    feed.publish(sample_items(4));

    view.wait_for(|view| view.video_data == sample_items(4))
        .await
        .unwrap();
    assert_eq!(probe.created_count(), 0);
}

#[tokio::test]
async fn feed_emission_reloads_the_live_player() {
    let feed = ContentFeed::default();
    let (handle, probe) = spawn_with_feed(&feed);
    handle.acquire().await.unwrap();

    let mut items = sample_items(2);
    items.push(ContentItem::new("extra.mp4", "extra.png"));
    feed.publish(items.clone());

    handle
        .view_states()
        .wait_for(|view| view.video_data.len() == 3)
        .await
        .unwrap();
    assert_eq!(probe.last_load(), Some(items));
}

#[tokio::test]
async fn acquire_with_cached_feed_loads_the_player() {
    let feed = ContentFeed::new(sample_items(3));
    let (handle, probe) = spawn_with_feed(&feed);

    // Let the actor fold the pre-existing sequence first.
    handle
        .view_states()
        .wait_for(|view| view.video_data.len() == 3)
        .await
        .unwrap();
    handle.acquire().await.unwrap();

    assert_eq!(probe.last_load(), Some(sample_items(3)));
}

#[tokio::test]
async fn player_shows_when_rendering_starts() {
    let feed = ContentFeed::default();
    let (handle, probe) = spawn_with_feed(&feed);
    let mut view = handle.view_states();

    handle.acquire().await.unwrap();
    assert!(!view.borrow().show_player);

    probe.set_rendering(true);
    view.wait_for(|view| view.show_player).await.unwrap();
}

#[tokio::test]
async fn genuine_position_change_hides_the_player() {
    let feed = ContentFeed::default();
    let (handle, probe) = spawn_with_feed(&feed);
    live_and_rendering_at(&handle, &probe, 7).await;

    handle.change_position(42).await.unwrap();

    assert!(!handle.view_states().borrow().show_player);
    assert_eq!(probe.player_state().current_media_index, 42);
}

#[tokio::test]
async fn same_position_change_does_not_hide_the_player() {
    let feed = ContentFeed::default();
    let (handle, probe) = spawn_with_feed(&feed);
    live_and_rendering_at(&handle, &probe, 7).await;

    handle.change_position(7).await.unwrap();

    assert!(handle.view_states().borrow().show_player);
}

#[tokio::test]
async fn position_change_without_player_is_ignored() {
    let feed = ContentFeed::default();
    let (handle, probe) = spawn_with_feed(&feed);

    handle.change_position(3).await.unwrap();

    assert!(!handle.view_states().borrow().show_player);
    assert_eq!(probe.created_count(), 0);
}

#[tokio::test]
async fn release_hides_the_player_immediately() {
    let feed = ContentFeed::default();
    let (handle, probe) = spawn_with_feed(&feed);
    live_and_rendering_at(&handle, &probe, 0).await;

    handle.release().await.unwrap();

    assert!(!handle.view_states().borrow().show_player);
}

#[tokio::test]
async fn tap_strictly_alternates_playback() {
    let feed = ContentFeed::default();
    let (handle, probe) = spawn_with_feed(&feed);
    handle.acquire().await.unwrap();
    let initial = probe.player_state().is_playing;

    assert!(handle.toggle_playback().await.unwrap());
    assert_eq!(probe.player_state().is_playing, !initial);

    assert!(handle.toggle_playback().await.unwrap());
    assert_eq!(probe.player_state().is_playing, initial);

    assert!(handle.toggle_playback().await.unwrap());
    assert_eq!(probe.player_state().is_playing, !initial);
}

#[tokio::test]
async fn tap_without_player_reports_a_noop() {
    let feed = ContentFeed::default();
    let (handle, _probe) = spawn_with_feed(&feed);

    assert!(!handle.toggle_playback().await.unwrap());
}
