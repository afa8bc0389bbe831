//! Player resource lifecycle tests.
//!
//! Exercises the at-most-one-instance caching contract and the
//! persisted-state boundary: exactly one factory creation per live
//! interval, state captured on teardown, and restoration on the next
//! acquire, including across separate coordinator instances sharing one
//! on-disk store.

use reelflow_core::config::{ReelflowConfig, StoreConfig};
use reelflow_core::feed::ContentFeed;
use reelflow_core::player::{
    CoordinatorHandle, JsonStateStore, PlayerError, PlayerState, spawn_coordinator,
};
use reelflow_sim::{FakePlayerFactory, FakePlayerProbe, MemoryStateStore};

fn spawn_with_fakes() -> (CoordinatorHandle, FakePlayerProbe, MemoryStateStore) {
    let factory = FakePlayerFactory::new();
    let probe = factory.probe();
    let store = MemoryStateStore::new();
    let feed = ContentFeed::default();
    let handle = spawn_coordinator(
        ReelflowConfig::default(),
        factory,
        store.clone(),
        feed.subscribe(),
    );
    (handle, probe, store)
}

fn resumable_state() -> PlayerState {
    PlayerState {
        current_media_item_id: "x".to_string(),
        current_media_index: 0,
        seek_position_millis: 60,
        is_playing: false,
    }
}

#[tokio::test]
async fn repeated_acquires_create_exactly_one_player() {
    let (handle, probe, _store) = spawn_with_fakes();

    handle.acquire().await.unwrap();
    handle.acquire().await.unwrap();
    handle.acquire().await.unwrap();

    assert_eq!(probe.created_count(), 1);
}

#[tokio::test]
async fn acquire_after_release_creates_a_fresh_player() {
    let (handle, probe, _store) = spawn_with_fakes();

    handle.acquire().await.unwrap();
    handle.release().await.unwrap();
    handle.acquire().await.unwrap();

    assert_eq!(probe.created_count(), 2);
}

#[tokio::test]
async fn release_tears_the_player_down() {
    let (handle, probe, _store) = spawn_with_fakes();

    handle.acquire().await.unwrap();
    handle.release().await.unwrap();

    assert!(probe.released());
}

#[tokio::test]
async fn release_saves_the_current_player_state() {
    let (handle, probe, store) = spawn_with_fakes();

    handle.acquire().await.unwrap();
    probe.set_player_state(resumable_state());
    handle.release().await.unwrap();

    assert_eq!(store.saved(), Some(resumable_state()));
}

#[tokio::test]
async fn acquire_after_release_restores_the_saved_state() {
    let (handle, probe, _store) = spawn_with_fakes();

    handle.acquire().await.unwrap();
    probe.set_player_state(resumable_state());
    handle.release().await.unwrap();

    // The fresh player is seeded with exactly the state just saved.
    handle.acquire().await.unwrap();
    assert_eq!(probe.player_state(), resumable_state());
}

#[tokio::test]
async fn acquire_seeds_a_preloaded_store_state() {
    let (handle, probe, store) = spawn_with_fakes();
    let saved = resumable_state();
    store.preload(saved.clone());

    handle.acquire().await.unwrap();

    assert_eq!(probe.player_state(), saved);
}

#[tokio::test]
async fn release_without_player_is_an_idempotent_noop() {
    let (handle, _probe, store) = spawn_with_fakes();

    handle.release().await.unwrap();
    handle.release().await.unwrap();

    assert_eq!(store.save_count(), 0);
}

#[tokio::test]
async fn creation_failure_surfaces_without_entering_live() {
    let factory = FakePlayerFactory::new();
    let probe = factory.probe();
    factory.fail_next_create("decoder unavailable");
    let feed = ContentFeed::default();
    let handle = spawn_coordinator(
        ReelflowConfig::default(),
        factory,
        MemoryStateStore::new(),
        feed.subscribe(),
    );

    let result = handle.acquire().await;
    assert!(matches!(result, Err(PlayerError::CreationFailed { .. })));
    assert_eq!(probe.created_count(), 0);

    // The failure is transient; the coordinator recovers on retry.
    handle.acquire().await.unwrap();
    assert_eq!(probe.created_count(), 1);
}

#[tokio::test]
async fn state_survives_coordinator_recreation_through_disk_store() {
    let dir = tempfile::tempdir().unwrap();
    let store_config = StoreConfig {
        state_path: dir.path().join("state.json"),
        ..StoreConfig::default()
    };

    // First coordinator instance: play, then shut down.
    {
        let factory = FakePlayerFactory::new();
        let probe = factory.probe();
        let feed = ContentFeed::default();
        let handle = spawn_coordinator(
            ReelflowConfig::default(),
            factory,
            JsonStateStore::new(&store_config),
            feed.subscribe(),
        );

        handle.acquire().await.unwrap();
        probe.set_player_state(resumable_state());
        handle.shutdown().await.unwrap();
        tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
    }

    // Second instance over the same slot resumes where the first stopped.
    let factory = FakePlayerFactory::new();
    let probe = factory.probe();
    let feed = ContentFeed::default();
    let handle = spawn_coordinator(
        ReelflowConfig::default(),
        factory,
        JsonStateStore::new(&store_config),
        feed.subscribe(),
    );

    handle.acquire().await.unwrap();
    assert_eq!(probe.player_state(), resumable_state());
}
