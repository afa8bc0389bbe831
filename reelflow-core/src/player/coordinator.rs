//! Core playback coordination state machine.
//!
//! `PlaybackCoordinator` owns the player slot, the persisted-state
//! boundary, and the derived `ViewState`. It is mutated only by its actor
//! task, so every transition is applied and published atomically with
//! respect to each input emission. The slot is an explicit two-state
//! variant: the player handle exists only while `Live`.

use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::state::{PlayerState, ViewState};
use super::store::StateStore;
use super::traits::{MediaPlayer, PlayerError, PlayerFactory};
use crate::config::CoordinatorConfig;
use crate::feed::ContentItem;

/// Lifecycle slot for the playback resource.
///
/// `Live` is re-entered fresh on each acquire following a release; the
/// resumable state crosses the boundary through the store, never in
/// memory.
enum PlayerSlot<P> {
    Idle,
    Live { player: P, session_id: Uuid },
}

/// Single-owner coordinator for one playback screen.
///
/// Folds three independent inputs into one published `ViewState`: the
/// content feed's latest sequence, the live player's rendering signal,
/// and caller-driven position/tap requests. All mutation happens on the
/// actor task that owns this value.
pub struct PlaybackCoordinator<F, S>
where
    F: PlayerFactory,
    S: StateStore,
{
    config: CoordinatorConfig,
    factory: F,
    store: S,
    slot: PlayerSlot<F::Player>,
    show_player: bool,
    video_data: Vec<ContentItem>,
    view_tx: watch::Sender<ViewState>,
}

impl<F, S> PlaybackCoordinator<F, S>
where
    F: PlayerFactory,
    S: StateStore,
{
    /// Creates an idle coordinator publishing the default view state.
    pub fn new(config: CoordinatorConfig, factory: F, store: S) -> Self {
        let (view_tx, _) = watch::channel(ViewState::default());

        Self {
            config,
            factory,
            store,
            slot: PlayerSlot::Idle,
            show_player: false,
            video_data: Vec::new(),
            view_tx,
        }
    }

    /// Returns a receiver observing the published view state.
    pub fn view_states(&self) -> watch::Receiver<ViewState> {
        self.view_tx.subscribe()
    }

    /// Returns whether a player is currently live.
    pub fn is_live(&self) -> bool {
        matches!(self.slot, PlayerSlot::Live { .. })
    }

    /// Idempotently brings up the playback resource.
    ///
    /// When idle: requests one player from the factory, seeds it with the
    /// stored snapshot (or the initial state), loads the current feed
    /// sequence, and enters `Live`. Returns the rendering receiver for the
    /// actor loop to watch. When already live: returns `None` without a
    /// second factory call or re-seed.
    ///
    /// # Errors
    ///
    /// - `PlayerError::CreationFailed` - The factory could not produce a player;
    ///   the coordinator stays idle and a later acquire may succeed
    pub async fn acquire(&mut self) -> Result<Option<watch::Receiver<bool>>, PlayerError> {
        if self.is_live() {
            debug!("Acquire with live player, reusing cached instance");
            return Ok(None);
        }

        let mut player = self.factory.create().await?;
        let session_id = Uuid::new_v4();

        let seed = match self.store.load().await {
            Ok(Some(state)) => state,
            Ok(None) => PlayerState::initial(self.config.autoplay),
            Err(error) => {
                warn!(%error, "Failed to load playback snapshot, starting fresh");
                PlayerState::initial(self.config.autoplay)
            }
        };
        info!(
            session = %session_id,
            index = seed.current_media_index,
            position_ms = seed.seek_position_millis,
            "Player created and seeded"
        );
        player.set_state(seed);

        if !self.video_data.is_empty() {
            player.load(&self.video_data);
        }

        let rendering_rx = player.rendering_updates();
        // Fold the signal's current value; transitions arrive via the actor loop.
        self.show_player = *rendering_rx.borrow();
        self.slot = PlayerSlot::Live { player, session_id };
        self.publish();

        Ok(Some(rendering_rx))
    }

    /// Tears the playback resource down, capturing its state first.
    ///
    /// No-op while idle: no store write, no publish. Otherwise the
    /// player's current snapshot is saved (a failed save is logged, not
    /// fatal), the underlying means are released, and the slot returns to
    /// `Idle` with the player hidden.
    pub async fn release(&mut self) {
        match std::mem::replace(&mut self.slot, PlayerSlot::Idle) {
            PlayerSlot::Idle => {
                debug!("Release with no live player, nothing to do");
            }
            PlayerSlot::Live {
                mut player,
                session_id,
            } => {
                let state = player.player_state();
                if let Err(error) = self.store.save(&state).await {
                    warn!(%error, "Failed to save playback snapshot on teardown");
                }
                player.release();
                self.show_player = false;
                self.publish();
                info!(
                    session = %session_id,
                    index = state.current_media_index,
                    "Player released, snapshot captured"
                );
            }
        }
    }

    /// Applies a new content sequence from the feed.
    ///
    /// The view state reflects the sequence immediately even with no live
    /// player; a live player is re-loaded so its playback candidates stay
    /// in sync with the feed.
    pub fn content_changed(&mut self, items: Vec<ContentItem>) {
        self.video_data = items;
        if let PlayerSlot::Live { player, .. } = &mut self.slot {
            player.load(&self.video_data);
        }
        debug!(items = self.video_data.len(), "Content sequence updated");
        self.publish();
    }

    /// Folds a rendering-signal emission from the live player.
    pub fn rendering_changed(&mut self, is_rendering: bool) {
        if !self.is_live() {
            return;
        }
        self.show_player = is_rendering;
        self.publish();
    }

    /// Requests a change of the tracked media position.
    ///
    /// A genuine change (different index) hides the player until rendering
    /// resumes and writes the new index into the player's state. Requesting
    /// the current index is a no-op so the player is never spuriously
    /// hidden.
    pub fn change_position(&mut self, index: usize) {
        let PlayerSlot::Live { player, .. } = &mut self.slot else {
            debug!(index, "Position change with no live player, ignoring");
            return;
        };

        let state = player.player_state();
        if state.current_media_index == index {
            debug!(index, "Position unchanged, player stays visible");
            return;
        }

        player.set_state(state.at_index(index));
        self.show_player = false;
        debug!(
            from = state.current_media_index,
            to = index,
            "Position changed, hiding player until rendering resumes"
        );
        self.publish();
    }

    /// Flips play/pause on the live player.
    ///
    /// Returns `true` when the state was toggled. With no live player this
    /// is a benign no-op returning `false`, tolerated by design rather
    /// than treated as a failure.
    pub fn toggle_playback(&mut self) -> bool {
        let PlayerSlot::Live { player, .. } = &mut self.slot else {
            debug!("Tap with no live player, ignoring");
            return false;
        };

        let toggled = player.player_state().toggled();
        debug!(is_playing = toggled.is_playing, "Playback toggled");
        player.set_state(toggled);
        true
    }

    /// Recomputes and publishes the view state wholesale.
    fn publish(&mut self) {
        self.view_tx
            .send_replace(ViewState::derive(self.is_live(), self.show_player, &self.video_data));
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_mocks::{MockFactory, MockStore};
    use super::*;
    use crate::feed::ContentItem;

    fn coordinator() -> (
        PlaybackCoordinator<MockFactory, MockStore>,
        MockFactory,
        MockStore,
    ) {
        let factory = MockFactory::new();
        let store = MockStore::new();
        let coordinator =
            PlaybackCoordinator::new(CoordinatorConfig::default(), factory.clone(), store.clone());
        (coordinator, factory, store)
    }

    fn test_items() -> Vec<ContentItem> {
        vec![
            ContentItem::new("one.mp4", "one.png"),
            ContentItem::new("two.mp4", "two.png"),
        ]
    }

    #[tokio::test]
    async fn acquire_is_idempotent_per_live_interval() {
        let (mut coordinator, factory, _store) = coordinator();

        coordinator.acquire().await.unwrap();
        coordinator.acquire().await.unwrap();

        assert_eq!(factory.created_count(), 1);
    }

    #[tokio::test]
    async fn acquire_after_release_creates_fresh_player() {
        let (mut coordinator, factory, _store) = coordinator();

        coordinator.acquire().await.unwrap();
        coordinator.release().await;
        coordinator.acquire().await.unwrap();

        assert_eq!(factory.created_count(), 2);
    }

    #[tokio::test]
    async fn release_saves_state_and_releases_player() {
        let (mut coordinator, factory, store) = coordinator();
        let state = PlayerState {
            current_media_item_id: "x".to_string(),
            current_media_index: 0,
            seek_position_millis: 60,
            is_playing: false,
        };

        coordinator.acquire().await.unwrap();
        factory.probe().set_player_state(state.clone());
        coordinator.release().await;

        assert_eq!(store.saved(), Some(state));
        assert!(factory.probe().released());
    }

    #[tokio::test]
    async fn release_while_idle_writes_nothing() {
        let (mut coordinator, _factory, store) = coordinator();

        coordinator.release().await;
        coordinator.release().await;

        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn acquire_restores_saved_state() {
        let (mut coordinator, factory, store) = coordinator();
        let saved = PlayerState {
            current_media_item_id: "resume".to_string(),
            current_media_index: 4,
            seek_position_millis: 1500,
            is_playing: true,
        };
        store.preload(saved.clone());

        coordinator.acquire().await.unwrap();

        assert_eq!(factory.probe().player_state(), saved);
    }

    #[tokio::test]
    async fn acquire_seeds_initial_state_from_autoplay() {
        let factory = MockFactory::new();
        let store = MockStore::new();
        let config = CoordinatorConfig {
            autoplay: false,
            ..CoordinatorConfig::default()
        };
        let mut coordinator = PlaybackCoordinator::new(config, factory.clone(), store);

        coordinator.acquire().await.unwrap();

        assert!(!factory.probe().player_state().is_playing);
    }

    #[tokio::test]
    async fn acquire_loads_existing_feed_items() {
        let (mut coordinator, factory, _store) = coordinator();
        coordinator.content_changed(test_items());

        coordinator.acquire().await.unwrap();

        assert_eq!(factory.probe().last_load(), Some(test_items()));
    }

    #[tokio::test]
    async fn creation_failure_leaves_coordinator_idle() {
        let (mut coordinator, factory, _store) = coordinator();
        factory.fail_next_create("engine unavailable");

        let result = coordinator.acquire().await;

        assert!(matches!(result, Err(PlayerError::CreationFailed { .. })));
        assert!(!coordinator.is_live());

        // A later acquire succeeds.
        coordinator.acquire().await.unwrap();
        assert!(coordinator.is_live());
    }

    #[tokio::test]
    async fn content_update_reaches_view_state_without_player() {
        let (mut coordinator, _factory, _store) = coordinator();
        let view = coordinator.view_states();

        coordinator.content_changed(test_items());

        assert_eq!(view.borrow().video_data, test_items());
        assert!(!view.borrow().show_player);
    }

    #[tokio::test]
    async fn content_update_reloads_live_player() {
        let (mut coordinator, factory, _store) = coordinator();
        coordinator.acquire().await.unwrap();

        let mut items = test_items();
        coordinator.content_changed(items.clone());
        items.push(ContentItem::new("three.mp4", "three.png"));
        coordinator.content_changed(items.clone());

        assert_eq!(factory.probe().last_load(), Some(items));
    }

    #[tokio::test]
    async fn position_change_hides_player() {
        let (mut coordinator, factory, _store) = coordinator();
        coordinator.acquire().await.unwrap();
        factory.probe().set_player_state(PlayerState::default().at_index(7));
        coordinator.rendering_changed(true);

        coordinator.change_position(42);

        assert!(!coordinator.view_states().borrow().show_player);
    }

    #[tokio::test]
    async fn same_position_change_is_not_a_spurious_hide() {
        let (mut coordinator, factory, _store) = coordinator();
        coordinator.acquire().await.unwrap();
        factory.probe().set_player_state(PlayerState::default().at_index(7));
        coordinator.rendering_changed(true);

        coordinator.change_position(7);

        assert!(coordinator.view_states().borrow().show_player);
    }

    #[tokio::test]
    async fn rendering_signal_shows_player_while_live() {
        let (mut coordinator, _factory, _store) = coordinator();
        coordinator.acquire().await.unwrap();

        coordinator.rendering_changed(true);
        assert!(coordinator.view_states().borrow().show_player);

        coordinator.rendering_changed(false);
        assert!(!coordinator.view_states().borrow().show_player);
    }

    #[tokio::test]
    async fn release_hides_player() {
        let (mut coordinator, _factory, _store) = coordinator();
        coordinator.acquire().await.unwrap();
        coordinator.rendering_changed(true);

        coordinator.release().await;

        assert!(!coordinator.view_states().borrow().show_player);
    }

    #[tokio::test]
    async fn toggle_flips_and_strictly_alternates() {
        let (mut coordinator, factory, _store) = coordinator();
        coordinator.acquire().await.unwrap();
        let initial = factory.probe().player_state().is_playing;

        assert!(coordinator.toggle_playback());
        assert_eq!(factory.probe().player_state().is_playing, !initial);

        assert!(coordinator.toggle_playback());
        assert_eq!(factory.probe().player_state().is_playing, initial);
    }

    #[tokio::test]
    async fn toggle_without_player_is_a_noop() {
        let (mut coordinator, _factory, _store) = coordinator();

        assert!(!coordinator.toggle_playback());
    }
}
