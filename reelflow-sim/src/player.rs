//! Fake player and factory with recorded side effects.
//!
//! The fake implements the full `MediaPlayer` capability interface and
//! records everything the coordinator does to it: every `load` argument,
//! every state write, and whether the underlying means were released.
//! Observation goes through a shared probe so tests can assert across
//! the actor boundary.

use std::sync::Arc;

use parking_lot::Mutex;
use reelflow_core::feed::ContentItem;
use reelflow_core::player::{MediaPlayer, PlayerError, PlayerFactory, PlayerState};
use tokio::sync::watch;

#[derive(Default)]
struct Recorded {
    state: PlayerState,
    loads: Vec<Vec<ContentItem>>,
    released: bool,
}

struct Shared {
    recorded: Mutex<Recorded>,
    rendering_tx: watch::Sender<bool>,
    created: Mutex<usize>,
    fail_reason: Mutex<Option<String>>,
}

/// Fake playback resource for coordinator testing.
///
/// All manufactured players from one factory report into the same probe,
/// mirroring how a real screen only ever has one live engine at a time.
pub struct FakePlayer {
    shared: Arc<Shared>,
}

impl MediaPlayer for FakePlayer {
    fn load(&mut self, items: &[ContentItem]) {
        self.shared.recorded.lock().loads.push(items.to_vec());
    }

    fn player_state(&self) -> PlayerState {
        self.shared.recorded.lock().state.clone()
    }

    fn set_state(&mut self, state: PlayerState) {
        self.shared.recorded.lock().state = state;
    }

    fn release(&mut self) {
        tracing::debug!("Fake player released");
        self.shared.recorded.lock().released = true;
    }

    fn rendering_updates(&self) -> watch::Receiver<bool> {
        self.shared.rendering_tx.subscribe()
    }
}

/// Factory manufacturing fake players and counting creations.
#[derive(Clone)]
pub struct FakePlayerFactory {
    shared: Arc<Shared>,
}

impl FakePlayerFactory {
    /// Creates a factory whose players start from the default state.
    pub fn new() -> Self {
        let (rendering_tx, _) = watch::channel(false);
        Self {
            shared: Arc::new(Shared {
                recorded: Mutex::new(Recorded::default()),
                rendering_tx,
                created: Mutex::new(0),
                fail_reason: Mutex::new(None),
            }),
        }
    }

    /// Makes the next `create` call fail with the given reason.
    ///
    /// Useful for exercising the coordinator's resource-unavailable path.
    /// The failure is cleared after one create attempt.
    pub fn fail_next_create(&self, reason: &str) {
        *self.shared.fail_reason.lock() = Some(reason.to_string());
    }

    /// Returns a probe observing the manufactured players.
    pub fn probe(&self) -> FakePlayerProbe {
        FakePlayerProbe {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Default for FakePlayerFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PlayerFactory for FakePlayerFactory {
    type Player = FakePlayer;

    async fn create(&mut self) -> Result<Self::Player, PlayerError> {
        if let Some(reason) = self.shared.fail_reason.lock().take() {
            return Err(PlayerError::CreationFailed { reason });
        }

        *self.shared.created.lock() += 1;
        self.shared.recorded.lock().released = false;
        Ok(FakePlayer {
            shared: Arc::clone(&self.shared),
        })
    }

    fn created_count(&self) -> usize {
        *self.shared.created.lock()
    }
}

/// Observation handle into a fake factory's players.
///
/// Cloneable and cheap; safe to keep on the test side while the factory
/// itself has been moved into the coordinator actor.
#[derive(Clone)]
pub struct FakePlayerProbe {
    shared: Arc<Shared>,
}

impl FakePlayerProbe {
    /// Returns the player's current tracked state.
    pub fn player_state(&self) -> PlayerState {
        self.shared.recorded.lock().state.clone()
    }

    /// Overwrites the player's tracked state from the outside.
    ///
    /// Stands in for the playback engine advancing position on its own.
    pub fn set_player_state(&self, state: PlayerState) {
        self.shared.recorded.lock().state = state;
    }

    /// Returns every `load` argument in call order.
    pub fn loads(&self) -> Vec<Vec<ContentItem>> {
        self.shared.recorded.lock().loads.clone()
    }

    /// Returns the most recent `load` argument, if any.
    pub fn last_load(&self) -> Option<Vec<ContentItem>> {
        self.shared.recorded.lock().loads.last().cloned()
    }

    /// Returns whether the player released its underlying means.
    pub fn released(&self) -> bool {
        self.shared.recorded.lock().released
    }

    /// Returns how many players the factory manufactured.
    pub fn created_count(&self) -> usize {
        *self.shared.created.lock()
    }

    /// Drives the fake rendering signal.
    pub fn set_rendering(&self, is_rendering: bool) {
        self.shared.rendering_tx.send_replace(is_rendering);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn factory_counts_creations_and_resets_release_flag() {
        let mut factory = FakePlayerFactory::new();

        let mut player = factory.create().await.unwrap();
        player.release();
        assert!(factory.probe().released());

        factory.create().await.unwrap();
        assert_eq!(factory.created_count(), 2);
        assert!(!factory.probe().released());
    }

    #[tokio::test]
    async fn fail_next_create_is_one_shot() {
        let mut factory = FakePlayerFactory::new();
        factory.fail_next_create("no decoder");

        assert!(factory.create().await.is_err());
        assert!(factory.create().await.is_ok());
        assert_eq!(factory.created_count(), 1);
    }

    #[tokio::test]
    async fn probe_observes_loads_in_order() {
        let mut factory = FakePlayerFactory::new();
        let mut player = factory.create().await.unwrap();

        player.load(&[ContentItem::new("a.mp4", "a.png")]);
        player.load(&[
            ContentItem::new("a.mp4", "a.png"),
            ContentItem::new("b.mp4", "b.png"),
        ]);

        let loads = factory.probe().loads();
        assert_eq!(loads.len(), 2);
        assert_eq!(loads[1].len(), 2);
    }
}
