//! Mock implementations for testing the playback coordinator.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use super::state::PlayerState;
use super::store::{StateStore, StoreError};
use super::traits::{MediaPlayer, PlayerError, PlayerFactory};
use crate::feed::ContentItem;

#[derive(Default)]
struct SharedPlayer {
    state: PlayerState,
    loads: Vec<Vec<ContentItem>>,
    released: bool,
}

/// Mock player whose observable side effects are recorded for assertions.
pub struct MockPlayer {
    shared: Arc<Mutex<SharedPlayer>>,
    rendering_tx: Arc<watch::Sender<bool>>,
}

impl MediaPlayer for MockPlayer {
    fn load(&mut self, items: &[ContentItem]) {
        self.shared.lock().unwrap().loads.push(items.to_vec());
    }

    fn player_state(&self) -> PlayerState {
        self.shared.lock().unwrap().state.clone()
    }

    fn set_state(&mut self, state: PlayerState) {
        self.shared.lock().unwrap().state = state;
    }

    fn release(&mut self) {
        self.shared.lock().unwrap().released = true;
    }

    fn rendering_updates(&self) -> watch::Receiver<bool> {
        self.rendering_tx.subscribe()
    }
}

/// Mock factory handing out players that all report into one probe.
#[derive(Clone)]
pub struct MockFactory {
    shared: Arc<Mutex<SharedPlayer>>,
    rendering_tx: Arc<watch::Sender<bool>>,
    created: Arc<AtomicUsize>,
    fail_reason: Arc<Mutex<Option<String>>>,
}

impl MockFactory {
    pub fn new() -> Self {
        let (rendering_tx, _) = watch::channel(false);
        Self {
            shared: Arc::new(Mutex::new(SharedPlayer::default())),
            rendering_tx: Arc::new(rendering_tx),
            created: Arc::new(AtomicUsize::new(0)),
            fail_reason: Arc::new(Mutex::new(None)),
        }
    }

    /// Makes the next `create` call fail with the given reason.
    pub fn fail_next_create(&self, reason: &str) {
        *self.fail_reason.lock().unwrap() = Some(reason.to_string());
    }

    /// Returns a probe observing the manufactured player's side effects.
    pub fn probe(&self) -> MockProbe {
        MockProbe {
            shared: Arc::clone(&self.shared),
            rendering_tx: Arc::clone(&self.rendering_tx),
        }
    }
}

#[async_trait::async_trait]
impl PlayerFactory for MockFactory {
    type Player = MockPlayer;

    async fn create(&mut self) -> Result<Self::Player, PlayerError> {
        if let Some(reason) = self.fail_reason.lock().unwrap().take() {
            return Err(PlayerError::CreationFailed { reason });
        }

        self.created.fetch_add(1, Ordering::SeqCst);
        self.shared.lock().unwrap().released = false;
        Ok(MockPlayer {
            shared: Arc::clone(&self.shared),
            rendering_tx: Arc::clone(&self.rendering_tx),
        })
    }

    fn created_count(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

/// Observation handle shared by a mock factory and its players.
pub struct MockProbe {
    shared: Arc<Mutex<SharedPlayer>>,
    rendering_tx: Arc<watch::Sender<bool>>,
}

impl MockProbe {
    pub fn player_state(&self) -> PlayerState {
        self.shared.lock().unwrap().state.clone()
    }

    pub fn set_player_state(&self, state: PlayerState) {
        self.shared.lock().unwrap().state = state;
    }

    pub fn last_load(&self) -> Option<Vec<ContentItem>> {
        self.shared.lock().unwrap().loads.last().cloned()
    }

    pub fn released(&self) -> bool {
        self.shared.lock().unwrap().released
    }

    /// Drives the mock rendering signal.
    pub fn set_rendering(&self, is_rendering: bool) {
        self.rendering_tx.send_replace(is_rendering);
    }
}

/// In-memory state store with save accounting.
#[derive(Clone)]
pub struct MockStore {
    slot: Arc<Mutex<Option<PlayerState>>>,
    saves: Arc<AtomicUsize>,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            saves: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn preload(&self, state: PlayerState) {
        *self.slot.lock().unwrap() = Some(state);
    }

    pub fn saved(&self) -> Option<PlayerState> {
        self.slot.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl StateStore for MockStore {
    async fn load(&self) -> Result<Option<PlayerState>, StoreError> {
        Ok(self.slot.lock().unwrap().clone())
    }

    async fn save(&mut self, state: &PlayerState) -> Result<(), StoreError> {
        *self.slot.lock().unwrap() = Some(state.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
