//! In-memory state store for tests and demos.

use std::sync::Arc;

use parking_lot::Mutex;
use reelflow_core::player::{PlayerState, StateStore, StoreError};

struct Slot {
    state: Option<PlayerState>,
    saves: usize,
}

/// In-memory single-slot store with save accounting.
///
/// Clones share the slot, so a test can keep one clone while the
/// coordinator owns another, mirroring the saved-state handle the
/// original screen carried across recreation.
#[derive(Clone)]
pub struct MemoryStateStore {
    slot: Arc<Mutex<Slot>>,
}

impl MemoryStateStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot {
                state: None,
                saves: 0,
            })),
        }
    }

    /// Seeds the slot as if a previous session had saved this state.
    pub fn preload(&self, state: PlayerState) {
        self.slot.lock().state = Some(state);
    }

    /// Returns the currently saved state, if any.
    pub fn saved(&self) -> Option<PlayerState> {
        self.slot.lock().state.clone()
    }

    /// Returns how many times `save` was called.
    pub fn save_count(&self) -> usize {
        self.slot.lock().saves
    }
}

impl Default for MemoryStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl StateStore for MemoryStateStore {
    async fn load(&self) -> Result<Option<PlayerState>, StoreError> {
        Ok(self.slot.lock().state.clone())
    }

    async fn save(&mut self, state: &PlayerState) -> Result<(), StoreError> {
        let mut slot = self.slot.lock();
        slot.state = Some(state.clone());
        slot.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_overwrites_and_counts() {
        let mut store = MemoryStateStore::new();

        store.save(&PlayerState::initial(true)).await.unwrap();
        store
            .save(&PlayerState::initial(true).at_index(5))
            .await
            .unwrap();

        assert_eq!(store.save_count(), 2);
        assert_eq!(store.saved().unwrap().current_media_index, 5);
    }
}
