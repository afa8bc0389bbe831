//! Durable storage for the resumable playback snapshot.
//!
//! The store is a single-slot key-value boundary: one `PlayerState`
//! survives the coordinator's destruction and recreation. The production
//! implementation keeps a JSON file on disk and stages writes through a
//! temporary file so a crash mid-write never corrupts the slot.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::state::PlayerState;
use crate::config::StoreConfig;

/// Errors that can occur reading or writing the state slot.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying file operation failed.
    #[error("state store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The slot contents could not be serialized or parsed.
    #[error("state store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable single-slot store for the resumable playback snapshot.
///
/// `load` returns `None` when no snapshot was ever saved; `save`
/// overwrites any prior value.
#[async_trait::async_trait]
pub trait StateStore: Send {
    /// Reads the most recently saved snapshot, if any.
    ///
    /// # Errors
    ///
    /// - `StoreError::Io` - The slot exists but could not be read
    /// - `StoreError::Serialization` - The slot contents are malformed
    async fn load(&self) -> Result<Option<PlayerState>, StoreError>;

    /// Overwrites the slot with a new snapshot.
    ///
    /// # Errors
    ///
    /// - `StoreError::Io` - The snapshot could not be written
    /// - `StoreError::Serialization` - The snapshot could not be encoded
    async fn save(&mut self, state: &PlayerState) -> Result<(), StoreError>;
}

/// On-disk envelope around the saved snapshot.
///
/// Keeps a timestamp alongside the state so a stale slot is identifiable
/// when debugging resume behavior.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedState {
    state: PlayerState,
    saved_at: DateTime<Utc>,
}

/// JSON-file-backed state store.
///
/// Writes go to `<state_path><temp_file_suffix>` first and are renamed
/// into place, so readers never observe a half-written slot.
#[derive(Debug)]
pub struct JsonStateStore {
    state_path: PathBuf,
    temp_path: PathBuf,
}

impl JsonStateStore {
    /// Creates a store rooted at the configured snapshot path.
    pub fn new(config: &StoreConfig) -> Self {
        let mut temp_name = config.state_path.as_os_str().to_owned();
        temp_name.push(config.temp_file_suffix);

        Self {
            state_path: config.state_path.clone(),
            temp_path: PathBuf::from(temp_name),
        }
    }
}

#[async_trait::async_trait]
impl StateStore for JsonStateStore {
    async fn load(&self) -> Result<Option<PlayerState>, StoreError> {
        let contents = match tokio::fs::read_to_string(&self.state_path).await {
            Ok(contents) => contents,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        let envelope: PersistedState = serde_json::from_str(&contents)?;
        debug!(
            saved_at = %envelope.saved_at,
            index = envelope.state.current_media_index,
            "Loaded playback snapshot"
        );

        Ok(Some(envelope.state))
    }

    async fn save(&mut self, state: &PlayerState) -> Result<(), StoreError> {
        let envelope = PersistedState {
            state: state.clone(),
            saved_at: Utc::now(),
        };
        let encoded = serde_json::to_vec_pretty(&envelope)?;

        tokio::fs::write(&self.temp_path, encoded).await?;
        tokio::fs::rename(&self.temp_path, &self.state_path).await?;
        debug!(path = %self.state_path.display(), "Saved playback snapshot");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &std::path::Path) -> JsonStateStore {
        let config = StoreConfig {
            state_path: dir.join("state.json"),
            ..StoreConfig::default()
        };
        JsonStateStore::new(&config)
    }

    #[tokio::test]
    async fn missing_slot_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(dir.path());

        let state = PlayerState {
            current_media_item_id: "x".to_string(),
            current_media_index: 3,
            seek_position_millis: 60,
            is_playing: false,
        };
        store.save(&state).await.unwrap();

        assert_eq!(store.load().await.unwrap(), Some(state));
    }

    #[tokio::test]
    async fn save_overwrites_prior_slot() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(dir.path());

        store.save(&PlayerState::initial(true)).await.unwrap();
        let replacement = PlayerState::initial(true).at_index(9);
        store.save(&replacement).await.unwrap();

        assert_eq!(store.load().await.unwrap(), Some(replacement));
        assert!(!store.temp_path.exists());
    }

    #[tokio::test]
    async fn malformed_slot_surfaces_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        tokio::fs::write(dir.path().join("state.json"), b"not json")
            .await
            .unwrap();

        assert!(matches!(
            store.load().await,
            Err(StoreError::Serialization(_))
        ));
    }
}
