//! Core abstractions for the playback pipeline.
//!
//! These traits form the seam between the coordinator and the actual
//! media engine. The coordinator only ever talks to the capability
//! interface below, so any conforming implementation is substitutable:
//! a real decoder-backed player in the app, recorded fakes in tests.

use thiserror::Error;
use tokio::sync::watch;

use super::state::PlayerState;
use crate::feed::ContentItem;

/// The live playback-capable resource handle.
///
/// At most one instance is live per coordinator lifetime segment. The
/// coordinator exclusively owns the handle once created; playback state
/// is read and written through it, and `release` frees the underlying
/// decoding means.
pub trait MediaPlayer: Send {
    /// Supplies the player with its playback candidates.
    ///
    /// Called on creation when the feed already holds items, and again on
    /// every feed emission while the player is live, so the most recent
    /// call always reflects the newest sequence.
    fn load(&mut self, items: &[ContentItem]);

    /// Returns the current resumable snapshot.
    fn player_state(&self) -> PlayerState;

    /// Overwrites the tracked playback state.
    fn set_state(&mut self, state: PlayerState);

    /// Releases the underlying playback means.
    ///
    /// The handle is discarded by the coordinator right after; no call
    /// is made on a released player.
    fn release(&mut self);

    /// Returns a receiver observing the "currently rendering" signal.
    ///
    /// The signal is `true` while the player is actively putting frames
    /// on screen. Latest value wins; the coordinator folds transitions
    /// into `ViewState.show_player`.
    fn rendering_updates(&self) -> watch::Receiver<bool>;
}

/// Manufactures player instances on demand.
///
/// The factory holds no ongoing ownership of what it creates; it only
/// tracks how many instances it has manufactured so lifecycle invariants
/// (exactly one creation per live interval) are verifiable.
#[async_trait::async_trait]
pub trait PlayerFactory: Send {
    /// Concrete player type this factory manufactures.
    type Player: MediaPlayer;

    /// Creates a new player instance.
    ///
    /// # Errors
    ///
    /// - `PlayerError::CreationFailed` - The underlying engine could not be brought up
    async fn create(&mut self) -> Result<Self::Player, PlayerError>;

    /// Returns how many players this factory has created.
    fn created_count(&self) -> usize;
}

/// Errors surfaced by the playback coordinator.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// The player factory could not produce an instance.
    ///
    /// Surfaced from `acquire()` instead of crashing; the coordinator
    /// stays idle and a later acquire may succeed.
    #[error("player creation failed: {reason}")]
    CreationFailed {
        /// Reason reported by the factory
        reason: String,
    },

    /// The coordinator actor is no longer running.
    ///
    /// Returned by handle operations once the command channel is closed,
    /// either after an explicit shutdown or after the actor task exited.
    #[error("playback coordinator is shut down")]
    CoordinatorShutdown,
}
