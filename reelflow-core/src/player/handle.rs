//! Handle for communicating with the playback coordinator actor.

use tokio::sync::{mpsc, oneshot, watch};

use super::commands::CoordinatorCommand;
use super::state::ViewState;
use super::traits::PlayerError;

/// Handle for communicating with the playback coordinator actor.
///
/// Provides an ergonomic async API for sending commands to the actor.
/// It can be cloned and shared across tasks safely; the published view
/// state is readable synchronously through `view_states`.
#[derive(Clone)]
pub struct CoordinatorHandle {
    sender: mpsc::Sender<CoordinatorCommand>,
    view_rx: watch::Receiver<ViewState>,
}

impl CoordinatorHandle {
    /// Creates a new handle from the command sender and view receiver.
    pub fn new(sender: mpsc::Sender<CoordinatorCommand>, view_rx: watch::Receiver<ViewState>) -> Self {
        Self { sender, view_rx }
    }

    /// Brings up the playback resource.
    ///
    /// Idempotent: while a player is live this returns without creating a
    /// second instance or re-seeding the existing one.
    ///
    /// # Errors
    /// - `PlayerError::CreationFailed` - The factory could not produce a player
    /// - `PlayerError::CoordinatorShutdown` - The actor is no longer running
    pub async fn acquire(&self) -> Result<(), PlayerError> {
        let (responder, rx) = oneshot::channel();
        let cmd = CoordinatorCommand::Acquire { responder };

        self.sender
            .send(cmd)
            .await
            .map_err(|_| PlayerError::CoordinatorShutdown)?;

        rx.await.map_err(|_| PlayerError::CoordinatorShutdown)?
    }

    /// Tears the playback resource down, saving its resumable state.
    ///
    /// A no-op while idle. After this call, a subsequent `acquire` creates
    /// a fresh player restored from the just-saved state.
    ///
    /// # Errors
    /// - `PlayerError::CoordinatorShutdown` - The actor is no longer running
    pub async fn release(&self) -> Result<(), PlayerError> {
        let (responder, rx) = oneshot::channel();
        let cmd = CoordinatorCommand::Release { responder };

        self.sender
            .send(cmd)
            .await
            .map_err(|_| PlayerError::CoordinatorShutdown)?;

        rx.await.map_err(|_| PlayerError::CoordinatorShutdown)
    }

    /// Requests a change of the tracked media position.
    ///
    /// A genuine change hides the player until rendering resumes; a
    /// request for the current position is a no-op.
    ///
    /// # Errors
    /// - `PlayerError::CoordinatorShutdown` - The actor is no longer running
    pub async fn change_position(&self, index: usize) -> Result<(), PlayerError> {
        let (responder, rx) = oneshot::channel();
        let cmd = CoordinatorCommand::ChangePosition { index, responder };

        self.sender
            .send(cmd)
            .await
            .map_err(|_| PlayerError::CoordinatorShutdown)?;

        rx.await.map_err(|_| PlayerError::CoordinatorShutdown)
    }

    /// Flips play/pause on the live player.
    ///
    /// Returns `true` when playback state actually toggled; calling with
    /// no live player is a benign no-op returning `false`.
    ///
    /// # Errors
    /// - `PlayerError::CoordinatorShutdown` - The actor is no longer running
    pub async fn toggle_playback(&self) -> Result<bool, PlayerError> {
        let (responder, rx) = oneshot::channel();
        let cmd = CoordinatorCommand::TogglePlayback { responder };

        self.sender
            .send(cmd)
            .await
            .map_err(|_| PlayerError::CoordinatorShutdown)?;

        rx.await.map_err(|_| PlayerError::CoordinatorShutdown)
    }

    /// Shuts down the coordinator actor gracefully.
    ///
    /// The actor performs a final release (capturing playback state)
    /// before exiting. After this call, all subsequent operations return
    /// `PlayerError::CoordinatorShutdown`.
    ///
    /// # Errors
    /// - `PlayerError::CoordinatorShutdown` - The actor already stopped
    pub async fn shutdown(&self) -> Result<(), PlayerError> {
        let (responder, rx) = oneshot::channel();
        let cmd = CoordinatorCommand::Shutdown { responder };

        self.sender
            .send(cmd)
            .await
            .map_err(|_| PlayerError::CoordinatorShutdown)?;

        rx.await.map_err(|_| PlayerError::CoordinatorShutdown)
    }

    /// Returns a receiver observing the published view state.
    ///
    /// The current value is readable synchronously via `borrow`; changes
    /// are awaited via `changed`.
    pub fn view_states(&self) -> watch::Receiver<ViewState> {
        self.view_rx.clone()
    }

    /// Checks whether the coordinator actor is still running.
    pub fn is_running(&self) -> bool {
        !self.sender.is_closed()
    }
}
