//! Command definitions for the playback coordinator actor model.

use tokio::sync::oneshot;

use super::traits::PlayerError;

/// Commands that can be sent to the playback coordinator actor.
///
/// Each command encapsulates an operation request along with a response
/// channel for the actor to send back results. Message passing keeps all
/// coordinator state on one task, so no transition interleaves with
/// another and no locks are needed.
pub enum CoordinatorCommand {
    /// Bring up the playback resource (idempotent while live).
    Acquire {
        responder: oneshot::Sender<Result<(), PlayerError>>,
    },
    /// Tear the playback resource down, capturing its state.
    Release { responder: oneshot::Sender<()> },
    /// Request a change of the tracked media position.
    ChangePosition {
        index: usize,
        responder: oneshot::Sender<()>,
    },
    /// Flip play/pause on the live player; responds whether anything toggled.
    TogglePlayback { responder: oneshot::Sender<bool> },
    /// Shut the coordinator actor down gracefully.
    Shutdown { responder: oneshot::Sender<()> },
}
