//! Playback coordination: resource lifecycle, persisted state, view derivation.
//!
//! The coordinator owns one expensive playback resource at a time (lazy
//! creation, exactly one instance per live interval), threads the
//! resumable `PlayerState` across teardown through the state store, and
//! folds feed updates, the rendering signal, and caller requests into a
//! single published `ViewState`.

pub use actor::spawn_coordinator;
pub use commands::CoordinatorCommand;
pub use coordinator::PlaybackCoordinator;
pub use handle::CoordinatorHandle;
pub use state::{PlayerState, ViewState};
pub use store::{JsonStateStore, StateStore, StoreError};
pub use traits::{MediaPlayer, PlayerError, PlayerFactory};

mod actor;
mod commands;
mod coordinator;
mod handle;
mod state;
mod store;
#[cfg(test)]
mod test_mocks;
mod traits;
