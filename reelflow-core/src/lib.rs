//! Reelflow Core - Playback view-state coordination
//!
//! This crate provides the building blocks for a feed-driven playback
//! screen: the content feed types, the playback coordinator actor that
//! owns the player resource lifecycle, and the persisted state store that
//! carries playback progress across teardown.

pub mod config;
pub mod feed;
pub mod player;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use config::ReelflowConfig;
pub use feed::{ContentFeed, ContentItem};
pub use player::{
    CoordinatorHandle, PlayerError, PlayerState, StoreError, ViewState, spawn_coordinator,
};

/// Core errors that can bubble up from any Reelflow subsystem.
///
/// High-level error types representing failures in core functionality.
#[derive(Debug, thiserror::Error)]
pub enum ReelflowError {
    #[error("Player error: {0}")]
    Player(#[from] PlayerError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
