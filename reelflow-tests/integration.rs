//! Integration tests for Reelflow
//!
//! These tests drive the playback coordinator actor end to end through
//! its public handle, with the simulated player, factory, store, and
//! feed standing in for the real collaborators. They verify the resource
//! lifecycle contract, state persistence across teardown, and view-state
//! derivation from merged input signals.

#[path = "integration/coordinator_lifecycle.rs"]
mod coordinator_lifecycle;

#[path = "integration/view_state_sync.rs"]
mod view_state_sync;
