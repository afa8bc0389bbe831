//! Reelflow Simulation - Deterministic fakes for playback coordination.

#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
//!
//! This crate provides substitutable implementations of the coordinator's
//! collaborators for testing and development: a fake player and factory
//! with recorded side effects, an in-memory state store, and a scripted
//! content feed with reproducible pacing.
//!
//! # Example
//!
//! ```rust,no_run
//! use reelflow_core::config::ReelflowConfig;
//! use reelflow_core::player::spawn_coordinator;
//! use reelflow_sim::{FakePlayerFactory, MemoryStateStore, ScriptedFeed, sample_items};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let config = ReelflowConfig::default();
//! let factory = FakePlayerFactory::new();
//! let probe = factory.probe();
//! let feed = ScriptedFeed::new(&config.simulation, vec![sample_items(5)]);
//!
//! let handle = spawn_coordinator(
//!     config,
//!     factory,
//!     MemoryStateStore::new(),
//!     feed.subscribe(),
//! );
//! tokio::spawn(feed.run());
//!
//! handle.acquire().await.unwrap();
//! probe.set_rendering(true);
//! # }
//! ```

pub mod feed;
pub mod player;
pub mod store;

pub use feed::{ScriptedFeed, sample_items};
pub use player::{FakePlayer, FakePlayerFactory, FakePlayerProbe};
// Re-export config from core for convenience
pub use reelflow_core::config::SimulationConfig;
pub use store::MemoryStateStore;
