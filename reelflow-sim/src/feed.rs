//! Scripted content feed for simulation and demos.
//!
//! Replays a fixed script of content sequences through a `ContentFeed`,
//! optionally paced with deterministic jitter so demo runs look like a
//! live feed while staying reproducible from a seed.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use reelflow_core::config::SimulationConfig;
use reelflow_core::feed::{ContentFeed, ContentItem};
use tokio::sync::watch;

/// Generates a plausible content sequence for simulations.
pub fn sample_items(count: usize) -> Vec<ContentItem> {
    (0..count)
        .map(|i| {
            ContentItem::new(
                format!("sim://video/{i}.mp4"),
                format!("sim://preview/{i}.png"),
            )
        })
        .collect()
}

/// Feed that replays a script of content sequences.
pub struct ScriptedFeed {
    feed: ContentFeed,
    script: Vec<Vec<ContentItem>>,
    interval: Duration,
    jitter_rng: ChaCha8Rng,
}

impl ScriptedFeed {
    /// Creates a scripted feed from simulation config and a script.
    ///
    /// With `deterministic_seed` set, emission jitter is reproducible
    /// across runs; otherwise it is seeded from the OS.
    pub fn new(config: &SimulationConfig, script: Vec<Vec<ContentItem>>) -> Self {
        let jitter_rng = match config.deterministic_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };

        Self {
            feed: ContentFeed::default(),
            script,
            interval: Duration::from_millis(config.feed_interval_ms),
            jitter_rng,
        }
    }

    /// Returns a receiver observing the latest published sequence.
    pub fn subscribe(&self) -> watch::Receiver<Vec<ContentItem>> {
        self.feed.subscribe()
    }

    /// Replays the script, pacing emissions with the configured interval.
    ///
    /// Consumes the feed; subscribers obtained beforehand keep observing
    /// until the last sequence is published.
    pub async fn run(mut self) {
        let entries = std::mem::take(&mut self.script);
        for (emission, items) in entries.into_iter().enumerate() {
            if !self.interval.is_zero() {
                let jitter_ms = self
                    .jitter_rng
                    .random_range(0..=self.interval.as_millis() as u64 / 4);
                tokio::time::sleep(self.interval + Duration::from_millis(jitter_ms)).await;
            }
            tracing::debug!(emission, items = items.len(), "Scripted feed emission");
            self.feed.publish(items);
        }
    }
}
