//! Content feed types and latest-value publication.
//!
//! The feed is the upstream source of playable items. Reelflow only ever
//! observes the most recent full sequence; there is no pagination and no
//! per-item delta protocol. `ContentFeed` wraps a watch channel so that
//! late subscribers immediately see the current sequence.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// A single playable item in the feed.
///
/// Carries the media location and a preview image shown while the player
/// is hidden. Items are owned by the feed; the coordinator never mutates
/// them, only observes the latest ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Location of the playable media
    pub media_uri: String,
    /// Location of the preview image displayed before rendering starts
    pub preview_image_uri: String,
}

impl ContentItem {
    /// Creates a content item from its media and preview locations.
    pub fn new(media_uri: impl Into<String>, preview_image_uri: impl Into<String>) -> Self {
        Self {
            media_uri: media_uri.into(),
            preview_image_uri: preview_image_uri.into(),
        }
    }
}

/// Publisher side of the content feed.
///
/// Thin wrapper over a watch channel: `publish` replaces the current
/// sequence wholesale and wakes all subscribers, latest value wins. The
/// coordinator holds a receiver obtained from `subscribe`.
#[derive(Debug)]
pub struct ContentFeed {
    sender: watch::Sender<Vec<ContentItem>>,
}

impl ContentFeed {
    /// Creates a feed seeded with an initial sequence.
    pub fn new(initial: Vec<ContentItem>) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Replaces the current sequence and notifies subscribers.
    ///
    /// Publishing is unconditional: an identical sequence still counts as
    /// an emission, matching upstream feeds that re-send on refresh.
    pub fn publish(&self, items: Vec<ContentItem>) {
        self.sender.send_replace(items);
    }

    /// Returns a receiver observing the latest sequence.
    pub fn subscribe(&self) -> watch::Receiver<Vec<ContentItem>> {
        self.sender.subscribe()
    }

    /// Returns a clone of the current sequence.
    pub fn current(&self) -> Vec<ContentItem> {
        self.sender.borrow().clone()
    }
}

impl Default for ContentFeed {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn late_subscriber_sees_current_sequence() {
        let feed = ContentFeed::default();
        feed.publish(vec![ContentItem::new("a.mp4", "a.png")]);

        let rx = feed.subscribe();
        assert_eq!(rx.borrow().len(), 1);
        assert_eq!(rx.borrow()[0].media_uri, "a.mp4");
    }

    #[tokio::test]
    async fn publish_wakes_subscribers_with_latest() {
        let feed = ContentFeed::default();
        let mut rx = feed.subscribe();

        feed.publish(vec![ContentItem::new("a.mp4", "a.png")]);
        feed.publish(vec![
            ContentItem::new("a.mp4", "a.png"),
            ContentItem::new("b.mp4", "b.png"),
        ]);

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 2);
    }
}
