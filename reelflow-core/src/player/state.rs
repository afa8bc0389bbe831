//! Playback state value types.
//!
//! `PlayerState` is the minimal resumable snapshot of playback identity and
//! progress; it is the only thing that survives a player teardown.
//! `ViewState` is the single derived value consumed by presentation, always
//! replaced wholesale and never mutated in place.

use serde::{Deserialize, Serialize};

use crate::feed::ContentItem;

/// Minimal resumable snapshot of playback progress and identity.
///
/// Created on first player use, mutated by playback and position changes,
/// captured into the state store on teardown and restored on the next
/// player creation. The `current_media_index` refers to a position within
/// the feed's current sequence when used to resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Identity of the media item playback is currently on
    pub current_media_item_id: String,
    /// Index of that item within the feed sequence
    pub current_media_index: usize,
    /// Seek position within the current item
    pub seek_position_millis: u64,
    /// Whether playback is running or paused
    pub is_playing: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            current_media_item_id: String::new(),
            current_media_index: 0,
            seek_position_millis: 0,
            is_playing: false,
        }
    }
}

impl PlayerState {
    /// Returns the initial state with playback toggled on or off.
    ///
    /// Used to seed a fresh player when no saved state exists; the flag
    /// comes from `CoordinatorConfig.autoplay`.
    pub fn initial(autoplay: bool) -> Self {
        Self {
            is_playing: autoplay,
            ..Self::default()
        }
    }

    /// Returns a copy with `is_playing` flipped.
    pub fn toggled(&self) -> Self {
        Self {
            is_playing: !self.is_playing,
            ..self.clone()
        }
    }

    /// Returns a copy tracking a different media index.
    pub fn at_index(&self, index: usize) -> Self {
        Self {
            current_media_index: index,
            ..self.clone()
        }
    }
}

/// The single derived value consumed by presentation.
///
/// Owned exclusively by the coordinator and published wholesale through a
/// watch channel, so subscribers always observe a complete, consistent
/// value per emission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    /// Whether the player surface should be visible
    pub show_player: bool,
    /// Latest full content sequence from the feed
    pub video_data: Vec<ContentItem>,
}

impl ViewState {
    /// Recomputes the view state from the coordinator's inputs.
    ///
    /// Pure and side-effect free: the player surface is shown only while a
    /// player is live and its last rendering/visibility fold says to show it.
    pub fn derive(player_live: bool, show_player: bool, video_data: &[ContentItem]) -> Self {
        Self {
            show_player: player_live && show_player,
            video_data: video_data.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn initial_state_respects_autoplay() {
        assert!(PlayerState::initial(true).is_playing);
        assert!(!PlayerState::initial(false).is_playing);
        assert_eq!(PlayerState::initial(true).current_media_index, 0);
    }

    #[test]
    fn derive_never_shows_player_without_live_resource() {
        let items = vec![ContentItem::new("a.mp4", "a.png")];

        let state = ViewState::derive(false, true, &items);
        assert!(!state.show_player);
        assert_eq!(state.video_data, items);
    }

    #[test]
    fn derive_shows_player_only_when_visible_and_live() {
        assert!(ViewState::derive(true, true, &[]).show_player);
        assert!(!ViewState::derive(true, false, &[]).show_player);
    }

    proptest! {
        #[test]
        fn toggle_parity_matches_count(initial in any::<bool>(), toggles in 0usize..64) {
            let mut state = PlayerState::initial(initial);
            for _ in 0..toggles {
                state = state.toggled();
            }
            prop_assert_eq!(state.is_playing, initial ^ (toggles % 2 == 1));
        }
    }
}
