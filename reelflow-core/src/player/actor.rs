//! Actor implementation for the playback coordinator.

use tokio::sync::{mpsc, watch};

use super::commands::CoordinatorCommand;
use super::coordinator::PlaybackCoordinator;
use super::handle::CoordinatorHandle;
use super::store::StateStore;
use super::traits::PlayerFactory;
use crate::config::ReelflowConfig;
use crate::feed::ContentItem;

/// Spawns the playback coordinator actor and returns its handle.
///
/// Creates a coordinator with the provided factory and store, then spawns
/// it as an actor running in a separate task. The actor processes caller
/// commands, feed emissions, and rendering-signal transitions one at a
/// time, so every view-state derivation is atomic with respect to each
/// emission.
///
/// # Examples
/// ```rust,no_run
/// # #[tokio::main]
/// # async fn main() {
/// use reelflow_core::config::ReelflowConfig;
/// use reelflow_core::feed::ContentFeed;
/// use reelflow_core::player::{JsonStateStore, spawn_coordinator};
/// # use reelflow_core::player::{MediaPlayer, PlayerError, PlayerFactory};
/// # struct MyFactory;
/// # #[async_trait::async_trait]
/// # impl PlayerFactory for MyFactory {
/// #     type Player = MyPlayer;
/// #     async fn create(&mut self) -> Result<MyPlayer, PlayerError> { unimplemented!() }
/// #     fn created_count(&self) -> usize { 0 }
/// # }
/// # struct MyPlayer;
/// # impl MediaPlayer for MyPlayer {
/// #     fn load(&mut self, _: &[reelflow_core::feed::ContentItem]) {}
/// #     fn player_state(&self) -> reelflow_core::player::PlayerState { unimplemented!() }
/// #     fn set_state(&mut self, _: reelflow_core::player::PlayerState) {}
/// #     fn release(&mut self) {}
/// #     fn rendering_updates(&self) -> tokio::sync::watch::Receiver<bool> { unimplemented!() }
/// # }
///
/// let config = ReelflowConfig::default();
/// let feed = ContentFeed::default();
/// let store = JsonStateStore::new(&config.store);
/// let handle = spawn_coordinator(config, MyFactory, store, feed.subscribe());
/// # }
/// ```
pub fn spawn_coordinator<F, S>(
    config: ReelflowConfig,
    factory: F,
    store: S,
    content_rx: watch::Receiver<Vec<ContentItem>>,
) -> CoordinatorHandle
where
    F: PlayerFactory + 'static,
    S: StateStore + 'static,
{
    let (sender, receiver) = mpsc::channel(config.coordinator.command_buffer);
    let coordinator = PlaybackCoordinator::new(config.coordinator, factory, store);
    let view_rx = coordinator.view_states();

    tokio::spawn(async move {
        run_actor_loop(coordinator, receiver, content_rx).await;
    });

    CoordinatorHandle::new(sender, view_rx)
}

/// Runs the main actor message processing loop.
///
/// Merges the three input sources: caller commands, feed emissions, and
/// the live player's rendering signal. The rendering branch only exists
/// while a player is live; the subscription is dropped on release, so no
/// emission can fire after teardown. When the loop exits a final release
/// captures the resumable state.
async fn run_actor_loop<F, S>(
    mut coordinator: PlaybackCoordinator<F, S>,
    mut receiver: mpsc::Receiver<CoordinatorCommand>,
    mut content_rx: watch::Receiver<Vec<ContentItem>>,
) where
    F: PlayerFactory + 'static,
    S: StateStore + 'static,
{
    tracing::debug!("Playback coordinator actor started");

    let mut rendering_rx: Option<watch::Receiver<bool>> = None;

    // Fold the sequence present at startup so the view state is complete
    // before the first emission.
    let initial = content_rx.borrow_and_update().clone();
    if !initial.is_empty() {
        coordinator.content_changed(initial);
    }

    loop {
        tokio::select! {
            command = receiver.recv() => {
                match command {
                    Some(command) => {
                        if !handle_command(&mut coordinator, &mut rendering_rx, command).await {
                            break;
                        }
                    }
                    None => break,
                }
            }
            Ok(()) = content_rx.changed() => {
                let items = content_rx.borrow_and_update().clone();
                coordinator.content_changed(items);
            }
            Ok(()) = async {
                match rendering_rx.as_mut() {
                    Some(rx) => rx.changed().await,
                    None => futures::future::pending().await,
                }
            } => {
                let is_rendering = rendering_rx.as_ref().is_some_and(|rx| *rx.borrow());
                coordinator.rendering_changed(is_rendering);
            }
        }
    }

    // Teardown: capture the resumable state even when the owner never
    // called release explicitly.
    drop(rendering_rx);
    coordinator.release().await;

    tracing::debug!("Playback coordinator actor stopped");
}

/// Handles a single command for the coordinator.
/// Returns true to continue processing, false to shutdown.
async fn handle_command<F, S>(
    coordinator: &mut PlaybackCoordinator<F, S>,
    rendering_rx: &mut Option<watch::Receiver<bool>>,
    command: CoordinatorCommand,
) -> bool
where
    F: PlayerFactory + 'static,
    S: StateStore + 'static,
{
    match command {
        CoordinatorCommand::Acquire { responder } => {
            let result = match coordinator.acquire().await {
                Ok(Some(rx)) => {
                    *rendering_rx = Some(rx);
                    Ok(())
                }
                Ok(None) => Ok(()),
                Err(error) => Err(error),
            };
            let _ = responder.send(result);
        }

        CoordinatorCommand::Release { responder } => {
            *rendering_rx = None;
            coordinator.release().await;
            let _ = responder.send(());
        }

        CoordinatorCommand::ChangePosition { index, responder } => {
            coordinator.change_position(index);
            let _ = responder.send(());
        }

        CoordinatorCommand::TogglePlayback { responder } => {
            let toggled = coordinator.toggle_playback();
            let _ = responder.send(toggled);
        }

        CoordinatorCommand::Shutdown { responder } => {
            tracing::debug!("Playback coordinator actor shutting down");
            let _ = responder.send(());
            return false; // Signal to break out of the loop
        }
    }
    true // Continue processing
}
