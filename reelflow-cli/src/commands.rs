//! CLI command handlers.

use std::time::Duration;

use clap::Subcommand;
use reelflow_core::config::ReelflowConfig;
use reelflow_core::player::spawn_coordinator;
use reelflow_sim::{FakePlayerFactory, MemoryStateStore, ScriptedFeed, sample_items};
use tracing::info;

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run a scripted playback session over simulated components
    Demo {
        /// Number of items the scripted feed grows to
        #[arg(long, default_value_t = 5)]
        items: usize,

        /// Number of scripted position changes
        #[arg(long, default_value_t = 3)]
        swipes: usize,

        /// Deterministic seed for feed pacing
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the scripted feed contents
    Feed {
        /// Number of items to generate
        #[arg(long, default_value_t = 5)]
        items: usize,
    },
}

/// Dispatches a parsed CLI command.
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Demo {
            items,
            swipes,
            seed,
        } => run_demo(items, swipes, seed).await,
        Commands::Feed { items } => {
            for item in sample_items(items) {
                println!("{}  (preview: {})", item.media_uri, item.preview_image_uri);
            }
            Ok(())
        }
    }
}

/// Runs one full coordinator lifecycle against simulated collaborators:
/// feed growth, rendering, swipes, tap-to-pause, teardown, and resume.
async fn run_demo(items: usize, swipes: usize, seed: Option<u64>) -> anyhow::Result<()> {
    let mut config = ReelflowConfig::default();
    config.simulation.enabled = true;
    config.simulation.deterministic_seed = seed;
    config.simulation.feed_interval_ms = 200;
    config.simulation.rendering_delay_ms = 50;
    let rendering_delay = Duration::from_millis(config.simulation.rendering_delay_ms);

    // Feed script: the sequence grows by one item per emission.
    let script: Vec<_> = (1..=items).map(sample_items).collect();
    let feed = ScriptedFeed::new(&config.simulation, script);
    let content_rx = feed.subscribe();

    let factory = FakePlayerFactory::new();
    let probe = factory.probe();
    let handle = spawn_coordinator(config, factory, MemoryStateStore::new(), content_rx);
    tokio::spawn(feed.run());

    // Print every view-state transition as it is published.
    let mut view = handle.view_states();
    let printer = tokio::spawn(async move {
        while view.changed().await.is_ok() {
            let state = view.borrow_and_update().clone();
            println!(
                "view-state: show_player={} items={}",
                state.show_player,
                state.video_data.len()
            );
        }
    });

    handle.acquire().await?;
    tokio::time::sleep(rendering_delay).await;
    probe.set_rendering(true);

    for index in 1..=swipes {
        tokio::time::sleep(Duration::from_millis(300)).await;
        // Swiping away hides the player until the engine renders the new item.
        probe.set_rendering(false);
        handle.change_position(index).await?;
        tokio::time::sleep(rendering_delay).await;
        probe.set_rendering(true);
    }

    // Tap to pause, tap to resume.
    handle.toggle_playback().await?;
    handle.toggle_playback().await?;

    // Tear down, then bring the player back up restored from the store.
    handle.release().await?;
    handle.acquire().await?;
    let resumed = probe.player_state();
    info!(
        index = resumed.current_media_index,
        position_ms = resumed.seek_position_millis,
        created = probe.created_count(),
        "Session resumed from saved state"
    );

    handle.shutdown().await?;
    printer.abort();

    Ok(())
}
