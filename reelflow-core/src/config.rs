//! Centralized configuration for Reelflow.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::path::PathBuf;

/// Central configuration for all Reelflow components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct ReelflowConfig {
    pub coordinator: CoordinatorConfig,
    pub store: StoreConfig,
    pub simulation: SimulationConfig,
}

/// Playback coordinator behavior configuration.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Capacity of the coordinator's command channel
    pub command_buffer: usize,
    /// Whether a freshly created player starts playing when no saved state exists
    pub autoplay: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            command_buffer: 100,
            autoplay: true,
        }
    }
}

/// Persisted playback-state store configuration.
///
/// Controls where the resumable snapshot lives on disk and how writes
/// are staged before being moved into place.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path of the JSON snapshot file
    pub state_path: PathBuf,
    /// Temporary file suffix used for atomic writes
    pub temp_file_suffix: &'static str,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from("reelflow-state.json"),
            temp_file_suffix: ".tmp",
        }
    }
}

/// Simulation mode configuration for testing and development.
///
/// Controls whether components use simulated or real implementations,
/// and configures simulation parameters for deterministic testing.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Enable simulation mode for all components
    pub enabled: bool,
    /// Deterministic seed for reproducible simulations
    pub deterministic_seed: Option<u64>,
    /// Interval between scripted feed emissions in milliseconds
    pub feed_interval_ms: u64,
    /// Delay before a simulated player reports rendering in milliseconds
    pub rendering_delay_ms: u64,
    /// Whether to use mock data instead of real external services
    pub use_mock_data: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            deterministic_seed: None,
            feed_interval_ms: 500,
            rendering_delay_ms: 50,
            use_mock_data: false,
        }
    }
}

impl SimulationConfig {
    /// Creates a configuration for deterministic testing.
    pub fn deterministic_testing() -> Self {
        Self {
            enabled: true,
            deterministic_seed: Some(42), // Fixed seed for reproducible tests
            feed_interval_ms: 0,          // No pacing for fast tests
            rendering_delay_ms: 0,        // Render immediately
            use_mock_data: true,
        }
    }
}

impl ReelflowConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via environment variables while
    /// maintaining sensible defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(buffer) = std::env::var("REELFLOW_COMMAND_BUFFER")
            && let Ok(capacity) = buffer.parse::<usize>()
        {
            config.coordinator.command_buffer = capacity;
        }

        if let Ok(autoplay) = std::env::var("REELFLOW_AUTOPLAY")
            && let Ok(enabled) = autoplay.parse::<bool>()
        {
            config.coordinator.autoplay = enabled;
        }

        if let Ok(path) = std::env::var("REELFLOW_STATE_PATH") {
            config.store.state_path = PathBuf::from(path);
        }

        if let Ok(seed) = std::env::var("REELFLOW_SIM_SEED")
            && let Ok(value) = seed.parse::<u64>()
        {
            config.simulation.deterministic_seed = Some(value);
        }

        config
    }
}
