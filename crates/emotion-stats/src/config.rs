//! Statistics configuration

use frame_window::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};

/// Aggregator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Number of most recent frames contributing to the statistics
    pub window_capacity: usize,

    /// Recompute aggregates exactly from the window every N updates (0 = never)
    pub resync_interval: u32,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            window_capacity: DEFAULT_CAPACITY,
            resync_interval: 0,
        }
    }
}

impl StatsConfig {
    /// Config with the given window and no periodic resync
    pub fn with_window(window_capacity: usize) -> Self {
        Self {
            window_capacity,
            ..Default::default()
        }
    }
}
