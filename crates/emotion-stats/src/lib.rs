//! Rolling Emotion Statistics
//!
//! Maintains, per emotion class, the number of detections and their mean
//! confidence over the most recent frames. Each update retracts the evicted
//! frame and inserts the new one in O(detections) time instead of
//! recomputing the whole window.

mod aggregate;
mod classes;
mod config;
mod error;
mod statistics;

pub use aggregate::{ClassAggregate, ClassStat, StatsSnapshot};
pub use classes::EmotionClasses;
pub use config::StatsConfig;
pub use error::StatsError;
pub use statistics::EmotionStatistics;

use serde::{Deserialize, Serialize};

/// One classified face in one frame, as reported by the emotion classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Emotion label (must belong to the configured class set)
    pub label: String,
    /// Classifier confidence, conventionally in [0, 1]
    pub confidence: f64,
}

impl Detection {
    /// Create a new detection
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}
