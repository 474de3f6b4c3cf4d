//! Session state

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use emotion_stats::{EmotionStatistics, StatsSnapshot};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where the frames of a session come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionSource {
    /// Live camera by device index
    Camera { device: u32 },
    /// Video or image file
    File { path: PathBuf },
}

impl fmt::Display for SessionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionSource::Camera { device } => write!(f, "camera {}", device),
            SessionSource::File { path } => write!(f, "file {}", path.display()),
        }
    }
}

/// Session lifecycle state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    Running,
    Stopped,
    /// Ended by a rejected frame (upstream data corruption)
    Failed { reason: String },
}

/// One camera run or loaded file
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub source: SessionSource,
    pub started_at: DateTime<Utc>,
    pub(crate) state: SessionState,
    pub(crate) frames_processed: u64,
    pub(crate) stats: EmotionStatistics,
}

impl Session {
    pub(crate) fn new(source: SessionSource, stats: EmotionStatistics) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            started_at: Utc::now(),
            state: SessionState::Running,
            frames_processed: 0,
            stats,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Frames accepted since the session started
    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    pub fn stats(&self) -> &EmotionStatistics {
        &self.stats
    }

    /// Current statistics of this session
    pub fn snapshot(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Time since the session started
    pub fn elapsed(&self) -> chrono::Duration {
        Utc::now() - self.started_at
    }
}
