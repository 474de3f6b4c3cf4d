//! Emotion Monitoring Sessions
//!
//! A session is one camera run or one loaded video/image file. Each session
//! owns its own rolling statistics, so nothing from a previous source leaks
//! into the chart of the next one.

mod chart;
mod manager;
mod session;

pub use chart::{ChartBar, EmotionChart};
pub use manager::SessionManager;
pub use session::{Session, SessionSource, SessionState};

use emotion_stats::StatsError;
use thiserror::Error;

/// Session error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("No session has been started")]
    NoSession,

    #[error("Session is not running")]
    NotRunning,

    #[error("Emotion statistics error: {0}")]
    Stats(#[from] StatsError),
}
