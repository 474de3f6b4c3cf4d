//! Emotion Monitor
//!
//! Configuration loading, logging setup, and a replay driver that feeds
//! recorded per-frame detections through a session and prints the live
//! emotion chart.

pub mod config;
pub mod replay;

pub use config::{AppConfig, ConfigError, DEFAULT_CONFIG_PATH};
pub use replay::{parse_frame_line, replay, ReplayError, ReplayOptions, ReplaySummary};

use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr
/// so stdout stays free for chart output.
pub fn init_logging(level: &str) -> Result<(), SetGlobalDefaultError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}
