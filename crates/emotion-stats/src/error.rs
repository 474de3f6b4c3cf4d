//! Statistics Error Types

use frame_window::WindowError;
use thiserror::Error;

/// Errors raised by the emotion statistics aggregator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// Window could not be created
    #[error("Invalid window: {0}")]
    Window(#[from] WindowError),

    /// Label outside the configured class set
    #[error("Unknown emotion label '{label}'")]
    UnknownLabel { label: String },

    /// NaN or infinite confidence
    #[error("Confidence {confidence} for '{label}' is not a finite number")]
    InvalidConfidence { label: String, confidence: f64 },

    /// No labels supplied for the class set
    #[error("Emotion class set is empty")]
    EmptyClassSet,

    /// Blank label in the class list
    #[error("Emotion label at position {position} is empty")]
    EmptyLabel { position: usize },

    /// Same label listed twice
    #[error("Emotion label '{label}' is listed more than once")]
    DuplicateLabel { label: String },
}
