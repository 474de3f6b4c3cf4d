//! Face Analysis
//!
//! Glue between the external face locator and emotion classifier and the
//! rolling statistics:
//! - Face region expansion and cropping
//! - Batched emotion classification of every crop
//! - Best-box selection and confidence filtering
//! - Overlay drawing and display downscaling

pub mod analysis;
pub mod config;
pub mod detector;
pub mod overlay;
pub mod region;

pub use analysis::{FaceAnnotation, FrameAnalysis, FrameAnalyzer};
pub use config::AnalysisConfig;
pub use detector::{ClassifiedBox, EmotionClassifier, FaceLocator};
pub use overlay::{draw_annotations, fit_to_display, OVERLAY_COLOR};
pub use region::{FaceBox, FaceRegion};

use emotion_stats::StatsError;
use thiserror::Error;

/// Face analysis error types
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Face location failed: {0}")]
    FaceLocation(String),

    #[error("Emotion classification failed: {0}")]
    Classification(String),

    #[error("Classifier returned {actual} results for {expected} face crops")]
    BatchMismatch { expected: usize, actual: usize },

    #[error("Class index {index} outside the classifier's {classes} labels")]
    UnknownClassIndex { index: usize, classes: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid classifier label set: {0}")]
    Labels(#[from] StatsError),
}
