//! Face analysis configuration

use serde::{Deserialize, Serialize};

use crate::AnalysisError;

/// Face analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Pixels added around each located face before cropping
    pub face_margin: u32,

    /// Boxes below this classifier confidence are dropped
    pub min_confidence: f32,

    /// Display size for the annotated frame
    pub display_width: u32,
    pub display_height: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            face_margin: 20,
            min_confidence: 0.5,
            display_width: 640,
            display_height: 480,
        }
    }
}

impl AnalysisConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(AnalysisError::Config(format!(
                "min_confidence {} is outside [0, 1]",
                self.min_confidence
            )));
        }
        if self.display_width == 0 || self.display_height == 0 {
            return Err(AnalysisError::Config(format!(
                "display size {}x{} must be non-zero",
                self.display_width, self.display_height
            )));
        }
        Ok(())
    }
}
