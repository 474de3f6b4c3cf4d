//! Face locator and emotion classifier seams
//!
//! The models themselves (cascade face detector, emotion object detector)
//! live outside this workspace; they plug in through these traits.

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::{AnalysisError, FaceBox};

/// One box predicted by the emotion classifier inside a face crop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedBox {
    /// Index into the classifier's label list
    pub class_index: usize,
    pub confidence: f32,
}

/// Locates faces in a frame
pub trait FaceLocator {
    fn locate(&mut self, frame: &RgbImage) -> Result<Vec<FaceBox>, AnalysisError>;
}

/// Classifies the emotion shown in face crops
pub trait EmotionClassifier {
    /// Label of every class index the classifier can emit
    fn labels(&self) -> &[String];

    /// Classify a batch of crops; one box list per crop, in crop order
    fn classify(&mut self, crops: &[RgbImage]) -> Result<Vec<Vec<ClassifiedBox>>, AnalysisError>;
}
