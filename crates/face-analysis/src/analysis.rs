//! Per-frame emotion analysis

use emotion_stats::{Detection, EmotionClasses};
use image::RgbImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{AnalysisConfig, AnalysisError, EmotionClassifier, FaceLocator, FaceRegion};

/// Classified face, ready to be drawn over the frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceAnnotation {
    pub region: FaceRegion,
    pub label: String,
    pub confidence: f32,
}

impl FaceAnnotation {
    /// Text shown next to the face box, e.g. "Happy 0.83"
    pub fn caption(&self) -> String {
        format!("{} {:.2}", self.label, self.confidence)
    }
}

/// Result of analysing one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameAnalysis {
    /// Boxes and captions for the overlay
    pub annotations: Vec<FaceAnnotation>,

    /// Frame record for the rolling statistics
    pub detections: Vec<Detection>,
}

impl FrameAnalysis {
    /// Check if any face was classified
    pub fn has_faces(&self) -> bool {
        !self.detections.is_empty()
    }
}

/// Runs the face locator and emotion classifier over frames
pub struct FrameAnalyzer<L, C> {
    locator: L,
    classifier: C,
    config: AnalysisConfig,
}

impl<L: FaceLocator, C: EmotionClassifier> FrameAnalyzer<L, C> {
    /// Create a new analyzer
    pub fn new(locator: L, classifier: C, config: AnalysisConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        info!(
            "Creating frame analyzer: {} emotion labels, margin={}px, min_confidence={}",
            classifier.labels().len(),
            config.face_margin,
            config.min_confidence
        );
        Ok(Self {
            locator,
            classifier,
            config,
        })
    }

    /// Class set matching the classifier's labels
    pub fn classes(&self) -> Result<EmotionClasses, AnalysisError> {
        Ok(EmotionClasses::new(self.classifier.labels().iter().cloned())?)
    }

    /// Get the configuration
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Locate faces, classify each crop, and keep the best box per face
    pub fn analyze(&mut self, frame: &RgbImage) -> Result<FrameAnalysis, AnalysisError> {
        let faces = self.locator.locate(frame)?;
        if faces.is_empty() {
            return Ok(FrameAnalysis::default());
        }

        let (width, height) = frame.dimensions();
        let mut regions = Vec::with_capacity(faces.len());
        let mut crops = Vec::with_capacity(faces.len());
        for face in &faces {
            match FaceRegion::expand(face, width, height, self.config.face_margin) {
                Some(region) => {
                    crops.push(region.crop(frame));
                    regions.push(region);
                }
                None => warn!("Skipping face outside the {}x{} frame: {:?}", width, height, face),
            }
        }

        if crops.is_empty() {
            return Ok(FrameAnalysis::default());
        }

        // One batched call for every face in the frame
        let results = self.classifier.classify(&crops)?;
        if results.len() != crops.len() {
            return Err(AnalysisError::BatchMismatch {
                expected: crops.len(),
                actual: results.len(),
            });
        }

        let labels = self.classifier.labels();
        let mut analysis = FrameAnalysis::default();
        for (region, boxes) in regions.into_iter().zip(results) {
            let Some(best) = boxes
                .iter()
                .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
            else {
                continue;
            };

            if best.confidence < self.config.min_confidence {
                debug!(
                    "Dropping box with confidence {:.2} < {:.2}",
                    best.confidence, self.config.min_confidence
                );
                continue;
            }

            let label = labels
                .get(best.class_index)
                .ok_or(AnalysisError::UnknownClassIndex {
                    index: best.class_index,
                    classes: labels.len(),
                })?
                .clone();

            analysis
                .detections
                .push(Detection::new(label.clone(), f64::from(best.confidence)));
            analysis.annotations.push(FaceAnnotation {
                region,
                label,
                confidence: best.confidence,
            });
        }

        debug!(
            "Analyzed frame: {} faces located, {} classified",
            faces.len(),
            analysis.detections.len()
        );
        Ok(analysis)
    }
}
