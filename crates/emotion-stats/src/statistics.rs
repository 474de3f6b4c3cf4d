//! Rolling emotion statistics over a sliding frame window

use frame_window::FrameWindow;
use tracing::{debug, info, trace, warn};

use crate::aggregate::{ClassAggregate, ClassStat, StatsSnapshot};
use crate::{Detection, EmotionClasses, StatsConfig, StatsError};

/// Detection with its label resolved to a class index
#[derive(Debug, Clone, Copy, PartialEq)]
struct ResolvedDetection {
    class: usize,
    confidence: f64,
}

type FrameRecord = Vec<ResolvedDetection>;

/// Per-class count and mean confidence over the last W frames
///
/// One instance per video or camera session. `update` is called once per
/// processed frame and is the only mutating path besides `reset` and
/// `resync`.
#[derive(Debug, Clone)]
pub struct EmotionStatistics {
    classes: EmotionClasses,
    config: StatsConfig,
    window: FrameWindow<FrameRecord>,
    /// Indexed by class index
    aggregates: Vec<ClassAggregate>,
    updates_since_resync: u32,
}

impl EmotionStatistics {
    /// Create a new aggregator for the given class set
    pub fn new(classes: EmotionClasses, config: StatsConfig) -> Result<Self, StatsError> {
        let window = FrameWindow::new(config.window_capacity)?;
        info!(
            "Creating emotion statistics: {} classes, window={} frames, resync_interval={}",
            classes.len(),
            config.window_capacity,
            config.resync_interval
        );

        Ok(Self {
            aggregates: vec![ClassAggregate::default(); classes.len()],
            classes,
            config,
            window,
            updates_since_resync: 0,
        })
    }

    /// Create an aggregator with the given window and no periodic resync
    pub fn with_capacity(classes: EmotionClasses, window_capacity: usize) -> Result<Self, StatsError> {
        Self::new(classes, StatsConfig::with_window(window_capacity))
    }

    /// Account for one processed frame and return the updated statistics
    ///
    /// The detections are validated before anything changes, so a rejected
    /// frame leaves the aggregator untouched.
    pub fn update(&mut self, detections: &[Detection]) -> Result<StatsSnapshot, StatsError> {
        let record = self.resolve(detections)?;

        for d in self.window.oldest() {
            self.aggregates[d.class].retract(d.confidence);
        }
        self.insert(&record);
        let evicted = self.window.replace(record);

        trace!(
            "Frame {}: retracted {} detections, inserted {}",
            self.window.total_written(),
            evicted.len(),
            detections.len()
        );

        if self.config.resync_interval > 0 {
            self.updates_since_resync += 1;
            if self.updates_since_resync >= self.config.resync_interval {
                self.resync();
            }
        }

        Ok(self.snapshot())
    }

    fn resolve(&self, detections: &[Detection]) -> Result<FrameRecord, StatsError> {
        detections
            .iter()
            .map(|d| {
                let class = self.classes.index_of(&d.label).ok_or_else(|| {
                    warn!("Rejecting frame: unknown emotion label '{}'", d.label);
                    StatsError::UnknownLabel {
                        label: d.label.clone(),
                    }
                })?;
                if !d.confidence.is_finite() {
                    warn!("Rejecting frame: confidence {} for '{}'", d.confidence, d.label);
                    return Err(StatsError::InvalidConfidence {
                        label: d.label.clone(),
                        confidence: d.confidence,
                    });
                }
                Ok(ResolvedDetection {
                    class,
                    confidence: d.confidence,
                })
            })
            .collect()
    }

    fn insert(&mut self, record: &[ResolvedDetection]) {
        for d in record {
            self.aggregates[d.class].insert(d.confidence);
        }
    }

    /// Current statistics without updating
    pub fn snapshot(&self) -> StatsSnapshot {
        self.to_snapshot(&self.aggregates)
    }

    fn to_snapshot(&self, aggregates: &[ClassAggregate]) -> StatsSnapshot {
        StatsSnapshot {
            entries: self
                .classes
                .labels()
                .iter()
                .zip(aggregates)
                .map(|(label, agg)| ClassStat {
                    label: label.clone(),
                    count: agg.count,
                    average: agg.average,
                })
                .collect(),
        }
    }

    /// Aggregate of a single class
    pub fn aggregate(&self, label: &str) -> Result<ClassAggregate, StatsError> {
        self.classes
            .index_of(label)
            .map(|i| self.aggregates[i])
            .ok_or_else(|| StatsError::UnknownLabel {
                label: label.to_string(),
            })
    }

    /// Exact statistics computed from the raw window contents
    pub fn recompute(&self) -> StatsSnapshot {
        let mut sums = vec![(0u32, 0.0f64); self.classes.len()];
        for record in self.window.iter_recent() {
            for d in record {
                let (count, sum) = &mut sums[d.class];
                *count += 1;
                *sum += d.confidence;
            }
        }

        let aggregates: Vec<ClassAggregate> = sums
            .into_iter()
            .map(|(count, sum)| ClassAggregate {
                count,
                average: if count == 0 { 0.0 } else { sum / f64::from(count) },
            })
            .collect();
        self.to_snapshot(&aggregates)
    }

    /// Replace the incremental aggregates with an exact recomputation
    pub fn resync(&mut self) {
        let exact = self.recompute();
        let mut max_drift = 0.0f64;
        for (agg, stat) in self.aggregates.iter_mut().zip(exact.iter()) {
            max_drift = max_drift.max((agg.average - stat.average).abs());
            *agg = stat.aggregate();
        }
        self.updates_since_resync = 0;
        debug!("Resynced emotion statistics (max drift {:e})", max_drift);
    }

    /// Discard all state, as if newly constructed
    pub fn reset(&mut self) {
        self.window.clear();
        self.aggregates.fill(ClassAggregate::default());
        self.updates_since_resync = 0;
        debug!("Emotion statistics reset");
    }

    /// Frames processed since construction or the last reset
    pub fn frames_seen(&self) -> u64 {
        self.window.total_written()
    }

    /// Frames currently contributing to the statistics
    pub fn frames_in_window(&self) -> usize {
        self.window.len()
    }

    /// Get the window capacity
    pub fn window_capacity(&self) -> usize {
        self.window.capacity()
    }

    /// Get the class set
    pub fn classes(&self) -> &EmotionClasses {
        &self.classes
    }

    /// Get the configuration
    pub fn config(&self) -> &StatsConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: [&str; 8] = [
        "Anger", "Contempt", "Disgust", "Fear", "Happy", "Neutral", "Sad", "Surprise",
    ];

    fn stats(window: usize) -> EmotionStatistics {
        let classes = EmotionClasses::new(LABELS).unwrap();
        EmotionStatistics::with_capacity(classes, window).unwrap()
    }

    fn assert_class(snapshot: &StatsSnapshot, label: &str, count: u32, average: f64) {
        let stat = snapshot.get(label).unwrap();
        assert_eq!(stat.count, count, "count of {}", label);
        assert!(
            (stat.average - average).abs() < 1e-9,
            "average of {}: {} != {}",
            label,
            stat.average,
            average
        );
    }

    fn assert_zero_state(snapshot: &StatsSnapshot) {
        assert_eq!(snapshot.len(), LABELS.len());
        for stat in snapshot {
            assert_eq!(stat.count, 0);
            assert_eq!(stat.average, 0.0);
        }
    }

    #[test]
    fn test_fresh_aggregator_is_zero() {
        let stats = stats(100);
        assert_zero_state(&stats.snapshot());
        assert_eq!(stats.window_capacity(), 100);
        assert_eq!(stats.frames_seen(), 0);
    }

    #[test]
    fn test_zero_window_rejected() {
        let classes = EmotionClasses::new(LABELS).unwrap();
        let result = EmotionStatistics::with_capacity(classes, 0);
        assert!(matches!(result, Err(StatsError::Window(_))));
    }

    #[test]
    fn test_single_sample() {
        let mut stats = stats(100);
        let snapshot = stats.update(&[Detection::new("Happy", 0.8)]).unwrap();

        assert_class(&snapshot, "Happy", 1, 0.8);
        for stat in snapshot.iter().filter(|s| s.label != "Happy") {
            assert_eq!((stat.count, stat.average), (0, 0.0));
        }
    }

    #[test]
    fn test_accumulation() {
        let mut stats = stats(100);
        stats.update(&[Detection::new("Happy", 0.8)]).unwrap();
        let snapshot = stats.update(&[Detection::new("Happy", 0.4)]).unwrap();

        assert_class(&snapshot, "Happy", 2, 0.6);
    }

    #[test]
    fn test_eviction() {
        let mut stats = stats(2);
        stats.update(&[Detection::new("Sad", 1.0)]).unwrap();
        stats.update(&[Detection::new("Sad", 0.0)]).unwrap();
        let snapshot = stats.update(&[]).unwrap();

        assert_class(&snapshot, "Sad", 1, 0.0);
    }

    #[test]
    fn test_snapshot_in_class_order() {
        let mut stats = stats(10);
        let snapshot = stats.update(&[Detection::new("Fear", 0.5)]).unwrap();
        let labels: Vec<&str> = snapshot.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, LABELS);
    }

    #[test]
    fn test_multiple_faces_per_frame() {
        let mut stats = stats(3);
        stats
            .update(&[Detection::new("Happy", 0.9), Detection::new("Sad", 0.6)])
            .unwrap();
        let snapshot = stats
            .update(&[Detection::new("Happy", 0.7), Detection::new("Happy", 0.5)])
            .unwrap();

        assert_class(&snapshot, "Happy", 3, 0.7);
        assert_class(&snapshot, "Sad", 1, 0.6);
        assert_eq!(snapshot.total_count(), 4);
    }

    #[test]
    fn test_empty_frames_drain_window() {
        let window = 5;
        let mut stats = stats(window);
        for (i, label) in ["Happy", "Sad", "Happy", "Fear", "Happy"].iter().enumerate() {
            stats
                .update(&[Detection::new(*label, 0.1 + 0.17 * i as f64)])
                .unwrap();
        }

        for _ in 0..window {
            let snapshot = stats.update(&[]).unwrap();
            for stat in &snapshot {
                assert!(stat.average >= 0.0, "negative average for {}", stat.label);
            }
        }

        assert_zero_state(&stats.snapshot());
    }

    #[test]
    fn test_unknown_label_leaves_state_unchanged() {
        let mut stats = stats(3);
        stats.update(&[Detection::new("Happy", 0.8)]).unwrap();
        let before = stats.snapshot();
        let frames_before = stats.frames_seen();

        let result = stats.update(&[Detection::new("Sad", 0.3), Detection::new("NotAClass", 0.5)]);

        assert_eq!(
            result,
            Err(StatsError::UnknownLabel {
                label: "NotAClass".to_string()
            })
        );
        assert_eq!(stats.snapshot(), before);
        assert_eq!(stats.frames_seen(), frames_before);
    }

    #[test]
    fn test_non_finite_confidence_rejected() {
        let mut stats = stats(3);
        let result = stats.update(&[Detection::new("Happy", f64::NAN)]);
        assert!(matches!(result, Err(StatsError::InvalidConfidence { .. })));
        assert_zero_state(&stats.snapshot());
    }

    #[test]
    fn test_aggregate_lookup() {
        let mut stats = stats(3);
        stats.update(&[Detection::new("Neutral", 0.25)]).unwrap();

        let agg = stats.aggregate("Neutral").unwrap();
        assert_eq!(agg.count, 1);
        assert!((agg.average - 0.25).abs() < 1e-12);
        assert!(stats.aggregate("Bored").is_err());
    }

    #[test]
    fn test_reset_returns_to_zero_state() {
        let mut stats = stats(4);
        for _ in 0..6 {
            stats.update(&[Detection::new("Surprise", 0.9)]).unwrap();
        }

        stats.reset();

        assert_zero_state(&stats.snapshot());
        assert_eq!(stats.frames_seen(), 0);
        assert_eq!(stats.frames_in_window(), 0);

        // Nothing from before the reset is retracted later
        let snapshot = stats.update(&[Detection::new("Surprise", 0.3)]).unwrap();
        assert_class(&snapshot, "Surprise", 1, 0.3);
    }

    #[test]
    fn test_recompute_matches_incremental() {
        let mut stats = stats(4);
        let confidences = [0.91, 0.33, 0.58, 0.12, 0.77, 0.64, 0.05];
        for (i, c) in confidences.iter().enumerate() {
            let label = LABELS[i % 3];
            stats.update(&[Detection::new(label, *c)]).unwrap();
        }

        let exact = stats.recompute();
        for (inc, ex) in stats.snapshot().iter().zip(exact.iter()) {
            assert_eq!(inc.count, ex.count);
            assert!((inc.average - ex.average).abs() < 1e-9);
        }
    }

    #[test]
    fn test_periodic_resync() {
        let classes = EmotionClasses::new(LABELS).unwrap();
        let config = StatsConfig {
            window_capacity: 3,
            resync_interval: 2,
        };
        let mut stats = EmotionStatistics::new(classes, config).unwrap();

        stats.update(&[Detection::new("Happy", 0.3)]).unwrap();
        let snapshot = stats.update(&[Detection::new("Happy", 0.6)]).unwrap();

        assert_eq!(snapshot, stats.recompute());
        assert_class(&snapshot, "Happy", 2, 0.45);
    }
}
