//! Emotion class set

use std::collections::HashMap;
use std::sync::Arc;

use crate::StatsError;

/// Ordered set of emotion labels produced by the classifier
///
/// Built from the classifier's own label list so the aggregator can never
/// drift out of sync with the model it serves. Label order is the iteration
/// order of every snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmotionClasses {
    labels: Arc<[String]>,
    index: Arc<HashMap<String, usize>>,
}

impl EmotionClasses {
    /// Build a class set from a label list
    pub fn new<I, S>(labels: I) -> Result<Self, StatsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(StatsError::EmptyClassSet);
        }

        let mut index = HashMap::with_capacity(labels.len());
        for (position, label) in labels.iter().enumerate() {
            if label.trim().is_empty() {
                return Err(StatsError::EmptyLabel { position });
            }
            if index.insert(label.clone(), position).is_some() {
                return Err(StatsError::DuplicateLabel {
                    label: label.clone(),
                });
            }
        }

        Ok(Self {
            labels: labels.into(),
            index: Arc::new(index),
        })
    }

    /// Index of a label, if it belongs to the set
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Label at an index
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// All labels in class order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Check whether a label belongs to the set
    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false for a constructed set
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
