//! Per-class aggregates and snapshots

use serde::{Deserialize, Serialize};

/// Count and running mean confidence of one emotion class
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassAggregate {
    /// Detections of this class inside the window
    pub count: u32,
    /// Mean confidence of those detections (0.0 when count is 0)
    pub average: f64,
}

impl ClassAggregate {
    /// Fold one confidence into the running mean
    pub fn insert(&mut self, confidence: f64) {
        let n = f64::from(self.count);
        self.average = (self.average * n + confidence) / (n + 1.0);
        self.count += 1;
    }

    /// Remove one confidence from the running mean
    ///
    /// A negative residual sum or an emptied class resets the mean to 0.0;
    /// the count never goes below zero.
    pub fn retract(&mut self, confidence: f64) {
        let n = f64::from(self.count);
        let remaining = self.average * n - confidence;

        self.average = if remaining < 0.0 || self.count <= 1 {
            0.0
        } else {
            remaining / (n - 1.0)
        };
        self.count = self.count.saturating_sub(1);
    }
}

/// Aggregate of one class, labelled for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassStat {
    pub label: String,
    pub count: u32,
    pub average: f64,
}

impl ClassStat {
    /// Get the bare aggregate
    pub fn aggregate(&self) -> ClassAggregate {
        ClassAggregate {
            count: self.count,
            average: self.average,
        }
    }
}

/// Read-only copy of every class aggregate, in class order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub entries: Vec<ClassStat>,
}

impl StatsSnapshot {
    /// Iterate over class stats in class order
    pub fn iter(&self) -> impl Iterator<Item = &ClassStat> {
        self.entries.iter()
    }

    /// Stats of one class by label
    pub fn get(&self, label: &str) -> Option<&ClassStat> {
        self.entries.iter().find(|e| e.label == label)
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the snapshot carries no classes
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Detections across every class inside the window
    pub fn total_count(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.count)).sum()
    }

    /// Most frequent class in the window
    ///
    /// Ties go to the higher average, then to the earlier class. `None` when
    /// the window holds no detections.
    pub fn dominant(&self) -> Option<&ClassStat> {
        let mut best: Option<&ClassStat> = None;
        for entry in self.entries.iter().filter(|e| e.count > 0) {
            best = match best {
                Some(current)
                    if entry.count < current.count
                        || (entry.count == current.count && entry.average <= current.average) =>
                {
                    Some(current)
                }
                _ => Some(entry),
            };
        }
        best
    }
}

impl<'a> IntoIterator for &'a StatsSnapshot {
    type Item = &'a ClassStat;
    type IntoIter = std::slice::Iter<'a, ClassStat>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
