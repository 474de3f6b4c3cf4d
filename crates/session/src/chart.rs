//! Live emotion chart model
//!
//! Turns a statistics snapshot into what the sidebar shows: one bar per
//! emotion class scaled to the most frequent class, plus the headline
//! emotion and its mean confidence.

use emotion_stats::StatsSnapshot;
use serde::{Deserialize, Serialize};

/// One bar of the chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBar {
    pub label: String,
    pub count: u32,
    pub average: f64,
    /// Bar length relative to the longest bar (0.0 to 1.0)
    pub fill: f64,
}

/// Bar chart of the rolling emotion statistics
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EmotionChart {
    pub bars: Vec<ChartBar>,
    /// Index of the dominant class in `bars`
    dominant: Option<usize>,
}

impl EmotionChart {
    /// Build the chart from a snapshot
    pub fn from_snapshot(snapshot: &StatsSnapshot) -> Self {
        let max_count = snapshot.iter().map(|s| s.count).max().unwrap_or(0);
        let bars = snapshot
            .iter()
            .map(|s| ChartBar {
                label: s.label.clone(),
                count: s.count,
                average: s.average,
                fill: if max_count == 0 {
                    0.0
                } else {
                    f64::from(s.count) / f64::from(max_count)
                },
            })
            .collect();
        let dominant = snapshot
            .dominant()
            .and_then(|d| snapshot.iter().position(|s| s.label == d.label));

        Self { bars, dominant }
    }

    /// Bar of the most frequent emotion
    pub fn dominant(&self) -> Option<&ChartBar> {
        self.dominant.and_then(|i| self.bars.get(i))
    }

    /// Sidebar headline: ("Emotion: Happy", "Confidence: 0.72")
    pub fn headline(&self) -> (String, String) {
        match self.dominant() {
            Some(bar) => (
                format!("Emotion: {}", bar.label),
                format!("Confidence: {:.2}", bar.average),
            ),
            None => ("Emotion: -".to_string(), "Confidence: -".to_string()),
        }
    }

    /// Fixed-width text rendering, one line per class
    pub fn render_text(&self, width: usize) -> String {
        let label_width = self.bars.iter().map(|b| b.label.len()).max().unwrap_or(0);
        let mut out = String::new();
        for bar in &self.bars {
            let filled = (bar.fill * width as f64).round() as usize;
            out.push_str(&format!(
                "{:<lw$} |{:<w$}| {:>4} ({:.2})\n",
                bar.label,
                "#".repeat(filled.min(width)),
                bar.count,
                bar.average,
                lw = label_width,
                w = width,
            ));
        }
        out
    }
}
