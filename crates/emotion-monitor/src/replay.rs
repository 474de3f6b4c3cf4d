//! Replay of recorded frame detections
//!
//! Input is JSON lines, one line per processed frame. A line is an array of
//! detections, each either a `["Happy", 0.8]` pair or a
//! `{"label": "Happy", "confidence": 0.8}` object; `[]` is a frame without
//! faces. Blank lines are skipped.

use std::io::{self, BufRead, Write};

use emotion_stats::{Detection, StatsSnapshot};
use serde::Deserialize;
use session::{EmotionChart, SessionError, SessionManager};
use thiserror::Error;
use tracing::{debug, info};

/// Replay errors
#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Line {line}: malformed frame record: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Line {line}: {source}")]
    Session {
        line: usize,
        #[source]
        source: SessionError,
    },

    #[error("Failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Replay output options
#[derive(Debug, Clone)]
pub struct ReplayOptions {
    /// Print the statistics every N frames
    pub every: u64,
    /// Print snapshots as JSON lines instead of text charts
    pub json: bool,
    /// Width of the text chart bars
    pub chart_width: usize,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            every: 1,
            json: false,
            chart_width: 30,
        }
    }
}

/// Outcome of a replay
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySummary {
    /// Frames fed into the session
    pub frames: u64,
    /// Statistics after the last frame
    pub snapshot: StatsSnapshot,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireDetection {
    Pair(String, f64),
    Object { label: String, confidence: f64 },
}

impl From<WireDetection> for Detection {
    fn from(wire: WireDetection) -> Self {
        match wire {
            WireDetection::Pair(label, confidence) => Detection::new(label, confidence),
            WireDetection::Object { label, confidence } => Detection::new(label, confidence),
        }
    }
}

/// Parse one JSON line into a frame record
pub fn parse_frame_line(line: &str) -> Result<Vec<Detection>, serde_json::Error> {
    let wire: Vec<WireDetection> = serde_json::from_str(line)?;
    Ok(wire.into_iter().map(Detection::from).collect())
}

/// Feed every frame record of `input` into the running session of `manager`
pub fn replay<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    manager: &mut SessionManager,
    options: &ReplayOptions,
) -> Result<ReplaySummary, ReplayError> {
    let every = options.every.max(1);
    let mut frames = 0u64;
    let mut snapshot = StatsSnapshot::default();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let detections = parse_frame_line(&line).map_err(|source| ReplayError::Parse {
            line: line_no,
            source,
        })?;
        snapshot = manager
            .record_frame(&detections)
            .map_err(|source| ReplayError::Session {
                line: line_no,
                source,
            })?;
        frames += 1;

        if frames % every == 0 {
            write_snapshot(out, frames, &snapshot, options)?;
        }
    }

    if !options.json {
        writeln!(out, "=== summary: {} frames ===", frames)?;
        write_chart(out, &snapshot, options.chart_width)?;
    }
    out.flush()?;

    info!("Replayed {} frames", frames);
    Ok(ReplaySummary { frames, snapshot })
}

fn write_snapshot<W: Write>(
    out: &mut W,
    frame: u64,
    snapshot: &StatsSnapshot,
    options: &ReplayOptions,
) -> Result<(), ReplayError> {
    debug!("Writing snapshot for frame {}", frame);
    if options.json {
        serde_json::to_writer(&mut *out, snapshot)?;
        writeln!(out)?;
    } else {
        writeln!(out, "--- frame {} ---", frame)?;
        write_chart(out, snapshot, options.chart_width)?;
    }
    Ok(())
}

fn write_chart<W: Write>(out: &mut W, snapshot: &StatsSnapshot, width: usize) -> io::Result<()> {
    let chart = EmotionChart::from_snapshot(snapshot);
    let (emotion, confidence) = chart.headline();
    writeln!(out, "{}  {}", emotion, confidence)?;
    write!(out, "{}", chart.render_text(width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use emotion_stats::{EmotionClasses, StatsConfig, StatsError};
    use session::SessionSource;
    use std::io::Cursor;

    fn running_manager(window: usize) -> SessionManager {
        let classes = EmotionClasses::new(["Happy", "Sad", "Surprise"]).unwrap();
        let mut manager = SessionManager::new(classes, StatsConfig::with_window(window)).unwrap();
        manager
            .start(SessionSource::File {
                path: "recording.jsonl".into(),
            })
            .unwrap();
        manager
    }

    #[test]
    fn test_parse_both_detection_forms() {
        let frame = parse_frame_line(r#"[["Happy", 0.8], {"label": "Sad", "confidence": 0.25}]"#).unwrap();
        assert_eq!(
            frame,
            vec![Detection::new("Happy", 0.8), Detection::new("Sad", 0.25)]
        );
        assert!(parse_frame_line("[]").unwrap().is_empty());
    }

    #[test]
    fn test_replay_eviction() {
        let input = "[[\"Sad\", 1.0]]\n[[\"Sad\", 0.0]]\n\n[]\n";
        let mut manager = running_manager(2);
        let mut out = Vec::new();

        let summary = replay(
            Cursor::new(input),
            &mut out,
            &mut manager,
            &ReplayOptions::default(),
        )
        .unwrap();

        assert_eq!(summary.frames, 3);
        let sad = summary.snapshot.get("Sad").unwrap();
        assert_eq!(sad.count, 1);
        assert_eq!(sad.average, 0.0);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("--- frame 3 ---"));
        assert!(text.contains("=== summary: 3 frames ==="));
        assert!(text.contains("Emotion: Sad"));
    }

    #[test]
    fn test_replay_json_every_other_frame() {
        let input = "[[\"Happy\", 0.8]]\n[[\"Happy\", 0.4]]\n[]\n[]\n";
        let mut manager = running_manager(100);
        let mut out = Vec::new();
        let options = ReplayOptions {
            every: 2,
            json: true,
            ..Default::default()
        };

        replay(Cursor::new(input), &mut out, &mut manager, &options).unwrap();

        let lines: Vec<StatsSnapshot> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        let happy = lines[0].get("Happy").unwrap();
        assert_eq!(happy.count, 2);
        assert!((happy.average - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let input = "[]\n{not json}\n";
        let mut manager = running_manager(10);
        let result = replay(
            Cursor::new(input),
            &mut Vec::new(),
            &mut manager,
            &ReplayOptions::default(),
        );
        assert!(matches!(result, Err(ReplayError::Parse { line: 2, .. })));
    }

    #[test]
    fn test_unknown_label_ends_replay() {
        let input = "[[\"Happy\", 0.9]]\n[[\"NotAClass\", 0.5]]\n[]\n";
        let mut manager = running_manager(10);
        let result = replay(
            Cursor::new(input),
            &mut Vec::new(),
            &mut manager,
            &ReplayOptions::default(),
        );

        match result {
            Err(ReplayError::Session { line, source }) => {
                assert_eq!(line, 2);
                assert_eq!(
                    source,
                    SessionError::Stats(StatsError::UnknownLabel {
                        label: "NotAClass".to_string()
                    })
                );
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!manager.is_running());
        assert_eq!(manager.current().unwrap().frames_processed(), 1);
    }
}
