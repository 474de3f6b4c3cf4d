//! Session manager

use emotion_stats::{Detection, EmotionClasses, EmotionStatistics, StatsConfig, StatsSnapshot};
use metrics::counter;
use tracing::{debug, info, warn};

use crate::{Session, SessionError, SessionSource, SessionState};

/// Owns the active session and feeds it one frame record at a time
pub struct SessionManager {
    classes: EmotionClasses,
    config: StatsConfig,
    current: Option<Session>,
    /// Camera used by `toggle` when restarting
    camera_device: u32,
}

impl SessionManager {
    /// Create a manager; the statistics config is checked up front
    pub fn new(classes: EmotionClasses, config: StatsConfig) -> Result<Self, SessionError> {
        EmotionStatistics::new(classes.clone(), config.clone())?;
        Ok(Self {
            classes,
            config,
            current: None,
            camera_device: 0,
        })
    }

    /// Start a new session, discarding the previous one
    pub fn start(&mut self, source: SessionSource) -> Result<&Session, SessionError> {
        if let Some(previous) = self.current.take() {
            info!(
                "Discarding session {} ({}) after {} frames",
                previous.id, previous.source, previous.frames_processed
            );
        }
        if let SessionSource::Camera { device } = source {
            self.camera_device = device;
        }

        let stats = EmotionStatistics::new(self.classes.clone(), self.config.clone())?;
        let session = self.current.insert(Session::new(source, stats));
        info!("Started session {} from {}", session.id, session.source);
        counter!("emotion_sessions_started_total").increment(1);
        Ok(session)
    }

    /// Stop the running session, keeping its statistics for display
    pub fn stop(&mut self) -> Option<&Session> {
        let session = self.current.as_mut()?;
        if session.is_running() {
            session.state = SessionState::Stopped;
            info!(
                "Stopped session {} after {} frames",
                session.id, session.frames_processed
            );
        }
        Some(&*session)
    }

    /// Stop if running, otherwise start a camera session on the last camera
    pub fn toggle(&mut self) -> Result<&Session, SessionError> {
        if self.is_running() {
            return self.stop().ok_or(SessionError::NoSession);
        }
        let device = self.camera_device;
        self.start(SessionSource::Camera { device })
    }

    /// Feed one processed frame into the running session
    ///
    /// A rejected frame ends the session: it means the detector and the
    /// class set disagree.
    pub fn record_frame(&mut self, detections: &[Detection]) -> Result<StatsSnapshot, SessionError> {
        let session = match self.current.as_mut() {
            Some(session) if session.is_running() => session,
            Some(_) => return Err(SessionError::NotRunning),
            None => return Err(SessionError::NoSession),
        };

        match session.stats.update(detections) {
            Ok(snapshot) => {
                session.frames_processed += 1;
                counter!("emotion_frames_total").increment(1);
                counter!("emotion_detections_total").increment(detections.len() as u64);
                debug!(
                    "Session {} frame {}: {} detections, {} in window",
                    session.id,
                    session.frames_processed,
                    detections.len(),
                    snapshot.total_count()
                );
                Ok(snapshot)
            }
            Err(e) => {
                warn!("Session {} failed at frame {}: {}", session.id, session.frames_processed + 1, e);
                session.state = SessionState::Failed {
                    reason: e.to_string(),
                };
                counter!("emotion_session_failures_total").increment(1);
                Err(e.into())
            }
        }
    }

    /// Clear the statistics of the current session without ending it
    pub fn reset_statistics(&mut self) -> Result<(), SessionError> {
        let session = self.current.as_mut().ok_or(SessionError::NoSession)?;
        session.stats.reset();
        info!("Statistics of session {} reset", session.id);
        Ok(())
    }

    /// Get the current session, if any
    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// Check if a session is running
    pub fn is_running(&self) -> bool {
        self.current.as_ref().is_some_and(Session::is_running)
    }

    /// Get the class set
    pub fn classes(&self) -> &EmotionClasses {
        &self.classes
    }

    /// Get the statistics configuration
    pub fn config(&self) -> &StatsConfig {
        &self.config
    }
}
