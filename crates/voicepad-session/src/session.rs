//! Transcription session state machine.
//!
//! Valid transitions for the capture lifecycle:
//! - Idle -> Listening (start)
//! - Listening -> Idle (adapter end, after stop or on its own)
//! - Listening -> Error (adapter error)
//! - Error -> Listening (start always resets)
//!
//! `stop()` while Idle is a no-op; `start()` while Listening is rejected.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use voicepad_core::error::{Result, VoicepadError};
use voicepad_core::events::SpeechFragment;
use voicepad_core::types::{SessionError, SessionSnapshot, SessionStatus};

use crate::capability::SpeechCapability;

/// Callback receiving the trimmed finalized transcript after every update
/// that finalized at least one fragment.
pub type TranscriptListener = Box<dyn Fn(&str) + Send>;

/// Owns listening state, the interim buffer, the finalized transcript, and
/// the error status; consumes capability events strictly in arrival order.
pub struct TranscriptionSession {
    status: SessionStatus,
    /// Finalized utterances, each followed by one space. Append-only within
    /// a capture session; snapshots expose the trimmed view.
    finalized: String,
    interim: String,
    last_error: Option<SessionError>,
    /// First fragment index not yet consumed as final. Advances only past
    /// final fragments so re-reported interim fragments stay live.
    cursor: usize,
    session_id: Option<Uuid>,
    started_at: Option<DateTime<Utc>>,
    capability: Box<dyn SpeechCapability>,
    transcript_listener: Option<TranscriptListener>,
}

impl TranscriptionSession {
    /// Create an idle session over the given capability.
    pub fn new(capability: Box<dyn SpeechCapability>) -> Self {
        Self {
            status: SessionStatus::Idle,
            finalized: String::new(),
            interim: String::new(),
            last_error: None,
            cursor: 0,
            session_id: None,
            started_at: None,
            capability,
            transcript_listener: None,
        }
    }

    /// Register the transcript listener. It fires once per update that
    /// finalized at least one fragment; interim-only updates never notify.
    pub fn with_transcript_listener(mut self, listener: TranscriptListener) -> Self {
        self.transcript_listener = Some(listener);
        self
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Trimmed finalized transcript.
    pub fn finalized_text(&self) -> &str {
        self.finalized.trim()
    }

    pub fn interim_text(&self) -> &str {
        &self.interim
    }

    pub fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    /// Point-in-time view for the presentation layer.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            finalized_text: self.finalized.trim().to_string(),
            interim_text: self.interim.clone(),
            last_error: self.last_error.clone(),
        }
    }

    /// Start a capture session.
    ///
    /// Rejected while Listening (no concurrent capture). If the capability
    /// is undetected, leaves the session in Error with a descriptive
    /// message and does not attempt to start. Otherwise clears all
    /// transcript state, assigns a fresh session id, and issues
    /// capability-start.
    pub fn start(&mut self) -> Result<()> {
        if self.status == SessionStatus::Listening {
            return Err(VoicepadError::Session(
                "capture already in progress".to_string(),
            ));
        }

        if !self.capability.is_available() {
            let error = SessionError::CapabilityUnavailable;
            let message = error.to_string();
            self.status = SessionStatus::Error;
            self.last_error = Some(error);
            return Err(VoicepadError::CapabilityUnavailable(message));
        }

        self.finalized.clear();
        self.interim.clear();
        self.last_error = None;
        self.cursor = 0;

        let id = Uuid::new_v4();
        self.session_id = Some(id);
        self.started_at = Some(Utc::now());
        self.status = SessionStatus::Listening;
        tracing::info!(session_id = %id, "Capture session started");

        if let Err(e) = self.capability.start() {
            tracing::warn!(error = %e, "Capability failed to start");
            self.status = SessionStatus::Error;
            self.last_error = Some(SessionError::Recognition(e.to_string()));
            return Err(e);
        }

        Ok(())
    }

    /// Issue capability-stop. No-op unless Listening. The transition to
    /// Idle happens when the capability confirms with its end event.
    pub fn stop(&mut self) -> Result<()> {
        if self.status != SessionStatus::Listening {
            tracing::debug!(status = %self.status, "Stop ignored, not listening");
            return Ok(());
        }
        tracing::debug!("Stop issued, awaiting capability end");
        self.capability.stop()
    }

    /// Consume one result update from the capability.
    ///
    /// `results` is the full ordered fragment list for this capture
    /// session; `result_index` marks the first fragment the capability has
    /// not delivered before. Fragments below the session's own cursor are
    /// skipped so overlapping windows never double-count a final fragment.
    pub fn on_recognition_update(&mut self, result_index: usize, results: &[SpeechFragment]) {
        if self.status != SessionStatus::Listening {
            tracing::debug!(status = %self.status, "Recognition update dropped");
            return;
        }

        let mut interim_acc = String::new();
        let mut finals = 0usize;

        for (idx, fragment) in results.iter().enumerate().skip(result_index) {
            if idx < self.cursor {
                continue;
            }
            if fragment.is_final {
                self.finalized.push_str(&fragment.transcript);
                self.finalized.push(' ');
                self.cursor = idx + 1;
                finals += 1;
            } else {
                interim_acc.push_str(&fragment.transcript);
            }
        }

        // Overwrite, never append: only the latest unfinalized state matters.
        self.interim = interim_acc;

        if finals > 0 {
            tracing::debug!(finals, transcript_len = self.finalized.len(), "Fragments finalized");
            if let Some(listener) = &self.transcript_listener {
                listener(self.finalized.trim());
            }
        }
    }

    /// The capability reported a runtime failure. Carries its code verbatim.
    pub fn on_recognition_error(&mut self, code: &str) {
        tracing::warn!(code, "Recognition error");
        self.last_error = Some(SessionError::Recognition(code.to_string()));
        self.status = SessionStatus::Error;
        // Capture is no longer active; stale interim must not outlive it.
        self.interim.clear();
    }

    /// The capability's capture session ended.
    pub fn on_recognition_end(&mut self) {
        self.interim.clear();
        if self.status == SessionStatus::Error {
            return;
        }
        self.status = SessionStatus::Idle;

        if let (Some(id), Some(started)) = (self.session_id, self.started_at) {
            let elapsed = (Utc::now() - started).num_milliseconds() as f32 / 1000.0;
            tracing::info!(session_id = %id, elapsed_secs = elapsed, "Capture session ended");
        }
    }
}

impl std::fmt::Debug for TranscriptionSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscriptionSession")
            .field("status", &self.status)
            .field("finalized", &self.finalized)
            .field("interim", &self.interim)
            .field("last_error", &self.last_error)
            .field("cursor", &self.cursor)
            .field("session_id", &self.session_id)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
