use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Session types
// =============================================================================

/// Operational state of a transcription session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No capture in progress. Ready to start.
    #[default]
    Idle,
    /// Actively capturing speech through the recognition capability.
    Listening,
    /// The capability failed or is unavailable. Cleared by the next start.
    Error,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Idle => write!(f, "Idle"),
            SessionStatus::Listening => write!(f, "Listening"),
            SessionStatus::Error => write!(f, "Error"),
        }
    }
}

/// User-visible error descriptor carried by a session snapshot.
///
/// Distinct from [`crate::VoicepadError`]: this is the recoverable,
/// displayable subset that survives in session state until the next start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionError {
    /// No recognition capability was detected at startup.
    CapabilityUnavailable,
    /// The capability reported a runtime error; carries its code verbatim.
    Recognition(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::CapabilityUnavailable => {
                write!(f, "speech recognition is not supported in this environment")
            }
            SessionError::Recognition(code) => {
                write!(f, "error occurred in recognition: {}", code)
            }
        }
    }
}

/// Point-in-time view of a transcription session, pushed to the
/// presentation layer after every processed message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    /// Finalized transcript, trimmed for display.
    pub finalized_text: String,
    /// Latest in-progress fragment text, replaced on every update.
    pub interim_text: String,
    pub last_error: Option<SessionError>,
}

// =============================================================================
// Reminder types
// =============================================================================

/// Point-in-time view of the reminder list and its edit session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSnapshot {
    /// Ordered reminder texts. Position is identity.
    pub reminders: Vec<String>,
    /// Index currently being edited, if any.
    pub active_index: Option<usize>,
    /// Working buffer of the active edit, if any.
    pub draft_text: Option<String>,
}
