//! Speech capability boundary.
//!
//! The core does not implement recognition. It detects a capability, starts
//! and stops it, and consumes the [`voicepad_core::RecognitionEvent`]s the
//! capability pushes into the session queue.

use voicepad_core::error::{Result, VoicepadError};
use voicepad_core::types::SessionError;

/// An opaque speech recognition capability.
///
/// Implementations are configured at construction (language, interim
/// results, alternatives) and deliver events through a
/// [`crate::RecognitionSink`] handed to them by the composition root.
pub trait SpeechCapability: Send {
    /// Whether a recognizer was detected in this environment.
    fn is_available(&self) -> bool;

    /// Begin a capture session.
    fn start(&mut self) -> Result<()>;

    /// Request the end of the current capture session. The capability
    /// confirms with a `RecognitionEvent::End`.
    fn stop(&mut self) -> Result<()>;
}

/// Capability for environments without a recognizer. Never available.
#[derive(Debug, Default)]
pub struct NullCapability;

impl SpeechCapability for NullCapability {
    fn is_available(&self) -> bool {
        false
    }

    fn start(&mut self) -> Result<()> {
        Err(VoicepadError::CapabilityUnavailable(
            SessionError::CapabilityUnavailable.to_string(),
        ))
    }

    fn stop(&mut self) -> Result<()> {
        Ok(())
    }
}
