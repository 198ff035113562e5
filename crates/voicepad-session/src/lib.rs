//! VoicePad session crate - the transcription session state machine.
//!
//! [`TranscriptionSession`] turns the speech capability's event stream into
//! a race-free transcript model: finalized text accumulates append-only,
//! interim text is overwrite-only, and overlapping result windows never
//! double-count. [`SessionRunner`] wraps the session in a single
//! state-owning task fed by one ordered event queue, so no locking is
//! needed around session state.

pub mod capability;
pub mod runner;
pub mod session;

pub use capability::{NullCapability, SpeechCapability};
pub use runner::{RecognitionSink, SessionHandle, SessionRunner};
pub use session::{TranscriptListener, TranscriptionSession};
