pub mod config;
pub mod error;
pub mod events;
pub mod types;

pub use config::VoicepadConfig;
pub use error::{Result, VoicepadError};
pub use events::{RecognitionEvent, SpeechFragment};
pub use types::*;
