use serde::{Deserialize, Serialize};

/// One recognition result fragment from the speech capability.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechFragment {
    /// Final fragments will not change further; interim fragments are
    /// re-reported at the same index until finalized.
    pub is_final: bool,
    pub transcript: String,
}

impl SpeechFragment {
    pub fn interim(transcript: impl Into<String>) -> Self {
        Self {
            is_final: false,
            transcript: transcript.into(),
        }
    }

    pub fn fin(transcript: impl Into<String>) -> Self {
        Self {
            is_final: true,
            transcript: transcript.into(),
        }
    }
}

/// Events delivered by the speech capability adapter.
///
/// The adapter is a push-style event source; events are queued and consumed
/// strictly in arrival order by the session task.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RecognitionEvent {
    /// An incremental result update. `results` is the full ordered fragment
    /// list for the capture session; `result_index` marks the first fragment
    /// not yet delivered by a prior update.
    Results {
        result_index: usize,
        results: Vec<SpeechFragment>,
    },

    /// The capability reported a runtime failure.
    Error { code: String },

    /// The capture session ended on the capability side.
    End,
}

impl RecognitionEvent {
    /// Returns a short event name for logging.
    pub fn event_name(&self) -> &'static str {
        match self {
            RecognitionEvent::Results { .. } => "recognition_results",
            RecognitionEvent::Error { .. } => "recognition_error",
            RecognitionEvent::End => "recognition_end",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_name() {
        let event = RecognitionEvent::Results {
            result_index: 0,
            results: vec![SpeechFragment::fin("hello")],
        };
        assert_eq!(event.event_name(), "recognition_results");
        assert_eq!(
            RecognitionEvent::Error {
                code: "no-speech".to_string()
            }
            .event_name(),
            "recognition_error"
        );
        assert_eq!(RecognitionEvent::End.event_name(), "recognition_end");
    }

    #[test]
    fn test_fragment_constructors() {
        let f = SpeechFragment::fin("done");
        assert!(f.is_final);
        assert_eq!(f.transcript, "done");

        let i = SpeechFragment::interim("in prog");
        assert!(!i.is_final);
        assert_eq!(i.transcript, "in prog");
    }

    #[test]
    fn test_event_serialization_round_trip() {
        let events = vec![
            RecognitionEvent::Results {
                result_index: 2,
                results: vec![SpeechFragment::fin("one"), SpeechFragment::interim("tw")],
            },
            RecognitionEvent::Error {
                code: "audio-capture".to_string(),
            },
            RecognitionEvent::End,
        ];

        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let rt: RecognitionEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(*event, rt);
        }
    }
}
