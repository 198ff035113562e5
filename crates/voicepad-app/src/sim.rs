//! Simulated speech recognizer for driving the session interactively.
//!
//! No platform recognizer ships with the binary; the console shell stands
//! in for one by speaking fragments through this adapter. It keeps the full
//! result list for the capture session and delivers updates with a result
//! index marking the first undelivered fragment, the same contract a real
//! recognizer uses: interim fragments are re-reported at a stable position
//! until they finalize.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use voicepad_core::config::SessionConfig;
use voicepad_core::error::Result;
use voicepad_core::events::{RecognitionEvent, SpeechFragment};
use voicepad_session::{RecognitionSink, SpeechCapability};

struct SimInner {
    config: SessionConfig,
    sink: OnceLock<RecognitionSink>,
    active: AtomicBool,
    results: Mutex<ResultList>,
}

#[derive(Default)]
struct ResultList {
    fragments: Vec<SpeechFragment>,
    /// Fragments below this index were delivered as final.
    finalized: usize,
}

/// Cloneable handle; one clone goes into the session as its capability,
/// another stays with the shell as the event driver.
#[derive(Clone)]
pub struct SimulatedRecognizer {
    inner: Arc<SimInner>,
}

impl SimulatedRecognizer {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            inner: Arc::new(SimInner {
                config,
                sink: OnceLock::new(),
                active: AtomicBool::new(false),
                results: Mutex::new(ResultList::default()),
            }),
        }
    }

    /// Connect the recognizer to the session queue. Called once after the
    /// session task is spawned.
    pub fn attach(&self, sink: RecognitionSink) {
        let _ = self.inner.sink.set(sink);
    }

    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::SeqCst)
    }

    /// Report an in-progress fragment. Replaces the trailing interim
    /// fragment, as a recognizer revises its current utterance.
    pub fn hear_interim(&self, text: &str) {
        if !self.is_active() {
            return;
        }
        let mut results = self.inner.results.lock().expect("sim results poisoned");
        match results.fragments.last_mut() {
            Some(last) if !last.is_final => last.transcript = text.to_string(),
            _ => results.fragments.push(SpeechFragment::interim(text)),
        }
        self.deliver(&results);
    }

    /// Finalize the current utterance.
    pub fn hear_final(&self, text: &str) {
        if !self.is_active() {
            return;
        }
        let mut results = self.inner.results.lock().expect("sim results poisoned");
        match results.fragments.last_mut() {
            Some(last) if !last.is_final => *last = SpeechFragment::fin(text),
            _ => results.fragments.push(SpeechFragment::fin(text)),
        }
        self.deliver(&results);
        results.finalized = results.fragments.len();
    }

    /// Report a recognizer failure and end capture.
    pub fn fail(&self, code: &str) {
        if !self.is_active() {
            return;
        }
        self.inner.active.store(false, Ordering::SeqCst);
        self.push(RecognitionEvent::Error {
            code: code.to_string(),
        });
    }

    /// End capture from the recognizer side (e.g. silence timeout).
    pub fn end(&self) {
        if self.inner.active.swap(false, Ordering::SeqCst) {
            self.push(RecognitionEvent::End);
        }
    }

    fn deliver(&self, results: &ResultList) {
        self.push(RecognitionEvent::Results {
            result_index: results.finalized,
            results: results.fragments.clone(),
        });
    }

    fn push(&self, event: RecognitionEvent) {
        if let Some(sink) = self.inner.sink.get() {
            sink.push(event);
        } else {
            tracing::warn!(event = event.event_name(), "Recognizer not attached");
        }
    }
}

impl SpeechCapability for SimulatedRecognizer {
    fn is_available(&self) -> bool {
        true
    }

    fn start(&mut self) -> Result<()> {
        let mut results = self.inner.results.lock().expect("sim results poisoned");
        *results = ResultList::default();
        self.inner.active.store(true, Ordering::SeqCst);
        tracing::info!(
            language = %self.inner.config.language,
            interim_results = self.inner.config.interim_results,
            "Simulated recognizer started"
        );
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.end();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_activates_and_resets() {
        let sim = SimulatedRecognizer::new(SessionConfig::default());
        let mut cap = sim.clone();
        assert!(!sim.is_active());
        cap.start().unwrap();
        assert!(sim.is_active());
        cap.stop().unwrap();
        assert!(!sim.is_active());
    }

    #[test]
    fn test_inactive_recognizer_ignores_speech() {
        let sim = SimulatedRecognizer::new(SessionConfig::default());
        // Not started; nothing should be recorded or delivered.
        sim.hear_interim("ghost");
        sim.hear_final("ghost");
        assert!(sim.inner.results.lock().unwrap().fragments.is_empty());
    }

    #[test]
    fn test_final_advances_delivered_window() {
        let sim = SimulatedRecognizer::new(SessionConfig::default());
        sim.clone().start().unwrap();

        sim.hear_interim("he");
        sim.hear_interim("hello");
        sim.hear_final("hello");
        sim.hear_interim("wor");

        let results = sim.inner.results.lock().unwrap();
        assert_eq!(results.fragments.len(), 2);
        assert!(results.fragments[0].is_final);
        assert!(!results.fragments[1].is_final);
        assert_eq!(results.finalized, 1);
    }
}
