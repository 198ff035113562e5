//! Single-consumer session runner.
//!
//! The capability delivers results as push-style callbacks; the runner
//! serializes them with user intents on one queue so every message fully
//! completes its state mutation before the next is processed. Snapshots go
//! out through a watch channel after each message.

use tokio::sync::{mpsc, watch};

use voicepad_core::events::RecognitionEvent;
use voicepad_core::types::SessionSnapshot;

use crate::session::TranscriptionSession;

/// User intents the presentation shell can issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    Stop,
}

#[derive(Debug)]
enum SessionMessage {
    Command(SessionCommand),
    Recognition(RecognitionEvent),
}

/// Cloneable intent surface over a running session task.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<SessionMessage>,
    snapshot_rx: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    pub fn start(&self) {
        self.send(SessionMessage::Command(SessionCommand::Start));
    }

    pub fn stop(&self) {
        self.send(SessionMessage::Command(SessionCommand::Stop));
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Subscribe to snapshot updates.
    pub fn watch(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Push-side handle for a capability adapter.
    pub fn recognition_sink(&self) -> RecognitionSink {
        RecognitionSink {
            tx: self.tx.clone(),
        }
    }

    fn send(&self, message: SessionMessage) {
        if self.tx.send(message).is_err() {
            tracing::debug!("Session task gone, message dropped");
        }
    }
}

/// Handle a capability adapter uses to push events into the session queue.
#[derive(Clone)]
pub struct RecognitionSink {
    tx: mpsc::UnboundedSender<SessionMessage>,
}

impl RecognitionSink {
    pub fn push(&self, event: RecognitionEvent) {
        if self.tx.send(SessionMessage::Recognition(event)).is_err() {
            tracing::debug!("Session task gone, recognition event dropped");
        }
    }
}

/// Spawns the state-owning task for a [`TranscriptionSession`].
pub struct SessionRunner;

impl SessionRunner {
    /// Move `session` into a spawned task and return its handle.
    pub fn spawn(mut session: TranscriptionSession) -> SessionHandle {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot());

        tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                match message {
                    SessionMessage::Command(SessionCommand::Start) => {
                        if let Err(e) = session.start() {
                            tracing::warn!(error = %e, "Start rejected");
                        }
                    }
                    SessionMessage::Command(SessionCommand::Stop) => {
                        if let Err(e) = session.stop() {
                            tracing::warn!(error = %e, "Stop failed");
                        }
                    }
                    SessionMessage::Recognition(RecognitionEvent::Results {
                        result_index,
                        results,
                    }) => session.on_recognition_update(result_index, &results),
                    SessionMessage::Recognition(RecognitionEvent::Error { code }) => {
                        session.on_recognition_error(&code)
                    }
                    SessionMessage::Recognition(RecognitionEvent::End) => {
                        session.on_recognition_end()
                    }
                    SessionMessage::Recognition(other) => {
                        tracing::debug!(event = other.event_name(), "Unhandled recognition event")
                    }
                }

                if snapshot_tx.send(session.snapshot()).is_err() {
                    // No watchers left; keep processing for the transcript
                    // listener's sake.
                    tracing::trace!("No snapshot watchers");
                }
            }
            tracing::debug!("Session queue closed, runner exiting");
        });

        SessionHandle { tx, snapshot_rx }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use voicepad_core::error::Result;
    use voicepad_core::events::SpeechFragment;
    use voicepad_core::types::{SessionError, SessionStatus};

    use crate::capability::{NullCapability, SpeechCapability};

    use super::*;

    struct AlwaysOnCapability;

    impl SpeechCapability for AlwaysOnCapability {
        fn is_available(&self) -> bool {
            true
        }

        fn start(&mut self) -> Result<()> {
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            Ok(())
        }
    }

    fn spawn_session() -> SessionHandle {
        SessionRunner::spawn(TranscriptionSession::new(Box::new(AlwaysOnCapability)))
    }

    async fn wait_for<F>(rx: &mut watch::Receiver<SessionSnapshot>, pred: F) -> SessionSnapshot
    where
        F: Fn(&SessionSnapshot) -> bool,
    {
        tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                if pred(&rx.borrow()) {
                    return rx.borrow().clone();
                }
                rx.changed().await.expect("session task died");
            }
        })
        .await
        .expect("snapshot condition not reached")
    }

    #[tokio::test]
    async fn test_initial_snapshot_is_idle() {
        let handle = spawn_session();
        assert_eq!(handle.snapshot().status, SessionStatus::Idle);
    }

    #[tokio::test]
    async fn test_start_publishes_listening_snapshot() {
        let handle = spawn_session();
        let mut rx = handle.watch();

        handle.start();
        let snap = wait_for(&mut rx, |s| s.status == SessionStatus::Listening).await;
        assert!(snap.finalized_text.is_empty());
    }

    #[tokio::test]
    async fn test_events_processed_in_arrival_order() {
        let handle = spawn_session();
        let mut rx = handle.watch();
        let sink = handle.recognition_sink();

        handle.start();
        sink.push(RecognitionEvent::Results {
            result_index: 0,
            results: vec![SpeechFragment::fin("one")],
        });
        sink.push(RecognitionEvent::Results {
            result_index: 1,
            results: vec![SpeechFragment::fin("one"), SpeechFragment::fin("two")],
        });
        sink.push(RecognitionEvent::Results {
            result_index: 2,
            results: vec![
                SpeechFragment::fin("one"),
                SpeechFragment::fin("two"),
                SpeechFragment::interim("thr"),
            ],
        });

        let snap = wait_for(&mut rx, |s| s.interim_text == "thr").await;
        assert_eq!(snap.finalized_text, "one two");
        assert_eq!(snap.status, SessionStatus::Listening);
    }

    #[tokio::test]
    async fn test_stop_then_end_reaches_idle() {
        let handle = spawn_session();
        let mut rx = handle.watch();
        let sink = handle.recognition_sink();

        handle.start();
        wait_for(&mut rx, |s| s.status == SessionStatus::Listening).await;

        handle.stop();
        sink.push(RecognitionEvent::End);
        let snap = wait_for(&mut rx, |s| s.status == SessionStatus::Idle).await;
        assert!(snap.interim_text.is_empty());
    }

    #[tokio::test]
    async fn test_error_event_surfaces_in_snapshot() {
        let handle = spawn_session();
        let mut rx = handle.watch();
        let sink = handle.recognition_sink();

        handle.start();
        sink.push(RecognitionEvent::Error {
            code: "no-speech".to_string(),
        });

        let snap = wait_for(&mut rx, |s| s.status == SessionStatus::Error).await;
        assert_eq!(
            snap.last_error,
            Some(SessionError::Recognition("no-speech".to_string()))
        );
    }

    #[tokio::test]
    async fn test_restart_after_error_clears_snapshot() {
        let handle = spawn_session();
        let mut rx = handle.watch();
        let sink = handle.recognition_sink();

        handle.start();
        sink.push(RecognitionEvent::Error {
            code: "network".to_string(),
        });
        wait_for(&mut rx, |s| s.status == SessionStatus::Error).await;

        handle.start();
        let snap = wait_for(&mut rx, |s| s.status == SessionStatus::Listening).await;
        assert!(snap.last_error.is_none());
    }

    #[tokio::test]
    async fn test_unavailable_capability_surfaces_error_snapshot() {
        let handle = SessionRunner::spawn(TranscriptionSession::new(Box::new(NullCapability)));
        let mut rx = handle.watch();

        handle.start();
        let snap = wait_for(&mut rx, |s| s.status == SessionStatus::Error).await;
        assert_eq!(snap.last_error, Some(SessionError::CapabilityUnavailable));
    }

    #[tokio::test]
    async fn test_double_stop_is_harmless() {
        let handle = spawn_session();
        let mut rx = handle.watch();
        let sink = handle.recognition_sink();

        handle.start();
        wait_for(&mut rx, |s| s.status == SessionStatus::Listening).await;
        handle.stop();
        handle.stop();
        sink.push(RecognitionEvent::End);
        handle.stop();

        let snap = wait_for(&mut rx, |s| s.status == SessionStatus::Idle).await;
        assert!(snap.last_error.is_none());
    }
}
