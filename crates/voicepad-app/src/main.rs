//! VoicePad application binary - composition root.
//!
//! Ties the crates together into a single executable:
//! 1. Parse CLI args and initialize tracing
//! 2. Load configuration from TOML
//! 3. Open the SQLite reminder store
//! 4. Spawn the transcription session task over a simulated recognizer
//! 5. Run the console shell until EOF or quit

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use voicepad_core::config::VoicepadConfig;
use voicepad_reminders::ReminderStore;
use voicepad_session::{SessionRunner, SpeechCapability, TranscriptionSession};
use voicepad_storage::{Database, SqliteListStore};

mod cli;
mod shell;
mod sim;

use cli::CliArgs;
use sim::SimulatedRecognizer;

/// Expand ~ to home directory in a path string.
fn resolve_data_dir(data_dir: &str) -> PathBuf {
    if data_dir.starts_with("~/") || data_dir.starts_with("~\\") {
        #[cfg(target_os = "windows")]
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string());
        #[cfg(not(target_os = "windows"))]
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(&data_dir[2..])
    } else {
        PathBuf::from(data_dir)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Tracing. Priority: RUST_LOG > --log-level > config default.
    let config_file = args.resolve_config_path();
    let config = VoicepadConfig::load_or_default(&config_file);
    let level = args
        .resolve_log_level()
        .unwrap_or_else(|| config.general.log_level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();

    tracing::info!("Starting VoicePad v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Reminder storage.
    let data_dir = args
        .resolve_data_dir()
        .map(PathBuf::from)
        .unwrap_or_else(|| resolve_data_dir(&config.general.data_dir));
    let db_path = data_dir.join("voicepad.db");
    let db = Database::new(&db_path)?;
    tracing::info!(path = %db_path.display(), "Reminder database opened");

    let storage = Arc::new(SqliteListStore::new(Arc::new(db)));
    let reminders = ReminderStore::load(storage);

    // Transcription session over the simulated recognizer. The transcript
    // listener is the external consumer notified on finalized text only.
    let recognizer = SimulatedRecognizer::new(config.session.clone());
    let capability: Box<dyn SpeechCapability> = Box::new(recognizer.clone());
    let session = TranscriptionSession::new(capability).with_transcript_listener(Box::new(
        |transcript| {
            tracing::info!(transcript, "Transcript updated");
        },
    ));

    let handle = SessionRunner::spawn(session);
    recognizer.attach(handle.recognition_sink());

    shell::run(handle, recognizer, reminders).await?;

    tracing::info!("VoicePad shutting down");
    Ok(())
}
