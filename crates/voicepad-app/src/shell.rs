//! Line-oriented console shell.
//!
//! Stands in for the presentation layer: renders session and reminder
//! snapshots and forwards user intents to the core. Speech is driven
//! through the simulated recognizer (`partial`/`final`/`fail`/`end`).

use tokio::io::{AsyncBufReadExt, BufReader};

use voicepad_core::error::Result;
use voicepad_core::types::SessionSnapshot;
use voicepad_reminders::ReminderStore;
use voicepad_session::SessionHandle;

use crate::sim::SimulatedRecognizer;

const HELP: &str = "\
Session:   start | stop
Recognizer: partial <text> | final <text> | fail <code> | end
Reminders: add <text> | rm <index> | edit <index> | draft <text> | save | cancel | list
Other:     help | quit";

pub async fn run(
    handle: SessionHandle,
    recognizer: SimulatedRecognizer,
    mut reminders: ReminderStore,
) -> Result<()> {
    println!("voicepad console shell. Type 'help' for commands.");
    render_reminders(&reminders);

    // Render session snapshots as the state-owning task publishes them.
    let mut watcher = handle.watch();
    tokio::spawn(async move {
        while watcher.changed().await.is_ok() {
            let snap = watcher.borrow().clone();
            render_session(&snap);
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = match line.split_once(' ') {
            Some((c, r)) => (c, r),
            None => (line, ""),
        };

        match command {
            "" => {}
            "start" => handle.start(),
            "stop" => handle.stop(),
            "partial" => recognizer.hear_interim(rest),
            "final" => recognizer.hear_final(rest),
            "fail" => recognizer.fail(rest),
            "end" => recognizer.end(),
            "add" => {
                reminders.add(rest);
                render_reminders(&reminders);
            }
            "rm" => match rest.parse::<usize>() {
                Ok(index) => {
                    reminders.remove(index);
                    render_reminders(&reminders);
                }
                Err(_) => println!("usage: rm <index>"),
            },
            "edit" => match rest.parse::<usize>() {
                Ok(index) => {
                    reminders.begin_edit(index);
                    render_reminders(&reminders);
                }
                Err(_) => println!("usage: edit <index>"),
            },
            "draft" => {
                reminders.update_draft(rest);
                render_reminders(&reminders);
            }
            "save" => {
                reminders.commit_edit();
                render_reminders(&reminders);
            }
            "cancel" => {
                reminders.cancel_edit();
                render_reminders(&reminders);
            }
            "list" => render_reminders(&reminders),
            "help" => println!("{}", HELP),
            "quit" | "exit" => break,
            other => println!("unknown command '{}' (try 'help')", other),
        }
    }

    Ok(())
}

fn render_session(snap: &SessionSnapshot) {
    let transcript = if snap.finalized_text.is_empty() && snap.interim_text.is_empty() {
        "...".to_string()
    } else if snap.interim_text.is_empty() {
        snap.finalized_text.clone()
    } else {
        format!("{} [{}]", snap.finalized_text, snap.interim_text).trim().to_string()
    };

    println!("[{}] Transcript: {}", snap.status, transcript);
    if let Some(error) = &snap.last_error {
        println!("  ! {}", error);
    }
}

fn render_reminders(store: &ReminderStore) {
    let snap = store.snapshot();
    if snap.reminders.is_empty() {
        println!("Reminders: (none)");
        return;
    }
    println!("Reminders:");
    for (i, text) in snap.reminders.iter().enumerate() {
        match (snap.active_index, &snap.draft_text) {
            (Some(active), Some(draft)) if active == i => {
                println!("  {}. {} (editing: {})", i, text, draft)
            }
            _ => println!("  {}. {}", i, text),
        }
    }
}
