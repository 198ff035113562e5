//! Reminder list state machine.
//!
//! Reminders are addressed by position; there is no separate stable id.
//! At most one edit session is active at a time. Invalid indices and empty
//! input are idempotent no-ops rather than errors, so routine UI races
//! (double-click delete, stale button) cannot crash the store.

use std::sync::Arc;

use tracing::{debug, warn};

use voicepad_core::types::ReminderSnapshot;
use voicepad_storage::ListStore;

/// Logical storage key for the reminder list.
pub const REMINDERS_KEY: &str = "reminders";

/// An in-progress edit of one reminder.
#[derive(Debug, Clone)]
struct EditSession {
    index: usize,
    draft: String,
}

/// Ordered reminder list with write-through persistence.
pub struct ReminderStore {
    items: Vec<String>,
    edit: Option<EditSession>,
    storage: Arc<dyn ListStore>,
}

impl ReminderStore {
    /// Load the persisted list at startup.
    ///
    /// Absent, unreadable, or corrupt data degrades to the empty list.
    pub fn load(storage: Arc<dyn ListStore>) -> Self {
        let items = match storage.read_list(REMINDERS_KEY) {
            Ok(Some(items)) => {
                debug!(count = items.len(), "Reminders loaded");
                items
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to load reminders, starting empty");
                Vec::new()
            }
        };

        Self {
            items,
            edit: None,
            storage,
        }
    }

    /// Append a reminder. Whitespace-only input is a no-op. The stored text
    /// is the trimmed form. An active edit session is left untouched.
    pub fn add(&mut self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        self.items.push(trimmed.to_string());
        self.persist();
    }

    /// Remove the reminder at `index`. Out-of-range is a no-op.
    ///
    /// An edit targeting the removed entry is cancelled; an edit past it is
    /// shifted down so it keeps pointing at the same logical entry.
    pub fn remove(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        self.items.remove(index);

        self.edit = match self.edit.take() {
            Some(edit) if edit.index == index => None,
            Some(mut edit) => {
                if edit.index > index {
                    edit.index -= 1;
                }
                Some(edit)
            }
            None => None,
        };

        self.persist();
    }

    /// Start editing the reminder at `index`. Out-of-range is a no-op.
    /// A prior uncommitted edit is discarded (last writer wins).
    pub fn begin_edit(&mut self, index: usize) {
        let Some(current) = self.items.get(index) else {
            return;
        };
        self.edit = Some(EditSession {
            index,
            draft: current.clone(),
        });
    }

    /// Replace the draft text. No-op when no edit is active.
    pub fn update_draft(&mut self, text: &str) {
        if let Some(edit) = self.edit.as_mut() {
            edit.draft = text.to_string();
        }
    }

    /// Commit the active edit. A whitespace-only draft is a no-op and the
    /// edit stays open; otherwise the trimmed draft replaces the entry and
    /// the edit session is cleared.
    pub fn commit_edit(&mut self) {
        let Some(edit) = self.edit.as_ref() else {
            return;
        };
        let trimmed = edit.draft.trim();
        if trimmed.is_empty() {
            return;
        }
        self.items[edit.index] = trimmed.to_string();
        self.edit = None;
        self.persist();
    }

    /// Discard the active edit without touching the list.
    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// Snapshot for the presentation layer.
    pub fn snapshot(&self) -> ReminderSnapshot {
        ReminderSnapshot {
            reminders: self.items.clone(),
            active_index: self.edit.as_ref().map(|e| e.index),
            draft_text: self.edit.as_ref().map(|e| e.draft.clone()),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // Write-through: the full list after every mutation. A failed write is
    // swallowed; the next successful write reconciles.
    fn persist(&self) {
        if let Err(e) = self.storage.write_list(REMINDERS_KEY, &self.items) {
            warn!(error = %e, "Failed to persist reminders, keeping in-memory state");
        }
    }
}

impl std::fmt::Debug for ReminderStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReminderStore")
            .field("items", &self.items)
            .field("edit", &self.edit)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
