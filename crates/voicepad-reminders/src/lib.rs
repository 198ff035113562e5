//! VoicePad reminders crate - ordered reminder list with edit session.
//!
//! Write-through persistence: every mutating operation synchronously writes
//! the full list to the storage boundary. A failed write is logged and
//! swallowed; in-memory state stays authoritative for the session.

pub mod store;

pub use store::{ReminderStore, REMINDERS_KEY};
