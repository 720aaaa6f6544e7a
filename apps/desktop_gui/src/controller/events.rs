//! Events published by the backend worker to the UI thread.

use client_core::ControllerSnapshot;

#[derive(Debug)]
pub enum UiEvent {
    /// Controller state after a command changed it. Text inputs are only
    /// taken over when `sync_form` is set (edit, cancel, successful submit).
    Snapshot {
        snapshot: ControllerSnapshot,
        sync_form: bool,
    },
    ConfirmRequested {
        question: String,
    },
    Info(String),
    Error(String),
}
