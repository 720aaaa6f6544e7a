//! Backend commands queued from UI to backend worker.

use shared::domain::{UserId, UserRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Refresh,
    /// Carries the text shown in the window; the UI owns the inputs.
    Submit {
        display_name: String,
        email: String,
    },
    Edit(UserRecord),
    CancelEdit,
    Delete(UserId),
    DismissNotification,
    Tick,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Refresh => "refresh",
            BackendCommand::Submit { .. } => "submit",
            BackendCommand::Edit(_) => "edit",
            BackendCommand::CancelEdit => "cancel_edit",
            BackendCommand::Delete(_) => "delete",
            BackendCommand::DismissNotification => "dismiss_notification",
            BackendCommand::Tick => "tick",
        }
    }
}
