//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};
use tokio::sync::mpsc;

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::trace!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Backend worker stopped; restart the application".to_string();
        }
    }
}

pub fn send_confirmation_answer(
    answer_tx: &mpsc::Sender<bool>,
    answer: bool,
    status: &mut String,
) {
    if let Err(err) = answer_tx.try_send(answer) {
        tracing::warn!("dropping confirmation answer: {err}");
        *status = "Backend worker is not waiting for a confirmation".to_string();
    }
}
