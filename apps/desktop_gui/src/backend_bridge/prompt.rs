//! Delete confirmation answered by the UI thread.

use async_trait::async_trait;
use client_core::ConfirmPrompt;
use crossbeam_channel::Sender;
use tokio::sync::{mpsc, Mutex};
use tracing::warn;

use crate::controller::events::UiEvent;

/// Asks the UI to render the yes/no dialog and suspends until it answers.
/// A closed answer channel counts as "no".
pub struct ChannelPrompt {
    ui_tx: Sender<UiEvent>,
    answers: Mutex<mpsc::Receiver<bool>>,
}

impl ChannelPrompt {
    pub fn new(ui_tx: Sender<UiEvent>, answers: mpsc::Receiver<bool>) -> Self {
        Self {
            ui_tx,
            answers: Mutex::new(answers),
        }
    }
}

#[async_trait]
impl ConfirmPrompt for ChannelPrompt {
    async fn confirm(&self, question: &str) -> bool {
        let mut answers = self.answers.lock().await;
        // Answers left over from a dialog that was never asked for.
        while answers.try_recv().is_ok() {}

        if let Err(err) = self.ui_tx.try_send(UiEvent::ConfirmRequested {
            question: question.to_string(),
        }) {
            warn!("could not show confirmation dialog: {err}");
            return false;
        }

        answers.recv().await.unwrap_or(false)
    }
}
