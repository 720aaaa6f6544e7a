//! Runtime bridge between UI command queue and backend event intake.

use std::{thread, time::Instant};

use client_core::{
    ClientSettings, ConfirmPrompt, Outcome, ReqresClient, UserDirectory, UserListController,
};
use crossbeam_channel::{Receiver, Sender};
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::backend_bridge::{commands::BackendCommand, prompt::ChannelPrompt};
use crate::controller::events::UiEvent;

pub fn launch(
    settings: ClientSettings,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    answer_rx: mpsc::Receiver<bool>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let directory = match ReqresClient::new(&settings) {
                Ok(directory) => directory,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(format!(
                        "backend worker startup failure: {err:#}"
                    )));
                    error!("failed to build user directory client: {err:#}");
                    return;
                }
            };
            info!(
                base_url = directory.base_url(),
                page = settings.users_page,
                "backend worker ready"
            );
            let _ = ui_tx.try_send(UiEvent::Info(format!(
                "Loading users from {}",
                directory.base_url()
            )));

            let prompt = ChannelPrompt::new(ui_tx.clone(), answer_rx);
            let mut controller = UserListController::with_settings(directory, prompt, &settings);
            controller.initialize().await;
            publish_snapshot(&ui_tx, &controller, Publish::StateAndForm);

            while let Ok(cmd) = cmd_rx.recv() {
                let publish = apply_command(&mut controller, cmd).await;
                publish_snapshot(&ui_tx, &controller, publish);
            }
            info!("ui command queue closed; backend worker stopping");
        });
    })
}

/// What the UI needs to hear after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Publish {
    Nothing,
    /// List and notification changed; the UI keeps its own text inputs.
    State,
    /// The controller rewrote the form (edit, cancel, successful submit).
    StateAndForm,
}

/// Runs one UI command against the controller.
pub async fn apply_command<D, P>(
    controller: &mut UserListController<D, P>,
    cmd: BackendCommand,
) -> Publish
where
    D: UserDirectory,
    P: ConfirmPrompt,
{
    match cmd {
        BackendCommand::Refresh => {
            controller.initialize().await;
            Publish::State
        }
        BackendCommand::Submit {
            display_name,
            email,
        } => {
            controller.set_display_name_input(display_name);
            controller.set_email_input(email);
            match controller.submit().await {
                Outcome::Applied => Publish::StateAndForm,
                Outcome::Skipped | Outcome::Failed => Publish::Nothing,
            }
        }
        BackendCommand::Edit(target) => {
            controller.edit(&target);
            Publish::StateAndForm
        }
        BackendCommand::CancelEdit => {
            controller.cancel_edit();
            Publish::StateAndForm
        }
        BackendCommand::Delete(id) => match controller.delete(id).await {
            Outcome::Applied => Publish::State,
            Outcome::Skipped | Outcome::Failed => Publish::Nothing,
        },
        BackendCommand::DismissNotification => {
            controller.dismiss_notification();
            Publish::State
        }
        BackendCommand::Tick => {
            if controller.tick(Instant::now()) {
                Publish::State
            } else {
                Publish::Nothing
            }
        }
    }
}

fn publish_snapshot<D, P>(
    ui_tx: &Sender<UiEvent>,
    controller: &UserListController<D, P>,
    publish: Publish,
) where
    D: UserDirectory,
    P: ConfirmPrompt,
{
    if publish == Publish::Nothing {
        return;
    }
    let event = UiEvent::Snapshot {
        snapshot: controller.snapshot(),
        sync_form: publish == Publish::StateAndForm,
    };
    if let Err(err) = ui_tx.try_send(event) {
        tracing::warn!("dropping controller snapshot: {err}");
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
