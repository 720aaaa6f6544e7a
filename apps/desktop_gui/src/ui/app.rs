use std::time::{Duration, Instant};

use client_core::{ControllerSnapshot, NotificationSeverity, NotificationState};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{UserId, UserRecord};
use tokio::sync::mpsc;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::{dispatch_backend_command, send_confirmation_answer};

pub const WINDOW_TITLE: &str = "CRUD App with API";

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct UserListApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    answer_tx: mpsc::Sender<bool>,

    users: Vec<UserRecord>,
    display_name_input: String,
    email_input: String,
    editing_target: Option<UserId>,
    notification: NotificationState,
    pending_confirmation: Option<String>,
    /// A `Tick` for the current notification is queued; cleared by the next snapshot.
    tick_sent: bool,

    loaded: bool,
    status: String,
}

impl UserListApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        answer_tx: mpsc::Sender<bool>,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            answer_tx,
            users: Vec::new(),
            display_name_input: String::new(),
            email_input: String::new(),
            editing_target: None,
            notification: NotificationState::default(),
            pending_confirmation: None,
            tick_sent: false,
            loaded: false,
            status: "Starting backend worker...".to_string(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Snapshot {
                    snapshot,
                    sync_form,
                } => self.apply_snapshot(snapshot, sync_form),
                UiEvent::ConfirmRequested { question } => {
                    self.pending_confirmation = Some(question);
                }
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(message) => {
                    tracing::error!("{message}");
                    self.status = message;
                }
            }
        }
    }

    fn apply_snapshot(&mut self, snapshot: ControllerSnapshot, sync_form: bool) {
        self.status = format!("{} users", snapshot.users.len());
        self.users = snapshot.users;
        if sync_form {
            self.display_name_input = snapshot.form.display_name_input;
            self.email_input = snapshot.form.email_input;
        }
        self.editing_target = snapshot.form.editing_target;
        self.notification = snapshot.notification;
        self.tick_sent = false;
        self.loaded = true;
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn answer_confirmation(&mut self, answer: bool) {
        self.pending_confirmation = None;
        send_confirmation_answer(&self.answer_tx, answer, &mut self.status);
    }

    fn dismiss_notification(&mut self) {
        self.notification.dismiss();
        self.tick_sent = false;
        self.dispatch(BackendCommand::DismissNotification);
    }

    /// Queues a single `Tick` once the notification timeout has run out and
    /// returns how long the toast still has before then.
    fn schedule_notification_tick(&mut self, now: Instant) -> Option<Duration> {
        let remaining = self.notification.remaining(now)?;
        if !remaining.is_zero() {
            return Some(remaining);
        }
        if !self.tick_sent {
            self.tick_sent = true;
            self.dispatch(BackendCommand::Tick);
        }
        None
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        let mut commands = Vec::new();

        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.display_name_input)
                    .hint_text("Enter name")
                    .desired_width(200.0),
            );
            ui.add(
                egui::TextEdit::singleline(&mut self.email_input)
                    .hint_text("Enter email")
                    .desired_width(240.0),
            );
        });

        ui.horizontal(|ui| {
            let editing = self.editing_target.is_some();
            if ui.button(submit_label(editing)).clicked() {
                commands.push(self.submit_command());
            }
            if editing && ui.button("Cancel").clicked() {
                commands.push(BackendCommand::CancelEdit);
            }
            if ui.button("Refresh").clicked() {
                commands.push(BackendCommand::Refresh);
            }
        });

        for cmd in commands {
            self.dispatch(cmd);
        }
    }

    fn submit_command(&self) -> BackendCommand {
        BackendCommand::Submit {
            display_name: self.display_name_input.clone(),
            email: self.email_input.clone(),
        }
    }

    fn show_user_list(&mut self, ui: &mut egui::Ui) {
        if self.users.is_empty() {
            ui.weak(empty_list_label(self.loaded));
            return;
        }

        let mut edit_request = None;
        let mut delete_request = None;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for user in &self.users {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(&user.display_name).strong());
                        ui.label(&user.email);
                        if self.editing_target == Some(user.id) {
                            ui.label(egui::RichText::new("editing").italics().weak());
                        }
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Delete").clicked() {
                                delete_request = Some(user.id);
                            }
                            if ui.button("Edit").clicked() {
                                edit_request = Some(user.clone());
                            }
                        });
                    });
                    ui.separator();
                }
            });

        if let Some(user) = edit_request {
            self.dispatch(BackendCommand::Edit(user));
        }
        if let Some(id) = delete_request {
            self.dispatch(BackendCommand::Delete(id));
        }
    }

    fn show_confirmation(&mut self, ctx: &egui::Context) {
        let Some(question) = self.pending_confirmation.clone() else {
            return;
        };

        let mut answer = None;
        egui::Window::new("Confirm")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(question);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        answer = Some(false);
                    }
                });
            });

        if let Some(answer) = answer {
            self.answer_confirmation(answer);
        }
    }

    fn show_notification(&mut self, ctx: &egui::Context) {
        if !self.notification.is_visible() {
            return;
        }

        let mut dismissed = false;
        egui::Area::new(egui::Id::new("notification_toast"))
            .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(16.0, -36.0))
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(toast_fill(self.notification.severity()))
                    .corner_radius(8.0)
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(self.notification.text())
                                    .color(egui::Color32::WHITE),
                            );
                            if ui.small_button("x").clicked() {
                                dismissed = true;
                            }
                        });
                    });
            });

        if dismissed {
            self.dismiss_notification();
        }
    }
}

impl eframe::App for UserListApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        // The worker hides the toast; it only learns time passed through ticks.
        let toast_left = self.schedule_notification_tick(Instant::now());

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.small(&self.status);
        });

        let modal_open = self.pending_confirmation.is_some();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!modal_open, |ui| {
                ui.heading(WINDOW_TITLE);
                ui.add_space(8.0);
                self.show_form(ui);
                ui.separator();
                self.show_user_list(ui);
            });
        });

        self.show_confirmation(ctx);
        self.show_notification(ctx);

        let repaint_after = toast_left.map_or(EVENT_POLL_INTERVAL, |left| {
            left.min(EVENT_POLL_INTERVAL)
        });
        ctx.request_repaint_after(repaint_after);
    }
}

pub fn submit_label(editing: bool) -> &'static str {
    if editing {
        "Update"
    } else {
        "Create"
    }
}

fn empty_list_label(loaded: bool) -> &'static str {
    if loaded {
        "No users"
    } else {
        "Loading users..."
    }
}

fn toast_fill(severity: NotificationSeverity) -> egui::Color32 {
    match severity {
        NotificationSeverity::Success => egui::Color32::from_rgb(46, 125, 50),
    }
}
