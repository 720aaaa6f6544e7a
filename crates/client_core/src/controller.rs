//! In-memory user list plus the create/edit/update/delete flow against a `UserDirectory`.

use std::time::Instant;

use async_trait::async_trait;
use shared::domain::{UserId, UserRecord};
use tracing::{debug, error, info};

use crate::{
    config::{ClientSettings, DEFAULT_USERS_PAGE},
    notification::{NotificationSeverity, NotificationState},
    UserDirectory,
};

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this user?";
pub const USER_CREATED: &str = "User created successfully!";
pub const USER_UPDATED: &str = "User updated successfully!";
pub const USER_DELETED: &str = "User deleted successfully!";

/// Yes/no decision requested before a destructive call.
#[async_trait]
pub trait ConfirmPrompt: Send + Sync {
    async fn confirm(&self, question: &str) -> bool;
}

#[async_trait]
impl<F> ConfirmPrompt for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    async fn confirm(&self, question: &str) -> bool {
        self(question)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub display_name_input: String,
    pub email_input: String,
    pub editing_target: Option<UserId>,
}

impl FormState {
    pub fn is_editing(&self) -> bool {
        self.editing_target.is_some()
    }

    fn clear(&mut self) {
        self.display_name_input.clear();
        self.email_input.clear();
        self.editing_target = None;
    }
}

/// What an operation did. Failures are already logged; callers only need this for bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Preconditions unmet or confirmation declined; nothing was sent.
    Skipped,
    Applied,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSnapshot {
    pub users: Vec<UserRecord>,
    pub form: FormState,
    pub notification: NotificationState,
}

pub struct UserListController<D, P> {
    directory: D,
    prompt: P,
    users_page: u32,
    users: Vec<UserRecord>,
    form: FormState,
    notification: NotificationState,
}

impl<D, P> UserListController<D, P>
where
    D: UserDirectory,
    P: ConfirmPrompt,
{
    pub fn new(directory: D, prompt: P) -> Self {
        Self {
            directory,
            prompt,
            users_page: DEFAULT_USERS_PAGE,
            users: Vec::new(),
            form: FormState::default(),
            notification: NotificationState::default(),
        }
    }

    pub fn with_settings(directory: D, prompt: P, settings: &ClientSettings) -> Self {
        let mut controller = Self::new(directory, prompt);
        controller.users_page = settings.users_page;
        controller
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn notification(&self) -> &NotificationState {
        &self.notification
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            users: self.users.clone(),
            form: self.form.clone(),
            notification: self.notification.clone(),
        }
    }

    /// Loads the configured page. A failed load keeps whatever list was there.
    pub async fn initialize(&mut self) -> Outcome {
        match self.directory.list_users(self.users_page).await {
            Ok(users) => {
                info!(page = self.users_page, count = users.len(), "loaded users");
                self.users = users;
                Outcome::Applied
            }
            Err(err) => {
                error!(page = self.users_page, "error fetching users: {err}");
                Outcome::Failed
            }
        }
    }

    pub fn set_display_name_input(&mut self, value: impl Into<String>) {
        self.form.display_name_input = value.into();
    }

    pub fn set_email_input(&mut self, value: impl Into<String>) {
        self.form.email_input = value.into();
    }

    /// Update while a record is being edited, create otherwise.
    pub async fn submit(&mut self) -> Outcome {
        let display_name = self.form.display_name_input.clone();
        let email = self.form.email_input.clone();
        if self.form.is_editing() {
            self.update(&display_name, &email).await
        } else {
            self.create(&display_name, &email).await
        }
    }

    pub async fn create(&mut self, display_name: &str, email: &str) -> Outcome {
        if display_name.is_empty() || email.is_empty() {
            return Outcome::Skipped;
        }

        match self.directory.create_user(display_name, email).await {
            Ok(id) => {
                info!(user_id = %id, "created user");
                self.users.push(UserRecord::new(id, display_name, email));
                self.form.display_name_input.clear();
                self.form.email_input.clear();
                self.notify(USER_CREATED);
                Outcome::Applied
            }
            Err(err) => {
                error!("error creating user: {err}");
                Outcome::Failed
            }
        }
    }

    pub fn edit(&mut self, target: &UserRecord) {
        self.form.display_name_input = target.display_name.clone();
        self.form.email_input = target.email.clone();
        self.form.editing_target = Some(target.id);
    }

    pub fn cancel_edit(&mut self) {
        self.form.clear();
    }

    pub async fn update(&mut self, display_name: &str, email: &str) -> Outcome {
        let Some(target) = self.form.editing_target else {
            return Outcome::Skipped;
        };
        if display_name.is_empty() || email.is_empty() {
            return Outcome::Skipped;
        }

        match self.directory.update_user(target, display_name, email).await {
            Ok(()) => {
                match self.users.iter_mut().find(|user| user.id == target) {
                    Some(user) => {
                        user.display_name = display_name.to_string();
                        user.email = email.to_string();
                    }
                    None => debug!(user_id = %target, "updated user is no longer listed"),
                }
                info!(user_id = %target, "updated user");
                self.form.clear();
                self.notify(USER_UPDATED);
                Outcome::Applied
            }
            Err(err) => {
                error!(user_id = %target, "error updating user: {err}");
                Outcome::Failed
            }
        }
    }

    pub async fn delete(&mut self, id: UserId) -> Outcome {
        if !self.prompt.confirm(DELETE_CONFIRMATION).await {
            debug!(user_id = %id, "delete declined");
            return Outcome::Skipped;
        }

        match self.directory.delete_user(id).await {
            Ok(()) => {
                self.users.retain(|user| user.id != id);
                info!(user_id = %id, "deleted user");
                self.notify(USER_DELETED);
                Outcome::Applied
            }
            Err(err) => {
                error!(user_id = %id, "error deleting user: {err}");
                Outcome::Failed
            }
        }
    }

    pub fn dismiss_notification(&mut self) {
        self.notification.dismiss();
    }

    /// Returns true when the notification timed out on this tick.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.notification.tick(now)
    }

    fn notify(&mut self, text: &str) {
        self.notification
            .show(text, NotificationSeverity::Success, Instant::now());
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
