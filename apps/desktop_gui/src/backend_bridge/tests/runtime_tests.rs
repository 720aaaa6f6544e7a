use super::*;

use std::sync::Mutex;

use async_trait::async_trait;
use client_core::{Outcome, RequestFailed};
use shared::{
    domain::{UserId, UserRecord},
    error::Operation,
};

#[derive(Default)]
struct InMemoryDirectory {
    next_id: Mutex<i64>,
    deleted: Mutex<Vec<UserId>>,
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn list_users(&self, _page: u32) -> Result<Vec<UserRecord>, RequestFailed> {
        Ok(vec![UserRecord::new(UserId(1), "Ann", "a@x.com")])
    }

    async fn create_user(
        &self,
        _display_name: &str,
        _email: &str,
    ) -> Result<UserId, RequestFailed> {
        let mut next_id = self.next_id.lock().expect("lock");
        *next_id += 1;
        Ok(UserId(100 + *next_id))
    }

    async fn update_user(
        &self,
        _id: UserId,
        _display_name: &str,
        _email: &str,
    ) -> Result<(), RequestFailed> {
        Err(RequestFailed::new(Operation::UpdateUser, "HTTP 503"))
    }

    async fn delete_user(&self, id: UserId) -> Result<(), RequestFailed> {
        self.deleted.lock().expect("lock").push(id);
        Ok(())
    }
}

async fn controller(confirm: bool) -> UserListController<InMemoryDirectory, impl ConfirmPrompt> {
    let mut controller =
        UserListController::new(InMemoryDirectory::default(), move |_: &str| confirm);
    assert_eq!(controller.initialize().await, Outcome::Applied);
    controller
}

fn submit(display_name: &str, email: &str) -> BackendCommand {
    BackendCommand::Submit {
        display_name: display_name.to_string(),
        email: email.to_string(),
    }
}

#[tokio::test]
async fn submit_creates_user_from_carried_inputs() {
    let mut controller = controller(true).await;

    assert_eq!(
        apply_command(&mut controller, submit("Bob", "b@x.com")).await,
        Publish::StateAndForm
    );

    let snapshot = controller.snapshot();
    assert_eq!(
        snapshot.users.last(),
        Some(&UserRecord::new(UserId(101), "Bob", "b@x.com"))
    );
    assert!(snapshot.form.display_name_input.is_empty());
    assert!(snapshot.notification.is_visible());
}

#[tokio::test]
async fn next_submit_sends_only_what_the_window_shows() {
    let mut controller = controller(true).await;
    apply_command(&mut controller, submit("Bob", "b@x.com")).await;

    // The form was cleared after the create; only the email was retyped.
    assert_eq!(
        apply_command(&mut controller, submit("", "c@x.com")).await,
        Publish::Nothing
    );
    assert_eq!(controller.users().len(), 2);

    assert_eq!(
        apply_command(&mut controller, submit("Cy", "c@x.com")).await,
        Publish::StateAndForm
    );
    assert_eq!(
        controller.users().last(),
        Some(&UserRecord::new(UserId(102), "Cy", "c@x.com"))
    );
}

#[tokio::test]
async fn edit_and_failed_update_keep_form() {
    let mut controller = controller(true).await;
    let ann = controller.users()[0].clone();

    assert_eq!(
        apply_command(&mut controller, BackendCommand::Edit(ann.clone())).await,
        Publish::StateAndForm
    );
    assert_eq!(
        apply_command(&mut controller, submit("Anna", "a@x.com")).await,
        Publish::Nothing
    );

    assert_eq!(controller.users(), &[ann]);
    assert_eq!(controller.form().editing_target, Some(UserId(1)));
    assert_eq!(controller.form().display_name_input, "Anna");
    assert!(!controller.notification().is_visible());

    apply_command(&mut controller, BackendCommand::CancelEdit).await;
    assert!(!controller.form().is_editing());
}

#[tokio::test]
async fn delete_follows_confirmation_answer() {
    let mut declined = controller(false).await;
    assert_eq!(
        apply_command(&mut declined, BackendCommand::Delete(UserId(1))).await,
        Publish::Nothing
    );
    assert_eq!(declined.users().len(), 1);

    let mut confirmed = controller(true).await;
    assert_eq!(
        apply_command(&mut confirmed, BackendCommand::Delete(UserId(1))).await,
        Publish::State
    );
    assert!(confirmed.users().is_empty());
    assert!(confirmed.notification().is_visible());

    assert_eq!(
        apply_command(&mut confirmed, BackendCommand::DismissNotification).await,
        Publish::State
    );
    assert!(!confirmed.notification().is_visible());
}

#[tokio::test]
async fn tick_publishes_only_when_notification_expires() {
    let mut controller = controller(true).await;
    assert_eq!(
        apply_command(&mut controller, BackendCommand::Tick).await,
        Publish::Nothing
    );

    controller.create("Bob", "b@x.com").await;
    assert_eq!(
        apply_command(&mut controller, BackendCommand::Tick).await,
        Publish::Nothing
    );
    assert!(controller.tick(Instant::now() + client_core::NOTIFICATION_TIMEOUT));
}
