use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use shared::{
    domain::{UserId, UserRecord},
    error::{Operation, RemoteErrorBody},
    protocol::{CreatedUserResponse, UserPage, UserUpsertRequest},
};
use tracing::debug;

pub mod config;
pub mod controller;
pub mod notification;

pub use config::{load_settings, ClientSettings};
pub use controller::{ConfirmPrompt, ControllerSnapshot, FormState, Outcome, UserListController};
pub use notification::{NotificationSeverity, NotificationState, NOTIFICATION_TIMEOUT};
pub use shared::error::RequestFailed;

const API_KEY_HEADER: &str = "x-api-key";

/// The remote collaborator owning the user records.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn list_users(&self, page: u32) -> std::result::Result<Vec<UserRecord>, RequestFailed>;
    async fn create_user(
        &self,
        display_name: &str,
        email: &str,
    ) -> std::result::Result<UserId, RequestFailed>;
    async fn update_user(
        &self,
        id: UserId,
        display_name: &str,
        email: &str,
    ) -> std::result::Result<(), RequestFailed>;
    async fn delete_user(&self, id: UserId) -> std::result::Result<(), RequestFailed>;
}

#[async_trait]
impl<T> UserDirectory for Arc<T>
where
    T: UserDirectory + ?Sized,
{
    async fn list_users(&self, page: u32) -> std::result::Result<Vec<UserRecord>, RequestFailed> {
        (**self).list_users(page).await
    }

    async fn create_user(
        &self,
        display_name: &str,
        email: &str,
    ) -> std::result::Result<UserId, RequestFailed> {
        (**self).create_user(display_name, email).await
    }

    async fn update_user(
        &self,
        id: UserId,
        display_name: &str,
        email: &str,
    ) -> std::result::Result<(), RequestFailed> {
        (**self).update_user(id, display_name, email).await
    }

    async fn delete_user(&self, id: UserId) -> std::result::Result<(), RequestFailed> {
        (**self).delete_user(id).await
    }
}

/// `UserDirectory` over the reqres.in style REST API.
pub struct ReqresClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ReqresClient {
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        let base_url = config::normalize_base_url(&settings.api_base_url)?;
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            http,
            base_url,
            api_key: settings.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{path}", self.base_url));
        match &self.api_key {
            Some(key) => builder.header(API_KEY_HEADER, key),
            None => builder,
        }
    }

    async fn send(
        &self,
        operation: Operation,
        builder: RequestBuilder,
    ) -> std::result::Result<Response, RequestFailed> {
        let res = builder
            .send()
            .await
            .map_err(|err| RequestFailed::new(operation, err.to_string()))?;
        let status = res.status();
        debug!(operation = %operation, %status, "user directory responded");
        if status.is_success() {
            return Ok(res);
        }

        let detail = match res.json::<RemoteErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string(),
        };
        Err(RequestFailed::new(
            operation,
            format!("HTTP {}: {detail}", status.as_u16()),
        ))
    }
}

#[async_trait]
impl UserDirectory for ReqresClient {
    async fn list_users(&self, page: u32) -> std::result::Result<Vec<UserRecord>, RequestFailed> {
        let operation = Operation::FetchUsers;
        let res = self
            .send(
                operation,
                self.request(Method::GET, "/users").query(&[("page", page)]),
            )
            .await?;
        let body: UserPage = res
            .json()
            .await
            .map_err(|err| RequestFailed::new(operation, err.to_string()))?;
        Ok(body.data.into_iter().map(UserRecord::from).collect())
    }

    async fn create_user(
        &self,
        display_name: &str,
        email: &str,
    ) -> std::result::Result<UserId, RequestFailed> {
        let operation = Operation::CreateUser;
        let res = self
            .send(
                operation,
                self.request(Method::POST, "/users")
                    .json(&upsert_body(display_name, email)),
            )
            .await?;
        let body: CreatedUserResponse = res
            .json()
            .await
            .map_err(|err| RequestFailed::new(operation, err.to_string()))?;
        Ok(body.id)
    }

    async fn update_user(
        &self,
        id: UserId,
        display_name: &str,
        email: &str,
    ) -> std::result::Result<(), RequestFailed> {
        self.send(
            Operation::UpdateUser,
            self.request(Method::PUT, &format!("/users/{id}"))
                .json(&upsert_body(display_name, email)),
        )
        .await?;
        Ok(())
    }

    async fn delete_user(&self, id: UserId) -> std::result::Result<(), RequestFailed> {
        self.send(
            Operation::DeleteUser,
            self.request(Method::DELETE, &format!("/users/{id}")),
        )
        .await?;
        Ok(())
    }
}

fn upsert_body(display_name: &str, email: &str) -> UserUpsertRequest {
    UserUpsertRequest {
        name: display_name.to_string(),
        email: email.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
