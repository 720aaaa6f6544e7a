use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The remote call a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    FetchUsers,
    CreateUser,
    UpdateUser,
    DeleteUser,
}

impl Operation {
    pub fn label(self) -> &'static str {
        match self {
            Operation::FetchUsers => "fetch users",
            Operation::CreateUser => "create user",
            Operation::UpdateUser => "update user",
            Operation::DeleteUser => "delete user",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error document some directories return alongside a non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteErrorBody {
    pub error: String,
}

/// The single failure kind of every remote call: transport errors, error
/// statuses and undecodable bodies all end up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} request failed: {message}")]
pub struct RequestFailed {
    pub operation: Operation,
    pub message: String,
}

impl RequestFailed {
    pub fn new(operation: Operation, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}
