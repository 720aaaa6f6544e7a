use serde::{de, Deserialize, Deserializer, Serialize};

use crate::domain::{UserId, UserRecord};

/// One page of `GET /users?page=N`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub total_pages: u32,
    pub data: Vec<RemoteUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteUser {
    #[serde(deserialize_with = "deserialize_user_id")]
    pub id: UserId,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl From<RemoteUser> for UserRecord {
    fn from(value: RemoteUser) -> Self {
        Self {
            id: value.id,
            display_name: value.first_name,
            email: value.email,
        }
    }
}

/// Body of `POST /users` and `PUT /users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpsertRequest {
    pub name: String,
    pub email: String,
}

/// Only the assigned id is read from a create response; the echoed fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedUserResponse {
    #[serde(deserialize_with = "deserialize_user_id")]
    pub id: UserId,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawUserId {
    Number(i64),
    Text(String),
}

/// Accepts both `"id": 7` and `"id": "7"`; reqres answers creates with the latter.
pub fn deserialize_user_id<'de, D>(deserializer: D) -> Result<UserId, D::Error>
where
    D: Deserializer<'de>,
{
    match RawUserId::deserialize(deserializer)? {
        RawUserId::Number(value) => Ok(UserId(value)),
        RawUserId::Text(text) => text
            .trim()
            .parse::<i64>()
            .map(UserId)
            .map_err(|_| de::Error::custom(format!("user id is not numeric: {text:?}"))),
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
