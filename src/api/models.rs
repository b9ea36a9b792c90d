//! Wire types for the Story API

use serde::{Deserialize, Serialize};

/// Login credentials, serialized as the authentication request body
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields must be non-empty before a login is attempted
    pub fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Bearer token issued by the authentication endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Returns `None` for an empty or whitespace-only token
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionToken(<{} chars>)", self.0.len())
    }
}

/// Response body of the authentication endpoint
///
/// Only `accessToken` is consumed; other fields are ignored.
#[derive(Deserialize, Debug)]
pub struct LoginResponse {
    #[serde(rename = "accessToken")]
    pub access_token: Option<serde_json::Value>,
}

/// Request body for creating or editing a story
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct StoryPayload {
    #[serde(rename = "Title", alias = "title", default)]
    pub title: String,

    #[serde(rename = "Description", alias = "description", default)]
    pub description: String,

    /// Omitted from the request body when unset
    #[serde(
        rename = "Url",
        alias = "url",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,
}

impl StoryPayload {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: Some(String::new()),
        }
    }

    /// Payload with no `Url` field at all
    pub fn without_url(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: None,
        }
    }
}
