//! Credential provider
//!
//! Exchanges a username and password for a bearer token. Any failure here is
//! fatal for the run: no step may execute without a token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::common::config::HttpConfig;
use crate::common::{truncate_body, Error, Result};

use super::client::join_url;
use super::models::{Credentials, LoginResponse, SessionToken};

/// Path of the login endpoint
pub const AUTHENTICATION_PATH: &str = "/api/User/Authentication";

/// Source of bearer tokens for a test run
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Obtain a fresh token for these credentials
    async fn authenticate(&self, credentials: &Credentials) -> Result<SessionToken>;
}

/// Credential provider backed by the API's login endpoint
pub struct LoginEndpoint {
    url: String,
    http: reqwest::Client,
}

impl LoginEndpoint {
    /// The login call is issued without any authorization header
    pub fn new(base_url: &str, config: &HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http = builder
            .build()
            .map_err(|e| Error::Authentication(format!("failed to build login client: {}", e)))?;

        Ok(Self {
            url: join_url(base_url, AUTHENTICATION_PATH),
            http,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CredentialProvider for LoginEndpoint {
    async fn authenticate(&self, credentials: &Credentials) -> Result<SessionToken> {
        if !credentials.is_complete() {
            return Err(Error::Authentication(
                "username and password must not be empty".to_string(),
            ));
        }

        tracing::debug!(url = %self.url, username = %credentials.username, "Requesting access token");

        let response = self
            .http
            .post(&self.url)
            .json(credentials)
            .send()
            .await
            .map_err(|e| Error::Authentication(format!("login request to {} failed: {}", self.url, e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            Error::Authentication(format!("failed to read login response body: {}", e))
        })?;

        let token = parse_token(status, &body)?;
        tracing::info!(username = %credentials.username, "Authenticated");
        Ok(token)
    }
}

/// Extract the access token from a login response
pub fn parse_token(status: StatusCode, body: &str) -> Result<SessionToken> {
    if !status.is_success() {
        return Err(Error::Authentication(format!(
            "login returned {}. Response: {}",
            status,
            truncate_body(body, 200)
        )));
    }

    if body.trim().is_empty() {
        return Err(Error::Authentication(
            "login response body is empty".to_string(),
        ));
    }

    let login: LoginResponse = serde_json::from_str(body)
        .map_err(|e| Error::Authentication(format!("login response is not valid JSON: {}", e)))?;

    let token = match login.access_token {
        Some(serde_json::Value::String(token)) => token,
        Some(other) => {
            return Err(Error::Authentication(format!(
                "accessToken is not a string: {}",
                other
            )))
        }
        None => {
            return Err(Error::Authentication(
                "login response has no accessToken field".to_string(),
            ))
        }
    };

    SessionToken::new(token)
        .ok_or_else(|| Error::Authentication("accessToken is empty".to_string()))
}
