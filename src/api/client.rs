//! Authenticated Story API client
//!
//! Every request issued through a [`StoryClient`] carries the run's bearer
//! token. The client is built once per run and dropped when the sequence
//! finishes, which releases its pooled connections.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, StatusCode, Url};

use crate::common::config::HttpConfig;
use crate::common::{truncate_body, Error, Result};

use super::models::{SessionToken, StoryPayload};

pub const CREATE_PATH: &str = "/api/Story/Create";
pub const EDIT_PATH: &str = "/api/Story/Edit";
pub const LIST_PATH: &str = "/api/Story/All";
pub const DELETE_PATH: &str = "/api/Story/Delete";

/// Raw status and body of an API call
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the body holds anything besides whitespace
    pub fn has_body(&self) -> bool {
        !self.body.trim().is_empty()
    }

    /// Short form of the body for failure messages
    pub fn body_excerpt(&self) -> String {
        if self.has_body() {
            truncate_body(&self.body, 300)
        } else {
            "<empty>".to_string()
        }
    }
}

/// HTTP client pre-configured with the bearer token
pub struct StoryClient {
    base_url: String,
    http: reqwest::Client,
}

impl StoryClient {
    /// Build a client that attaches `token` to every request
    pub fn build(base_url: &str, token: &SessionToken, config: &HttpConfig) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
            .map_err(|_| {
                Error::Authentication("access token contains invalid header characters".to_string())
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.as_str());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        tracing::debug!(base_url, "Built authenticated client");

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /api/Story/Create`
    pub async fn create_story(&self, payload: &StoryPayload) -> Result<ApiResponse> {
        let url = self.endpoint_url(CREATE_PATH, None)?;
        self.execute(Method::POST, url, Some(payload)).await
    }

    /// `PUT /api/Story/Edit/{id}`
    pub async fn edit_story(&self, id: &str, payload: &StoryPayload) -> Result<ApiResponse> {
        let url = self.endpoint_url(EDIT_PATH, Some(id))?;
        self.execute(Method::PUT, url, Some(payload)).await
    }

    /// `GET /api/Story/All`
    pub async fn list_stories(&self) -> Result<ApiResponse> {
        let url = self.endpoint_url(LIST_PATH, None)?;
        self.execute(Method::GET, url, None).await
    }

    /// `DELETE /api/Story/Delete/{id}`
    pub async fn delete_story(&self, id: &str) -> Result<ApiResponse> {
        let url = self.endpoint_url(DELETE_PATH, Some(id))?;
        self.execute(Method::DELETE, url, None).await
    }

    /// Resolve an endpoint, appending `id` as a single percent-encoded segment
    pub fn endpoint_url(&self, path: &str, id: Option<&str>) -> Result<Url> {
        let joined = join_url(&self.base_url, path);
        let invalid = |reason: String| Error::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };

        let mut url = Url::parse(&joined).map_err(|e| invalid(e.to_string()))?;
        if let Some(id) = id {
            url.path_segments_mut()
                .map_err(|_| invalid("URL cannot carry a path".to_string()))?
                .push(id);
        }
        Ok(url)
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<&StoryPayload>,
    ) -> Result<ApiResponse> {
        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(payload) = body {
            request = request.json(payload);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::http(&method, url.as_str(), e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::http(&method, url.as_str(), e))?;

        tracing::debug!(%method, %url, status = status.as_u16(), bytes = body.len(), "Response received");

        Ok(ApiResponse { status, body })
    }
}

impl Drop for StoryClient {
    fn drop(&mut self) {
        tracing::debug!(base_url = %self.base_url, "Released authenticated client");
    }
}

/// Append an absolute endpoint path to a base URL
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
