//! Story API access
//!
//! The credential provider obtains a bearer token; the client factory wraps
//! it into a [`StoryClient`] used by every scenario step.

pub mod auth;
pub mod client;
pub mod models;

pub use auth::{CredentialProvider, LoginEndpoint};
pub use client::{ApiResponse, StoryClient};
pub use models::{Credentials, SessionToken, StoryPayload};
