//! Story harness - end-to-end tests for the Story Spoiler REST API
//!
//! Authenticates once, then runs an ordered create/edit/list/delete scenario
//! plus negative paths, asserting on status codes and response bodies.

pub mod api;
pub mod cli;
pub mod commands;
pub mod common;
pub mod testing;

// Re-export commonly used types for tests
pub use api::{Credentials, StoryClient, StoryPayload};
pub use common::{Error, Result};
pub use testing::{HarnessSettings, RunOptions, RunReport, StepPlan};
