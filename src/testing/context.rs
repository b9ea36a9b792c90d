//! Scenario state shared between ordered steps
//!
//! The context is passed explicitly (`&mut`) into each step, so only one
//! step can write to it at a time.

use crate::common::{Error, Result};

/// Mutable state carried across the steps of one run
#[derive(Debug, Default)]
pub struct ScenarioContext {
    created_story_id: Option<String>,
}

impl ScenarioContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the id returned by a successful create
    pub fn record_story_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        tracing::debug!(story_id = %id, "Recorded created story id");
        self.created_story_id = Some(id);
    }

    /// The recorded id, if any
    pub fn created_story_id(&self) -> Option<&str> {
        self.created_story_id.as_deref()
    }

    /// The recorded id, or a failure attributed to `step`
    pub fn require_story_id(&self, step: &str) -> Result<&str> {
        self.created_story_id()
            .ok_or_else(|| Error::MissingStoryId(step.to_string()))
    }
}
