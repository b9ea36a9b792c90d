//! Scenario fixtures
//!
//! Request payloads used by the ordered steps. The defaults reproduce the
//! standard scenario; a YAML file may override any of them.

use serde::Deserialize;
use std::path::Path;

use crate::api::StoryPayload;
use crate::common::{Error, Result};

/// Payloads sent by the steps that carry a request body
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioFixtures {
    /// Body of the create step
    pub create: StoryPayload,
    /// Body of the edit step
    pub edit: StoryPayload,
    /// Body of the create-with-missing-fields step
    pub invalid_create: StoryPayload,
    /// Body of the edit-non-existing step
    pub edit_missing: StoryPayload,
}

impl Default for ScenarioFixtures {
    fn default() -> Self {
        Self {
            create: StoryPayload::new("New Story", "My first story"),
            edit: StoryPayload::new("Updated story title", "My first story"),
            invalid_create: StoryPayload::without_url("", ""),
            edit_missing: StoryPayload::new(
                "EditNonExistingStory",
                "Trying to edit a story that doesn't exist",
            ),
        }
    }
}

impl ScenarioFixtures {
    /// Load fixtures from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse fixtures '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
